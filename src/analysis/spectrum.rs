use rustfft::{num_complex::Complex, FftPlanner};
use serde::{Deserialize, Serialize};

use crate::data::error::{AnalysisError, Result};
use crate::data::model::{Harmonic, HarmonicSet, SpectrumResult};

/// Number of harmonics reported after the first peak.
pub const HARMONIC_COUNT: usize = 3;

/// How the spectrum of a real signal is laid out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformConvention {
    /// All `N` complex bins on the standard FFT frequency grid
    /// (positive frequencies first, then negative ones).
    #[default]
    Full,
    /// Bins `0..=N/2` only; bin `k` sits at `k * sample_rate / N`.
    Real,
}

impl TransformConvention {
    pub const ALL: [TransformConvention; 2] = [TransformConvention::Full, TransformConvention::Real];

    pub fn label(self) -> &'static str {
        match self {
            TransformConvention::Full => "Full (complex)",
            TransformConvention::Real => "Real (half)",
        }
    }
}

/// Frequency of bin `k` on the standard FFT grid of length `n`.
fn fft_frequency(k: usize, n: usize, sample_rate: f64) -> f64 {
    let step = sample_rate / n as f64;
    if k < n.div_ceil(2) {
        k as f64 * step
    } else {
        (k as f64 - n as f64) * step
    }
}

/// Magnitude spectrum of `signal`, unnormalised.
pub fn compute_spectrum(
    signal: &[f64],
    sample_rate: f64,
    convention: TransformConvention,
) -> Result<SpectrumResult> {
    if signal.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(AnalysisError::InvalidSampleRate(sample_rate));
    }

    let n = signal.len();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&v| Complex::new(v, 0.0)).collect();
    fft.process(&mut buffer);

    let bins = match convention {
        TransformConvention::Full => n,
        TransformConvention::Real => n / 2 + 1,
    };
    let frequencies = (0..bins)
        .map(|k| match convention {
            TransformConvention::Full => fft_frequency(k, n, sample_rate),
            TransformConvention::Real => k as f64 * sample_rate / n as f64,
        })
        .collect();
    let magnitudes = buffer.iter().take(bins).map(|c| c.norm()).collect();

    Ok(SpectrumResult {
        frequencies,
        magnitudes,
    })
}

/// Indices of local maxima in `values`, ascending.
///
/// A sample is a peak when it is strictly greater than its neighbours; a flat
/// run counts once, at its middle (rounded down). The first and last sample
/// are never peaks. Peaks lower than `min_height` are dropped, and of two
/// peaks closer than `min_distance` samples only the higher one survives.
pub fn find_peaks(values: &[f64], min_height: f64, min_distance: usize) -> Vec<usize> {
    let mut peaks = Vec::new();
    if values.len() < 3 {
        return peaks;
    }

    let last = values.len() - 1;
    let mut i = 1;
    while i < last {
        if values[i - 1] < values[i] {
            let mut ahead = i + 1;
            while ahead < last && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }

    peaks.retain(|&p| values[p] >= min_height);

    if min_distance > 1 && peaks.len() > 1 {
        let mut keep = vec![true; peaks.len()];
        let mut by_height: Vec<usize> = (0..peaks.len()).collect();
        // Stable sort keeps the left peak first among equal heights.
        by_height.sort_by(|&a, &b| values[peaks[b]].total_cmp(&values[peaks[a]]));
        for &candidate in &by_height {
            if !keep[candidate] {
                continue;
            }
            for (other, slot) in keep.iter_mut().enumerate() {
                if other != candidate && peaks[candidate].abs_diff(peaks[other]) < min_distance {
                    *slot = false;
                }
            }
        }
        peaks = peaks
            .into_iter()
            .zip(keep)
            .filter_map(|(p, k)| k.then_some(p))
            .collect();
    }

    peaks
}

/// The three peaks following the first detected one.
pub fn extract_harmonics(spectrum: &SpectrumResult) -> HarmonicSet {
    let peaks = find_peaks(&spectrum.magnitudes, 0.0, 1);
    log::debug!("{} spectral peaks found", peaks.len());
    peaks
        .into_iter()
        .skip(1)
        .take(HARMONIC_COUNT)
        .map(|index| Harmonic {
            index,
            frequency: spectrum.frequencies[index],
            magnitude: spectrum.magnitudes[index],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sinusoid(freq: f64, amplitude: f64, sample_rate: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|k| amplitude * (2.0 * PI * freq * k as f64 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn full_grid_matches_fftfreq() {
        let spectrum = compute_spectrum(&[0.0; 5], 5.0, TransformConvention::Full).unwrap();
        assert_eq!(spectrum.frequencies, vec![0.0, 1.0, 2.0, -2.0, -1.0]);
        let spectrum = compute_spectrum(&[0.0; 4], 4.0, TransformConvention::Full).unwrap();
        assert_eq!(spectrum.frequencies, vec![0.0, 1.0, -2.0, -1.0]);
    }

    #[test]
    fn real_grid_is_half_spectrum() {
        let spectrum = compute_spectrum(&[1.0; 8], 800.0, TransformConvention::Real).unwrap();
        assert_eq!(spectrum.magnitudes.len(), 5);
        assert_eq!(spectrum.frequencies, vec![0.0, 100.0, 200.0, 300.0, 400.0]);
        // constant input: everything in DC
        assert!((spectrum.magnitudes[0] - 8.0).abs() < 1e-9);
        assert!(spectrum.magnitudes[1..].iter().all(|m| m.abs() < 1e-9));
    }

    #[test]
    fn sinusoid_peaks_at_injected_frequency() {
        let sample_rate = 1600.0;
        let n = 320;
        let resolution = sample_rate / n as f64;
        let signal = sinusoid(50.0, 2.0, sample_rate, n);

        for convention in TransformConvention::ALL {
            let spectrum = compute_spectrum(&signal, sample_rate, convention).unwrap();
            let (freq, magnitude) = spectrum.dominant().unwrap();
            assert!((freq - 50.0).abs() <= resolution, "{convention:?}: {freq}");
            // unnormalised: amplitude * N / 2
            assert!((magnitude - 320.0).abs() < 1e-6);
        }
    }

    #[test]
    fn off_bin_sinusoid_within_one_bin() {
        let sample_rate = 1000.0;
        let n = 256;
        let resolution = sample_rate / n as f64;
        let signal = sinusoid(123.0, 1.0, sample_rate, n);
        let spectrum = compute_spectrum(&signal, sample_rate, TransformConvention::Real).unwrap();
        let (freq, _) = spectrum.dominant().unwrap();
        assert!((freq - 123.0).abs() <= resolution);
    }

    #[test]
    fn empty_signal_fails() {
        assert!(matches!(
            compute_spectrum(&[], 100.0, TransformConvention::Full),
            Err(AnalysisError::EmptySeries)
        ));
    }

    #[test]
    fn bad_sample_rate_fails() {
        for rate in [0.0, -5.0, f64::NAN] {
            assert!(matches!(
                compute_spectrum(&[1.0, 2.0], rate, TransformConvention::Real),
                Err(AnalysisError::InvalidSampleRate(_))
            ));
        }
    }

    #[test]
    fn peaks_are_strict_local_maxima() {
        let values = [0.0, 1.0, 0.0, 5.0, 0.0, 2.0, 0.0];
        assert_eq!(find_peaks(&values, 0.0, 1), vec![1, 3, 5]);
    }

    #[test]
    fn edges_are_never_peaks() {
        assert_eq!(find_peaks(&[9.0, 1.0, 9.0], 0.0, 1), Vec::<usize>::new());
        assert!(find_peaks(&[1.0, 2.0], 0.0, 1).is_empty());
    }

    #[test]
    fn plateau_counts_once_at_middle() {
        let values = [0.0, 2.0, 2.0, 2.0, 2.0, 0.0, 1.0, 1.0, 3.0];
        // 1..=4 is a plateau, 6..=7 rises further so it is not a peak
        assert_eq!(find_peaks(&values, 0.0, 1), vec![2]);
    }

    #[test]
    fn height_threshold_filters() {
        let values = [0.0, -1.0, -3.0, -1.0, -2.0, 4.0, 0.0];
        assert_eq!(find_peaks(&values, 0.0, 1), vec![5]);
    }

    #[test]
    fn distance_keeps_higher_peak() {
        let values = [0.0, 3.0, 0.0, 5.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0, 0.0];
        assert_eq!(find_peaks(&values, 0.0, 3), vec![3, 9]);
    }

    #[test]
    fn harmonics_skip_first_peak() {
        let spectrum = SpectrumResult {
            frequencies: (0..11).map(|k| k as f64 * 10.0).collect(),
            magnitudes: vec![0.0, 5.0, 0.0, 3.0, 0.0, 4.0, 0.0, 2.0, 0.0, 1.0, 0.0],
        };
        let harmonics = extract_harmonics(&spectrum);
        assert_eq!(harmonics.len(), 3);
        let indices: Vec<usize> = harmonics.iter().map(|h| h.index).collect();
        assert_eq!(indices, vec![3, 5, 7]);
        assert_eq!(harmonics[0].frequency, 30.0);
        assert_eq!(harmonics[1].magnitude, 4.0);
    }

    #[test]
    fn fewer_peaks_give_fewer_harmonics() {
        let spectrum = SpectrumResult {
            frequencies: (0..5).map(|k| k as f64).collect(),
            magnitudes: vec![0.0, 2.0, 0.0, 1.0, 0.0],
        };
        let harmonics = extract_harmonics(&spectrum);
        assert_eq!(harmonics.len(), 1);
        assert_eq!(harmonics[0].index, 3);

        let single = SpectrumResult {
            frequencies: vec![0.0, 1.0, 2.0],
            magnitudes: vec![0.0, 1.0, 0.0],
        };
        assert!(extract_harmonics(&single).is_empty());
        assert!(extract_harmonics(&SpectrumResult::default()).is_empty());
    }

    #[test]
    fn harmonics_of_real_signal_never_exceed_three() {
        let sample_rate = 1600.0;
        let n = 320;
        let signal: Vec<f64> = sinusoid(50.0, 1.0, sample_rate, n)
            .iter()
            .zip(sinusoid(150.0, 0.3, sample_rate, n))
            .zip(sinusoid(250.0, 0.2, sample_rate, n))
            .map(|((a, b), c)| a + b + c)
            .collect();
        let spectrum = compute_spectrum(&signal, sample_rate, TransformConvention::Full).unwrap();
        let peaks = find_peaks(&spectrum.magnitudes, 0.0, 1);
        let harmonics = extract_harmonics(&spectrum);
        assert!(harmonics.len() <= HARMONIC_COUNT);
        assert!(harmonics.iter().all(|h| h.index != peaks[0]));
    }
}
