use std::f64::consts::PI;
use std::io::{BufWriter, Write};

use anyhow::Context;

const SAMPLE_RATE_HZ: f64 = 1600.0;
const DURATION_S: usize = 10;
const FUNDAMENTAL_HZ: f64 = 50.0;
const START_OF_DAY_S: usize = 12 * 3600;

/// (harmonic order, amplitude, phase) of the voltage.
const VOLTAGE_HARMONICS: [(f64, f64, f64); 3] = [(1.0, 325.0, 0.0), (3.0, 18.0, 0.4), (5.0, 9.0, 1.1)];
/// Current amplitudes per harmonic order, lagging the voltage.
const CURRENT_HARMONICS: [(f64, f64, f64); 3] = [(1.0, 4.2, -0.5), (3.0, 0.9, -0.2), (5.0, 0.4, 0.6)];

fn waveform(t: f64, components: &[(f64, f64, f64)]) -> f64 {
    components
        .iter()
        .map(|&(order, amp, phase)| amp * (2.0 * PI * FUNDAMENTAL_HZ * order * t + phase).sin())
        .sum()
}

fn hms(seconds: usize) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// Logger output uses a decimal comma.
fn decimal_comma(value: f64) -> String {
    format!("{value:.4}").replace('.', ",")
}

/// Seeded Gaussian noise: splitmix64 draws, Box-Muller pairs.
struct Noise {
    state: u64,
    spare: Option<f64>,
}

impl Noise {
    fn seeded(seed: u64) -> Self {
        Self { state: seed, spare: None }
    }

    fn uniform(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        // 53 bits into (0, 1]
        ((z >> 11) + 1) as f64 / (1u64 << 53) as f64
    }

    /// Zero-mean sample with standard deviation `sigma`.
    fn sample(&mut self, sigma: f64) -> f64 {
        if let Some(z) = self.spare.take() {
            return sigma * z;
        }
        let radius = (-2.0 * self.uniform().ln()).sqrt();
        let angle = 2.0 * PI * self.uniform();
        self.spare = Some(radius * angle.sin());
        sigma * radius * angle.cos()
    }
}

fn main() -> anyhow::Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_measurements.txt".to_string());
    let mut noise = Noise::seeded(42);

    let n = DURATION_S * SAMPLE_RATE_HZ as usize;
    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    let mut out = BufWriter::new(file);

    for k in 0..n {
        let t = k as f64 / SAMPLE_RATE_HZ;
        let u = waveform(t, &VOLTAGE_HARMONICS) + noise.sample(1.5);
        let i = waveform(t, &CURRENT_HARMONICS) + noise.sample(0.02);
        writeln!(
            out,
            "{} {} {}",
            hms(START_OF_DAY_S + k / SAMPLE_RATE_HZ as usize),
            decimal_comma(u),
            decimal_comma(i)
        )?;
    }
    out.flush()?;

    println!("Wrote {n} samples ({DURATION_S} s at {SAMPLE_RATE_HZ} Hz) to {output_path}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_is_reproducible() {
        let a: Vec<f64> = {
            let mut n = Noise::seeded(7);
            (0..10).map(|_| n.sample(1.0)).collect()
        };
        let mut n = Noise::seeded(7);
        let b: Vec<f64> = (0..10).map(|_| n.sample(1.0)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn noise_has_requested_spread() {
        let mut noise = Noise::seeded(42);
        let draws: Vec<f64> = (0..20_000).map(|_| noise.sample(2.0)).collect();
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / draws.len() as f64;
        assert!(mean.abs() < 0.1, "{mean}");
        assert!((var.sqrt() - 2.0).abs() < 0.1, "{}", var.sqrt());
        assert!(draws.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn log_line_uses_decimal_comma() {
        assert_eq!(decimal_comma(-1.5), "-1,5000");
        assert_eq!(hms(START_OF_DAY_S + 61), "12:01:01");
    }
}
