use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sample – one line of the measurement log
// ---------------------------------------------------------------------------

/// A single measurement record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Seconds since midnight, `0` when the timestamp text was malformed.
    pub timestamp: u32,
    pub voltage: f64,
    pub current: f64,
}

// ---------------------------------------------------------------------------
// Channel – which measured signal an analysis runs on
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    #[default]
    Voltage,
    Current,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Voltage, Channel::Current];

    pub fn label(self) -> &'static str {
        match self {
            Channel::Voltage => "Voltage u(t)",
            Channel::Current => "Current i(t)",
        }
    }
}

// ---------------------------------------------------------------------------
// SampleSeries – the complete loaded log
// ---------------------------------------------------------------------------

/// All samples of one log file in line order. Never mutated after loading;
/// a new load builds a new series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSeries {
    samples: Vec<Sample>,
}

impl SampleSeries {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn timestamps(&self) -> Vec<u32> {
        self.samples.iter().map(|s| s.timestamp).collect()
    }

    pub fn voltages(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.voltage).collect()
    }

    pub fn currents(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.current).collect()
    }

    pub fn channel(&self, channel: Channel) -> Vec<f64> {
        match channel {
            Channel::Voltage => self.voltages(),
            Channel::Current => self.currents(),
        }
    }
}

// ---------------------------------------------------------------------------
// Analysis results
// ---------------------------------------------------------------------------

/// Aggregate power figures of a series.
///
/// `reactive` is the standard deviation of the instantaneous power, which is
/// not the textbook reactive power (that needs the phase between voltage and
/// current). The figure is kept as the tool has always reported it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerResult {
    pub active: f64,
    pub reactive: f64,
    pub apparent: f64,
}

impl fmt::Display for PowerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P = {:.4}, Q = {:.4}, S = {:.4}",
            self.active, self.reactive, self.apparent
        )
    }
}

/// Magnitude spectrum; `frequencies[i]` belongs to `magnitudes[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpectrumResult {
    pub frequencies: Vec<f64>,
    pub magnitudes: Vec<f64>,
}

impl SpectrumResult {
    /// Frequency and magnitude of the strongest non-negative frequency bin.
    pub fn dominant(&self) -> Option<(f64, f64)> {
        self.frequencies
            .iter()
            .zip(&self.magnitudes)
            .filter(|(f, _)| **f >= 0.0)
            .map(|(f, m)| (*f, *m))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Harmonic {
    /// Bin index in the spectrum the harmonic was found at.
    pub index: usize,
    pub frequency: f64,
    pub magnitude: f64,
}

/// At most three harmonics in ascending bin order.
pub type HarmonicSet = Vec<Harmonic>;

// ---------------------------------------------------------------------------
// PlotData – what the shell renders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotStyle {
    Line,
    Stem,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

/// A ready-to-draw chart: named (x, y) series plus axis labels.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub style: PlotStyle,
    pub series: Vec<PlotSeries>,
}

impl PlotData {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(timestamp: u32, voltage: f64, current: f64) -> Sample {
        Sample {
            timestamp,
            voltage,
            current,
        }
    }

    #[test]
    fn channel_selects_column() {
        let series = SampleSeries::new(vec![sample(1, 230.0, 1.5), sample(2, -230.0, -1.5)]);
        assert_eq!(series.channel(Channel::Voltage), vec![230.0, -230.0]);
        assert_eq!(series.channel(Channel::Current), vec![1.5, -1.5]);
        assert_eq!(series.timestamps(), vec![1, 2]);
    }

    #[test]
    fn dominant_ignores_negative_frequencies() {
        let spectrum = SpectrumResult {
            frequencies: vec![0.0, 50.0, -50.0],
            magnitudes: vec![1.0, 4.0, 9.0],
        };
        assert_eq!(spectrum.dominant(), Some((50.0, 4.0)));
        assert_eq!(SpectrumResult::default().dominant(), None);
    }

    #[test]
    fn power_result_display_uses_four_decimals() {
        let p = PowerResult {
            active: 1.0,
            reactive: 0.5,
            apparent: 1.118_034,
        };
        assert_eq!(p.to_string(), "P = 1.0000, Q = 0.5000, S = 1.1180");
    }
}
