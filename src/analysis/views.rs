use crate::config::{AnalysisConfig, CycleSelection};
use crate::data::error::{AnalysisError, Result};
use crate::data::model::{Channel, HarmonicSet, PlotData, PlotSeries, PlotStyle, PowerResult, SampleSeries};

use super::power::{analyze_power, instantaneous_power};
use super::spectrum::{compute_spectrum, extract_harmonics};

// ---------------------------------------------------------------------------
// The five charts offered by the shell
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Signals,
    Spectrum,
    InstantPower,
    Power,
    Harmonics,
}

impl ViewKind {
    pub const ALL: [ViewKind; 5] = [
        ViewKind::Signals,
        ViewKind::Spectrum,
        ViewKind::InstantPower,
        ViewKind::Power,
        ViewKind::Harmonics,
    ];

    pub fn button_label(self) -> &'static str {
        match self {
            ViewKind::Signals => "Plot signals",
            ViewKind::Spectrum => "Plot spectrum",
            ViewKind::InstantPower => "Plot instantaneous power",
            ViewKind::Power => "Plot power (P, Q, S)",
            ViewKind::Harmonics => "Plot harmonics",
        }
    }
}

/// A rendered view plus the figures it was built from, so the shell can
/// show and persist them without recomputing.
#[derive(Debug, Clone)]
pub struct View {
    pub plot: PlotData,
    pub power: Option<PowerResult>,
    pub harmonics: Option<HarmonicSet>,
}

impl View {
    fn plot(plot: PlotData) -> Self {
        Self {
            plot,
            power: None,
            harmonics: None,
        }
    }
}

pub fn build_view(kind: ViewKind, series: &SampleSeries, config: &AnalysisConfig) -> Result<View> {
    if series.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }
    match kind {
        ViewKind::Signals => signals_view(series, config).map(View::plot),
        ViewKind::Spectrum => spectrum_view(series, config).map(View::plot),
        ViewKind::InstantPower => instant_power_view(series, config).map(View::plot),
        ViewKind::Power => power_view(series, config),
        ViewKind::Harmonics => harmonics_view(series, config),
    }
}

// -- helpers --

fn select(values: &[f64], window: CycleSelection) -> Result<&[f64]> {
    let range = window.range(values.len());
    if range.is_empty() {
        return Err(AnalysisError::EmptySelection);
    }
    Ok(&values[range])
}

/// Points with x in seconds from the first sample.
fn time_points(values: &[f64], sample_rate: f64) -> Result<Vec<[f64; 2]>> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(AnalysisError::InvalidSampleRate(sample_rate));
    }
    Ok(values
        .iter()
        .enumerate()
        .map(|(k, &v)| [k as f64 / sample_rate, v])
        .collect())
}

fn channel_name(channel: Channel) -> &'static str {
    match channel {
        Channel::Voltage => "u",
        Channel::Current => "i",
    }
}

// -- views --

fn signals_view(series: &SampleSeries, config: &AnalysisConfig) -> Result<PlotData> {
    let voltage = series.voltages();
    let current = series.currents();
    let rate = config.sample_rate_hz;
    Ok(PlotData {
        title: format!("Signals ({})", config.signal_window.label()),
        x_label: "Time (s)".into(),
        y_label: "Signal".into(),
        style: PlotStyle::Line,
        series: vec![
            PlotSeries {
                name: "u(t)".into(),
                points: time_points(select(&voltage, config.signal_window)?, rate)?,
            },
            PlotSeries {
                name: "i(t)".into(),
                points: time_points(select(&current, config.signal_window)?, rate)?,
            },
        ],
    })
}

fn spectrum_view(series: &SampleSeries, config: &AnalysisConfig) -> Result<PlotData> {
    let signal = series.channel(config.channel);
    let spectrum = compute_spectrum(
        select(&signal, config.spectrum_window)?,
        config.sample_rate_hz,
        config.transform,
    )?;
    let title = match spectrum.dominant() {
        Some((freq, _)) => format!(
            "Spectrum of {}, strongest at {freq:.2} Hz",
            config.channel.label()
        ),
        None => format!("Spectrum of {}", config.channel.label()),
    };
    Ok(PlotData {
        title,
        x_label: "Frequency (Hz)".into(),
        y_label: "Amplitude".into(),
        style: PlotStyle::Line,
        series: vec![PlotSeries {
            name: format!("|{}(f)|", channel_name(config.channel).to_uppercase()),
            points: spectrum
                .frequencies
                .iter()
                .zip(&spectrum.magnitudes)
                .map(|(&f, &m)| [f, m])
                .collect(),
        }],
    })
}

fn instant_power_view(series: &SampleSeries, config: &AnalysisConfig) -> Result<PlotData> {
    let power = instantaneous_power(&series.voltages(), &series.currents())?;
    Ok(PlotData {
        title: "Instantaneous power".into(),
        x_label: "Time (s)".into(),
        y_label: "Instantaneous power p".into(),
        style: PlotStyle::Line,
        series: vec![PlotSeries {
            name: "p(t)".into(),
            points: time_points(&power, config.sample_rate_hz)?,
        }],
    })
}

fn power_view(series: &SampleSeries, config: &AnalysisConfig) -> Result<View> {
    let power = analyze_power(&series.voltages(), &series.currents())?;
    let rate = config.sample_rate_hz;
    let constant = |value: f64| time_points(&vec![value; series.len()], rate);
    let plot = PlotData {
        title: "Power".into(),
        x_label: "Time (s)".into(),
        y_label: "Power".into(),
        style: PlotStyle::Line,
        series: vec![
            PlotSeries {
                name: "Active power (P)".into(),
                points: constant(power.active)?,
            },
            PlotSeries {
                name: "Reactive power (Q)".into(),
                points: constant(power.reactive)?,
            },
            PlotSeries {
                name: "Apparent power (S)".into(),
                points: constant(power.apparent)?,
            },
        ],
    };
    Ok(View {
        plot,
        power: Some(power),
        harmonics: None,
    })
}

fn harmonics_view(series: &SampleSeries, config: &AnalysisConfig) -> Result<View> {
    let signal = series.channel(config.channel);
    let spectrum = compute_spectrum(
        select(&signal, config.harmonic_window)?,
        config.sample_rate_hz,
        config.transform,
    )?;
    let harmonics = extract_harmonics(&spectrum);
    let plot = PlotData {
        title: format!("Harmonics of {}", config.channel.label()),
        x_label: "Frequency (Hz)".into(),
        y_label: "Amplitude".into(),
        style: PlotStyle::Stem,
        series: vec![PlotSeries {
            name: "Harmonics".into(),
            points: harmonics.iter().map(|h| [h.frequency, h.magnitude]).collect(),
        }],
    };
    Ok(View {
        plot,
        power: None,
        harmonics: Some(harmonics),
    })
}
