use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::spectrum::TransformConvention;
use crate::data::model::Channel;

/// Settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "powerlog.json";
/// Environment variable overriding [`DEFAULT_CONFIG_FILE`].
pub const CONFIG_ENV_VAR: &str = "POWERLOG_CONFIG";

// ---------------------------------------------------------------------------
// Cycle selection – which part of the log an analysis looks at
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CycleSelection {
    All,
    FirstHalf,
    Range { start: usize, len: usize },
}

impl CycleSelection {
    /// Index range into a series of `total` samples, clamped to its bounds.
    /// May be empty.
    pub fn range(&self, total: usize) -> Range<usize> {
        match *self {
            CycleSelection::All => 0..total,
            CycleSelection::FirstHalf => 0..total / 2,
            CycleSelection::Range { start, len } => {
                let start = start.min(total);
                start..start.saturating_add(len).min(total)
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            CycleSelection::All => "all samples".to_string(),
            CycleSelection::FirstHalf => "first half".to_string(),
            CycleSelection::Range { start, len } => format!("{len} samples from #{start}"),
        }
    }
}

// ---------------------------------------------------------------------------
// AnalysisConfig
// ---------------------------------------------------------------------------

/// Dataset-specific parameters of the analyses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Sampling rate of the logger (1 / 0.000625 s by default).
    pub sample_rate_hz: f64,
    pub transform: TransformConvention,
    /// Signal analysed by the spectrum and harmonic views.
    pub channel: Channel,
    pub signal_window: CycleSelection,
    pub spectrum_window: CycleSelection,
    pub harmonic_window: CycleSelection,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 1600.0,
            transform: TransformConvention::Full,
            channel: Channel::Voltage,
            signal_window: CycleSelection::Range { start: 332, len: 80 },
            spectrum_window: CycleSelection::FirstHalf,
            harmonic_window: CycleSelection::All,
        }
    }
}

impl AnalysisConfig {
    /// Path of the settings file: `$POWERLOG_CONFIG` or `./powerlog.json`.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load settings; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing settings {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from [`Self::default_path`], falling back to defaults on error.
    pub fn load_or_default() -> Self {
        let path = Self::default_path();
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("using default settings: {e:#}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let text = serde_json::to_string_pretty(self).context("serializing settings")?;
        std::fs::write(path, text).with_context(|| format!("writing settings {}", path.display()))?;
        log::info!("saved settings to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.sample_rate_hz.is_finite() && self.sample_rate_hz > 0.0) {
            bail!("sample_rate_hz must be positive, got {}", self.sample_rate_hz);
        }
        for (name, window) in [
            ("signal_window", self.signal_window),
            ("spectrum_window", self.spectrum_window),
            ("harmonic_window", self.harmonic_window),
        ] {
            if let CycleSelection::Range { len: 0, .. } = window {
                bail!("{name} has zero length");
            }
        }
        Ok(())
    }
}
