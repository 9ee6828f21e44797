use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::analysis::views::{build_view, View, ViewKind};
use crate::config::AnalysisConfig;
use crate::data::duration::duration_label;
use crate::data::export::export_csv;
use crate::data::loader::load_file;
use crate::data::model::{HarmonicSet, PlotData, PowerResult, SampleSeries};
use crate::data::report::{read_power_report, report_dir_for, write_power_report};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The loaded log together with where it came from.
pub struct LoadedLog {
    pub path: PathBuf,
    pub series: SampleSeries,
    /// Experiment duration, `HH:MM:SS`.
    pub duration: String,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded log (None until user loads a file).
    pub log: Option<LoadedLog>,

    /// Analysis parameters, editable in the side panel.
    pub config: AnalysisConfig,

    /// Where "Save settings" writes `config`.
    pub config_path: PathBuf,

    /// Currently shown chart.
    pub plot: Option<PlotData>,

    /// Aggregate power computed for the loaded log.
    pub power: Option<PowerResult>,

    /// Report files found in the log's folder at load time. They may belong
    /// to a different log, so they are never shown as this log's power.
    pub folder_report: Option<PowerResult>,

    /// Last harmonics extracted.
    pub harmonics: Option<HarmonicSet>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(AnalysisConfig::default(), AnalysisConfig::default_path())
    }
}

impl AppState {
    pub fn with_config(config: AnalysisConfig, config_path: PathBuf) -> Self {
        Self {
            log: None,
            config,
            config_path,
            plot: None,
            power: None,
            folder_report: None,
            harmonics: None,
            status_message: None,
        }
    }

    /// Load a log file, replacing whatever was loaded before. On failure the
    /// previous log stays in place.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let series =
            load_file(path).with_context(|| format!("loading {}", path.display()))?;
        let duration = duration_label(&series);
        log::info!(
            "Loaded {} samples from {}, duration {duration}",
            series.len(),
            path.display()
        );

        self.log = Some(LoadedLog {
            path: path.to_path_buf(),
            series,
            duration,
        });
        self.plot = None;
        self.power = None;
        self.harmonics = None;
        self.status_message = None;
        self.folder_report = read_power_report(&report_dir_for(path)).ok();
        if self.folder_report.is_some() {
            log::info!("found saved power report next to {}", path.display());
        }
        Ok(())
    }

    /// Compute and show a chart. The power chart also writes the power
    /// report next to the input file.
    pub fn show(&mut self, kind: ViewKind) -> Result<()> {
        let log = self.log.as_ref().context("no measurement log loaded")?;
        let View {
            plot,
            power,
            harmonics,
        } = build_view(kind, &log.series, &self.config)
            .with_context(|| format!("building {kind:?} view"))?;

        log::debug!("{kind:?} view: {} points", plot.point_count());
        self.plot = Some(plot);
        if harmonics.is_some() {
            self.harmonics = harmonics;
        }
        if let Some(power) = power {
            self.power = Some(power);
            let dir = report_dir_for(&log.path);
            write_power_report(&dir, &power).context("saving power report")?;
            self.folder_report = Some(power);
        }
        self.status_message = None;
        Ok(())
    }

    /// Report a failed action in the status line.
    pub fn fail(&mut self, action: &str, e: anyhow::Error) {
        log::error!("{action} failed: {e:#}");
        self.status_message = Some(format!("Error: {e:#}"));
    }

    pub fn export_plot(&self, path: &Path) -> Result<usize> {
        let plot = self.plot.as_ref().context("nothing plotted yet")?;
        export_csv(plot, path)
    }

    pub fn save_config(&self) -> Result<()> {
        self.config.save(&self.config_path)
    }
}
