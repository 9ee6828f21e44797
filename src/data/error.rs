use std::path::PathBuf;

use thiserror::Error;

/// Why a single log line was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineError {
    #[error("expected at least 3 fields, found {found}")]
    TooFewFields { found: usize },
    #[error("{field} '{value}' is not a number")]
    InvalidNumber { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("line {line}: {kind}")]
    Parse { line: usize, kind: LineError },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no samples to analyse")]
    EmptySeries,
    #[error("voltage has {voltage} samples but current has {current}")]
    LengthMismatch { voltage: usize, current: usize },
    #[error("sample rate must be a positive number, got {0}")]
    InvalidSampleRate(f64),
    #[error("the selected cycle window contains no samples")]
    EmptySelection,
}

impl AnalysisError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;
