use std::path::{Path, PathBuf};

use super::error::{AnalysisError, Result};
use super::model::PowerResult;

pub const ACTIVE_POWER_FILE: &str = "active_power.txt";
pub const REACTIVE_POWER_FILE: &str = "reactive_power.txt";
pub const APPARENT_POWER_FILE: &str = "apparent_power.txt";

/// Directory the report for `input` goes to: the input file's own directory.
pub fn report_dir_for(input: &Path) -> PathBuf {
    match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Write each power figure to its own single-value file in `dir`.
/// Returns the written paths in active, reactive, apparent order.
pub fn write_power_report(dir: &Path, power: &PowerResult) -> Result<[PathBuf; 3]> {
    let entries = [
        (ACTIVE_POWER_FILE, power.active),
        (REACTIVE_POWER_FILE, power.reactive),
        (APPARENT_POWER_FILE, power.apparent),
    ];

    let mut written: [PathBuf; 3] = Default::default();
    for (slot, (name, value)) in written.iter_mut().zip(entries) {
        let path = dir.join(name);
        std::fs::write(&path, format!("{value:.4}\n")).map_err(|e| AnalysisError::io(&path, e))?;
        *slot = path;
    }
    log::info!("wrote power report to {}", dir.display());
    Ok(written)
}

/// Read a report written by [`write_power_report`].
pub fn read_power_report(dir: &Path) -> Result<PowerResult> {
    let read = |name: &str| -> Result<f64> {
        let path = dir.join(name);
        let text = std::fs::read_to_string(&path).map_err(|e| AnalysisError::io(&path, e))?;
        text.trim().parse::<f64>().map_err(|e| {
            AnalysisError::io(
                &path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })
    };

    Ok(PowerResult {
        active: read(ACTIVE_POWER_FILE)?,
        reactive: read(REACTIVE_POWER_FILE)?,
        apparent: read(APPARENT_POWER_FILE)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_within_formatting_precision() {
        let dir = tempfile::tempdir().unwrap();
        let power = PowerResult {
            active: 123.456_789,
            reactive: 0.000_04,
            apparent: 987.654_321,
        };
        let paths = write_power_report(dir.path(), &power).unwrap();
        assert!(paths.iter().all(|p| p.exists()));

        let back = read_power_report(dir.path()).unwrap();
        assert!((back.active - power.active).abs() <= 1e-4);
        assert!((back.reactive - power.reactive).abs() <= 1e-4);
        assert!((back.apparent - power.apparent).abs() <= 1e-4);
    }

    #[test]
    fn files_hold_four_decimals() {
        let dir = tempfile::tempdir().unwrap();
        let power = PowerResult {
            active: 2.0,
            reactive: 0.5,
            apparent: 1.0 / 3.0,
        };
        write_power_report(dir.path(), &power).unwrap();
        let text = std::fs::read_to_string(dir.path().join(APPARENT_POWER_FILE)).unwrap();
        assert_eq!(text, "0.3333\n");
        let text = std::fs::read_to_string(dir.path().join(ACTIVE_POWER_FILE)).unwrap();
        assert_eq!(text, "2.0000\n");
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let power = PowerResult {
            active: 1.0,
            reactive: 1.0,
            apparent: 1.0,
        };
        let err = write_power_report(&missing, &power).unwrap_err();
        assert!(matches!(err, AnalysisError::Io { .. }));
    }

    #[test]
    fn report_dir_is_next_to_input() {
        assert_eq!(
            report_dir_for(Path::new("/data/run1/log.txt")),
            PathBuf::from("/data/run1")
        );
        assert_eq!(report_dir_for(Path::new("log.txt")), PathBuf::from("."));
    }
}
