use std::path::Path;

use super::error::{AnalysisError, LineError, Result};
use super::model::{Sample, SampleSeries};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a measurement log from a text file.
///
/// Expected layout, one record per line:
///
/// ```text
/// 12:00:00 229,87 1,52
/// 12:00:00 231.02 1.49
/// ```
///
/// The whole load fails on the first malformed line.
pub fn load_file(path: &Path) -> Result<SampleSeries> {
    let text = std::fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
    let series = parse_lines(text.lines())?;
    log::debug!("parsed {} samples from {}", series.len(), path.display());
    Ok(series)
}

/// Parse a sequence of raw lines. Line numbers in errors are 1-based.
pub fn parse_lines<'a, I>(lines: I) -> Result<SampleSeries>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut samples = Vec::new();
    for (idx, line) in lines.into_iter().enumerate() {
        samples.push(parse_line(idx + 1, line)?);
    }
    Ok(SampleSeries::new(samples))
}

/// Parse one `<HH:MM:SS> <voltage> <current>` record.
pub fn parse_line(line_no: usize, line: &str) -> Result<Sample> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(AnalysisError::Parse {
            line: line_no,
            kind: LineError::TooFewFields {
                found: fields.len(),
            },
        });
    }

    let number = |field: &'static str, raw: &str| {
        parse_decimal(raw).ok_or_else(|| AnalysisError::Parse {
            line: line_no,
            kind: LineError::InvalidNumber {
                field,
                value: raw.to_string(),
            },
        })
    };

    Ok(Sample {
        timestamp: parse_timestamp(fields[0]),
        voltage: number("voltage", fields[1])?,
        current: number("current", fields[2])?,
    })
}

/// Convert `HH:MM:SS` to seconds. Anything else yields `0`, which the
/// duration calculation treats as "no timestamp".
pub fn parse_timestamp(text: &str) -> u32 {
    let parts: Vec<&str> = text.split(':').collect();
    let [h, m, s] = parts.as_slice() else {
        return 0;
    };
    match (h.parse::<u32>(), m.parse::<u32>(), s.parse::<u32>()) {
        (Ok(h), Ok(m), Ok(s)) => h
            .checked_mul(3600)
            .and_then(|v| v.checked_add(m.checked_mul(60)?))
            .and_then(|v| v.checked_add(s))
            .unwrap_or(0),
        _ => 0,
    }
}

// Instruments export with the locale's decimal comma.
fn parse_decimal(raw: &str) -> Option<f64> {
    raw.replace(',', ".").parse::<f64>().ok()
}
