use crate::data::error::{AnalysisError, Result};
use crate::data::model::PowerResult;

/// Elementwise `v[i] * i[i]`.
pub fn instantaneous_power(voltage: &[f64], current: &[f64]) -> Result<Vec<f64>> {
    if voltage.len() != current.len() {
        return Err(AnalysisError::LengthMismatch {
            voltage: voltage.len(),
            current: current.len(),
        });
    }
    if voltage.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }
    Ok(voltage.iter().zip(current).map(|(v, i)| v * i).collect())
}

/// Active, reactive and apparent power of paired voltage/current samples.
///
/// * `P = mean(p)`
/// * `Q = sqrt(mean(p²) − P²)`, the population standard deviation of `p`
/// * `S = sqrt(P² + Q²)`
///
/// `mean(p²) − P²` can come out slightly negative for a near-constant `p`;
/// it is clamped to zero.
pub fn analyze_power(voltage: &[f64], current: &[f64]) -> Result<PowerResult> {
    let power = instantaneous_power(voltage, current)?;
    let n = power.len() as f64;

    let active = power.iter().sum::<f64>() / n;
    let mean_square = power.iter().map(|p| p * p).sum::<f64>() / n;
    let reactive = (mean_square - active * active).max(0.0).sqrt();
    let apparent = active.hypot(reactive);

    log::debug!("power over {} samples: P={active} Q={reactive} S={apparent}", power.len());
    Ok(PowerResult {
        active,
        reactive,
        apparent,
    })
}
