//! Computations on a loaded [`SampleSeries`](crate::data::model::SampleSeries).
//!
//! ```text
//!   SampleSeries ──┬──► power     p = u·i, P / Q / S
//!                  ├──► spectrum  |FFT|, peaks, harmonics
//!                  └──► views     PlotData for the shell
//! ```

pub mod power;
pub mod spectrum;
pub mod views;
