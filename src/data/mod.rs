//! Data layer: core types, loading, and persistence.
//!
//! Architecture:
//! ```text
//!   log.txt  (HH:MM:SS  u  i)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse lines → SampleSeries
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ SampleSeries  │  Vec<Sample>, line order
//!   └──────────────┘
//!        │
//!        ├──► duration   experiment length, HH:MM:SS
//!        ├──► report     active/reactive/apparent power files
//!        └──► export     plot data → CSV
//! ```

pub mod duration;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod report;
