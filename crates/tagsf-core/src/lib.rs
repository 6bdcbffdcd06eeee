//! # tagsf-core
//!
//! Shared vocabulary for the tagsf crates: tagger categories, data-taking
//! period and systematic-variation selectors, per-category transition
//! counters, and the common error type.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod counts;
pub mod error;
pub mod types;

pub use counts::{TagSummary, TransitionCounters};
pub use error::{Error, Result};
pub use types::{CalibrationRow, DataPeriod, TagCategory, ThreeCategory, TwoCategory, Variation};
