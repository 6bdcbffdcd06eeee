//! # tagsf-retag
//!
//! Stochastic re-tagging of simulated objects so that tagger category rates
//! match data.
//!
//! Each corrector follows the same three stages: a scale-factor lookup in
//! pT bins, a randomized category transition that promotes or demotes by at
//! most one step, and bookkeeping of original and corrected category counts.
//!
//! - [`TwoCategoryCorrector`]: Fail/Pass, one working point.
//! - [`PairedCorrector`]: Fail/Pass for two indexed objects of an event.
//! - [`ThreeCategoryCorrector`]: Fail/Loose/Tight, two working points.
//!
//! ## Example
//!
//! ```
//! use tagsf_calib::{Bundled, ScaleFactorTable};
//! use tagsf_core::{DataPeriod, ThreeCategory, Variation};
//! use tagsf_retag::{ThreeCategoryConfig, ThreeCategoryCorrector};
//!
//! let table = ScaleFactorTable::bundled(Bundled::ParticleNetXbb).unwrap();
//! let config = ThreeCategoryConfig::new((0.8, 0.98), (0.1, 0.05), DataPeriod::Y2017)
//!     .variation(Variation::Up);
//! let mut corrector = ThreeCategoryCorrector::new(config, &table).unwrap();
//!
//! let original = corrector.classify(0.99);
//! assert_eq!(original, ThreeCategory::Tight);
//! let _new = corrector.transition(650.0, 0.99, Some(original));
//!
//! let summary = corrector.summary();
//! assert_eq!(summary.origin_total, summary.result_total);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod draw;
pub mod efficiency;
pub mod paired;
pub mod thresholds;
pub mod three_category;
pub mod transition;
pub mod two_category;

pub use config::{PairedConfig, ThreeCategoryConfig, TwoCategoryConfig};
pub use draw::{DEFAULT_SEED, SeededUniform, UniformSource};
pub use efficiency::EfficiencyEstimator;
pub use paired::PairedCorrector;
pub use thresholds::{Classifier, WorkingPoint, WorkingPointPair};
pub use three_category::ThreeCategoryCorrector;
pub use transition::{Correction, EfficiencyPair, ScaleFactorPair};
pub use two_category::TwoCategoryCorrector;
