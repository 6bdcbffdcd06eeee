//! # tagsf-calib
//!
//! Scale-factor calibrations for tagger re-tagging.
//!
//! A calibration is a versioned JSON document (see [`schema`]) holding, per
//! data-taking period, one row of pT-binned scale factors per working point
//! and systematic variation. It is validated once into an immutable
//! [`ScaleFactorTable`]; correctors then resolve the rows they need into
//! [`ScaleFactorRow`]s whose lookups cannot fail.
//!
//! ## Example
//!
//! ```
//! use tagsf_calib::{Bundled, ScaleFactorTable};
//! use tagsf_core::{CalibrationRow, DataPeriod, Variation};
//!
//! let table = ScaleFactorTable::bundled(Bundled::ParticleNetXbb).unwrap();
//! let row = table.resolve(DataPeriod::Y2017, Variation::Nominal, CalibrationRow::Tight).unwrap();
//! assert_eq!(row.lookup(650.0), 1.027);
//! assert_eq!(row.lookup(250.0), 1.0); // outside calibrated range
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binning;
pub mod bundled;
pub mod schema;
pub mod table;

pub use binning::PtBinning;
pub use bundled::Bundled;
pub use schema::{CALIBRATION_SCHEMA_VERSION, CalibrationDocument, PeriodRows, VariationRows};
pub use table::{ScaleFactorRow, ScaleFactorTable};
