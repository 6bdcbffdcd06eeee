//! Calibration JSON schema types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tagsf_core::{CalibrationRow, DataPeriod, Variation};

use crate::binning::PtBinning;

/// Schema identifier every calibration document must carry.
pub const CALIBRATION_SCHEMA_VERSION: &str = "tagsf_calibration_v1";

/// A scale-factor calibration as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationDocument {
    /// Must equal [`CALIBRATION_SCHEMA_VERSION`].
    pub schema_version: String,
    /// Calibration name (e.g. `"particlenet_xbb"`).
    pub name: String,
    /// Calibration release tag.
    pub version: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Where the numbers come from.
    #[serde(default)]
    pub source: Option<String>,
    /// pT binning shared by every row.
    pub pt_binning: PtBinning,
    /// Rows per data-taking period.
    pub periods: BTreeMap<DataPeriod, PeriodRows>,
}

/// Working-point rows calibrated for one period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodRows {
    /// Loose (medium-purity) working point.
    #[serde(default)]
    pub loose: Option<VariationRows>,
    /// Tight (high-purity) working point.
    #[serde(default)]
    pub tight: Option<VariationRows>,
}

impl PeriodRows {
    /// Rows for the requested working point, if calibrated.
    pub fn row(&self, row: CalibrationRow) -> Option<&VariationRows> {
        match row {
            CalibrationRow::Loose => self.loose.as_ref(),
            CalibrationRow::Tight => self.tight.as_ref(),
        }
    }
}

/// One value per pT bin for each systematic variation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariationRows {
    /// Central values.
    pub nominal: Vec<f64>,
    /// +1σ values.
    pub up: Vec<f64>,
    /// −1σ values.
    pub down: Vec<f64>,
}

impl VariationRows {
    /// Values for one variation.
    pub fn get(&self, variation: Variation) -> &[f64] {
        match variation {
            Variation::Nominal => &self.nominal,
            Variation::Up => &self.up,
            Variation::Down => &self.down,
        }
    }
}
