//! Construction-time configuration of the correctors.
//!
//! Everything is validated eagerly by the corrector constructors; a failing
//! field is reported as [`Error::Config`] naming that field.

use tagsf_core::{CalibrationRow, DataPeriod, Error, Result, Variation};

use crate::draw::DEFAULT_SEED;
use crate::thresholds::{WorkingPoint, WorkingPointPair};
use crate::transition::EfficiencyPair;

/// Check `value ∈ (0, 1)`.
pub fn validate_efficiency(field: &str, value: f64) -> Result<f64> {
    if !(value > 0.0 && value < 1.0) {
        return Err(Error::config(field, format!("efficiency must lie in (0, 1), got {value}")));
    }
    Ok(value)
}

/// Check both efficiencies lie in `(0, 1)` and leave a non-empty Fail band.
pub fn validate_efficiency_pair(eff: EfficiencyPair) -> Result<EfficiencyPair> {
    validate_efficiency("efficiency_loose", eff.loose)?;
    validate_efficiency("efficiency_tight", eff.tight)?;
    let sum = eff.loose + eff.tight;
    if sum.is_nan() || sum >= 1.0 {
        return Err(Error::config(
            "efficiencies",
            format!(
                "efficiency_loose + efficiency_tight must be < 1, got {} + {} = {sum}",
                eff.loose, eff.tight
            ),
        ));
    }
    Ok(eff)
}

/// Configuration of a single-working-point corrector.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoCategoryConfig {
    /// Score threshold; `score > working_point` passes.
    pub working_point: f64,
    /// Simulated pass efficiency, used when the scale factor exceeds 1.
    pub efficiency: f64,
    /// Data-taking period selecting the calibration entry.
    pub period: DataPeriod,
    /// Systematic variation of the scale factors.
    pub variation: Variation,
    /// Calibrated row acting as the pass scale factor.
    pub pass_row: CalibrationRow,
    /// Generator seed.
    pub seed: u64,
}

impl TwoCategoryConfig {
    /// Nominal variation, tight row, default seed.
    pub fn new(working_point: f64, efficiency: f64, period: DataPeriod) -> Self {
        Self {
            working_point,
            efficiency,
            period,
            variation: Variation::Nominal,
            pass_row: CalibrationRow::Tight,
            seed: DEFAULT_SEED,
        }
    }

    /// Set the systematic variation.
    pub fn variation(mut self, variation: Variation) -> Self {
        self.variation = variation;
        self
    }

    /// Set which calibrated row supplies the pass scale factor.
    pub fn pass_row(mut self, row: CalibrationRow) -> Self {
        self.pass_row = row;
        self
    }

    /// Set the generator seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub(crate) fn validate(&self) -> Result<WorkingPoint> {
        validate_efficiency("efficiency", self.efficiency)?;
        WorkingPoint::new(self.working_point)
    }
}

/// Configuration of a loose/tight corrector.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreeCategoryConfig {
    /// Loose score threshold.
    pub loose_working_point: f64,
    /// Tight score threshold, strictly above the loose one.
    pub tight_working_point: f64,
    /// Simulated Loose and Tight efficiencies.
    pub efficiencies: EfficiencyPair,
    /// Data-taking period selecting the calibration entry.
    pub period: DataPeriod,
    /// Systematic variation of the scale factors.
    pub variation: Variation,
    /// Generator seed.
    pub seed: u64,
}

impl ThreeCategoryConfig {
    /// Nominal variation, default seed.
    pub fn new(
        working_points: (f64, f64),
        efficiencies: (f64, f64),
        period: DataPeriod,
    ) -> Self {
        Self {
            loose_working_point: working_points.0,
            tight_working_point: working_points.1,
            efficiencies: EfficiencyPair { loose: efficiencies.0, tight: efficiencies.1 },
            period,
            variation: Variation::Nominal,
            seed: DEFAULT_SEED,
        }
    }

    /// Set the systematic variation.
    pub fn variation(mut self, variation: Variation) -> Self {
        self.variation = variation;
        self
    }

    /// Set the generator seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub(crate) fn validate(&self) -> Result<(WorkingPointPair, EfficiencyPair)> {
        let wps = WorkingPointPair::new(self.loose_working_point, self.tight_working_point)?;
        let eff = validate_efficiency_pair(self.efficiencies)?;
        Ok((wps, eff))
    }
}

/// Configuration of a corrector acting on two indexed objects per event.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedConfig {
    /// Score threshold shared by both objects.
    pub working_point: f64,
    /// Positions of the two objects in the per-event collections.
    pub indices: (usize, usize),
    /// Simulated pass efficiency of each object.
    pub efficiencies: (f64, f64),
    /// Data-taking period selecting the calibration entry.
    pub period: DataPeriod,
    /// Systematic variation of the scale factors.
    pub variation: Variation,
    /// Calibrated row acting as the pass scale factor.
    pub pass_row: CalibrationRow,
    /// Generator seed.
    pub seed: u64,
}

impl PairedConfig {
    /// Objects at indices 0 and 1, nominal variation, tight row, default seed.
    pub fn new(working_point: f64, efficiencies: (f64, f64), period: DataPeriod) -> Self {
        Self {
            working_point,
            indices: (0, 1),
            efficiencies,
            period,
            variation: Variation::Nominal,
            pass_row: CalibrationRow::Tight,
            seed: DEFAULT_SEED,
        }
    }

    /// Set the object indices.
    pub fn indices(mut self, first: usize, second: usize) -> Self {
        self.indices = (first, second);
        self
    }

    /// Set the systematic variation.
    pub fn variation(mut self, variation: Variation) -> Self {
        self.variation = variation;
        self
    }

    /// Set which calibrated row supplies the pass scale factor.
    pub fn pass_row(mut self, row: CalibrationRow) -> Self {
        self.pass_row = row;
        self
    }

    /// Set the generator seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub(crate) fn validate(&self) -> Result<WorkingPoint> {
        if self.indices.0 == self.indices.1 {
            return Err(Error::config(
                "indices",
                format!("the two object indices must differ, got {} twice", self.indices.0),
            ));
        }
        validate_efficiency("efficiency_first", self.efficiencies.0)?;
        validate_efficiency("efficiency_second", self.efficiencies.1)?;
        WorkingPoint::new(self.working_point)
    }
}
