//! Validated, immutable scale-factor tables.

use std::path::Path;

use tagsf_core::{CalibrationRow, DataPeriod, Error, Result, Variation};

use crate::binning::PtBinning;
use crate::bundled::Bundled;
use crate::schema::{CALIBRATION_SCHEMA_VERSION, CalibrationDocument};

/// Scale factors below this are almost certainly a transcription error and
/// are reported when a row is resolved.
const LOW_SCALE_FACTOR_WARN: f64 = 0.7;

/// A calibration that passed validation. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct ScaleFactorTable {
    doc: CalibrationDocument,
}

impl ScaleFactorTable {
    /// Validate a parsed calibration document.
    pub fn from_document(doc: CalibrationDocument) -> Result<Self> {
        if doc.schema_version != CALIBRATION_SCHEMA_VERSION {
            return Err(Error::config(
                "schema_version",
                format!(
                    "expected '{CALIBRATION_SCHEMA_VERSION}', got '{}'",
                    doc.schema_version
                ),
            ));
        }
        doc.pt_binning.validate()?;
        if doc.periods.is_empty() {
            return Err(Error::config("periods", "calibration defines no data periods"));
        }

        let n_bins = doc.pt_binning.n_bins();
        for (period, rows) in &doc.periods {
            if rows.loose.is_none() && rows.tight.is_none() {
                return Err(Error::config(
                    format!("periods.{period}"),
                    "period has neither a loose nor a tight row",
                ));
            }
            for wp in [CalibrationRow::Loose, CalibrationRow::Tight] {
                let Some(var_rows) = rows.row(wp) else { continue };
                for variation in Variation::ALL {
                    let field = format!("periods.{period}.{wp}.{variation}");
                    let values = var_rows.get(variation);
                    if values.len() != n_bins {
                        return Err(Error::config(
                            field,
                            format!("expected {n_bins} values (one per pT bin), got {}", values.len()),
                        ));
                    }
                    if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v <= 0.0) {
                        return Err(Error::config(
                            field,
                            format!("scale factors must be finite and > 0, got {bad}"),
                        ));
                    }
                }
            }
        }

        log::debug!(
            "loaded calibration '{}' v{} ({} periods, {} pT bins)",
            doc.name,
            doc.version,
            doc.periods.len(),
            n_bins
        );
        Ok(Self { doc })
    }

    /// Parse and validate a calibration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: CalibrationDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Read, parse and validate a calibration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("reading calibration {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Load one of the calibrations shipped with the crate.
    pub fn bundled(which: Bundled) -> Result<Self> {
        Self::from_json_str(which.json())
    }

    /// Calibration name.
    pub fn name(&self) -> &str {
        &self.doc.name
    }

    /// Calibration release tag.
    pub fn version(&self) -> &str {
        &self.doc.version
    }

    /// Shared pT binning.
    pub fn binning(&self) -> &PtBinning {
        &self.doc.pt_binning
    }

    /// The underlying (validated) document.
    pub fn document(&self) -> &CalibrationDocument {
        &self.doc
    }

    /// Periods present in the calibration.
    pub fn periods(&self) -> impl Iterator<Item = DataPeriod> + '_ {
        self.doc.periods.keys().copied()
    }

    /// Whether `row` is calibrated for `period`.
    pub fn has_row(&self, period: DataPeriod, row: CalibrationRow) -> bool {
        self.doc.periods.get(&period).is_some_and(|r| r.row(row).is_some())
    }

    /// Select the pT-binned scale factors for one (period, variation, row).
    pub fn resolve(
        &self,
        period: DataPeriod,
        variation: Variation,
        row: CalibrationRow,
    ) -> Result<ScaleFactorRow> {
        let rows = self.doc.periods.get(&period).ok_or_else(|| {
            Error::config(
                "period",
                format!("calibration '{}' has no entry for period {period}", self.doc.name),
            )
        })?;
        let var_rows = rows.row(row).ok_or_else(|| {
            Error::config(
                "row",
                format!("calibration '{}' has no {row} row for period {period}", self.doc.name),
            )
        })?;
        let values = var_rows.get(variation).to_vec();
        for (bin, &v) in values.iter().enumerate() {
            if v < LOW_SCALE_FACTOR_WARN {
                log::warn!(
                    "{} {period} {row} {variation}: scale factor {v} in pT bin {bin} is below {LOW_SCALE_FACTOR_WARN}",
                    self.doc.name
                );
            }
        }
        Ok(ScaleFactorRow { row, binning: self.doc.pt_binning.clone(), values })
    }

    /// One-shot lookup; prefer [`ScaleFactorTable::resolve`] in loops.
    pub fn scale_factor(
        &self,
        period: DataPeriod,
        variation: Variation,
        row: CalibrationRow,
        pt: f64,
    ) -> Result<f64> {
        Ok(self.resolve(period, variation, row)?.lookup(pt))
    }
}

/// pT-binned scale factors of one working point, period and variation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleFactorRow {
    row: CalibrationRow,
    binning: PtBinning,
    values: Vec<f64>,
}

impl ScaleFactorRow {
    /// Build a row directly (synthetic calibrations, tests).
    pub fn new(row: CalibrationRow, binning: PtBinning, values: Vec<f64>) -> Result<Self> {
        binning.validate()?;
        if values.len() != binning.n_bins() {
            return Err(Error::config(
                "values",
                format!("expected {} values, got {}", binning.n_bins(), values.len()),
            ));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v <= 0.0) {
            return Err(Error::config("values", format!("scale factors must be finite and > 0, got {bad}")));
        }
        Ok(Self { row, binning, values })
    }

    /// Scale factor for an object of transverse momentum `pt`.
    ///
    /// Returns exactly `1.0` outside the calibrated range.
    pub fn lookup(&self, pt: f64) -> f64 {
        match self.binning.find_bin(pt) {
            Some(bin) => self.values[bin],
            None => 1.0,
        }
    }

    /// Working point this row belongs to.
    pub fn row(&self) -> CalibrationRow {
        self.row
    }

    /// pT binning.
    pub fn binning(&self) -> &PtBinning {
        &self.binning
    }

    /// One value per bin.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
