//! Half-open pT binning for scale-factor rows.

use serde::{Deserialize, Serialize};
use tagsf_core::{Error, Result};

/// Ordered, non-overlapping half-open pT bins `[e_i, e_{i+1})`.
///
/// With `open_ended`, the last edge starts an extra bin `[e_last, ∞)`, so the
/// number of bins equals the number of edges; otherwise it is one fewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PtBinning {
    /// Bin edges in GeV, strictly increasing.
    pub edges: Vec<f64>,
    /// Whether the last bin extends to infinity.
    #[serde(default)]
    pub open_ended: bool,
}

impl PtBinning {
    /// Build and validate a binning.
    pub fn new(edges: Vec<f64>, open_ended: bool) -> Result<Self> {
        let b = Self { edges, open_ended };
        b.validate()?;
        Ok(b)
    }

    /// Check edge count, finiteness and ordering.
    pub fn validate(&self) -> Result<()> {
        let min_edges = if self.open_ended { 1 } else { 2 };
        if self.edges.len() < min_edges {
            return Err(Error::config(
                "pt_binning.edges",
                format!("need at least {min_edges} edge(s), got {}", self.edges.len()),
            ));
        }
        if let Some(bad) = self.edges.iter().find(|e| !e.is_finite()) {
            return Err(Error::config("pt_binning.edges", format!("non-finite edge {bad}")));
        }
        if self.edges.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::config("pt_binning.edges", "edges must be strictly increasing"));
        }
        Ok(())
    }

    /// Number of bins.
    pub fn n_bins(&self) -> usize {
        if self.open_ended { self.edges.len() } else { self.edges.len().saturating_sub(1) }
    }

    /// Bin index containing `pt`, or `None` outside the calibrated range
    /// (including NaN).
    pub fn find_bin(&self, pt: f64) -> Option<usize> {
        let first = *self.edges.first()?;
        if pt.is_nan() || pt < first {
            return None;
        }
        let last = self.edges[self.edges.len() - 1];
        if pt >= last {
            return if self.open_ended { Some(self.edges.len() - 1) } else { None };
        }
        // First edge strictly greater than pt; pt lies in the bin just below it.
        let upper = self.edges.partition_point(|&e| e <= pt);
        Some(upper - 1)
    }
}
