//! Per-category bookkeeping of original and re-assigned tags.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::TagCategory;

/// Origin and result counts, one slot per category.
///
/// Counts only ever grow; there is no reset. `N` must equal the
/// [`TagCategory::COUNT`] of the categories recorded into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionCounters<const N: usize> {
    origin: [u64; N],
    result: [u64; N],
}

impl<const N: usize> Default for TransitionCounters<N> {
    fn default() -> Self {
        Self { origin: [0; N], result: [0; N] }
    }
}

impl<const N: usize> TransitionCounters<N> {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an object in its original (score-derived) category.
    pub fn record_origin<C: TagCategory>(&mut self, category: C) {
        debug_assert_eq!(C::COUNT, N);
        self.origin[category.index()] += 1;
    }

    /// Count an object in its category after correction.
    pub fn record_result<C: TagCategory>(&mut self, category: C) {
        debug_assert_eq!(C::COUNT, N);
        self.result[category.index()] += 1;
    }

    /// Origin counts.
    pub fn origin(&self) -> &[u64; N] {
        &self.origin
    }

    /// Result counts.
    pub fn result(&self) -> &[u64; N] {
        &self.result
    }

    /// Number of classified objects.
    pub fn origin_total(&self) -> u64 {
        self.origin.iter().sum()
    }

    /// Number of transitioned objects.
    pub fn result_total(&self) -> u64 {
        self.result.iter().sum()
    }

    /// Labelled snapshot of the counters.
    pub fn summary<C: TagCategory>(&self) -> TagSummary {
        debug_assert_eq!(C::COUNT, N);
        TagSummary {
            categories: C::ALL.iter().map(|c| c.label().to_string()).collect(),
            origin_counts: self.origin.to_vec(),
            result_counts: self.result.to_vec(),
            origin_total: self.origin_total(),
            result_total: self.result_total(),
        }
    }
}

/// Read-only diagnostic snapshot of a corrector's counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSummary {
    /// Category labels, lowest first.
    pub categories: Vec<String>,
    /// Objects per category before correction.
    pub origin_counts: Vec<u64>,
    /// Objects per category after correction.
    pub result_counts: Vec<u64>,
    /// Sum of `origin_counts`.
    pub origin_total: u64,
    /// Sum of `result_counts`.
    pub result_total: u64,
}

impl TagSummary {
    /// `true` when every classified object has also been transitioned.
    pub fn is_balanced(&self) -> bool {
        self.origin_total == self.result_total
    }

    /// Net change per category (`result - origin`).
    pub fn net_migration(&self) -> Vec<i64> {
        self.origin_counts
            .iter()
            .zip(&self.result_counts)
            .map(|(&o, &r)| r as i64 - o as i64)
            .collect()
    }
}

impl fmt::Display for TagSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of Original")?;
        for (label, n) in self.categories.iter().zip(&self.origin_counts) {
            writeln!(f, "\t{label}: {n}")?;
        }
        writeln!(f, "\tTotal: {}", self.origin_total)?;
        writeln!(f, "Number of New")?;
        for (label, n) in self.categories.iter().zip(&self.result_counts) {
            writeln!(f, "\t{label}: {n}")?;
        }
        write!(f, "\tTotal: {}", self.result_total)
    }
}
