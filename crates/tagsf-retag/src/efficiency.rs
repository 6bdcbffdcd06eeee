//! Weighted estimation of simulated category efficiencies.
//!
//! The correctors need the simulated probability of each category above
//! Fail. This accumulates generator-weighted counts of scores per category
//! and turns them into `Σw(category) / Σw(all)`.

use tagsf_core::{Error, Result, TagCategory};

use crate::config::{validate_efficiency, validate_efficiency_pair};
use crate::thresholds::{Classifier, WorkingPoint, WorkingPointPair};
use crate::transition::EfficiencyPair;

/// Accumulates weighted category counts for one classifier.
#[derive(Debug, Clone)]
pub struct EfficiencyEstimator<K: Classifier> {
    classifier: K,
    sum_w: Vec<f64>,
    total_w: f64,
    entries: u64,
}

impl<K: Classifier> EfficiencyEstimator<K> {
    /// Empty estimator.
    pub fn new(classifier: K) -> Self {
        Self {
            classifier,
            sum_w: vec![0.0; <K::Category as TagCategory>::COUNT],
            total_w: 0.0,
            entries: 0,
        }
    }

    /// Add one object with generator weight `weight` (may be negative).
    pub fn fill(&mut self, score: f64, weight: f64) -> Result<()> {
        if !weight.is_finite() {
            return Err(Error::Validation(format!("weight must be finite, got {weight}")));
        }
        let cat = self.classifier.categorize(score);
        self.sum_w[cat.index()] += weight;
        self.total_w += weight;
        self.entries += 1;
        Ok(())
    }

    /// Number of filled objects.
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Sum of weights over all categories.
    pub fn total_weight(&self) -> f64 {
        self.total_w
    }

    /// Raw weighted fraction of `category`.
    pub fn fraction(&self, category: K::Category) -> Result<f64> {
        if !self.total_w.is_finite() || self.total_w <= 0.0 {
            return Err(Error::Computation(format!(
                "total weight must be positive to form an efficiency, got {} over {} entries",
                self.total_w, self.entries
            )));
        }
        Ok(self.sum_w[category.index()] / self.total_w)
    }
}

impl EfficiencyEstimator<WorkingPoint> {
    /// Pass efficiency, validated to lie in `(0, 1)`.
    pub fn pass_efficiency(&self) -> Result<f64> {
        let eff = self.fraction(tagsf_core::TwoCategory::Pass)?;
        validate_efficiency("efficiency", eff)
    }
}

impl EfficiencyEstimator<WorkingPointPair> {
    /// Loose and Tight efficiencies, validated like a corrector config.
    pub fn efficiency_pair(&self) -> Result<EfficiencyPair> {
        let eff = EfficiencyPair {
            loose: self.fraction(tagsf_core::ThreeCategory::Loose)?,
            tight: self.fraction(tagsf_core::ThreeCategory::Tight)?,
        };
        validate_efficiency_pair(eff)
    }
}
