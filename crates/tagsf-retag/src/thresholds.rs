//! Score thresholds that turn a continuous tagger score into a category.

use serde::{Deserialize, Serialize};
use tagsf_core::{Error, Result, TagCategory, ThreeCategory, TwoCategory};

/// Pure mapping from tagger score to category.
pub trait Classifier {
    /// Category domain produced.
    type Category: TagCategory;

    /// Category of an object with tagger score `score`. NaN scores fail.
    fn categorize(&self, score: f64) -> Self::Category;
}

/// Single working point: `score > threshold` passes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkingPoint {
    threshold: f64,
}

impl WorkingPoint {
    /// Threshold must be finite.
    pub fn new(threshold: f64) -> Result<Self> {
        if !threshold.is_finite() {
            return Err(Error::config("working_point", format!("must be finite, got {threshold}")));
        }
        Ok(Self { threshold })
    }

    /// Score threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Classifier for WorkingPoint {
    type Category = TwoCategory;

    fn categorize(&self, score: f64) -> TwoCategory {
        if score > self.threshold { TwoCategory::Pass } else { TwoCategory::Fail }
    }
}

/// Loose and tight working points slicing the score axis into three bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkingPointPair {
    loose: f64,
    tight: f64,
}

impl WorkingPointPair {
    /// Both thresholds finite and `loose < tight`.
    pub fn new(loose: f64, tight: f64) -> Result<Self> {
        if !loose.is_finite() || !tight.is_finite() {
            return Err(Error::config(
                "working_points",
                format!("must be finite, got ({loose}, {tight})"),
            ));
        }
        if loose >= tight {
            return Err(Error::config(
                "working_points",
                format!("must be strictly increasing, got loose={loose} tight={tight}"),
            ));
        }
        Ok(Self { loose, tight })
    }

    /// Loose threshold.
    pub fn loose(&self) -> f64 {
        self.loose
    }

    /// Tight threshold.
    pub fn tight(&self) -> f64 {
        self.tight
    }
}

impl Classifier for WorkingPointPair {
    type Category = ThreeCategory;

    fn categorize(&self, score: f64) -> ThreeCategory {
        if score > self.tight {
            ThreeCategory::Tight
        } else if score > self.loose {
            ThreeCategory::Loose
        } else {
            ThreeCategory::Fail
        }
    }
}
