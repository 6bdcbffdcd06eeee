//! Fail/Loose/Tight corrector for a two-working-point tagger.

use tagsf_calib::{ScaleFactorRow, ScaleFactorTable};
use tagsf_core::{CalibrationRow, Result, TagSummary, ThreeCategory, TransitionCounters};

use crate::config::ThreeCategoryConfig;
use crate::draw::{SeededUniform, UniformSource};
use crate::thresholds::{Classifier, WorkingPointPair};
use crate::transition::{EfficiencyPair, ScaleFactorPair, three_category_step};

/// Re-tags single objects among Fail, Loose and Tight.
#[derive(Debug)]
pub struct ThreeCategoryCorrector<D = SeededUniform> {
    config: ThreeCategoryConfig,
    working_points: WorkingPointPair,
    efficiencies: EfficiencyPair,
    loose_row: ScaleFactorRow,
    tight_row: ScaleFactorRow,
    counters: TransitionCounters<3>,
    draws: D,
}

impl ThreeCategoryCorrector<SeededUniform> {
    /// Validate `config` and resolve the loose and tight rows from `table`.
    pub fn new(config: ThreeCategoryConfig, table: &ScaleFactorTable) -> Result<Self> {
        let draws = SeededUniform::new(config.seed);
        Self::with_source(config, table, draws)
    }
}

impl<D: UniformSource> ThreeCategoryCorrector<D> {
    /// Like [`ThreeCategoryCorrector::new`] with an explicit draw source.
    pub fn with_source(
        config: ThreeCategoryConfig,
        table: &ScaleFactorTable,
        draws: D,
    ) -> Result<Self> {
        let (working_points, efficiencies) = config.validate()?;
        let loose_row = table.resolve(config.period, config.variation, CalibrationRow::Loose)?;
        let tight_row = table.resolve(config.period, config.variation, CalibrationRow::Tight)?;
        log::debug!(
            "three-category corrector: {} {} {}, wps=({}, {}), effs=({}, {})",
            table.name(),
            config.period,
            config.variation,
            working_points.loose(),
            working_points.tight(),
            efficiencies.loose,
            efficiencies.tight
        );
        Ok(Self {
            config,
            working_points,
            efficiencies,
            loose_row,
            tight_row,
            counters: TransitionCounters::new(),
            draws,
        })
    }

    /// Category of `score`; counted as an original category.
    pub fn classify(&mut self, score: f64) -> ThreeCategory {
        let cat = self.working_points.categorize(score);
        self.counters.record_origin(cat);
        cat
    }

    /// Scale factor of `category` at `pt`. Fail is always 1.
    pub fn lookup_scale_factor(&self, pt: f64, category: ThreeCategory) -> f64 {
        match category {
            ThreeCategory::Fail => 1.0,
            ThreeCategory::Loose => self.loose_row.lookup(pt),
            ThreeCategory::Tight => self.tight_row.lookup(pt),
        }
    }

    /// Re-tag one object and count its new category.
    ///
    /// Consumes one draw, or two when a Fail object misses the Tight
    /// promotion while both scale factors exceed 1.
    pub fn transition(
        &mut self,
        pt: f64,
        score: f64,
        original: Option<ThreeCategory>,
    ) -> ThreeCategory {
        let old = original.unwrap_or_else(|| self.working_points.categorize(score));
        let sf = ScaleFactorPair {
            loose: self.lookup_scale_factor(pt, ThreeCategory::Loose),
            tight: self.lookup_scale_factor(pt, ThreeCategory::Tight),
        };
        let rn = self.draws.next_uniform();
        let new = three_category_step(old, sf, self.efficiencies, rn, &mut self.draws);
        self.counters.record_result(new);
        new
    }

    /// [`classify`](Self::classify) followed by [`transition`](Self::transition).
    pub fn retag(&mut self, pt: f64, score: f64) -> ThreeCategory {
        let original = self.classify(score);
        self.transition(pt, score, Some(original))
    }

    /// Origin and result counts so far.
    pub fn summary(&self) -> TagSummary {
        self.counters.summary::<ThreeCategory>()
    }

    /// Configuration this corrector was built from.
    pub fn config(&self) -> &ThreeCategoryConfig {
        &self.config
    }

    /// Validated working points.
    pub fn working_points(&self) -> WorkingPointPair {
        self.working_points
    }
}
