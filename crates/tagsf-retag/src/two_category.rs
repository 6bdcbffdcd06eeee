//! Fail/Pass corrector for a single-working-point tagger.

use tagsf_calib::{ScaleFactorRow, ScaleFactorTable};
use tagsf_core::{Result, TagSummary, TransitionCounters, TwoCategory};

use crate::config::TwoCategoryConfig;
use crate::draw::{SeededUniform, UniformSource};
use crate::thresholds::{Classifier, WorkingPoint};
use crate::transition::two_category_step;

/// Re-tags single objects between Fail and Pass.
///
/// One instance per working point and systematic variation; it owns its
/// generator and counters, so it is driven from one thread at a time.
#[derive(Debug)]
pub struct TwoCategoryCorrector<D = SeededUniform> {
    config: TwoCategoryConfig,
    working_point: WorkingPoint,
    pass_row: ScaleFactorRow,
    counters: TransitionCounters<2>,
    draws: D,
}

impl TwoCategoryCorrector<SeededUniform> {
    /// Validate `config` and resolve its scale factors from `table`.
    pub fn new(config: TwoCategoryConfig, table: &ScaleFactorTable) -> Result<Self> {
        let draws = SeededUniform::new(config.seed);
        Self::with_source(config, table, draws)
    }
}

impl<D: UniformSource> TwoCategoryCorrector<D> {
    /// Like [`TwoCategoryCorrector::new`] with an explicit draw source.
    pub fn with_source(config: TwoCategoryConfig, table: &ScaleFactorTable, draws: D) -> Result<Self> {
        let working_point = config.validate()?;
        let pass_row = table.resolve(config.period, config.variation, config.pass_row)?;
        log::debug!(
            "two-category corrector: {} {} {} {} row, wp={}, eff={}",
            table.name(),
            config.period,
            config.variation,
            config.pass_row,
            config.working_point,
            config.efficiency
        );
        Ok(Self { config, working_point, pass_row, counters: TransitionCounters::new(), draws })
    }

    /// Category of `score`; counted as an original category.
    pub fn classify(&mut self, score: f64) -> TwoCategory {
        let cat = self.working_point.categorize(score);
        self.counters.record_origin(cat);
        cat
    }

    /// Scale factor of `category` at `pt`. Fail is always 1.
    pub fn lookup_scale_factor(&self, pt: f64, category: TwoCategory) -> f64 {
        match category {
            TwoCategory::Fail => 1.0,
            TwoCategory::Pass => self.pass_row.lookup(pt),
        }
    }

    /// Re-tag one object and count its new category.
    ///
    /// `original` is normally the value returned by [`classify`](Self::classify);
    /// when `None` it is derived from `score` without being counted.
    pub fn transition(&mut self, pt: f64, score: f64, original: Option<TwoCategory>) -> TwoCategory {
        let old = original.unwrap_or_else(|| self.working_point.categorize(score));
        let sf = self.lookup_scale_factor(pt, TwoCategory::Pass);
        let rn = self.draws.next_uniform();
        let new = two_category_step(old, sf, self.config.efficiency, rn);
        self.counters.record_result(new);
        new
    }

    /// [`classify`](Self::classify) followed by [`transition`](Self::transition).
    pub fn retag(&mut self, pt: f64, score: f64) -> TwoCategory {
        let original = self.classify(score);
        self.transition(pt, score, Some(original))
    }

    /// Origin and result counts so far.
    pub fn summary(&self) -> TagSummary {
        self.counters.summary::<TwoCategory>()
    }

    /// Configuration this corrector was built from.
    pub fn config(&self) -> &TwoCategoryConfig {
        &self.config
    }

    /// Validated working point.
    pub fn working_point(&self) -> WorkingPoint {
        self.working_point
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::ScriptedDraws;
    use tagsf_calib::Bundled;
    use tagsf_core::{DataPeriod, Error, Variation};

    fn synthetic_table(sf: f64) -> ScaleFactorTable {
        let json = format!(
            r#"{{
                "schema_version": "tagsf_calibration_v1",
                "name": "synthetic",
                "version": "test",
                "pt_binning": {{ "edges": [400.0], "open_ended": true }},
                "periods": {{
                    "2018": {{ "tight": {{ "nominal": [{sf}], "up": [{sf}], "down": [{sf}] }} }}
                }}
            }}"#
        );
        ScaleFactorTable::from_json_str(&json).unwrap()
    }

    fn scripted(sf: f64, draws: Vec<f64>) -> TwoCategoryCorrector<ScriptedDraws> {
        let cfg = TwoCategoryConfig::new(0.98, 0.3, DataPeriod::Y2018);
        TwoCategoryCorrector::with_source(cfg, &synthetic_table(sf), ScriptedDraws::new(draws).unwrap())
            .unwrap()
    }

    #[test]
    fn test_demotion_scenario() {
        let mut c = scripted(0.9, vec![0.05]);
        let orig = c.classify(0.99);
        assert_eq!(orig, TwoCategory::Pass);
        assert_eq!(c.transition(500.0, 0.99, Some(orig)), TwoCategory::Fail);

        let mut c = scripted(0.9, vec![0.5]);
        assert_eq!(c.retag(500.0, 0.99), TwoCategory::Pass);
    }

    #[test]
    fn test_out_of_range_pt_is_untouched() {
        let mut c = scripted(0.5, vec![0.0]);
        assert_eq!(c.lookup_scale_factor(300.0, TwoCategory::Pass), 1.0);
        assert_eq!(c.retag(300.0, 0.99), TwoCategory::Pass);
        assert_eq!(c.retag(300.0, 0.10), TwoCategory::Fail);
    }

    #[test]
    fn test_fail_lookup_is_neutral() {
        let c = scripted(1.7, vec![0.0]);
        assert_eq!(c.lookup_scale_factor(500.0, TwoCategory::Fail), 1.0);
        assert_eq!(c.lookup_scale_factor(500.0, TwoCategory::Pass), 1.7);
    }

    #[test]
    fn test_transition_without_original_derives_category() {
        let mut c = scripted(1.0, vec![0.0]);
        assert_eq!(c.transition(500.0, 0.99, None), TwoCategory::Pass);
        let s = c.summary();
        assert_eq!(s.origin_total, 0);
        assert_eq!(s.result_total, 1);
    }

    #[test]
    fn test_summary_counts() {
        let mut c = scripted(0.9, vec![0.05, 0.5]);
        c.retag(500.0, 0.99); // demoted
        c.retag(500.0, 0.99); // kept
        c.retag(500.0, 0.10); // Fail stays Fail under demotion
        let s = c.summary();
        assert_eq!(s.origin_counts, vec![1, 2]);
        assert_eq!(s.result_counts, vec![2, 1]);
        assert!(s.is_balanced());
    }

    #[test]
    fn test_construction_rejects_bad_config() {
        let table = ScaleFactorTable::bundled(Bundled::ParticleNetTop).unwrap();
        let cfg = TwoCategoryConfig::new(0.94, 1.0, DataPeriod::Y2017);
        assert!(matches!(
            TwoCategoryCorrector::new(cfg, &table),
            Err(Error::Config { ref field, .. }) if field == "efficiency"
        ));
        let cfg = TwoCategoryConfig::new(f64::NAN, 0.3, DataPeriod::Y2017);
        assert!(TwoCategoryCorrector::new(cfg, &table).is_err());
        // Synthetic table has no 2017 entry.
        let cfg = TwoCategoryConfig::new(0.94, 0.3, DataPeriod::Y2017).variation(Variation::Up);
        assert!(TwoCategoryCorrector::new(cfg, &synthetic_table(1.1)).is_err());
    }
}
