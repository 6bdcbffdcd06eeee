//! Fail/Pass corrector for two indexed objects of the same event.
//!
//! Used when an event-level selection (e.g. choosing the top candidate out
//! of a dijet pair) needs the corrected categories of both objects at once.
//! Each index keeps its own efficiency and its own counters.

use tagsf_calib::{ScaleFactorRow, ScaleFactorTable};
use tagsf_core::{Error, Result, TagSummary, TransitionCounters, TwoCategory};

use crate::config::PairedConfig;
use crate::draw::{SeededUniform, UniformSource};
use crate::thresholds::{Classifier, WorkingPoint};
use crate::transition::two_category_step;

/// Re-tags the two configured objects of each event.
#[derive(Debug)]
pub struct PairedCorrector<D = SeededUniform> {
    config: PairedConfig,
    working_point: WorkingPoint,
    pass_row: ScaleFactorRow,
    counters: [TransitionCounters<2>; 2],
    draws: D,
}

impl PairedCorrector<SeededUniform> {
    /// Validate `config` and resolve its scale factors from `table`.
    pub fn new(config: PairedConfig, table: &ScaleFactorTable) -> Result<Self> {
        let draws = SeededUniform::new(config.seed);
        Self::with_source(config, table, draws)
    }
}

impl<D: UniformSource> PairedCorrector<D> {
    /// Like [`PairedCorrector::new`] with an explicit draw source.
    pub fn with_source(config: PairedConfig, table: &ScaleFactorTable, draws: D) -> Result<Self> {
        let working_point = config.validate()?;
        let pass_row = table.resolve(config.period, config.variation, config.pass_row)?;
        log::debug!(
            "paired corrector: {} {} {} {} row, indices={:?}, effs={:?}",
            table.name(),
            config.period,
            config.variation,
            config.pass_row,
            config.indices,
            config.efficiencies
        );
        Ok(Self {
            config,
            working_point,
            pass_row,
            counters: [TransitionCounters::new(), TransitionCounters::new()],
            draws,
        })
    }

    /// Scale factor of `category` at `pt`. Fail is always 1.
    pub fn lookup_scale_factor(&self, pt: f64, category: TwoCategory) -> f64 {
        match category {
            TwoCategory::Fail => 1.0,
            TwoCategory::Pass => self.pass_row.lookup(pt),
        }
    }

    /// Classify and re-tag both configured objects of one event.
    ///
    /// `scores` and `pts` are the event's per-object collections. One draw is
    /// taken per object, first object first. Fails without touching any
    /// counter if an index is out of range.
    pub fn transition(&mut self, scores: &[f64], pts: &[f64]) -> Result<[TwoCategory; 2]> {
        let (first, second) = self.config.indices;
        let objects = [object_at(scores, pts, first)?, object_at(scores, pts, second)?];
        let efficiencies = [self.config.efficiencies.0, self.config.efficiencies.1];

        let originals = objects.map(|(score, _)| self.working_point.categorize(score));
        let draws = [self.draws.next_uniform(), self.draws.next_uniform()];

        let mut out = originals;
        for slot in 0..2 {
            let (_, pt) = objects[slot];
            let sf = self.lookup_scale_factor(pt, TwoCategory::Pass);
            out[slot] = two_category_step(originals[slot], sf, efficiencies[slot], draws[slot]);
            self.counters[slot].record_origin(originals[slot]);
            self.counters[slot].record_result(out[slot]);
        }
        Ok(out)
    }

    /// Counts for the first and second configured object.
    pub fn summary(&self) -> [TagSummary; 2] {
        [self.counters[0].summary::<TwoCategory>(), self.counters[1].summary::<TwoCategory>()]
    }

    /// Configuration this corrector was built from.
    pub fn config(&self) -> &PairedConfig {
        &self.config
    }
}

fn object_at(scores: &[f64], pts: &[f64], index: usize) -> Result<(f64, f64)> {
    match (scores.get(index), pts.get(index)) {
        (Some(&score), Some(&pt)) => Ok((score, pt)),
        _ => Err(Error::Validation(format!(
            "object index {index} out of range (event has {} scores, {} pts)",
            scores.len(),
            pts.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::ScriptedDraws;
    use tagsf_calib::Bundled;
    use tagsf_core::{DataPeriod, Variation};

    fn top_table() -> ScaleFactorTable {
        ScaleFactorTable::bundled(Bundled::ParticleNetTop).unwrap()
    }

    #[test]
    fn test_draw_order_follows_indices() {
        // 2016 nominal HP, pt in [400, 480): SF = 0.91 → demote if rn < 0.09.
        let cfg = PairedConfig::new(0.94, (0.3, 0.3), DataPeriod::Y2016).indices(2, 0);
        let draws = ScriptedDraws::new(vec![0.05, 0.5]).unwrap();
        let mut c = PairedCorrector::with_source(cfg, &top_table(), draws).unwrap();

        let scores = [0.99, 0.1, 0.97];
        let pts = [450.0, 500.0, 420.0];
        // Index 2 gets the first draw (0.05, demoted); index 0 gets 0.5 (kept).
        let out = c.transition(&scores, &pts).unwrap();
        assert_eq!(out, [TwoCategory::Fail, TwoCategory::Pass]);
        assert_eq!(c.draws.consumed(), 2);

        let [first, second] = c.summary();
        assert_eq!(first.origin_counts, vec![0, 1]);
        assert_eq!(first.result_counts, vec![1, 0]);
        assert_eq!(second.origin_counts, vec![0, 1]);
        assert_eq!(second.result_counts, vec![0, 1]);
    }

    #[test]
    fn test_out_of_range_index_counts_nothing() {
        let cfg = PairedConfig::new(0.94, (0.3, 0.3), DataPeriod::Y2017).indices(0, 3);
        let mut c = PairedCorrector::new(cfg, &top_table()).unwrap();
        assert!(c.transition(&[0.99, 0.5], &[500.0, 500.0]).is_err());
        let [a, b] = c.summary();
        assert_eq!(a.origin_total + b.origin_total + a.result_total + b.result_total, 0);
    }

    #[test]
    fn test_separate_efficiencies_per_index() {
        // 2016APV up HP, pt in [300, 400): SF = 1.18 → promote Fail if rn < f.
        // f(eff=0.5) = 0.18, f(eff=0.05) ≈ 0.0095.
        let cfg = PairedConfig::new(0.94, (0.5, 0.05), DataPeriod::Y2016Apv)
            .variation(Variation::Up);
        let draws = ScriptedDraws::new(vec![0.1]).unwrap();
        let mut c = PairedCorrector::with_source(cfg, &top_table(), draws).unwrap();
        let out = c.transition(&[0.2, 0.2], &[350.0, 350.0]).unwrap();
        assert_eq!(out, [TwoCategory::Pass, TwoCategory::Fail]);
    }
}
