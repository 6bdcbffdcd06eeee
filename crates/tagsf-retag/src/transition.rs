//! Category transition rules.
//!
//! Given an object's original category, the scale factors of the categories
//! above Fail and the simulated efficiencies, decide whether the object is
//! promoted, demoted or left alone. The rules preserve the expected category
//! fractions: after correction the tagged fraction equals `eff * SF`.
//!
//! Every step moves an object by at most one transition; a demotion is never
//! followed by a promotion within the same call.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tagsf_core::{ThreeCategory, TwoCategory};

use crate::draw::UniformSource;

/// Direction a scale factor asks the correction to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// `SF < 1`: simulation over-tags, demote a `1 - SF` fraction.
    Demote,
    /// `SF == 1`: no correction.
    Neutral,
    /// `SF > 1`: simulation under-tags, promote from Fail.
    Promote,
}

impl Correction {
    /// Classify a scale factor; `None` for NaN.
    pub fn of(sf: f64) -> Option<Self> {
        Some(match sf.partial_cmp(&1.0)? {
            Ordering::Less => Correction::Demote,
            Ordering::Equal => Correction::Neutral,
            Ordering::Greater => Correction::Promote,
        })
    }
}

/// Simulated efficiencies of the Loose and Tight categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyPair {
    /// Probability of the Loose band.
    pub loose: f64,
    /// Probability of the Tight band.
    pub tight: f64,
}

impl EfficiencyPair {
    /// Probability of the Fail band, `1 - eff_L - eff_T`.
    pub fn untagged(&self) -> f64 {
        1.0 - self.loose - self.tight
    }
}

/// Loose and Tight scale factors for one object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactorPair {
    /// Loose-row scale factor.
    pub loose: f64,
    /// Tight-row scale factor.
    pub tight: f64,
}

/// Fraction of Fail objects to promote to Pass, `(1 - SF) / (1 - 1/eff)`.
pub fn pass_promotion_fraction(sf: f64, eff: f64) -> f64 {
    (1.0 - sf) / (1.0 - 1.0 / eff)
}

/// Fraction of Fail objects to promote directly to Tight.
pub fn tight_promotion_fraction(sf_tight: f64, eff: EfficiencyPair) -> f64 {
    eff.tight * (sf_tight - 1.0) / eff.untagged()
}

/// Fraction of Fail objects to promote to Loose when Tight is not promoted.
pub fn loose_promotion_fraction(sf_loose: f64, eff: EfficiencyPair) -> f64 {
    eff.loose * (sf_loose - 1.0) / eff.untagged()
}

/// Loose promotion fraction conditioned on the object having already missed
/// the Tight promotion gate `f_tight`.
pub fn loose_fallback_fraction(sf_loose: f64, eff: EfficiencyPair, f_tight: f64) -> f64 {
    loose_promotion_fraction(sf_loose, eff) / (1.0 - f_tight)
}

/// One two-category step with draw `rn`.
pub fn two_category_step(old: TwoCategory, sf: f64, eff: f64, rn: f64) -> TwoCategory {
    match Correction::of(sf) {
        Some(Correction::Demote) => match old {
            TwoCategory::Pass if rn < 1.0 - sf => TwoCategory::Fail,
            _ => old,
        },
        Some(Correction::Neutral) => old,
        Some(Correction::Promote) => match old {
            TwoCategory::Fail if rn < pass_promotion_fraction(sf, eff) => TwoCategory::Pass,
            _ => old,
        },
        None => {
            log::warn!("no transition regime for scale factor {sf}; leaving {old} unchanged");
            old
        }
    }
}

/// One three-category step with draw `rn`.
///
/// Only the both-promote regime may take a second, independent draw from
/// `draws`, and only for a Fail object that missed the Tight gate.
pub fn three_category_step<D: UniformSource + ?Sized>(
    old: ThreeCategory,
    sf: ScaleFactorPair,
    eff: EfficiencyPair,
    rn: f64,
    draws: &mut D,
) -> ThreeCategory {
    use Correction::{Demote, Neutral, Promote};
    use ThreeCategory::{Fail, Loose, Tight};

    let (Some(loose), Some(tight)) = (Correction::of(sf.loose), Correction::of(sf.tight)) else {
        log::warn!(
            "no transition regime for scale factors (loose={}, tight={}); leaving {old} unchanged",
            sf.loose,
            sf.tight
        );
        return old;
    };

    // A neutral row contributes `1 - SF == 0` to its demotion gate, so it
    // shares the arm of the neighbouring regime without changing outcomes.
    match (loose, tight) {
        (Promote, Promote) => {
            if old != Fail {
                return old;
            }
            let f_tight = tight_promotion_fraction(sf.tight, eff);
            if rn < f_tight {
                return Tight;
            }
            let rn2 = draws.next_uniform();
            if rn2 < loose_fallback_fraction(sf.loose, eff, f_tight) { Loose } else { Fail }
        }
        (Demote | Neutral, Promote) => match old {
            Fail if rn < tight_promotion_fraction(sf.tight, eff) => Tight,
            Loose if rn < 1.0 - sf.loose => Fail,
            _ => old,
        },
        (Promote, Demote | Neutral) => match old {
            Tight if rn < 1.0 - sf.tight => Fail,
            Fail if rn < loose_promotion_fraction(sf.loose, eff) => Loose,
            _ => old,
        },
        (Demote | Neutral, Demote | Neutral) => match old {
            Tight if rn < 1.0 - sf.tight => Fail,
            Loose if rn < 1.0 - sf.loose => Fail,
            _ => old,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::ScriptedDraws;
    use approx::assert_relative_eq;

    const EFF: EfficiencyPair = EfficiencyPair { loose: 0.1, tight: 0.05 };

    fn step(old: ThreeCategory, sf_l: f64, sf_t: f64, rn: f64, rn2: f64) -> (ThreeCategory, usize) {
        let mut draws = ScriptedDraws::new(vec![rn2]).unwrap();
        let new = three_category_step(
            old,
            ScaleFactorPair { loose: sf_l, tight: sf_t },
            EFF,
            rn,
            &mut draws,
        );
        (new, draws.consumed())
    }

    #[test]
    fn test_correction_of() {
        assert_eq!(Correction::of(0.9), Some(Correction::Demote));
        assert_eq!(Correction::of(1.0), Some(Correction::Neutral));
        assert_eq!(Correction::of(1.1), Some(Correction::Promote));
        assert_eq!(Correction::of(f64::NAN), None);
    }

    #[test]
    fn test_pass_promotion_fraction_equivalent_forms() {
        for &(sf, eff) in &[(1.1, 0.3), (1.5, 0.05), (2.0, 0.4)] {
            let alt = eff * (sf - 1.0) / (1.0 - eff);
            assert_relative_eq!(pass_promotion_fraction(sf, eff), alt, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_two_category_demotion_scenario() {
        assert_eq!(two_category_step(TwoCategory::Pass, 0.9, 0.3, 0.05), TwoCategory::Fail);
        assert_eq!(two_category_step(TwoCategory::Pass, 0.9, 0.3, 0.5), TwoCategory::Pass);
        // Demotion never touches Fail.
        assert_eq!(two_category_step(TwoCategory::Fail, 0.9, 0.3, 0.0), TwoCategory::Fail);
    }

    #[test]
    fn test_two_category_promotion() {
        // f = 0.3 * 0.2 / 0.7 ≈ 0.0857
        assert_eq!(two_category_step(TwoCategory::Fail, 1.2, 0.3, 0.08), TwoCategory::Pass);
        assert_eq!(two_category_step(TwoCategory::Fail, 1.2, 0.3, 0.09), TwoCategory::Fail);
        assert_eq!(two_category_step(TwoCategory::Pass, 1.2, 0.3, 0.0), TwoCategory::Pass);
    }

    #[test]
    fn test_two_category_neutral_and_nan() {
        for rn in [0.0, 0.5, 0.999] {
            assert_eq!(two_category_step(TwoCategory::Fail, 1.0, 0.3, rn), TwoCategory::Fail);
            assert_eq!(two_category_step(TwoCategory::Pass, 1.0, 0.3, rn), TwoCategory::Pass);
        }
        assert_eq!(two_category_step(TwoCategory::Pass, f64::NAN, 0.3, 0.0), TwoCategory::Pass);
    }

    #[test]
    fn test_both_promote_scenario() {
        let f_t = tight_promotion_fraction(1.5, EFF);
        assert_relative_eq!(f_t, 0.05 * 0.5 / 0.85, epsilon = 1e-12);
        assert!((f_t - 0.0294).abs() < 1e-4);

        // First draw under f_T: straight to Tight, no second draw.
        assert_eq!(step(ThreeCategory::Fail, 1.2, 1.5, 0.01, 0.0), (ThreeCategory::Tight, 0));

        // First draw misses f_T: second draw gates the Loose promotion.
        let f_l = loose_fallback_fraction(1.2, EFF, f_t);
        assert_relative_eq!(f_l, 0.1 * 0.2 / (0.85 * (1.0 - f_t)), epsilon = 1e-12);
        assert_eq!(step(ThreeCategory::Fail, 1.2, 1.5, 0.05, 0.01), (ThreeCategory::Loose, 1));
        assert_eq!(step(ThreeCategory::Fail, 1.2, 1.5, 0.05, 0.5), (ThreeCategory::Fail, 1));

        // Only Fail objects move in this regime.
        assert_eq!(step(ThreeCategory::Loose, 1.2, 1.5, 0.0, 0.0), (ThreeCategory::Loose, 0));
        assert_eq!(step(ThreeCategory::Tight, 1.2, 1.5, 0.0, 0.0), (ThreeCategory::Tight, 0));
    }

    #[test]
    fn test_both_demote() {
        assert_eq!(step(ThreeCategory::Tight, 0.8, 0.9, 0.05, 0.0).0, ThreeCategory::Fail);
        assert_eq!(step(ThreeCategory::Tight, 0.8, 0.9, 0.15, 0.0).0, ThreeCategory::Tight);
        assert_eq!(step(ThreeCategory::Loose, 0.8, 0.9, 0.15, 0.0).0, ThreeCategory::Fail);
        assert_eq!(step(ThreeCategory::Loose, 0.8, 0.9, 0.25, 0.0).0, ThreeCategory::Loose);
        assert_eq!(step(ThreeCategory::Fail, 0.8, 0.9, 0.0, 0.0).0, ThreeCategory::Fail);
    }

    #[test]
    fn test_loose_demote_tight_promote() {
        // f = 0.05 * 0.5 / 0.85 ≈ 0.0294
        assert_eq!(step(ThreeCategory::Fail, 0.8, 1.5, 0.02, 0.0), (ThreeCategory::Tight, 0));
        assert_eq!(step(ThreeCategory::Fail, 0.8, 1.5, 0.1, 0.0), (ThreeCategory::Fail, 0));
        assert_eq!(step(ThreeCategory::Loose, 0.8, 1.5, 0.1, 0.0), (ThreeCategory::Fail, 0));
        assert_eq!(step(ThreeCategory::Loose, 0.8, 1.5, 0.3, 0.0), (ThreeCategory::Loose, 0));
        assert_eq!(step(ThreeCategory::Tight, 0.8, 1.5, 0.0, 0.0), (ThreeCategory::Tight, 0));
    }

    #[test]
    fn test_loose_promote_tight_demote_never_chains() {
        // Tight demoted with rn below 1 - SF_T; must not then be promoted to Loose.
        assert_eq!(step(ThreeCategory::Tight, 1.5, 0.5, 0.01, 0.0).0, ThreeCategory::Fail);
        // f = 0.1 * 0.5 / 0.85 ≈ 0.0588
        assert_eq!(step(ThreeCategory::Fail, 1.5, 0.5, 0.05, 0.0).0, ThreeCategory::Loose);
        assert_eq!(step(ThreeCategory::Fail, 1.5, 0.5, 0.07, 0.0).0, ThreeCategory::Fail);
        assert_eq!(step(ThreeCategory::Loose, 1.5, 0.5, 0.0, 0.0).0, ThreeCategory::Loose);
    }

    #[test]
    fn test_neutral_rows_never_move() {
        for old in [ThreeCategory::Fail, ThreeCategory::Loose, ThreeCategory::Tight] {
            for rn in [0.0, 0.3, 0.99] {
                assert_eq!(step(old, 1.0, 1.0, rn, 0.0), (old, 0));
            }
        }
    }

    #[test]
    fn test_mixed_neutral_regimes() {
        // Neutral loose + promoting tight: only Fail -> Tight possible.
        assert_eq!(step(ThreeCategory::Loose, 1.0, 1.5, 0.0, 0.0).0, ThreeCategory::Loose);
        assert_eq!(step(ThreeCategory::Fail, 1.0, 1.5, 0.0, 0.0).0, ThreeCategory::Tight);
        // Demoting loose + neutral tight: Tight untouched.
        assert_eq!(step(ThreeCategory::Tight, 0.5, 1.0, 0.0, 0.0).0, ThreeCategory::Tight);
        assert_eq!(step(ThreeCategory::Loose, 0.5, 1.0, 0.1, 0.0).0, ThreeCategory::Fail);
        // Promoting loose + neutral tight never takes a second draw.
        assert_eq!(step(ThreeCategory::Fail, 1.5, 1.0, 0.5, 0.0), (ThreeCategory::Fail, 0));
    }

    #[test]
    fn test_tight_fraction_continuous_at_one() {
        let just_above = tight_promotion_fraction(1.0 + 1e-9, EFF);
        assert!(just_above > 0.0 && just_above < 1e-9);
        assert_eq!(tight_promotion_fraction(1.0, EFF), 0.0);
        let f_l = loose_fallback_fraction(1.0 + 1e-9, EFF, just_above);
        assert!(f_l > 0.0 && f_l < 1e-8);
    }

    #[test]
    fn test_nan_scale_factor_leaves_category() {
        assert_eq!(step(ThreeCategory::Loose, f64::NAN, 1.5, 0.0, 0.0).0, ThreeCategory::Loose);
    }
}
