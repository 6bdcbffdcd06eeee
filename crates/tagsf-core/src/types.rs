//! Common data types for tagsf

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An ordered tagger category domain.
///
/// Categories are ordered by increasing tagger strictness; `index()` is the
/// position in [`TagCategory::ALL`] and doubles as the slot in counter arrays.
pub trait TagCategory: Copy + Eq + Ord + fmt::Debug + 'static {
    /// Number of categories in the domain.
    const COUNT: usize;

    /// All categories, lowest first.
    const ALL: &'static [Self];

    /// Position of this category in the domain.
    fn index(self) -> usize;

    /// Short label used in summaries.
    fn label(self) -> &'static str;

    /// Category at position `index`, if any.
    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Fail/Pass domain of a single-working-point tagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum TwoCategory {
    /// Score at or below the working point.
    Fail = 0,
    /// Score above the working point.
    Pass = 1,
}

impl TagCategory for TwoCategory {
    const COUNT: usize = 2;
    const ALL: &'static [Self] = &[TwoCategory::Fail, TwoCategory::Pass];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            TwoCategory::Fail => "Fail",
            TwoCategory::Pass => "Pass",
        }
    }
}

/// Fail/Loose/Tight domain of a two-working-point tagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ThreeCategory {
    /// Score at or below the loose working point.
    Fail = 0,
    /// Score between the loose and tight working points.
    Loose = 1,
    /// Score above the tight working point.
    Tight = 2,
}

impl TagCategory for ThreeCategory {
    const COUNT: usize = 3;
    const ALL: &'static [Self] = &[ThreeCategory::Fail, ThreeCategory::Loose, ThreeCategory::Tight];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            ThreeCategory::Fail => "Fail",
            ThreeCategory::Loose => "Loose",
            ThreeCategory::Tight => "Tight",
        }
    }
}

macro_rules! impl_category_conversions {
    ($ty:ty, $name:literal) => {
        impl TryFrom<u8> for $ty {
            type Error = Error;

            fn try_from(value: u8) -> Result<Self> {
                <$ty as TagCategory>::from_index(value as usize).ok_or_else(|| {
                    Error::Validation(format!(
                        "{} category must be < {}, got {}",
                        $name,
                        <$ty as TagCategory>::COUNT,
                        value
                    ))
                })
            }
        }

        impl From<$ty> for u8 {
            fn from(c: $ty) -> u8 {
                c as u8
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

impl_category_conversions!(TwoCategory, "two-category");
impl_category_conversions!(ThreeCategory, "three-category");

/// Data-taking period a calibration was derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DataPeriod {
    /// 2016, pre-VFP ("APV") reprocessing.
    #[serde(rename = "2016APV")]
    Y2016Apv,
    /// 2016, post-VFP.
    #[serde(rename = "2016")]
    Y2016,
    /// 2017.
    #[serde(rename = "2017")]
    Y2017,
    /// 2018.
    #[serde(rename = "2018")]
    Y2018,
}

impl DataPeriod {
    /// All known periods in chronological order.
    pub const ALL: [DataPeriod; 4] =
        [DataPeriod::Y2016Apv, DataPeriod::Y2016, DataPeriod::Y2017, DataPeriod::Y2018];

    /// Canonical identifier, as used in calibration files.
    pub fn as_str(self) -> &'static str {
        match self {
            DataPeriod::Y2016Apv => "2016APV",
            DataPeriod::Y2016 => "2016",
            DataPeriod::Y2017 => "2017",
            DataPeriod::Y2018 => "2018",
        }
    }
}

impl fmt::Display for DataPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataPeriod {
    type Err = Error;

    /// Accepts the canonical identifiers as well as the short era form
    /// (`"16APV"`, `"17"`), case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let norm = s.trim().to_ascii_uppercase();
        let full = if norm.starts_with("20") { norm } else { format!("20{norm}") };
        match full.as_str() {
            "2016APV" => Ok(DataPeriod::Y2016Apv),
            "2016" => Ok(DataPeriod::Y2016),
            "2017" => Ok(DataPeriod::Y2017),
            "2018" => Ok(DataPeriod::Y2018),
            _ => Err(Error::config(
                "period",
                format!("unknown data period '{s}' (expected 2016APV, 2016, 2017 or 2018)"),
            )),
        }
    }
}

/// Systematic variation of the scale factors.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Variation {
    /// Central value.
    #[default]
    Nominal,
    /// +1σ.
    Up,
    /// −1σ.
    Down,
}

impl Variation {
    /// All variations, in the historical selector order (0, 1, 2).
    pub const ALL: [Variation; 3] = [Variation::Nominal, Variation::Up, Variation::Down];

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Variation::Nominal => "nominal",
            Variation::Up => "up",
            Variation::Down => "down",
        }
    }
}

impl fmt::Display for Variation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nominal" | "nom" | "0" => Ok(Variation::Nominal),
            "up" | "1" => Ok(Variation::Up),
            "down" | "2" => Ok(Variation::Down),
            _ => Err(Error::config(
                "variation",
                format!("unknown variation '{s}' (expected nominal, up or down)"),
            )),
        }
    }
}

/// Historical integer selector: 0 = nominal, 1 = up, 2 = down.
impl TryFrom<u8> for Variation {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Variation::ALL.get(value as usize).copied().ok_or_else(|| {
            Error::config("variation", format!("selector must be 0, 1 or 2, got {value}"))
        })
    }
}

/// Which calibrated working-point row a scale factor is read from.
///
/// Three-category correctors read both rows; a two-category corrector uses
/// one of them as its "pass" row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalibrationRow {
    /// Medium-purity (loose) working point.
    Loose,
    /// High-purity (tight) working point.
    Tight,
}

impl fmt::Display for CalibrationRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationRow::Loose => f.write_str("loose"),
            CalibrationRow::Tight => f.write_str("tight"),
        }
    }
}

impl FromStr for CalibrationRow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loose" | "mp" => Ok(CalibrationRow::Loose),
            "tight" | "hp" => Ok(CalibrationRow::Tight),
            _ => Err(Error::config(
                "row",
                format!("unknown calibration row '{s}' (expected loose or tight)"),
            )),
        }
    }
}
