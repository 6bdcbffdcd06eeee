//! Calibrations shipped with the crate.

use std::fmt;
use std::str::FromStr;

use tagsf_core::{Error, Result};

/// Calibration datasets embedded at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bundled {
    /// ParticleNet Xbb, MP/HP rows, pT bins [400, 600), [600, 800), [800, ∞).
    ParticleNetXbb,
    /// ParticleNet top, MP/HP rows, pT bins [300, 400), [400, 480), [480, 600), [600, 1200).
    ParticleNetTop,
    /// Photon-pair tagger placeholder with every scale factor set to 1.
    PhotonSaa,
}

impl Bundled {
    /// All bundled calibrations.
    pub const ALL: [Bundled; 3] = [Bundled::ParticleNetXbb, Bundled::ParticleNetTop, Bundled::PhotonSaa];

    /// Identifier accepted by [`FromStr`].
    pub fn id(self) -> &'static str {
        match self {
            Bundled::ParticleNetXbb => "particlenet-xbb",
            Bundled::ParticleNetTop => "particlenet-top",
            Bundled::PhotonSaa => "photon-saa",
        }
    }

    /// Raw JSON document.
    pub fn json(self) -> &'static str {
        match self {
            Bundled::ParticleNetXbb => include_str!("../data/particlenet_xbb.json"),
            Bundled::ParticleNetTop => include_str!("../data/particlenet_top.json"),
            Bundled::PhotonSaa => include_str!("../data/photon_saa.json"),
        }
    }
}

impl fmt::Display for Bundled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Bundled {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let norm = s.trim().to_ascii_lowercase().replace('_', "-");
        Bundled::ALL.into_iter().find(|b| b.id() == norm).ok_or_else(|| {
            Error::config(
                "calibration",
                format!("unknown bundled calibration '{s}' (expected particlenet-xbb, particlenet-top or photon-saa)"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for b in Bundled::ALL {
            assert_eq!(b.id().parse::<Bundled>().unwrap(), b);
        }
        assert_eq!("ParticleNet_Xbb".parse::<Bundled>().unwrap(), Bundled::ParticleNetXbb);
        assert!("deepak8".parse::<Bundled>().is_err());
    }
}
