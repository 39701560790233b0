// ─────────────────────────────────────────────────────────────────────
// MRI EM Thresh — Biological Response Bands
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Expected physiological response to an induced E-field.
//!
//! Bands [V/m]:
//!   < 0.1        no expected effect
//!   0.1 – 1      subtle neuromodulation
//!   1 – 5.8      peripheral nerve stimulation, tingling
//!   5.8 – 10     peripheral nerve stimulation, painful
//!   > 10         beyond the painful stimulation band
//!
//! Lower band edges are inclusive for neuromodulation, upper edges
//! inclusive for the stimulation bands. A NaN field has no band.

use mri_core::sweep::InducedResult;
use mri_types::constants::{
    E_NEUROMODULATION_ONSET, E_PNS_ONSET, E_PNS_PAIN, E_PNS_PAIN_UPPER, HIGH_FIELD_CAUTION_T,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StimulationRegime {
    Undetermined,
    None,
    SubtleNeuromodulation,
    SensoryTingling,
    SensoryPain,
    AbovePainBand,
}

impl StimulationRegime {
    pub fn from_e_field(e_field: f64) -> Self {
        let e = e_field.abs();
        if e.is_nan() {
            StimulationRegime::Undetermined
        } else if e < E_NEUROMODULATION_ONSET {
            StimulationRegime::None
        } else if e <= E_PNS_ONSET {
            StimulationRegime::SubtleNeuromodulation
        } else if e <= E_PNS_PAIN {
            StimulationRegime::SensoryTingling
        } else if e <= E_PNS_PAIN_UPPER {
            StimulationRegime::SensoryPain
        } else {
            StimulationRegime::AbovePainBand
        }
    }

    /// Peripheral nerves are stimulated in this band.
    pub fn is_nerve_stimulation(self) -> bool {
        self >= StimulationRegime::SensoryTingling
    }
}

impl fmt::Display for StimulationRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StimulationRegime::Undetermined => write!(f, "undetermined"),
            StimulationRegime::None => write!(f, "no expected effect"),
            StimulationRegime::SubtleNeuromodulation => write!(f, "subtle neuromodulation"),
            StimulationRegime::SensoryTingling => {
                write!(f, "peripheral nerve stimulation (tingling)")
            }
            StimulationRegime::SensoryPain => write!(f, "peripheral nerve stimulation (painful)"),
            StimulationRegime::AbovePainBand => write!(f, "above painful stimulation band"),
        }
    }
}

/// Main field at or above the high-field caution level.
pub fn is_high_field(field_strength: f64) -> bool {
    field_strength >= HIGH_FIELD_CAUTION_T
}

/// Biological annotations of one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiologicalAssessment {
    pub regime: StimulationRegime,
    pub high_field: bool,
}

pub fn assess(result: &InducedResult) -> BiologicalAssessment {
    BiologicalAssessment {
        regime: StimulationRegime::from_e_field(result.quantities.e_field),
        high_field: is_high_field(result.point.waveform.field_strength),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands() {
        let cases = [
            (0.0, StimulationRegime::None),
            (0.099, StimulationRegime::None),
            (0.1, StimulationRegime::SubtleNeuromodulation),
            (1.0, StimulationRegime::SubtleNeuromodulation),
            (1.01, StimulationRegime::SensoryTingling),
            (5.8, StimulationRegime::SensoryTingling),
            (5.81, StimulationRegime::SensoryPain),
            (10.0, StimulationRegime::SensoryPain),
            (10.5, StimulationRegime::AbovePainBand),
        ];
        for (e, expected) in cases {
            assert_eq!(StimulationRegime::from_e_field(e), expected, "E = {e}");
        }
    }

    #[test]
    fn test_nan_field_is_undetermined() {
        let regime = StimulationRegime::from_e_field(f64::NAN);
        assert_eq!(regime, StimulationRegime::Undetermined);
        assert!(!regime.is_nerve_stimulation());
        assert!(regime < StimulationRegime::None);
    }

    #[test]
    fn test_nerve_stimulation_flag() {
        assert!(!StimulationRegime::SubtleNeuromodulation.is_nerve_stimulation());
        assert!(StimulationRegime::SensoryTingling.is_nerve_stimulation());
        assert!(StimulationRegime::AbovePainBand.is_nerve_stimulation());
    }

    #[test]
    fn test_high_field() {
        assert!(!is_high_field(3.0));
        assert!(is_high_field(7.0));
        assert!(is_high_field(11.7));
    }
}
