// ─────────────────────────────────────────────────────────────────────
// MRI EM Thresh — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Bulk brain tissue conductivity (S/m) at low frequency.
pub const SIGMA_BRAIN: f64 = 0.33;

/// Adult brain semi-axis, left-right / lateral (m) - 9 cm.
pub const HEAD_LEFT_RIGHT_M: f64 = 0.09;

/// Adult brain semi-axis, anterior-posterior (m) - 9 cm.
pub const HEAD_ANTERIOR_POSTERIOR_M: f64 = 0.09;

/// Adult brain semi-axis, superior-inferior (m) - 6.5 cm.
pub const HEAD_SUPERIOR_INFERIOR_M: f64 = 0.065;

/// Typical clinical main field strength (T).
pub const DEFAULT_FIELD_STRENGTH_T: f64 = 3.0;

/// Default gradient switching frequency (Hz).
pub const DEFAULT_FREQUENCY_HZ: f64 = 1000.0;

/// Default gradient slew rate (T/s).
pub const DEFAULT_SLEW_RATE_T_PER_S: f64 = 200.0;

/// Main field strength at and above which a high-field caution is raised (T).
pub const HIGH_FIELD_CAUTION_T: f64 = 7.0;

/// E-field at which subtle neuromodulation begins (V/m).
pub const E_NEUROMODULATION_ONSET: f64 = 0.1;

/// E-field at which peripheral nerve stimulation begins (V/m).
pub const E_PNS_ONSET: f64 = 1.0;

/// E-field at which peripheral nerve stimulation becomes painful (V/m).
pub const E_PNS_PAIN: f64 = 5.8;

/// Upper edge of the painful stimulation band (V/m).
pub const E_PNS_PAIN_UPPER: f64 = 10.0;
