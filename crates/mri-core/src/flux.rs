// ─────────────────────────────────────────────────────────────────────
// MRI EM Thresh — Flux Linkage
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Magnetic flux through the head cross-section under a uniform field.
//!
//!   Φ(t) = A·B(t),   dΦ/dt = A·dB/dt(t)
//!
//! Derivatives are analytic for both waveform families.

use mri_types::error::{EmError, EmResult};
use mri_types::state::{WaveformParams, WaveformShape};
use std::f64::consts::PI;

/// Validated closed-form B(t) along the field axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MagneticFieldWaveform {
    /// B(t) = B0 sin(ωt)
    Sinusoidal {
        amplitude: f64,
        angular_frequency: f64,
    },
    /// B(t) = slew_rate · t clipped to [0, peak]
    LinearRamp { slew_rate: f64, peak: f64 },
}

fn check_non_negative(name: &str, value: f64) -> EmResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EmError::InvalidWaveform(format!(
            "{name} must be finite and >= 0, got {value}"
        )));
    }
    Ok(())
}

impl MagneticFieldWaveform {
    pub fn sinusoidal(amplitude: f64, angular_frequency: f64) -> EmResult<Self> {
        check_non_negative("amplitude", amplitude)?;
        check_non_negative("angular frequency", angular_frequency)?;
        Ok(MagneticFieldWaveform::Sinusoidal {
            amplitude,
            angular_frequency,
        })
    }

    pub fn linear_ramp(slew_rate: f64, peak: f64) -> EmResult<Self> {
        check_non_negative("slew rate", slew_rate)?;
        check_non_negative("peak field", peak)?;
        Ok(MagneticFieldWaveform::LinearRamp { slew_rate, peak })
    }

    /// Build from configured parameters; frequency is in Hz.
    ///
    /// Every parameter is checked, including the one the shape ignores.
    pub fn from_params(params: &WaveformParams) -> EmResult<Self> {
        check_non_negative("frequency", params.frequency_hz)?;
        check_non_negative("slew rate", params.slew_rate)?;
        match params.shape {
            WaveformShape::Sinusoidal => {
                Self::sinusoidal(params.field_strength, 2.0 * PI * params.frequency_hz)
            }
            WaveformShape::LinearRamp => Self::linear_ramp(params.slew_rate, params.field_strength),
        }
    }

    /// B(t) [T].
    pub fn field(&self, t: f64) -> f64 {
        match *self {
            MagneticFieldWaveform::Sinusoidal {
                amplitude,
                angular_frequency,
            } => amplitude * (angular_frequency * t).sin(),
            MagneticFieldWaveform::LinearRamp { slew_rate, peak } => {
                (slew_rate * t).clamp(0.0, peak)
            }
        }
    }

    /// dB/dt(t) [T/s].
    ///
    /// The ramp derivative is the slew rate while 0 ≤ B < peak and zero
    /// outside (one-sided at the knees).
    pub fn field_rate(&self, t: f64) -> f64 {
        match *self {
            MagneticFieldWaveform::Sinusoidal {
                amplitude,
                angular_frequency,
            } => amplitude * angular_frequency * (angular_frequency * t).cos(),
            MagneticFieldWaveform::LinearRamp { slew_rate, peak } => {
                if t >= 0.0 && slew_rate * t < peak {
                    slew_rate
                } else {
                    0.0
                }
            }
        }
    }

    /// Worst-case |dB/dt| over one cycle [T/s]: B0·ω, or the slew rate.
    pub fn max_field_rate(&self) -> f64 {
        match *self {
            MagneticFieldWaveform::Sinusoidal {
                amplitude,
                angular_frequency,
            } => amplitude * angular_frequency,
            MagneticFieldWaveform::LinearRamp { slew_rate, .. } => slew_rate,
        }
    }
}

/// Flux through a fixed area under a borrowed waveform.
#[derive(Debug, Clone, Copy)]
pub struct FluxLinkage<'a> {
    area: f64,
    waveform: &'a MagneticFieldWaveform,
}

impl<'a> FluxLinkage<'a> {
    pub fn new(area: f64, waveform: &'a MagneticFieldWaveform) -> Self {
        FluxLinkage { area, waveform }
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    /// Φ(t) [Wb].
    pub fn flux(&self, t: f64) -> f64 {
        self.area * self.waveform.field(t)
    }

    /// dΦ/dt(t) [Wb/s].
    pub fn flux_rate(&self, t: f64) -> f64 {
        self.area * self.waveform.field_rate(t)
    }

    /// Worst-case |dB/dt| of the underlying waveform [T/s].
    pub fn max_field_rate(&self) -> f64 {
        self.waveform.max_field_rate()
    }

    /// Worst-case |dΦ/dt| [Wb/s].
    pub fn max_flux_rate(&self) -> f64 {
        self.area * self.max_field_rate()
    }
}
