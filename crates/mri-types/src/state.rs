// ─────────────────────────────────────────────────────────────────────
// MRI EM Thresh — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{
    DEFAULT_FIELD_STRENGTH_T, DEFAULT_FREQUENCY_HZ, DEFAULT_SLEW_RATE_T_PER_S,
    HEAD_ANTERIOR_POSTERIOR_M, HEAD_LEFT_RIGHT_M, HEAD_SUPERIOR_INFERIOR_M, SIGMA_BRAIN,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anatomical axis of the head ellipsoid.
///
/// With the patient lying in the bore the main field runs along the
/// body length, i.e. the anterior-posterior axis of the head model.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AnatomicalAxis {
    #[default]
    AnteriorPosterior,
    LeftRight,
    SuperiorInferior,
}

impl AnatomicalAxis {
    pub const ALL: [AnatomicalAxis; 3] = [
        AnatomicalAxis::AnteriorPosterior,
        AnatomicalAxis::LeftRight,
        AnatomicalAxis::SuperiorInferior,
    ];

    /// The two axes spanning the plane perpendicular to `self`.
    pub fn perpendicular(self) -> (AnatomicalAxis, AnatomicalAxis) {
        match self {
            AnatomicalAxis::AnteriorPosterior => {
                (AnatomicalAxis::LeftRight, AnatomicalAxis::SuperiorInferior)
            }
            AnatomicalAxis::LeftRight => (
                AnatomicalAxis::AnteriorPosterior,
                AnatomicalAxis::SuperiorInferior,
            ),
            AnatomicalAxis::SuperiorInferior => {
                (AnatomicalAxis::AnteriorPosterior, AnatomicalAxis::LeftRight)
            }
        }
    }
}

impl fmt::Display for AnatomicalAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnatomicalAxis::AnteriorPosterior => write!(f, "anterior-posterior"),
            AnatomicalAxis::LeftRight => write!(f, "left-right"),
            AnatomicalAxis::SuperiorInferior => write!(f, "superior-inferior"),
        }
    }
}

/// Raw semi-axis lengths [m], not yet validated.
///
/// Sweeps carry these so that a degenerate variant becomes a failed point
/// instead of a construction error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemiAxes {
    pub anterior_posterior: f64,
    pub left_right: f64,
    pub superior_inferior: f64,
}

impl SemiAxes {
    pub fn new(anterior_posterior: f64, left_right: f64, superior_inferior: f64) -> Self {
        SemiAxes {
            anterior_posterior,
            left_right,
            superior_inferior,
        }
    }

    pub fn get(&self, axis: AnatomicalAxis) -> f64 {
        match axis {
            AnatomicalAxis::AnteriorPosterior => self.anterior_posterior,
            AnatomicalAxis::LeftRight => self.left_right,
            AnatomicalAxis::SuperiorInferior => self.superior_inferior,
        }
    }

    /// Copy with one axis replaced.
    pub fn with(mut self, axis: AnatomicalAxis, value: f64) -> Self {
        match axis {
            AnatomicalAxis::AnteriorPosterior => self.anterior_posterior = value,
            AnatomicalAxis::LeftRight => self.left_right = value,
            AnatomicalAxis::SuperiorInferior => self.superior_inferior = value,
        }
        self
    }
}

impl Default for SemiAxes {
    fn default() -> Self {
        SemiAxes {
            anterior_posterior: HEAD_ANTERIOR_POSTERIOR_M,
            left_right: HEAD_LEFT_RIGHT_M,
            superior_inferior: HEAD_SUPERIOR_INFERIOR_M,
        }
    }
}

/// Closed-form waveform family for B(t).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveformShape {
    /// B(t) = B0 sin(ωt)
    #[default]
    Sinusoidal,
    /// B(t) = slew_rate · t, clipped to [0, B_peak]
    LinearRamp,
}

/// Unvalidated waveform parameters as configured or swept.
///
/// `field_strength` is the amplitude B0 for sinusoids and the clip level
/// B_peak for ramps. `frequency_hz` only matters for sinusoids and
/// `slew_rate` only for ramps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveformParams {
    #[serde(default)]
    pub shape: WaveformShape,
    #[serde(default = "default_field_strength")]
    pub field_strength: f64,
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: f64,
    #[serde(default = "default_slew_rate")]
    pub slew_rate: f64,
}

fn default_field_strength() -> f64 {
    DEFAULT_FIELD_STRENGTH_T
}
fn default_frequency_hz() -> f64 {
    DEFAULT_FREQUENCY_HZ
}
fn default_slew_rate() -> f64 {
    DEFAULT_SLEW_RATE_T_PER_S
}

impl Default for WaveformParams {
    fn default() -> Self {
        WaveformParams {
            shape: WaveformShape::default(),
            field_strength: default_field_strength(),
            frequency_hz: default_frequency_hz(),
            slew_rate: default_slew_rate(),
        }
    }
}

/// One fully resolved combination of scanner and patient parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    pub semi_axes: SemiAxes,
    pub field_axis: AnatomicalAxis,
    pub waveform: WaveformParams,
    /// Tissue conductivity σ [S/m].
    pub conductivity: f64,
}

impl Default for OperatingPoint {
    fn default() -> Self {
        OperatingPoint {
            semi_axes: SemiAxes::default(),
            field_axis: AnatomicalAxis::default(),
            waveform: WaveformParams::default(),
            conductivity: SIGMA_BRAIN,
        }
    }
}

/// Output quantities subject to safety thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Emf,
    EField,
    CurrentDensity,
}

impl Quantity {
    pub const ALL: [Quantity; 3] = [Quantity::Emf, Quantity::EField, Quantity::CurrentDensity];

    pub fn unit(self) -> &'static str {
        match self {
            Quantity::Emf => "V",
            Quantity::EField => "V/m",
            Quantity::CurrentDensity => "A/m²",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Emf => write!(f, "emf"),
            Quantity::EField => write!(f, "e_field"),
            Quantity::CurrentDensity => write!(f, "current_density"),
        }
    }
}

/// Induced quantities at one operating point. All values are magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InducedQuantities {
    /// Worst-case |dB/dt| over one cycle [T/s].
    pub max_db_dt: f64,
    /// Cross-section perpendicular to the field [m²].
    pub cross_section_area: f64,
    /// Closed-loop path length of the loop model [m].
    ///
    /// For the perimeter models `e_field == emf / loop_length`. The peak-radius
    /// model reports 2π·r_max here but takes E from the circle of radius r_max
    /// rather than from `emf`, so the ratio does not hold there.
    pub loop_length: f64,
    /// Induced EMF around the loop [V].
    pub emf: f64,
    /// Average induced electric field [V/m].
    pub e_field: f64,
    /// Current density J = σE [A/m²].
    pub current_density: f64,
    /// Dissipated power density σE² [W/m³].
    pub power_density: f64,
}

impl InducedQuantities {
    pub fn get(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::Emf => self.emf,
            Quantity::EField => self.e_field,
            Quantity::CurrentDensity => self.current_density,
        }
    }
}
