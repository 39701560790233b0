// ─────────────────────────────────────────────────────────────────────
// MRI EM Thresh — Induced Field
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Faraday induction in the head cross-section.
//!
//!   EMF = |dΦ/dt|max = A·|dB/dt|max
//!   E   = EMF / L          (L from the configured loop model)
//!   J   = σ·E
//!   p   = σ·E²
//!
//! The loop length L is an approximation of the induced current path,
//! not a solution of the field problem inside a conducting ellipsoid.
//! All outputs are worst-case magnitudes; direction is not modelled.

use crate::flux::{FluxLinkage, MagneticFieldWaveform};
use crate::geometry::GeometryModel;
use mri_types::config::LoopModel;
use mri_types::error::{EmError, EmResult};
use mri_types::state::{InducedQuantities, OperatingPoint};

/// Uniform tissue conductivity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TissueProperties {
    conductivity: f64,
}

impl TissueProperties {
    /// Fails with `InvalidConductivity` unless σ is finite and > 0.
    pub fn new(conductivity: f64) -> EmResult<Self> {
        if !conductivity.is_finite() || conductivity <= 0.0 {
            return Err(EmError::InvalidConductivity(format!(
                "conductivity must be finite and > 0 S/m, got {conductivity}"
            )));
        }
        Ok(TissueProperties { conductivity })
    }

    pub fn conductivity(&self) -> f64 {
        self.conductivity
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InducedFieldCalculator {
    loop_model: LoopModel,
}

impl InducedFieldCalculator {
    pub fn new(loop_model: LoopModel) -> Self {
        InducedFieldCalculator { loop_model }
    }

    pub fn loop_model(&self) -> LoopModel {
        self.loop_model
    }

    /// Induced quantities for validated inputs. Infallible.
    pub fn calculate(
        &self,
        geometry: &GeometryModel,
        waveform: &MagneticFieldWaveform,
        tissue: &TissueProperties,
    ) -> InducedQuantities {
        let section = geometry.cross_section();
        let linkage = FluxLinkage::new(section.area(), waveform);

        let max_db_dt = linkage.max_field_rate().abs();
        let emf = linkage.max_flux_rate().abs();
        let loop_length = section.loop_length(self.loop_model);

        let e_field = match self.loop_model {
            LoopModel::PeakRadius => 0.5 * section.max_radius() * max_db_dt,
            LoopModel::Ramanujan | LoopModel::ExactPerimeter => emf / loop_length,
        };

        let sigma = tissue.conductivity();
        InducedQuantities {
            max_db_dt,
            cross_section_area: linkage.area(),
            loop_length,
            emf,
            e_field,
            current_density: sigma * e_field,
            power_density: sigma * e_field * e_field,
        }
    }

    /// Validate a raw operating point, then calculate.
    ///
    /// Validation order is geometry, waveform, conductivity; the first
    /// failure is returned.
    pub fn evaluate(&self, point: &OperatingPoint) -> EmResult<InducedQuantities> {
        let geometry = GeometryModel::new(point.semi_axes, point.field_axis)?;
        let waveform = MagneticFieldWaveform::from_params(&point.waveform)?;
        let tissue = TissueProperties::new(point.conductivity)?;
        Ok(self.calculate(&geometry, &waveform, &tissue))
    }
}
