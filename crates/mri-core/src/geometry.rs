// ─────────────────────────────────────────────────────────────────────
// MRI EM Thresh — Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Ellipsoid head model and its central cross-section.
//!
//! The flux linking the head is taken through the planar section through
//! the ellipsoid centre, perpendicular to the main field. For semi-axes
//! (a, b, c) and the field along `a`, that section is an ellipse with
//! semi-axes b and c, area π·b·c.

use crate::perimeter::{agm_perimeter, ramanujan_perimeter};
use mri_types::config::LoopModel;
use mri_types::error::{EmError, EmResult};
use mri_types::state::{AnatomicalAxis, SemiAxes};
use std::f64::consts::PI;

/// Validated three-axis ellipsoid. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    axes: SemiAxes,
}

impl Ellipsoid {
    /// Fails with `InvalidGeometry` if any semi-axis is ≤ 0 or not finite.
    pub fn new(axes: SemiAxes) -> EmResult<Self> {
        for axis in AnatomicalAxis::ALL {
            let value = axes.get(axis);
            if !value.is_finite() || value <= 0.0 {
                return Err(EmError::InvalidGeometry(format!(
                    "{axis} semi-axis must be finite and > 0, got {value}"
                )));
            }
        }
        Ok(Ellipsoid { axes })
    }

    pub fn semi_axes(&self) -> &SemiAxes {
        &self.axes
    }

    pub fn semi_axis(&self, axis: AnatomicalAxis) -> f64 {
        self.axes.get(axis)
    }

    /// Central section perpendicular to `field_axis`.
    pub fn cross_section(&self, field_axis: AnatomicalAxis) -> CrossSection {
        let (p, q) = field_axis.perpendicular();
        CrossSection {
            semi_axis_1: self.axes.get(p),
            semi_axis_2: self.axes.get(q),
        }
    }

    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.axes.anterior_posterior * self.axes.left_right
            * self.axes.superior_inferior
    }
}

/// Elliptical cross-section, semi-axes in the order of
/// [`AnatomicalAxis::perpendicular`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSection {
    pub semi_axis_1: f64,
    pub semi_axis_2: f64,
}

impl CrossSection {
    /// Exact area π·s₁·s₂ [m²].
    pub fn area(&self) -> f64 {
        PI * self.semi_axis_1 * self.semi_axis_2
    }

    pub fn max_radius(&self) -> f64 {
        self.semi_axis_1.max(self.semi_axis_2)
    }

    /// Length of the closed loop assumed to carry the induced current [m].
    ///
    /// `PeakRadius` is the circle of radius `max_radius`; the other
    /// models follow the section boundary. All three approximate the
    /// true current path.
    pub fn loop_length(&self, model: LoopModel) -> f64 {
        match model {
            LoopModel::Ramanujan => ramanujan_perimeter(self.semi_axis_1, self.semi_axis_2),
            LoopModel::ExactPerimeter => agm_perimeter(self.semi_axis_1, self.semi_axis_2),
            LoopModel::PeakRadius => 2.0 * PI * self.max_radius(),
        }
    }
}

/// Head geometry: an owned ellipsoid plus the axis parallel to B0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryModel {
    ellipsoid: Ellipsoid,
    field_axis: AnatomicalAxis,
}

impl GeometryModel {
    pub fn new(axes: SemiAxes, field_axis: AnatomicalAxis) -> EmResult<Self> {
        Ok(GeometryModel {
            ellipsoid: Ellipsoid::new(axes)?,
            field_axis,
        })
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn field_axis(&self) -> AnatomicalAxis {
        self.field_axis
    }

    pub fn cross_section(&self) -> CrossSection {
        self.ellipsoid.cross_section(self.field_axis)
    }

    /// Area perpendicular to the field [m²].
    pub fn cross_section_area(&self) -> f64 {
        self.cross_section().area()
    }
}

/// One-shot area computation from raw semi-axes.
pub fn cross_section_area(axes: SemiAxes, field_axis: AnatomicalAxis) -> EmResult<f64> {
    Ok(GeometryModel::new(axes, field_axis)?.cross_section_area())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adult_brain_area_field_along_ap() {
        // B along anterior-posterior: section spans lateral × superior-inferior.
        let area = cross_section_area(SemiAxes::default(), AnatomicalAxis::AnteriorPosterior)
            .unwrap();
        let expected = PI * 0.09 * 0.065;
        assert!((area - expected).abs() < 1e-15);
        // 183.78 cm²
        assert!((area * 1e4 - 183.78).abs() < 0.01, "area = {} cm²", area * 1e4);
    }

    #[test]
    fn test_area_for_each_field_axis() {
        let axes = SemiAxes::new(0.1, 0.2, 0.3);
        let cases = [
            (AnatomicalAxis::AnteriorPosterior, 0.2 * 0.3),
            (AnatomicalAxis::LeftRight, 0.1 * 0.3),
            (AnatomicalAxis::SuperiorInferior, 0.1 * 0.2),
        ];
        for (axis, product) in cases {
            let area = cross_section_area(axes, axis).unwrap();
            assert!((area - PI * product).abs() < 1e-15, "{axis}: {area}");
        }
    }

    #[test]
    fn test_zero_and_negative_axes_rejected() {
        for bad in [0.0, -0.0, -1e-9, -0.09, f64::NAN, f64::INFINITY] {
            for axis in AnatomicalAxis::ALL {
                let axes = SemiAxes::default().with(axis, bad);
                let err = Ellipsoid::new(axes).unwrap_err();
                assert!(
                    matches!(err, EmError::InvalidGeometry(_)),
                    "{axis} = {bad} should be InvalidGeometry"
                );
            }
        }
    }

    #[test]
    fn test_loop_length_models() {
        let section = CrossSection {
            semi_axis_1: 0.09,
            semi_axis_2: 0.065,
        };
        let circle = section.loop_length(LoopModel::PeakRadius);
        assert!((circle - 2.0 * PI * 0.09).abs() < 1e-15);
        let ram = section.loop_length(LoopModel::Ramanujan);
        let exact = section.loop_length(LoopModel::ExactPerimeter);
        assert!((ram - exact).abs() / exact < 1e-9);
        assert!(exact < circle);
    }

    #[test]
    fn test_volume() {
        let e = Ellipsoid::new(SemiAxes::new(1.0, 1.0, 1.0)).unwrap();
        assert!((e.volume() - 4.0 / 3.0 * PI).abs() < 1e-14);
    }
}
