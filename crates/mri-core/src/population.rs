// ─────────────────────────────────────────────────────────────────────
// MRI EM Thresh — Patient Population
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Seeded sampling of head geometries from a patient population.
//!
//! Each semi-axis is drawn from an independent normal distribution.
//! Draws below `min_axis` are rejected and redrawn, so every variant is
//! a physically meaningful head. A fixed seed gives a fixed sample,
//! which keeps sweeps built from it reproducible.

use mri_types::config::SweepDimension;
use mri_types::error::{EmError, EmResult};
use mri_types::state::{AnatomicalAxis, SemiAxes};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Smallest accepted semi-axis [m].
const MIN_AXIS_M: f64 = 0.02;

/// Rejection budget per requested variant.
const MAX_ATTEMPTS_PER_SAMPLE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationModel {
    pub mean: SemiAxes,
    pub std_dev: SemiAxes,
    pub min_axis: f64,
}

impl PopulationModel {
    pub fn new(mean: SemiAxes, std_dev: SemiAxes) -> EmResult<Self> {
        for axis in AnatomicalAxis::ALL {
            let m = mean.get(axis);
            let s = std_dev.get(axis);
            if !m.is_finite() || m <= 0.0 {
                return Err(EmError::ConfigError(format!(
                    "population mean {axis} semi-axis must be finite and > 0, got {m}"
                )));
            }
            if !s.is_finite() || s < 0.0 {
                return Err(EmError::ConfigError(format!(
                    "population {axis} standard deviation must be finite and >= 0, got {s}"
                )));
            }
        }
        Ok(PopulationModel {
            mean,
            std_dev,
            min_axis: MIN_AXIS_M,
        })
    }

    /// Adult brain: 9 / 9 / 6.5 cm means with 5 / 5 / 4 mm spread.
    pub fn adult_brain() -> Self {
        PopulationModel {
            mean: SemiAxes::default(),
            std_dev: SemiAxes::new(0.005, 0.005, 0.004),
            min_axis: MIN_AXIS_M,
        }
    }

    /// Draw `n` head variants with a seeded generator.
    pub fn sample(&self, n: usize, seed: u64) -> EmResult<Vec<SemiAxes>> {
        let normal = |axis: AnatomicalAxis| {
            Normal::new(self.mean.get(axis), self.std_dev.get(axis)).map_err(|e| {
                EmError::ConfigError(format!("invalid {axis} distribution: {e}"))
            })
        };
        let ap = normal(AnatomicalAxis::AnteriorPosterior)?;
        let lr = normal(AnatomicalAxis::LeftRight)?;
        let si = normal(AnatomicalAxis::SuperiorInferior)?;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut variants = Vec::with_capacity(n);
        let mut attempts = 0;
        while variants.len() < n && attempts < n.saturating_mul(MAX_ATTEMPTS_PER_SAMPLE) {
            attempts += 1;
            let axes = SemiAxes::new(ap.sample(&mut rng), lr.sample(&mut rng), si.sample(&mut rng));
            if AnatomicalAxis::ALL
                .iter()
                .all(|&axis| axes.get(axis) >= self.min_axis)
            {
                variants.push(axes);
            }
        }

        if variants.len() < n {
            return Err(EmError::ConfigError(format!(
                "population sampling accepted {} of {n} variants; \
                 distribution sits below the {} m floor",
                variants.len(),
                self.min_axis
            )));
        }
        Ok(variants)
    }

    /// Geometry sweep dimension of `n` sampled variants.
    pub fn dimension(&self, n: usize, seed: u64) -> EmResult<SweepDimension> {
        Ok(SweepDimension::geometry(self.sample(n, seed)?))
    }
}
