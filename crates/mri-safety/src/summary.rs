// ─────────────────────────────────────────────────────────────────────
// MRI EM Thresh — Sweep Summary
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Run-level counts and peaks for a classified sweep.

use crate::biology::{assess, StimulationRegime};
use crate::classifier::{SafetyCategory, SafetyClassifier};
use mri_core::sweep::SweepOutcome;
use mri_types::config::ThresholdSet;
use mri_types::error::ErrorKind;
use mri_types::state::Quantity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

/// Largest computed value of each output over the sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeakValues {
    pub max_db_dt: f64,
    pub emf: f64,
    pub e_field: f64,
    pub current_density: f64,
    pub power_density: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Overall category per computed point.
    pub by_category: BTreeMap<SafetyCategory, usize>,
    pub failures_by_kind: BTreeMap<ErrorKind, usize>,
    pub by_regime: BTreeMap<StimulationRegime, usize>,
    pub high_field_points: usize,
    /// Quantities with no configured threshold.
    pub unclassified_quantities: Vec<Quantity>,
    /// Most severe overall category; `None` when nothing was computed.
    pub worst: Option<SafetyCategory>,
    pub peaks: PeakValues,
}

impl SweepSummary {
    pub fn count(&self, category: SafetyCategory) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }
}

/// Classify every outcome and tally the run.
pub fn summarize(outcomes: &[SweepOutcome], thresholds: &ThresholdSet) -> SweepSummary {
    let classifier = SafetyClassifier::new(thresholds);
    let mut summary = SweepSummary {
        total: outcomes.len(),
        unclassified_quantities: Quantity::ALL
            .into_iter()
            .filter(|&q| thresholds.get(q).is_none())
            .collect(),
        ..SweepSummary::default()
    };

    for outcome in outcomes {
        match outcome {
            SweepOutcome::Computed(result) => {
                summary.succeeded += 1;
                let category = classifier.classify(result).overall;
                *summary.by_category.entry(category).or_insert(0) += 1;
                summary.worst = summary.worst.max(Some(category));

                let bio = assess(result);
                *summary.by_regime.entry(bio.regime).or_insert(0) += 1;
                if bio.high_field {
                    summary.high_field_points += 1;
                }

                let q = &result.quantities;
                let peaks = &mut summary.peaks;
                peaks.max_db_dt = peaks.max_db_dt.max(q.max_db_dt);
                peaks.emf = peaks.emf.max(q.emf);
                peaks.e_field = peaks.e_field.max(q.e_field);
                peaks.current_density = peaks.current_density.max(q.current_density);
                peaks.power_density = peaks.power_density.max(q.power_density);
            }
            SweepOutcome::Failed(failure) => {
                summary.failed += 1;
                *summary.failures_by_kind.entry(failure.kind).or_insert(0) += 1;
            }
        }
    }

    info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        unsafe_points = summary.count(SafetyCategory::Unsafe),
        caution_points = summary.count(SafetyCategory::Caution),
        worst = ?summary.worst,
        "sweep classified"
    );
    summary
}

impl fmt::Display for SweepSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "points: {} total, {} computed, {} failed",
            self.total, self.succeeded, self.failed
        )?;
        for (category, n) in &self.by_category {
            writeln!(f, "  {category}: {n}")?;
        }
        for (kind, n) in &self.failures_by_kind {
            writeln!(f, "  failed ({kind}): {n}")?;
        }
        if !self.unclassified_quantities.is_empty() {
            let names: Vec<String> = self
                .unclassified_quantities
                .iter()
                .map(|q| q.to_string())
                .collect();
            writeln!(f, "  no thresholds for: {}", names.join(", "))?;
        }
        writeln!(
            f,
            "peaks: dB/dt {:.6} T/s, EMF {:.6} V, E {:.6} V/m, J {:.6} A/m²",
            self.peaks.max_db_dt, self.peaks.emf, self.peaks.e_field, self.peaks.current_density
        )
    }
}
