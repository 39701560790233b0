// ─────────────────────────────────────────────────────────────────────
// MRI EM Thresh — Safety Classifier
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Threshold classification of EMF, E-field and current density.
//!
//! Per quantity with cut points (lower, upper):
//!   value < lower          → Safe
//!   lower ≤ value < upper  → Caution
//!   value ≥ upper          → Unsafe
//! A quantity without configured cut points is `Unclassified`.

use mri_core::sweep::{InducedResult, SweepOutcome};
use mri_types::config::{ThresholdPair, ThresholdSet};
use mri_types::state::{InducedQuantities, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered by severity: `Unclassified < Safe < Caution < Unsafe`.
///
/// The overall category is the maximum, so a known severe category
/// always wins over a missing threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyCategory {
    Unclassified,
    Safe,
    Caution,
    Unsafe,
}

impl fmt::Display for SafetyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafetyCategory::Unclassified => write!(f, "UNCLASSIFIED"),
            SafetyCategory::Safe => write!(f, "SAFE"),
            SafetyCategory::Caution => write!(f, "CAUTION"),
            SafetyCategory::Unsafe => write!(f, "UNSAFE"),
        }
    }
}

/// Category of one value against one pair of cut points.
pub fn classify_value(value: f64, pair: &ThresholdPair) -> SafetyCategory {
    if value >= pair.upper() {
        SafetyCategory::Unsafe
    } else if value >= pair.lower() {
        SafetyCategory::Caution
    } else if value < pair.lower() {
        SafetyCategory::Safe
    } else {
        // NaN compares false against both bounds.
        SafetyCategory::Unclassified
    }
}

/// Per-quantity and overall categories of one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub emf: SafetyCategory,
    pub e_field: SafetyCategory,
    pub current_density: SafetyCategory,
    pub overall: SafetyCategory,
}

impl Classification {
    pub fn get(&self, quantity: Quantity) -> SafetyCategory {
        match quantity {
            Quantity::Emf => self.emf,
            Quantity::EField => self.e_field,
            Quantity::CurrentDensity => self.current_density,
        }
    }

    /// Quantities left unclassified. A `Safe` overall category with
    /// gaps here is only safe with respect to the configured limits.
    pub fn unclassified(&self) -> Vec<Quantity> {
        Quantity::ALL
            .into_iter()
            .filter(|&q| self.get(q) == SafetyCategory::Unclassified)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.unclassified().is_empty()
    }
}

/// Pure classification of induced quantities against a threshold set.
pub fn classify(quantities: &InducedQuantities, thresholds: &ThresholdSet) -> Classification {
    let category = |q: Quantity| {
        thresholds
            .get(q)
            .map_or(SafetyCategory::Unclassified, |pair| {
                classify_value(quantities.get(q), pair)
            })
    };
    let emf = category(Quantity::Emf);
    let e_field = category(Quantity::EField);
    let current_density = category(Quantity::CurrentDensity);
    Classification {
        emf,
        e_field,
        current_density,
        overall: emf.max(e_field).max(current_density),
    }
}

/// A result paired with its classification. Borrows the result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassifiedResult<'a> {
    pub result: &'a InducedResult,
    pub classification: Classification,
}

/// Classifier bound to a read-only threshold set.
#[derive(Debug, Clone, Copy)]
pub struct SafetyClassifier<'t> {
    thresholds: &'t ThresholdSet,
}

impl<'t> SafetyClassifier<'t> {
    pub fn new(thresholds: &'t ThresholdSet) -> Self {
        SafetyClassifier { thresholds }
    }

    pub fn thresholds(&self) -> &ThresholdSet {
        self.thresholds
    }

    pub fn classify(&self, result: &InducedResult) -> Classification {
        classify(&result.quantities, self.thresholds)
    }

    /// Classification of a sweep outcome; `None` for failed points.
    pub fn classify_outcome(&self, outcome: &SweepOutcome) -> Option<Classification> {
        outcome.as_result().map(|r| self.classify(r))
    }

    /// Annotate every computed result in order, skipping failures.
    pub fn annotate<'a>(&self, outcomes: &'a [SweepOutcome]) -> Vec<ClassifiedResult<'a>> {
        outcomes
            .iter()
            .filter_map(SweepOutcome::as_result)
            .map(|result| ClassifiedResult {
                result,
                classification: self.classify(result),
            })
            .collect()
    }
}
