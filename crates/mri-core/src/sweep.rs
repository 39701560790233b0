// ─────────────────────────────────────────────────────────────────────
// MRI EM Thresh — Parameter Sweep
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Cartesian-product sweep over scanner and patient parameters.
//!
//! Points are enumerated row-major: the first declared dimension varies
//! slowest, the last fastest, and values follow their declared order.
//! Consumers index results positionally, so this order is fixed.
//!
//! A point that fails to evaluate is recorded with its error kind and
//! the sweep continues. Malformed specifications fail before any point
//! is evaluated.

use crate::induced::InducedFieldCalculator;
use mri_types::config::{EngineConfig, SweepDimension, SweepParameter};
use mri_types::error::{EmError, EmResult, ErrorKind};
use mri_types::state::{InducedQuantities, OperatingPoint, Quantity, WaveformShape};
use ndarray::{ArrayD, IxDyn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use tracing::{debug, info, warn};

/// Maps one operating point to its induced quantities.
pub trait PointEvaluator: Sync {
    fn evaluate(&self, point: &OperatingPoint) -> EmResult<InducedQuantities>;
}

impl PointEvaluator for InducedFieldCalculator {
    fn evaluate(&self, point: &OperatingPoint) -> EmResult<InducedQuantities> {
        InducedFieldCalculator::evaluate(self, point)
    }
}

impl<F> PointEvaluator for F
where
    F: Fn(&OperatingPoint) -> EmResult<InducedQuantities> + Sync,
{
    fn evaluate(&self, point: &OperatingPoint) -> EmResult<InducedQuantities> {
        self(point)
    }
}

/// Validated, ordered list of sweep dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSpecification {
    dimensions: Vec<SweepDimension>,
    shape: Vec<usize>,
    len: usize,
}

impl SweepSpecification {
    /// Rejects empty dimensions, non-finite values, parameters declared
    /// twice and products that overflow `usize`. Zero dimensions describe
    /// the single baseline point.
    pub fn new(dimensions: Vec<SweepDimension>) -> EmResult<Self> {
        let mut len: usize = 1;
        for (i, dim) in dimensions.iter().enumerate() {
            if dim.is_empty() {
                return Err(EmError::ConfigError(format!(
                    "sweep dimension {i} ({:?}) has no values",
                    dim.parameter()
                )));
            }
            if let Some(bad) = dim.raw_values().into_iter().find(|v| !v.is_finite()) {
                return Err(EmError::ConfigError(format!(
                    "sweep dimension {i} ({:?}) contains non-finite value {bad}",
                    dim.parameter()
                )));
            }
            for (j, earlier) in dimensions[..i].iter().enumerate() {
                if earlier.parameter().conflicts_with(dim.parameter()) {
                    return Err(EmError::ConfigError(format!(
                        "sweep dimensions {j} ({:?}) and {i} ({:?}) set the same parameter",
                        earlier.parameter(),
                        dim.parameter()
                    )));
                }
            }
            len = len.checked_mul(dim.len()).ok_or_else(|| {
                EmError::ConfigError("sweep size overflows the address space".to_string())
            })?;
        }

        let shape = dimensions.iter().map(SweepDimension::len).collect();
        Ok(SweepSpecification {
            dimensions,
            shape,
            len,
        })
    }

    pub fn dimensions(&self) -> &[SweepDimension] {
        &self.dimensions
    }

    /// Number of values per dimension, in declaration order.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of sweep points.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Per-dimension value indices of the `index`-th point.
    pub fn coordinates(&self, index: usize) -> Vec<usize> {
        let mut coords = vec![0; self.shape.len()];
        let mut rem = index;
        for (d, &n) in self.shape.iter().enumerate().rev() {
            coords[d] = rem % n;
            rem /= n;
        }
        coords
    }

    /// Baseline with every dimension's value for `coordinates` applied.
    pub fn operating_point(
        &self,
        baseline: &OperatingPoint,
        coordinates: &[usize],
    ) -> OperatingPoint {
        let mut point = *baseline;
        for (dim, &c) in self.dimensions.iter().zip(coordinates) {
            dim.apply(c, &mut point);
        }
        point
    }
}

/// One successfully evaluated sweep point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InducedResult {
    pub index: usize,
    pub coordinates: Vec<usize>,
    pub point: OperatingPoint,
    pub quantities: InducedQuantities,
}

/// A sweep point whose evaluation failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepFailure {
    pub index: usize,
    pub coordinates: Vec<usize>,
    pub point: OperatingPoint,
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SweepOutcome {
    Computed(InducedResult),
    Failed(SweepFailure),
}

impl SweepOutcome {
    pub fn index(&self) -> usize {
        match self {
            SweepOutcome::Computed(r) => r.index,
            SweepOutcome::Failed(f) => f.index,
        }
    }

    pub fn point(&self) -> &OperatingPoint {
        match self {
            SweepOutcome::Computed(r) => &r.point,
            SweepOutcome::Failed(f) => &f.point,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, SweepOutcome::Computed(_))
    }

    pub fn as_result(&self) -> Option<&InducedResult> {
        match self {
            SweepOutcome::Computed(r) => Some(r),
            SweepOutcome::Failed(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&SweepFailure> {
        match self {
            SweepOutcome::Computed(_) => None,
            SweepOutcome::Failed(f) => Some(f),
        }
    }
}

/// Sweep engine owning its baseline, specification and evaluator.
///
/// Iterating is lazy and pure: each pass recomputes the same sequence,
/// and dropping the iterator early skips the remaining points.
#[derive(Debug, Clone)]
pub struct ParameterSweepEngine<E = InducedFieldCalculator> {
    baseline: OperatingPoint,
    spec: SweepSpecification,
    evaluator: E,
}

impl ParameterSweepEngine<InducedFieldCalculator> {
    pub fn new(
        baseline: OperatingPoint,
        spec: SweepSpecification,
        calculator: InducedFieldCalculator,
    ) -> Self {
        Self::with_evaluator(baseline, spec, calculator)
    }

    /// Build from an engine configuration. Fails on a malformed sweep.
    pub fn from_config(config: &EngineConfig) -> EmResult<Self> {
        config.validate()?;
        let spec = SweepSpecification::new(config.sweep.clone())?;
        for dim in spec.dimensions() {
            let inert = matches!(
                (config.waveform.shape, dim.parameter()),
                (WaveformShape::Sinusoidal, SweepParameter::SlewRate)
                    | (WaveformShape::LinearRamp, SweepParameter::Frequency)
            );
            if inert {
                warn!(
                    config = %config.name,
                    parameter = ?dim.parameter(),
                    shape = ?config.waveform.shape,
                    "swept parameter has no effect on this waveform shape"
                );
            }
        }
        Ok(Self::new(
            config.baseline(),
            spec,
            InducedFieldCalculator::new(config.loop_model),
        ))
    }
}

impl<E: PointEvaluator> ParameterSweepEngine<E> {
    pub fn with_evaluator(
        baseline: OperatingPoint,
        spec: SweepSpecification,
        evaluator: E,
    ) -> Self {
        ParameterSweepEngine {
            baseline,
            spec,
            evaluator,
        }
    }

    pub fn baseline(&self) -> &OperatingPoint {
        &self.baseline
    }

    pub fn spec(&self) -> &SweepSpecification {
        &self.spec
    }

    pub fn len(&self) -> usize {
        self.spec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spec.is_empty()
    }

    /// Evaluate a single point; `None` past the end of the sweep.
    pub fn evaluate_at(&self, index: usize) -> Option<SweepOutcome> {
        (index < self.len()).then(|| self.outcome(index))
    }

    fn outcome(&self, index: usize) -> SweepOutcome {
        let coordinates = self.spec.coordinates(index);
        let point = self.spec.operating_point(&self.baseline, &coordinates);
        match self.evaluator.evaluate(&point) {
            Ok(quantities) => SweepOutcome::Computed(InducedResult {
                index,
                coordinates,
                point,
                quantities,
            }),
            Err(err) => {
                debug!(index, kind = %err.kind(), error = %err, "sweep point failed");
                SweepOutcome::Failed(SweepFailure {
                    index,
                    coordinates,
                    point,
                    kind: err.kind(),
                    message: err.to_string(),
                })
            }
        }
    }

    pub fn iter(&self) -> SweepIter<'_, E> {
        SweepIter {
            engine: self,
            front: 0,
            back: self.len(),
        }
    }

    /// Evaluate every point on the rayon pool. Order matches [`Self::iter`].
    pub fn collect_parallel(&self) -> Vec<SweepOutcome> {
        (0..self.len())
            .into_par_iter()
            .map(|i| self.outcome(i))
            .collect()
    }

    /// Evaluate the full sweep sequentially.
    pub fn run(&self) -> SweepRun {
        info!(points = self.len(), dimensions = self.spec.shape().len(), "sweep started");
        self.finish(self.iter().collect())
    }

    /// Evaluate the full sweep across worker threads.
    pub fn run_parallel(&self) -> SweepRun {
        info!(
            points = self.len(),
            threads = rayon::current_num_threads(),
            "parallel sweep started"
        );
        self.finish(self.collect_parallel())
    }

    fn finish(&self, outcomes: Vec<SweepOutcome>) -> SweepRun {
        let run = SweepRun {
            shape: self.spec.shape().to_vec(),
            outcomes,
        };
        info!(
            succeeded = run.succeeded(),
            failed = run.failed(),
            "sweep finished"
        );
        run
    }
}

impl<'a, E: PointEvaluator> IntoIterator for &'a ParameterSweepEngine<E> {
    type Item = SweepOutcome;
    type IntoIter = SweepIter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over sweep outcomes.
#[derive(Debug, Clone)]
pub struct SweepIter<'a, E> {
    engine: &'a ParameterSweepEngine<E>,
    front: usize,
    back: usize,
}

impl<E: PointEvaluator> Iterator for SweepIter<'_, E> {
    type Item = SweepOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let outcome = self.engine.outcome(self.front);
        self.front += 1;
        Some(outcome)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<E: PointEvaluator> DoubleEndedIterator for SweepIter<'_, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.engine.outcome(self.back))
    }
}

impl<E: PointEvaluator> ExactSizeIterator for SweepIter<'_, E> {}

impl<E: PointEvaluator> FusedIterator for SweepIter<'_, E> {}

/// Materialized sweep: every outcome in enumeration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRun {
    shape: Vec<usize>,
    outcomes: Vec<SweepOutcome>,
}

impl SweepRun {
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn outcomes(&self) -> &[SweepOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<SweepOutcome> {
        self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn results(&self) -> impl Iterator<Item = &InducedResult> + '_ {
        self.outcomes.iter().filter_map(SweepOutcome::as_result)
    }

    pub fn failures(&self) -> impl Iterator<Item = &SweepFailure> + '_ {
        self.outcomes.iter().filter_map(SweepOutcome::as_failure)
    }

    pub fn succeeded(&self) -> usize {
        self.results().count()
    }

    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    /// One thresholded quantity over the sweep, shaped like the
    /// dimensions. Failed points are NaN.
    pub fn grid(&self, quantity: Quantity) -> EmResult<ArrayD<f64>> {
        self.grid_with(|q| q.get(quantity))
    }

    /// Any derived value over the sweep, shaped like the dimensions.
    pub fn grid_with<F>(&self, f: F) -> EmResult<ArrayD<f64>>
    where
        F: Fn(&InducedQuantities) -> f64,
    {
        let values: Vec<f64> = self
            .outcomes
            .iter()
            .map(|o| o.as_result().map_or(f64::NAN, |r| f(&r.quantities)))
            .collect();
        ArrayD::from_shape_vec(IxDyn(&self.shape), values)
            .map_err(|e| EmError::ConfigError(format!("sweep grid shape mismatch: {e}")))
    }
}
