// ─────────────────────────────────────────────────────────────────────
// MRI EM Thresh — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{E_PNS_ONSET, E_PNS_PAIN, SIGMA_BRAIN};
use crate::error::{EmError, EmResult};
use crate::state::{AnatomicalAxis, OperatingPoint, Quantity, SemiAxes, WaveformParams};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Top-level engine configuration.
///
/// Every field has a default, so `{}` is a valid document describing a
/// single adult-brain evaluation at the default scanner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub head: SemiAxes,
    #[serde(default)]
    pub field_axis: AnatomicalAxis,
    #[serde(default)]
    pub tissue: TissueConfig,
    #[serde(default)]
    pub waveform: WaveformParams,
    #[serde(default)]
    pub loop_model: LoopModel,
    /// Sweep dimensions in declaration order (first = slowest varying).
    #[serde(default)]
    pub sweep: Vec<SweepDimension>,
    /// Missing quantities stay unclassified.
    #[serde(default)]
    pub thresholds: ThresholdSet,
}

fn default_name() -> String {
    "adult-brain-baseline".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            name: default_name(),
            head: SemiAxes::default(),
            field_axis: AnatomicalAxis::default(),
            tissue: TissueConfig::default(),
            waveform: WaveformParams::default(),
            loop_model: LoopModel::default(),
            sweep: Vec::new(),
            thresholds: ThresholdSet::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TissueConfig {
    /// Uniform conductivity σ [S/m].
    #[serde(default = "default_conductivity")]
    pub conductivity: f64,
}

fn default_conductivity() -> f64 {
    SIGMA_BRAIN
}

impl Default for TissueConfig {
    fn default() -> Self {
        TissueConfig {
            conductivity: default_conductivity(),
        }
    }
}

/// Closed-loop path model used to turn the induced EMF into an E-field.
///
/// None of these is exact physics for a conducting ellipsoid; each is a
/// stand-in for the induced current path and can be swapped per config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopModel {
    /// Perimeter of the central cross-section, Ramanujan's second approximation.
    #[default]
    Ramanujan,
    /// Perimeter of the central cross-section via the AGM series.
    ExactPerimeter,
    /// Circular path of the larger cross-section semi-axis r_max, linking
    /// the flux π·r_max²: E = (r_max / 2)·|dB/dt|. Upper estimate of the
    /// local peak field rather than a loop average.
    #[serde(alias = "inscribed_circle")]
    PeakRadius,
}

/// Identity of a swept parameter, used to reject duplicate dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SweepParameter {
    FieldStrength,
    Frequency,
    SlewRate,
    Conductivity,
    SemiAxis(AnatomicalAxis),
    Geometry,
}

impl SweepParameter {
    /// Two dimensions that write the same operating-point field.
    pub fn conflicts_with(self, other: SweepParameter) -> bool {
        match (self, other) {
            (SweepParameter::Geometry, SweepParameter::SemiAxis(_))
            | (SweepParameter::SemiAxis(_), SweepParameter::Geometry) => true,
            (a, b) => a == b,
        }
    }
}

/// One named sweep dimension with its ordered values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "parameter", rename_all = "snake_case")]
pub enum SweepDimension {
    /// Peak field B0 / B_peak [T].
    FieldStrength { values: Vec<f64> },
    /// Sinusoid frequency [Hz]; ω = 2πf.
    Frequency { values: Vec<f64> },
    /// Ramp slew rate [T/s].
    SlewRate { values: Vec<f64> },
    /// Tissue conductivity [S/m].
    Conductivity { values: Vec<f64> },
    /// One semi-axis [m], others from the baseline.
    SemiAxis {
        axis: AnatomicalAxis,
        values: Vec<f64>,
    },
    /// Whole-head variants, e.g. from population sampling.
    Geometry { variants: Vec<SemiAxes> },
}

impl SweepDimension {
    pub fn field_strength(values: Vec<f64>) -> Self {
        SweepDimension::FieldStrength { values }
    }

    pub fn frequency(values: Vec<f64>) -> Self {
        SweepDimension::Frequency { values }
    }

    pub fn slew_rate(values: Vec<f64>) -> Self {
        SweepDimension::SlewRate { values }
    }

    pub fn conductivity(values: Vec<f64>) -> Self {
        SweepDimension::Conductivity { values }
    }

    pub fn semi_axis(axis: AnatomicalAxis, values: Vec<f64>) -> Self {
        SweepDimension::SemiAxis { axis, values }
    }

    pub fn geometry(variants: Vec<SemiAxes>) -> Self {
        SweepDimension::Geometry { variants }
    }

    /// `steps + 1` evenly spaced values from `start` to `stop` inclusive,
    /// e.g. dB/dt from 0 to its maximum in fixed increments.
    pub fn linspace(parameter: SweepParameter, start: f64, stop: f64, steps: usize) -> Self {
        let values: Vec<f64> = if steps == 0 {
            vec![start]
        } else {
            let inc = (stop - start) / steps as f64;
            (0..=steps).map(|i| start + inc * i as f64).collect()
        };
        match parameter {
            SweepParameter::FieldStrength => SweepDimension::FieldStrength { values },
            SweepParameter::Frequency => SweepDimension::Frequency { values },
            SweepParameter::SlewRate => SweepDimension::SlewRate { values },
            SweepParameter::Conductivity => SweepDimension::Conductivity { values },
            SweepParameter::SemiAxis(axis) => SweepDimension::SemiAxis { axis, values },
            SweepParameter::Geometry => SweepDimension::Geometry {
                variants: values
                    .into_iter()
                    .map(|v| SemiAxes::new(v, v, v))
                    .collect(),
            },
        }
    }

    pub fn parameter(&self) -> SweepParameter {
        match self {
            SweepDimension::FieldStrength { .. } => SweepParameter::FieldStrength,
            SweepDimension::Frequency { .. } => SweepParameter::Frequency,
            SweepDimension::SlewRate { .. } => SweepParameter::SlewRate,
            SweepDimension::Conductivity { .. } => SweepParameter::Conductivity,
            SweepDimension::SemiAxis { axis, .. } => SweepParameter::SemiAxis(*axis),
            SweepDimension::Geometry { .. } => SweepParameter::Geometry,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SweepDimension::FieldStrength { values }
            | SweepDimension::Frequency { values }
            | SweepDimension::SlewRate { values }
            | SweepDimension::Conductivity { values }
            | SweepDimension::SemiAxis { values, .. } => values.len(),
            SweepDimension::Geometry { variants } => variants.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every raw number carried by the dimension.
    pub fn raw_values(&self) -> Vec<f64> {
        match self {
            SweepDimension::FieldStrength { values }
            | SweepDimension::Frequency { values }
            | SweepDimension::SlewRate { values }
            | SweepDimension::Conductivity { values }
            | SweepDimension::SemiAxis { values, .. } => values.clone(),
            SweepDimension::Geometry { variants } => variants
                .iter()
                .flat_map(|v| [v.anterior_posterior, v.left_right, v.superior_inferior])
                .collect(),
        }
    }

    /// Write the `index`-th value into `point`.
    pub fn apply(&self, index: usize, point: &mut OperatingPoint) {
        match self {
            SweepDimension::FieldStrength { values } => {
                point.waveform.field_strength = values[index]
            }
            SweepDimension::Frequency { values } => point.waveform.frequency_hz = values[index],
            SweepDimension::SlewRate { values } => point.waveform.slew_rate = values[index],
            SweepDimension::Conductivity { values } => point.conductivity = values[index],
            SweepDimension::SemiAxis { axis, values } => {
                point.semi_axes = point.semi_axes.with(*axis, values[index])
            }
            SweepDimension::Geometry { variants } => point.semi_axes = variants[index],
        }
    }
}

/// SAFE/CAUTION and CAUTION/UNSAFE cut points for one quantity.
///
/// Built through [`ThresholdPair::new`]; deserialized pairs are checked by
/// [`ThresholdSet::validate`] when a config is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPair {
    lower: f64,
    upper: f64,
}

impl ThresholdPair {
    pub fn new(lower: f64, upper: f64) -> EmResult<Self> {
        let pair = ThresholdPair { lower, upper };
        pair.validate()?;
        Ok(pair)
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn validate(&self) -> EmResult<()> {
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(EmError::ConfigError(format!(
                "threshold bounds must be finite, got ({}, {})",
                self.lower, self.upper
            )));
        }
        if self.lower > self.upper {
            return Err(EmError::ConfigError(format!(
                "threshold lower bound {} exceeds upper bound {}",
                self.lower, self.upper
            )));
        }
        Ok(())
    }
}

/// Quantity → cut points. Read-only to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdSet {
    entries: BTreeMap<Quantity, ThresholdPair>,
}

impl ThresholdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, quantity: Quantity, pair: ThresholdPair) -> Self {
        self.entries.insert(quantity, pair);
        self
    }

    /// Replaces and returns any previous pair for `quantity`.
    pub fn insert(&mut self, quantity: Quantity, pair: ThresholdPair) -> Option<ThresholdPair> {
        self.entries.insert(quantity, pair)
    }

    pub fn get(&self, quantity: Quantity) -> Option<&ThresholdPair> {
        self.entries.get(&quantity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn validate(&self) -> EmResult<()> {
        for (quantity, pair) in &self.entries {
            pair.validate().map_err(|e| {
                EmError::ConfigError(format!("threshold for {quantity}: {e}"))
            })?;
        }
        Ok(())
    }

    /// E-field cut points at the onset of peripheral nerve stimulation
    /// (1.0 V/m) and of painful stimulation (5.8 V/m).
    /// EMF and current density are left unclassified.
    pub fn nerve_stimulation() -> Self {
        ThresholdSet::new().with(
            Quantity::EField,
            ThresholdPair {
                lower: E_PNS_ONSET,
                upper: E_PNS_PAIN,
            },
        )
    }
}

impl EngineConfig {
    /// Load from a JSON file and validate.
    pub fn from_file(path: impl AsRef<Path>) -> EmResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> EmResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration-level checks. Physically invalid baseline values are
    /// left to the per-point evaluation.
    pub fn validate(&self) -> EmResult<()> {
        self.thresholds.validate()
    }

    /// The operating point every sweep dimension starts from.
    pub fn baseline(&self) -> OperatingPoint {
        OperatingPoint {
            semi_axes: self.head,
            field_axis: self.field_axis,
            waveform: self.waveform,
            conductivity: self.tissue.conductivity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WaveformShape;

    const EXAMPLE: &str = r#"{
        "name": "3T-gradient-study",
        "head": {"anterior_posterior": 0.09, "left_right": 0.09, "superior_inferior": 0.065},
        "field_axis": "anterior_posterior",
        "tissue": {"conductivity": 0.33},
        "waveform": {"shape": "sinusoidal", "field_strength": 3.0, "frequency_hz": 100.0},
        "loop_model": "peak_radius",
        "sweep": [
            {"parameter": "field_strength", "values": [1.5, 3.0, 7.0]},
            {"parameter": "frequency", "values": [100.0, 1000.0]},
            {"parameter": "semi_axis", "axis": "left_right", "values": [0.08, 0.1]}
        ],
        "thresholds": {
            "e_field": {"lower": 1.0, "upper": 5.8}
        }
    }"#;

    #[test]
    fn test_inscribed_circle_alias_loads() {
        let cfg = EngineConfig::from_json_str(r#"{"loop_model": "inscribed_circle"}"#).unwrap();
        assert_eq!(cfg.loop_model, LoopModel::PeakRadius);
        let json = serde_json::to_string(&cfg.loop_model).unwrap();
        assert_eq!(json, r#""peak_radius""#);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let cfg = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg.name, "adult-brain-baseline");
        assert_eq!(cfg.field_axis, AnatomicalAxis::AnteriorPosterior);
        assert!((cfg.tissue.conductivity - SIGMA_BRAIN).abs() < 1e-12);
        assert_eq!(cfg.loop_model, LoopModel::Ramanujan);
        assert!(cfg.sweep.is_empty());
        assert!(cfg.thresholds.is_empty());
    }

    #[test]
    fn test_load_example_config() {
        let cfg = EngineConfig::from_json_str(EXAMPLE).unwrap();
        assert_eq!(cfg.name, "3T-gradient-study");
        assert_eq!(cfg.loop_model, LoopModel::PeakRadius);
        assert_eq!(cfg.waveform.shape, WaveformShape::Sinusoidal);
        assert_eq!(cfg.sweep.len(), 3);
        assert_eq!(cfg.sweep[0].parameter(), SweepParameter::FieldStrength);
        assert_eq!(cfg.sweep[0].len(), 3);
        assert_eq!(
            cfg.sweep[2].parameter(),
            SweepParameter::SemiAxis(AnatomicalAxis::LeftRight)
        );
        let e = cfg.thresholds.get(Quantity::EField).unwrap();
        assert_eq!((e.lower(), e.upper()), (1.0, 5.8));
        assert!(cfg.thresholds.get(Quantity::Emf).is_none());
    }

    #[test]
    fn test_roundtrip_serialization() {
        let cfg = EngineConfig::from_json_str(EXAMPLE).unwrap();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2 = EngineConfig::from_json_str(&json).unwrap();
        assert_eq!(cfg.name, cfg2.name);
        assert_eq!(cfg.sweep, cfg2.sweep);
        assert_eq!(cfg.thresholds, cfg2.thresholds);
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let json = r#"{"thresholds": {"emf": {"lower": 5.0, "upper": 1.0}}}"#;
        match EngineConfig::from_json_str(json) {
            Err(EmError::ConfigError(msg)) => assert!(msg.contains("emf")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn test_threshold_pair_only_built_ordered() {
        let err = ThresholdPair::new(5.8, 1.0).unwrap_err();
        assert!(matches!(err, EmError::ConfigError(_)));
        assert!(ThresholdPair::new(1.0, f64::INFINITY).is_err());
        let pair = ThresholdPair::new(2.0, 2.0).unwrap();
        assert_eq!((pair.lower(), pair.upper()), (2.0, 2.0));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EngineConfig::from_file("/nonexistent/mri-em-config.json").unwrap_err();
        assert!(matches!(err, EmError::Io(_)));
    }

    #[test]
    fn test_baseline_reflects_config() {
        let cfg = EngineConfig::from_json_str(EXAMPLE).unwrap();
        let point = cfg.baseline();
        assert_eq!(point.waveform.frequency_hz, 100.0);
        assert_eq!(point.semi_axes.superior_inferior, 0.065);
        assert_eq!(point.conductivity, 0.33);
    }

    #[test]
    fn test_linspace_includes_endpoints() {
        let dim = SweepDimension::linspace(SweepParameter::SlewRate, 0.0, 5.0, 100);
        assert_eq!(dim.len(), 101);
        let values = dim.raw_values();
        assert_eq!(values[0], 0.0);
        assert!((values[100] - 5.0).abs() < 1e-12);
        assert!((values[1] - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_apply_writes_single_field() {
        let mut point = OperatingPoint::default();
        SweepDimension::semi_axis(AnatomicalAxis::SuperiorInferior, vec![0.05, 0.07])
            .apply(1, &mut point);
        assert_eq!(point.semi_axes.superior_inferior, 0.07);
        assert_eq!(point.semi_axes.left_right, 0.09);
    }

    #[test]
    fn test_geometry_conflicts_with_semi_axis() {
        let g = SweepParameter::Geometry;
        let s = SweepParameter::SemiAxis(AnatomicalAxis::LeftRight);
        assert!(g.conflicts_with(s));
        assert!(s.conflicts_with(g));
        assert!(!s.conflicts_with(SweepParameter::SemiAxis(AnatomicalAxis::SuperiorInferior)));
        assert!(SweepParameter::Frequency.conflicts_with(SweepParameter::Frequency));
    }

    #[test]
    fn test_nerve_stimulation_preset() {
        let set = ThresholdSet::nerve_stimulation();
        assert_eq!(set.len(), 1);
        assert!(set.get(Quantity::EField).is_some());
        assert!(set.get(Quantity::CurrentDensity).is_none());
    }
}
