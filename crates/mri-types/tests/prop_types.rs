// ─────────────────────────────────────────────────────────────────────
// MRI EM Thresh — Property-Based Tests (proptest) for mri-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for mri-types using proptest.
//!
//! Covers: linspace sweep dimensions, semi-axis replacement,
//! threshold validation, config serialization roundtrip.

use mri_types::config::{EngineConfig, SweepDimension, SweepParameter, ThresholdPair};
use mri_types::state::{AnatomicalAxis, OperatingPoint, SemiAxes};
use proptest::prelude::*;

fn any_axis() -> impl Strategy<Value = AnatomicalAxis> {
    prop_oneof![
        Just(AnatomicalAxis::AnteriorPosterior),
        Just(AnatomicalAxis::LeftRight),
        Just(AnatomicalAxis::SuperiorInferior),
    ]
}

// ── Sweep Dimensions ─────────────────────────────────────────────────

proptest! {
    /// linspace yields steps + 1 values hitting both endpoints.
    #[test]
    fn linspace_endpoints(
        start in 0.0f64..10.0,
        span in 0.1f64..500.0,
        steps in 1usize..500,
    ) {
        let stop = start + span;
        let dim = SweepDimension::linspace(SweepParameter::SlewRate, start, stop, steps);
        let values = dim.raw_values();

        prop_assert_eq!(values.len(), steps + 1);
        prop_assert!((values[0] - start).abs() < 1e-12);
        prop_assert!((values[steps] - stop).abs() < 1e-9 * stop.max(1.0));
    }

    /// linspace values are strictly increasing for a positive span.
    #[test]
    fn linspace_monotone(steps in 2usize..200, span in 0.1f64..100.0) {
        let values = SweepDimension::linspace(SweepParameter::FieldStrength, 0.0, span, steps)
            .raw_values();
        for i in 1..values.len() {
            prop_assert!(values[i] > values[i - 1],
                "not monotone at {}: {} <= {}", i, values[i], values[i - 1]);
        }
    }

    /// Applying a semi-axis dimension changes only that axis.
    #[test]
    fn semi_axis_apply_isolated(axis in any_axis(), value in -1.0f64..1.0) {
        let baseline = OperatingPoint::default();
        let mut point = baseline;
        SweepDimension::semi_axis(axis, vec![value]).apply(0, &mut point);

        for other in AnatomicalAxis::ALL {
            if other == axis {
                prop_assert_eq!(point.semi_axes.get(other), value);
            } else {
                prop_assert_eq!(point.semi_axes.get(other), baseline.semi_axes.get(other));
            }
        }
        prop_assert_eq!(point.waveform, baseline.waveform);
        prop_assert_eq!(point.conductivity, baseline.conductivity);
    }
}

// ── Thresholds ───────────────────────────────────────────────────────

proptest! {
    /// Ordered finite bounds are accepted, inverted ones rejected.
    #[test]
    fn threshold_ordering(a in -100.0f64..100.0, b in -100.0f64..100.0) {
        let result = ThresholdPair::new(a, b);
        if a <= b {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(result.is_err());
        }
    }
}

// ── Config Roundtrip ─────────────────────────────────────────────────

proptest! {
    /// Head geometry and conductivity survive JSON serialization.
    #[test]
    fn config_roundtrip(
        ap in 0.01f64..0.2,
        lr in 0.01f64..0.2,
        si in 0.01f64..0.2,
        sigma in 0.01f64..2.0,
    ) {
        let mut cfg = EngineConfig::default();
        cfg.head = SemiAxes::new(ap, lr, si);
        cfg.tissue.conductivity = sigma;
        cfg.sweep = vec![SweepDimension::conductivity(vec![sigma, 2.0 * sigma])];

        let json = serde_json::to_string(&cfg).unwrap();
        let back = EngineConfig::from_json_str(&json).unwrap();
        prop_assert_eq!(back.head, cfg.head);
        prop_assert_eq!(back.tissue.conductivity, sigma);
        prop_assert_eq!(back.sweep, cfg.sweep);
    }
}
