// ─────────────────────────────────────────────────────────────────────
// MRI EM Thresh — Ellipse Perimeter
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Perimeter of an ellipse with semi-axes `a`, `b`.
//!
//! The ellipse perimeter has no elementary closed form. Two routes are
//! provided: Ramanujan's second approximation (relative error below
//! 1e-9 for head-like eccentricities, about 4e-4 as b/a → 0) and the
//! Gauss arithmetic-geometric-mean series, which converges quadratically
//! to the exact value.

use std::f64::consts::PI;

/// Iteration cap for the AGM series. Convergence is quadratic, so a
/// handful of rounds reaches machine precision for any b/a > 1e-300.
const AGM_MAX_ITER: usize = 64;

/// Ramanujan's second approximation:
///
///   P ≈ π(a + b)(1 + 3h / (10 + √(4 − 3h))),  h = ((a − b)/(a + b))²
pub fn ramanujan_perimeter(a: f64, b: f64) -> f64 {
    let sum = a + b;
    if sum <= 0.0 {
        return 0.0;
    }
    let h = ((a - b) / sum).powi(2);
    PI * sum * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()))
}

/// Perimeter via the AGM series:
///
///   P = 2π / M(a, b) · (a² − Σₙ 2ⁿ⁻¹ cₙ²)
///
/// with a ≥ b, c₀² = a² − b² and cₙ₊₁ = (aₙ − bₙ)/2.
pub fn agm_perimeter(a: f64, b: f64) -> f64 {
    let (a, b) = if a >= b { (a, b) } else { (b, a) };
    if b <= 0.0 {
        return 4.0 * a.max(0.0);
    }

    let mut an = a;
    let mut bn = b;
    let mut sum = 0.5 * (a * a - b * b);
    let mut weight = 0.5;

    for _ in 0..AGM_MAX_ITER {
        let cn = 0.5 * (an - bn);
        let next_b = (an * bn).sqrt();
        an = 0.5 * (an + bn);
        bn = next_b;
        weight *= 2.0;
        sum += weight * cn * cn;
        if cn <= f64::EPSILON * an {
            break;
        }
    }

    2.0 * PI * (a * a - sum) / an
}
