// ─────────────────────────────────────────────────────────────────────
// MRI EM Thresh — Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Induced-field engine for MRI patient-safety estimates.
//!
//! Geometry → flux linkage → Faraday induction → parameter sweep.

pub mod flux;
pub mod geometry;
pub mod induced;
pub mod perimeter;
pub mod population;
pub mod sweep;
