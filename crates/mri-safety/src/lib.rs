// ─────────────────────────────────────────────────────────────────────
// MRI EM Thresh — Safety
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Safety annotation of induced-field results.
//!
//! Classification never mutates the computed values; it is a separate
//! annotation keyed by result index.

pub mod biology;
pub mod classifier;
pub mod summary;
