//! mirath_algo — the Fara'id rule engine.
//!
//! Four pure stages over an immutable [`HeirCounts`] input:
//!
//! 1. [`resolve_blocking`] — exclusion facts (Hajb).
//! 2. [`assign_fixed`] — Qur'anic fixed fractions.
//! 3. [`apply_residuary`] — leftover to the nearest residuary class (Asaba).
//! 4. [`normalize`] — Awal reduction / Radd return / unhandled residue.
//!
//! Each stage takes owned data and returns owned data; nothing here touches
//! I/O or money formatting. The zakat and partnership calculators live in
//! their own modules and share only the Decimal money type with the rest.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod blocking;
pub mod fixed;
pub mod normalize;
pub mod partnership;
pub mod residuary;
pub mod zakat;

pub use blocking::resolve_blocking;
pub use fixed::assign_fixed;
pub use normalize::normalize;
pub use residuary::apply_residuary;

use alloc::vec::Vec;

use mirath_core::errors::CoreError;
use mirath_core::heirs::HeirCounts;
use mirath_core::params::Params;
use mirath_core::shares::{Entitlement, Outcome};

/// Run the four stages in order and return the final share table.
///
/// Total over the documented input domain: every combination of non-negative
/// counts yields a result (all-zero heirs surfaces as
/// [`Outcome::UnhandledResidue`] with the whole estate unallocated).
pub fn distribute(
    counts: &HeirCounts,
    params: &Params,
) -> Result<(Vec<Entitlement>, Outcome), CoreError> {
    let facts = resolve_blocking(counts, params.blocking_policy);
    let lines = assign_fixed(counts, &facts)?;
    let lines = apply_residuary(counts, &facts, lines)?;
    normalize(lines)
}
