//! Blocking (Hajb) resolution.

use mirath_core::heirs::{BlockingFacts, HeirCounts};
use mirath_core::params::BlockingPolicy;

/// Derive the exclusion facts once per run. Pure and total: every combination
/// of counts is a valid input, zero means "absent".
///
/// Under [`BlockingPolicy::ConsensusSimple`] the paternal grandfather blocks
/// full/paternal siblings exactly like the father. `ShafiiMuqasama` lifts
/// that single rule; every other fact is policy-independent, as is the
/// maternal-sibling rule (male ascendant OR any descendant), which has a
/// different blocking ancestry and is evaluated separately.
pub fn resolve_blocking(counts: &HeirCounts, policy: BlockingPolicy) -> BlockingFacts {
    let has_father = counts.father > 0;
    let has_male_descendant = counts.sons > 0;

    let grandfather_blocks_collaterals = match policy {
        BlockingPolicy::ConsensusSimple => counts.paternal_grandfather > 0,
        BlockingPolicy::ShafiiMuqasama => false,
    };
    let full_blocked = has_father || has_male_descendant || grandfather_blocks_collaterals;

    BlockingFacts {
        paternal_grandfather_blocked: has_father,
        maternal_grandmother_blocked: counts.mother > 0,
        paternal_grandmother_blocked: counts.mother > 0 || has_father,
        full_siblings_blocked: full_blocked,
        // Full brothers outrank paternal siblings entirely.
        paternal_siblings_blocked: full_blocked || counts.full_brothers > 0,
        maternal_siblings_blocked: counts.has_male_ascendant() || counts.has_descendant(),
    }
}
