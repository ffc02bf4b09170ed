//! Fixed-share (Ashab al-Furud) assignment.
//!
//! Grants the Qur'anic fractions for spouse, parents, grandparents, uterine
//! siblings, daughters and sisters, and emits a zero-amount blocked entry for
//! every present-but-excluded category. Categories skipped by precedence
//! (e.g. a paternal sister outranked by a full sister) get no entry at all.

use alloc::vec::Vec;

use mirath_core::citations::Citation;
use mirath_core::errors::CoreError;
use mirath_core::frac::Frac;
use mirath_core::heirs::{BlockingFacts, Gender, HeirClass, HeirCounts};
use mirath_core::shares::{fixed_label, Entitlement};

fn grant(
    class: HeirClass,
    count: u32,
    frac: Frac,
    citation: Citation,
) -> Entitlement {
    Entitlement::granted(class, count, frac, fixed_label(frac), citation)
}

/// Assign fixed fractions against the whole estate. All fixed shares are
/// independent fractions of the same whole, so the emission order below only
/// shapes tie-breaking in the final presentation sort.
pub fn assign_fixed(
    counts: &HeirCounts,
    facts: &BlockingFacts,
) -> Result<Vec<Entitlement>, CoreError> {
    let mut out: Vec<Entitlement> = Vec::new();
    let has_descendant = counts.has_descendant();

    let half = Frac::new(1, 2)?;
    let third = Frac::new(1, 3)?;
    let quarter = Frac::new(1, 4)?;
    let sixth = Frac::new(1, 6)?;
    let eighth = Frac::new(1, 8)?;
    let two_thirds = Frac::new(2, 3)?;

    // Spouse. Wives share one collective fraction regardless of count.
    match counts.gender {
        Gender::Female if counts.husband > 0 => {
            let (f, cite) = if has_descendant {
                (quarter, Citation::HusbandWithChild)
            } else {
                (half, Citation::HusbandNoChild)
            };
            out.push(grant(HeirClass::Husband, 1, f, cite));
        }
        Gender::Male if counts.wives > 0 => {
            let (f, cite) = if has_descendant {
                (eighth, Citation::WifeWithChild)
            } else {
                (quarter, Citation::WifeNoChild)
            };
            out.push(grant(HeirClass::Wives, counts.wives, f, cite));
        }
        _ => {}
    }

    // Father: 1/6 only alongside a descendant; otherwise purely residuary.
    if counts.father > 0 && has_descendant {
        out.push(grant(HeirClass::Father, 1, sixth, Citation::ParentsWithChild));
    }

    // Paternal grandfather: same 1/6 rule when he stands in for the father.
    if counts.paternal_grandfather > 0 {
        if facts.paternal_grandfather_blocked {
            out.push(Entitlement::blocked(
                HeirClass::PaternalGrandfather,
                counts.paternal_grandfather,
            ));
        } else if has_descendant {
            out.push(grant(
                HeirClass::PaternalGrandfather,
                1,
                sixth,
                Citation::ParentsWithChild,
            ));
        }
    }

    // Mother: 1/6 with a child or 2+ siblings, else 1/3. The sibling test
    // uses the raw count: blocked siblings still reduce her share.
    if counts.mother > 0 {
        if has_descendant || counts.sibling_count_raw() >= 2 {
            out.push(grant(HeirClass::Mother, 1, sixth, Citation::ParentsWithChild));
        } else {
            out.push(grant(HeirClass::Mother, 1, third, Citation::MotherThirdNoChild));
        }
    }

    // Grandmothers: blocked entries regardless of the mother, a joint single
    // 1/6 line for the unblocked ones only when the mother is absent.
    if counts.maternal_grandmother > 0 && facts.maternal_grandmother_blocked {
        out.push(Entitlement::blocked(
            HeirClass::MaternalGrandmother,
            counts.maternal_grandmother,
        ));
    }
    if counts.paternal_grandmother > 0 && facts.paternal_grandmother_blocked {
        out.push(Entitlement::blocked(
            HeirClass::PaternalGrandmother,
            counts.paternal_grandmother,
        ));
    }
    if counts.mother == 0 {
        let mat = counts.maternal_grandmother > 0 && !facts.maternal_grandmother_blocked;
        let pat = counts.paternal_grandmother > 0 && !facts.paternal_grandmother_blocked;
        let class = match (mat, pat) {
            (true, true) => Some(HeirClass::Grandmothers),
            (true, false) => Some(HeirClass::MaternalGrandmother),
            (false, true) => Some(HeirClass::PaternalGrandmother),
            (false, false) => None,
        };
        if let Some(class) = class {
            // The 1/6 is shared between them, not multiplied.
            let n = u32::from(mat) + u32::from(pat);
            out.push(grant(class, n, sixth, Citation::GrandmotherConsensus));
        }
    }

    // Uterine siblings: flat 1/3 (two or more) or 1/6 (one), no 2:1 split.
    if counts.maternal_siblings > 0 {
        if facts.maternal_siblings_blocked {
            out.push(Entitlement::blocked(
                HeirClass::MaternalSiblings,
                counts.maternal_siblings,
            ));
        } else {
            let f = if counts.maternal_siblings > 1 { third } else { sixth };
            out.push(grant(
                HeirClass::MaternalSiblings,
                counts.maternal_siblings,
                f,
                Citation::MaternalSiblings,
            ));
        }
    }

    // Daughters are fixed-share only without sons; with sons they ride the
    // 2:1 residuary split instead.
    if counts.daughters > 0 && counts.sons == 0 {
        let f = if counts.daughters > 1 { two_thirds } else { half };
        out.push(grant(HeirClass::Daughters, counts.daughters, f, Citation::SonsDaughters));
    }

    // Full siblings. Sisters take the Kalala fixed share only with no full
    // brother and no daughter; with daughters they become residuary
    // (Asaba ma'a al-ghayr) and are handled by the residuary stage.
    if facts.full_siblings_blocked {
        if counts.full_brothers > 0 {
            out.push(Entitlement::blocked(HeirClass::FullBrothers, counts.full_brothers));
        }
        if counts.full_sisters > 0 {
            out.push(Entitlement::blocked(HeirClass::FullSisters, counts.full_sisters));
        }
    } else if counts.full_sisters > 0 && counts.full_brothers == 0 && counts.daughters == 0 {
        let f = if counts.full_sisters > 1 { two_thirds } else { half };
        out.push(grant(HeirClass::FullSisters, counts.full_sisters, f, Citation::KalalaSiblings));
    }

    // Paternal siblings: same pattern, one rank further out.
    if facts.paternal_siblings_blocked {
        if counts.paternal_brothers > 0 {
            out.push(Entitlement::blocked(
                HeirClass::PaternalBrothers,
                counts.paternal_brothers,
            ));
        }
        if counts.paternal_sisters > 0 {
            out.push(Entitlement::blocked(
                HeirClass::PaternalSisters,
                counts.paternal_sisters,
            ));
        }
    } else if counts.paternal_sisters > 0
        && counts.paternal_brothers == 0
        && counts.full_brothers == 0
        && counts.full_sisters == 0
        && counts.daughters == 0
    {
        let f = if counts.paternal_sisters > 1 { two_thirds } else { half };
        out.push(grant(
            HeirClass::PaternalSisters,
            counts.paternal_sisters,
            f,
            Citation::KalalaSiblings,
        ));
    }

    Ok(out)
}
