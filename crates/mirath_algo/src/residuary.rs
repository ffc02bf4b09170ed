//! Residuary (Asaba) allocation.
//!
//! Exactly one branch runs, in strict descending priority; the first match
//! consumes the whole leftover. Paternal brothers and uncle-level chains are
//! not recognized: when no branch matches, the leftover stays unallocated and
//! the normalizer surfaces it as an explicit outcome.

use alloc::vec::Vec;

use mirath_core::citations::Citation;
use mirath_core::errors::CoreError;
use mirath_core::frac::{Frac, ONE, ZERO};
use mirath_core::heirs::{BlockingFacts, HeirClass, HeirCounts};
use mirath_core::shares::{
    Entitlement, LABEL_RESIDUE, LABEL_RESIDUE_TWO_ONE, NOTE_ASABA_SELF, NOTE_ASABA_TOGETHER,
    NOTE_ASABA_WITH, NOTE_FIXED_PLUS_RESIDUE,
};

fn granted_total(lines: &[Entitlement]) -> Result<Frac, CoreError> {
    let mut total = ZERO;
    for e in lines {
        if !e.blocked {
            total = total.checked_add(e.frac)?;
        }
    }
    Ok(total)
}

/// `k` male-weight units against `n` single units (sons/daughters, brothers/
/// sisters). Checked: counts are caller-capped but the math never trusts it.
fn two_one_units(males: u32, females: u32) -> Result<u32, CoreError> {
    males
        .checked_mul(2)
        .and_then(|m| m.checked_add(females))
        .ok_or(CoreError::Overflow("residuary units"))
}

/// Merge the leftover into an existing fixed line (father/grandfather dual
/// capacity) or open a residue-only line.
fn take_all(
    lines: &mut Vec<Entitlement>,
    class: HeirClass,
    remaining: Frac,
) -> Result<(), CoreError> {
    if let Some(line) = lines.iter_mut().find(|e| e.class == class) {
        line.frac = line.frac.checked_add(remaining)?;
        line.note = Some(NOTE_FIXED_PLUS_RESIDUE.into());
    } else {
        lines.push(
            Entitlement::granted(class, 1, remaining, LABEL_RESIDUE, Citation::ResidueHadith)
                .with_note(NOTE_ASABA_SELF),
        );
    }
    Ok(())
}

/// Give any positive leftover to the nearest-ranked residuary class.
pub fn apply_residuary(
    counts: &HeirCounts,
    facts: &BlockingFacts,
    mut lines: Vec<Entitlement>,
) -> Result<Vec<Entitlement>, CoreError> {
    let remaining = ONE.checked_sub(granted_total(&lines)?)?;
    // Over-allocated tables (Awal pending) have nothing left to hand out.
    if !remaining.is_positive() {
        return Ok(lines);
    }

    if counts.sons > 0 {
        let units = two_one_units(counts.sons, counts.daughters)?;
        let unit = remaining.checked_div_int(units)?;
        let son_units = counts
            .sons
            .checked_mul(2)
            .ok_or(CoreError::Overflow("residuary units"))?;
        lines.push(
            Entitlement::granted(
                HeirClass::Sons,
                counts.sons,
                unit.checked_mul_int(son_units)?,
                LABEL_RESIDUE_TWO_ONE,
                Citation::SonsDaughters,
            )
            .with_note(NOTE_ASABA_SELF),
        );
        if counts.daughters > 0 {
            lines.push(
                Entitlement::granted(
                    HeirClass::Daughters,
                    counts.daughters,
                    unit.checked_mul_int(counts.daughters)?,
                    LABEL_RESIDUE_TWO_ONE,
                    Citation::SonsDaughters,
                )
                .with_note(NOTE_ASABA_WITH),
            );
        }
    } else if counts.father > 0 {
        take_all(&mut lines, HeirClass::Father, remaining)?;
    } else if counts.paternal_grandfather > 0 && !facts.paternal_grandfather_blocked {
        take_all(&mut lines, HeirClass::PaternalGrandfather, remaining)?;
    } else if counts.full_brothers > 0 && !facts.full_siblings_blocked {
        let units = two_one_units(counts.full_brothers, counts.full_sisters)?;
        let unit = remaining.checked_div_int(units)?;
        let brother_units = counts
            .full_brothers
            .checked_mul(2)
            .ok_or(CoreError::Overflow("residuary units"))?;
        lines.push(Entitlement::granted(
            HeirClass::FullBrothers,
            counts.full_brothers,
            unit.checked_mul_int(brother_units)?,
            LABEL_RESIDUE_TWO_ONE,
            Citation::KalalaSiblings,
        ));
        if counts.full_sisters > 0 {
            lines.push(Entitlement::granted(
                HeirClass::FullSisters,
                counts.full_sisters,
                unit.checked_mul_int(counts.full_sisters)?,
                LABEL_RESIDUE_TWO_ONE,
                Citation::KalalaSiblings,
            ));
        }
    } else if counts.full_sisters > 0 && counts.daughters > 0 && !facts.full_siblings_blocked {
        // Asaba ma'a al-ghayr: daughters exhausted the direct line, the
        // sisters sweep the rest as one line.
        lines.push(
            Entitlement::granted(
                HeirClass::FullSisters,
                counts.full_sisters,
                remaining,
                LABEL_RESIDUE,
                Citation::ResidueHadith,
            )
            .with_note(NOTE_ASABA_TOGETHER),
        );
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assign_fixed, resolve_blocking};
    use mirath_core::heirs::Gender;
    use mirath_core::params::BlockingPolicy;

    fn run(counts: &HeirCounts) -> Vec<Entitlement> {
        let facts = resolve_blocking(counts, BlockingPolicy::ConsensusSimple);
        let lines = assign_fixed(counts, &facts).unwrap();
        apply_residuary(counts, &facts, lines).unwrap()
    }

    fn line<'a>(lines: &'a [Entitlement], class: HeirClass) -> &'a Entitlement {
        lines.iter().find(|e| e.class == class).unwrap()
    }

    fn f(n: i128, d: i128) -> Frac {
        Frac::new(n, d).unwrap()
    }

    #[test]
    fn sons_and_daughters_split_two_to_one() {
        let mut c = HeirCounts::none(Gender::Male);
        c.sons = 2;
        c.daughters = 1;
        let lines = run(&c);
        let sons = line(&lines, HeirClass::Sons);
        let daughters = line(&lines, HeirClass::Daughters);
        assert_eq!(sons.frac, f(4, 5));
        assert_eq!(daughters.frac, f(1, 5));
        assert_eq!(sons.share_label, LABEL_RESIDUE_TWO_ONE);
        assert_eq!(sons.note.as_deref(), Some(NOTE_ASABA_SELF));
        assert_eq!(daughters.note.as_deref(), Some(NOTE_ASABA_WITH));
    }

    #[test]
    fn father_without_descendant_takes_all_residue() {
        let mut c = HeirCounts::none(Gender::Male);
        c.wives = 1;
        c.father = 1;
        let lines = run(&c);
        let father = line(&lines, HeirClass::Father);
        assert_eq!(father.frac, f(3, 4));
        assert_eq!(father.share_label, LABEL_RESIDUE);
        assert_eq!(father.note.as_deref(), Some(NOTE_ASABA_SELF));
    }

    #[test]
    fn father_with_daughter_merges_fixed_and_residue() {
        let mut c = HeirCounts::none(Gender::Male);
        c.father = 1;
        c.daughters = 1;
        let lines = run(&c);
        let father = line(&lines, HeirClass::Father);
        // 1/6 fixed + 1/3 leftover = 1/2; label stays the fixed one.
        assert_eq!(father.frac, f(1, 2));
        assert_eq!(father.share_label, "1/6");
        assert_eq!(father.note.as_deref(), Some(NOTE_FIXED_PLUS_RESIDUE));
        // Only one father line exists.
        assert_eq!(lines.iter().filter(|e| e.class == HeirClass::Father).count(), 1);
    }

    #[test]
    fn grandfather_merges_like_the_father() {
        let mut c = HeirCounts::none(Gender::Male);
        c.paternal_grandfather = 1;
        c.daughters = 1;
        let lines = run(&c);
        let gf = line(&lines, HeirClass::PaternalGrandfather);
        assert_eq!(gf.frac, f(1, 2));
        assert_eq!(gf.note.as_deref(), Some(NOTE_FIXED_PLUS_RESIDUE));
    }

    #[test]
    fn full_brothers_and_sisters_split_two_to_one() {
        let mut c = HeirCounts::none(Gender::Male);
        c.full_brothers = 1;
        c.full_sisters = 2;
        let lines = run(&c);
        assert_eq!(line(&lines, HeirClass::FullBrothers).frac, f(1, 2));
        assert_eq!(line(&lines, HeirClass::FullSisters).frac, f(1, 2));
        assert_eq!(line(&lines, HeirClass::FullSisters).count, 2);
    }

    #[test]
    fn sisters_with_daughters_sweep_the_rest() {
        let mut c = HeirCounts::none(Gender::Male);
        c.daughters = 1;
        c.full_sisters = 1;
        let lines = run(&c);
        let sis = line(&lines, HeirClass::FullSisters);
        assert_eq!(sis.frac, f(1, 2));
        assert_eq!(sis.share_label, LABEL_RESIDUE);
        assert_eq!(sis.note.as_deref(), Some(NOTE_ASABA_TOGETHER));
    }

    #[test]
    fn no_taker_leaves_lines_untouched() {
        let mut c = HeirCounts::none(Gender::Female);
        c.husband = 1;
        let lines = run(&c);
        assert_eq!(lines.len(), 1);
        assert_eq!(line(&lines, HeirClass::Husband).frac, f(1, 2));
    }

    #[test]
    fn over_allocated_table_gets_no_residuary_lines() {
        // Awal case: 1/8 + 2/3 + 1/6 + 1/6 = 9/8 > 1.
        let mut c = HeirCounts::none(Gender::Male);
        c.wives = 1;
        c.daughters = 2;
        c.mother = 1;
        c.father = 1;
        let lines = run(&c);
        let father = line(&lines, HeirClass::Father);
        assert_eq!(father.frac, f(1, 6));
        assert!(father.note.is_none());
    }
}
