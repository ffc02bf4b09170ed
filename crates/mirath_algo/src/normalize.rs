//! Awal / Radd normalization.
//!
//! Exact rational arithmetic makes the over/under tests plain comparisons
//! against the whole; there are no epsilon guards anywhere in the engine.

use alloc::string::ToString;
use alloc::vec::Vec;

use mirath_core::errors::CoreError;
use mirath_core::frac::{Frac, ONE, ZERO};
use mirath_core::shares::{awal_note, Entitlement, Outcome, NOTE_FIXED_PLUS_RADD};

fn granted_total(lines: &[Entitlement]) -> Result<Frac, CoreError> {
    let mut total = ZERO;
    for e in lines {
        if !e.blocked {
            total = total.checked_add(e.frac)?;
        }
    }
    Ok(total)
}

/// Reconcile the share table with the whole estate.
///
/// - Over-allocation (Awal): every non-blocked line is rescaled by the
///   reciprocal of the total, so the new total is exactly one.
/// - Under-allocation with returnable blood shares (Radd): the surplus goes
///   back to non-spouse lines in proportion to their existing fractions.
/// - Under-allocation with nothing returnable (spouse-only or empty tables):
///   the leftover is surfaced as [`Outcome::UnhandledResidue`].
pub fn normalize(mut lines: Vec<Entitlement>) -> Result<(Vec<Entitlement>, Outcome), CoreError> {
    let total = granted_total(&lines)?;

    if total.exceeds_whole() {
        let factor = total;
        for e in &mut lines {
            if e.blocked {
                continue;
            }
            e.frac = e.frac.checked_div(factor)?;
            e.note = Some(awal_note(e.note.as_deref()));
        }
        return Ok((lines, Outcome::Awal { factor }));
    }

    if total.below_whole() {
        let surplus = ONE.checked_sub(total)?;
        let mut spouse_total = ZERO;
        for e in &lines {
            if !e.blocked && e.class.is_spouse() {
                spouse_total = spouse_total.checked_add(e.frac)?;
            }
        }
        let returnable = total.checked_sub(spouse_total)?;
        if returnable.is_positive() {
            for e in &mut lines {
                if e.blocked || e.class.is_spouse() {
                    continue;
                }
                let extra = surplus.checked_mul(e.frac.checked_div(returnable)?)?;
                e.frac = e.frac.checked_add(extra)?;
                e.note = Some(NOTE_FIXED_PLUS_RADD.to_string());
            }
            return Ok((lines, Outcome::Radd { surplus }));
        }
        return Ok((lines, Outcome::UnhandledResidue { fraction: surplus }));
    }

    Ok((lines, Outcome::Balanced))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribute;
    use mirath_core::heirs::{Gender, HeirClass, HeirCounts};
    use mirath_core::params::Params;

    fn run(counts: &HeirCounts) -> (Vec<Entitlement>, Outcome) {
        distribute(counts, &Params::default()).unwrap()
    }

    fn line<'a>(lines: &'a [Entitlement], class: HeirClass) -> &'a Entitlement {
        lines.iter().find(|e| e.class == class).unwrap()
    }

    fn f(n: i128, d: i128) -> Frac {
        Frac::new(n, d).unwrap()
    }

    fn total_of(lines: &[Entitlement]) -> Frac {
        granted_total(lines).unwrap()
    }

    #[test]
    fn awal_rescales_to_exactly_one() {
        // Wife 1/8 + two daughters 2/3 + mother 1/6 + father 1/6 = 9/8.
        let mut c = HeirCounts::none(Gender::Male);
        c.wives = 1;
        c.daughters = 2;
        c.mother = 1;
        c.father = 1;
        let (lines, outcome) = run(&c);

        assert_eq!(outcome, Outcome::Awal { factor: f(9, 8) });
        assert_eq!(total_of(&lines), ONE);
        assert_eq!(line(&lines, HeirClass::Wives).frac, f(1, 9));
        assert_eq!(line(&lines, HeirClass::Daughters).frac, f(16, 27));
        assert_eq!(line(&lines, HeirClass::Mother).frac, f(4, 27));
        assert_eq!(line(&lines, HeirClass::Father).frac, f(4, 27));
        assert_eq!(line(&lines, HeirClass::Wives).note.as_deref(), Some("Awal applied"));
    }

    #[test]
    fn radd_returns_everything_to_a_lone_mother() {
        let mut c = HeirCounts::none(Gender::Male);
        c.mother = 1;
        let (lines, outcome) = run(&c);

        assert_eq!(outcome, Outcome::Radd { surplus: f(2, 3) });
        let mother = line(&lines, HeirClass::Mother);
        assert_eq!(mother.frac, ONE);
        assert_eq!(mother.note.as_deref(), Some(NOTE_FIXED_PLUS_RADD));
    }

    #[test]
    fn radd_skips_spouses_but_keeps_proportions() {
        // Husband 1/2 + mother 1/3; surplus 1/6 goes to the mother alone.
        let mut c = HeirCounts::none(Gender::Female);
        c.husband = 1;
        c.mother = 1;
        let (lines, outcome) = run(&c);

        assert_eq!(outcome, Outcome::Radd { surplus: f(1, 6) });
        assert_eq!(line(&lines, HeirClass::Husband).frac, f(1, 2));
        assert_eq!(line(&lines, HeirClass::Mother).frac, f(1, 2));
        assert_eq!(total_of(&lines), ONE);
        assert!(line(&lines, HeirClass::Husband).note.is_none());
    }

    #[test]
    fn radd_splits_surplus_proportionally() {
        // Mother 1/6 + one daughter 1/2 (+ two uterine blocked by the
        // daughter): returnable 2/3, surplus 1/3 split 1:3.
        let mut c = HeirCounts::none(Gender::Male);
        c.mother = 1;
        c.daughters = 1;
        c.maternal_siblings = 2;
        let (lines, outcome) = run(&c);

        assert_eq!(outcome, Outcome::Radd { surplus: f(1, 3) });
        assert_eq!(line(&lines, HeirClass::Mother).frac, f(1, 4));
        assert_eq!(line(&lines, HeirClass::Daughters).frac, f(3, 4));
        let blocked = line(&lines, HeirClass::MaternalSiblings);
        assert!(blocked.blocked);
        assert!(blocked.frac.is_zero());
    }

    #[test]
    fn spouse_only_table_surfaces_unhandled_residue() {
        let mut c = HeirCounts::none(Gender::Female);
        c.husband = 1;
        let (lines, outcome) = run(&c);

        assert_eq!(outcome, Outcome::UnhandledResidue { fraction: f(1, 2) });
        assert_eq!(line(&lines, HeirClass::Husband).frac, f(1, 2));
        assert!(line(&lines, HeirClass::Husband).note.is_none());
        assert_eq!(outcome.unallocated(), f(1, 2));
    }

    #[test]
    fn empty_table_is_fully_unallocated() {
        let c = HeirCounts::none(Gender::Male);
        let (lines, outcome) = run(&c);
        assert!(lines.is_empty());
        assert_eq!(outcome, Outcome::UnhandledResidue { fraction: ONE });
    }

    #[test]
    fn balanced_table_is_left_alone() {
        let mut c = HeirCounts::none(Gender::Male);
        c.wives = 1;
        c.father = 1;
        let (lines, outcome) = run(&c);
        assert_eq!(outcome, Outcome::Balanced);
        assert_eq!(line(&lines, HeirClass::Wives).frac, f(1, 4));
        assert_eq!(line(&lines, HeirClass::Father).frac, f(3, 4));
    }
}
