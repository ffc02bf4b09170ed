//! Share lines and the distribution outcome model.
//!
//! `Entitlement` is the stage-level record (fraction only); `ShareLine` is the
//! result-level record with the monetary amount derived from the final
//! fraction. Entries are never deleted once created — blocked entries stay in
//! the output for transparency.

use alloc::format;
use alloc::string::{String, ToString};

use crate::citations::Citation;
use crate::errors::CoreError;
use crate::frac::{Frac, ZERO};
use crate::heirs::HeirClass;
use crate::money::{self, Decimal};

pub const NOTE_ASABA_SELF: &str = "Asaba bi-nafsihi";
pub const NOTE_ASABA_WITH: &str = "Asaba bi-ghayrihi";
pub const NOTE_ASABA_TOGETHER: &str = "Asaba ma'a ghayr";
pub const NOTE_FIXED_PLUS_RESIDUE: &str = "Fixed + Residue";
pub const NOTE_FIXED_PLUS_RADD: &str = "Fixed + Radd";
pub const NOTE_BLOCKED: &str = "Blocked (Mahjoub)";
pub const NOTE_AWAL: &str = "Awal applied";

pub const LABEL_RESIDUE: &str = "Residue";
pub const LABEL_RESIDUE_TWO_ONE: &str = "Residue (2:1)";
pub const LABEL_BLOCKED: &str = "0";

/// "1/6"-style label for a fixed Qur'anic fraction.
pub fn fixed_label(frac: Frac) -> String {
    format!("{}/{}", frac.num, frac.den)
}

/// Awal annotation: appended to an existing note, or standalone.
pub fn awal_note(existing: Option<&str>) -> String {
    match existing {
        Some(n) => format!("{n}, Awal"),
        None => NOTE_AWAL.to_string(),
    }
}

/// One heir class's entitlement while the stages run (no money yet).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entitlement {
    pub class: HeirClass,
    pub count: u32,
    pub share_label: String,
    pub frac: Frac,
    pub citation: Citation,
    pub note: Option<String>,
    pub blocked: bool,
}

impl Entitlement {
    /// A granted share.
    pub fn granted(
        class: HeirClass,
        count: u32,
        frac: Frac,
        share_label: impl Into<String>,
        citation: Citation,
    ) -> Self {
        Entitlement {
            class,
            count,
            share_label: share_label.into(),
            frac,
            citation,
            note: None,
            blocked: false,
        }
    }

    /// A zero-amount entry for a present-but-blocked category.
    pub fn blocked(class: HeirClass, count: u32) -> Self {
        Entitlement {
            class,
            count,
            share_label: LABEL_BLOCKED.to_string(),
            frac: ZERO,
            citation: Citation::BlockedByCloser,
            note: Some(NOTE_BLOCKED.to_string()),
            blocked: true,
        }
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }
}

/// Result-level share line: entitlement plus the derived monetary amount.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShareLine {
    pub class: HeirClass,
    pub count: u32,
    pub share_label: String,
    pub frac: Frac,
    pub amount: Decimal,
    pub citation: Citation,
    pub note: Option<String>,
    pub blocked: bool,
}

impl ShareLine {
    /// Derive the money line from a final entitlement. Blocked entries carry
    /// a zero amount by construction.
    pub fn from_entitlement(ent: &Entitlement, estate: Decimal) -> Result<Self, CoreError> {
        let amount = if ent.blocked {
            Decimal::ZERO
        } else {
            money::amount_of(estate, ent.frac)?
        };
        Ok(ShareLine {
            class: ent.class,
            count: ent.count,
            share_label: ent.share_label.clone(),
            frac: ent.frac,
            amount,
            citation: ent.citation,
            note: ent.note.clone(),
            blocked: ent.blocked,
        })
    }
}

/// How the Normalizer reconciled the share table with the whole estate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Outcome {
    /// Shares already summed to exactly 1.
    Balanced,
    /// Over-allocation; every non-blocked share was rescaled by `1/factor`.
    Awal { factor: Frac },
    /// Under-allocation returned to non-spouse fixed-share heirs.
    Radd { surplus: Frac },
    /// No residuary taker recognized; the leftover is surfaced, not hidden.
    UnhandledResidue { fraction: Frac },
}

impl Outcome {
    #[inline]
    pub fn has_awal(&self) -> bool {
        matches!(self, Outcome::Awal { .. })
    }

    #[inline]
    pub fn has_radd(&self) -> bool {
        matches!(self, Outcome::Radd { .. })
    }

    /// Leftover fraction never granted to any heir (zero unless unhandled).
    pub fn unallocated(&self) -> Frac {
        match self {
            Outcome::UnhandledResidue { fraction } => *fraction,
            _ => ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frac;

    #[test]
    fn blocked_entries_are_zero_and_flagged() {
        let e = Entitlement::blocked(HeirClass::FullBrothers, 2);
        assert!(e.blocked);
        assert!(e.frac.is_zero());
        assert_eq!(e.share_label, LABEL_BLOCKED);
        assert_eq!(e.note.as_deref(), Some(NOTE_BLOCKED));
        assert_eq!(e.citation, Citation::BlockedByCloser);
    }

    #[test]
    fn awal_note_appends_or_stands_alone() {
        assert_eq!(awal_note(None), "Awal applied");
        assert_eq!(awal_note(Some("Fixed + Residue")), "Fixed + Residue, Awal");
    }

    #[test]
    fn fixed_labels_render_reduced() {
        assert_eq!(fixed_label(Frac::new(2, 12).unwrap()), "1/6");
        assert_eq!(fixed_label(Frac::new(2, 3).unwrap()), "2/3");
    }

    #[test]
    fn outcome_accessors() {
        let awal = Outcome::Awal { factor: Frac::new(9, 8).unwrap() };
        assert!(awal.has_awal() && !awal.has_radd());
        assert!(awal.unallocated().is_zero());

        let gap = Outcome::UnhandledResidue { fraction: Frac::new(3, 4).unwrap() };
        assert_eq!(gap.unallocated(), Frac::new(3, 4).unwrap());
        assert!(!gap.has_awal() && !gap.has_radd());
        assert_eq!(Outcome::Balanced.unallocated(), frac::ZERO);
    }
}
