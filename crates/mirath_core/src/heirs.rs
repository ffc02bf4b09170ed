//! Heir taxonomy and survivor counts.

use crate::serde_enum;

serde_enum!(Gender => {
    Male   = "male",
    Female = "female",
});

/// Immutable survivor counts for one case. Zero means "absent".
///
/// The spouse/gender exclusivity (a male deceased has no husband, a female
/// deceased has no wife) is enforced by the pipeline validation stage, not
/// re-checked inside the engine stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeirCounts {
    pub gender: Gender,
    pub husband: u32,
    pub wives: u32,
    pub father: u32,
    pub mother: u32,
    pub paternal_grandfather: u32,
    pub paternal_grandmother: u32,
    pub maternal_grandmother: u32,
    pub sons: u32,
    pub daughters: u32,
    pub full_brothers: u32,
    pub full_sisters: u32,
    pub paternal_brothers: u32,
    pub paternal_sisters: u32,
    pub maternal_siblings: u32,
}

impl HeirCounts {
    /// Empty case: everyone absent. Useful as a test/builder base.
    pub fn none(gender: Gender) -> Self {
        HeirCounts {
            gender,
            husband: 0,
            wives: 0,
            father: 0,
            mother: 0,
            paternal_grandfather: 0,
            paternal_grandmother: 0,
            maternal_grandmother: 0,
            sons: 0,
            daughters: 0,
            full_brothers: 0,
            full_sisters: 0,
            paternal_brothers: 0,
            paternal_sisters: 0,
            maternal_siblings: 0,
        }
    }

    #[inline]
    pub fn has_descendant(&self) -> bool {
        self.sons > 0 || self.daughters > 0
    }

    #[inline]
    pub fn has_male_ascendant(&self) -> bool {
        self.father > 0 || self.paternal_grandfather > 0
    }

    /// Raw sibling count across all five categories, regardless of blocking.
    /// The mother's 1/6-vs-1/3 test uses this: blocked siblings still reduce
    /// her share.
    #[inline]
    pub fn sibling_count_raw(&self) -> u32 {
        self.full_brothers
            + self.full_sisters
            + self.paternal_brothers
            + self.paternal_sisters
            + self.maternal_siblings
    }
}

/// Exclusion facts derived once per run from `HeirCounts`.
/// Never mutated after creation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockingFacts {
    pub paternal_grandfather_blocked: bool,
    pub maternal_grandmother_blocked: bool,
    pub paternal_grandmother_blocked: bool,
    pub full_siblings_blocked: bool,
    pub paternal_siblings_blocked: bool,
    pub maternal_siblings_blocked: bool,
}

serde_enum!(HeirClass => {
    Husband             = "husband",
    Wives               = "wives",
    Father              = "father",
    Mother              = "mother",
    PaternalGrandfather = "paternal_grandfather",
    PaternalGrandmother = "paternal_grandmother",
    MaternalGrandmother = "maternal_grandmother",
    Grandmothers        = "grandmothers",
    Sons                = "sons",
    Daughters           = "daughters",
    FullBrothers        = "full_brothers",
    FullSisters         = "full_sisters",
    PaternalBrothers    = "paternal_brothers",
    PaternalSisters     = "paternal_sisters",
    MaternalSiblings    = "maternal_siblings",
});

impl HeirClass {
    /// English display label for report tables.
    pub fn label(self) -> &'static str {
        match self {
            HeirClass::Husband => "Husband",
            HeirClass::Wives => "Wife",
            HeirClass::Father => "Father",
            HeirClass::Mother => "Mother",
            HeirClass::PaternalGrandfather => "Paternal Grandfather",
            HeirClass::PaternalGrandmother => "Pat. Grandmother",
            HeirClass::MaternalGrandmother => "Mat. Grandmother",
            HeirClass::Grandmothers => "Grandmothers (Pat+Mat)",
            HeirClass::Sons => "Son(s)",
            HeirClass::Daughters => "Daughter(s)",
            HeirClass::FullBrothers => "Full Brother(s)",
            HeirClass::FullSisters => "Full Sister(s)",
            HeirClass::PaternalBrothers => "Half-Bro (Father)",
            HeirClass::PaternalSisters => "Half-Sis (Father)",
            HeirClass::MaternalSiblings => "Maternal Sibling",
        }
    }

    /// Spouse lines never participate in Radd.
    #[inline]
    pub fn is_spouse(self) -> bool {
        matches!(self, HeirClass::Husband | HeirClass::Wives)
    }
}
