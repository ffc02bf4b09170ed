//! Rule citations attached to every share line.
//!
//! Tokens are stable wire identifiers; `text()` carries the English evidence
//! string shown in report tables.

use crate::serde_enum;

serde_enum!(Citation => {
    SonsDaughters        = "quran_4_11_sons_daughters",
    ParentsWithChild     = "quran_4_11_parents_with_child",
    MotherThirdNoChild   = "quran_4_11_mother_no_child",
    HusbandNoChild       = "quran_4_12_husband_no_child",
    HusbandWithChild     = "quran_4_12_husband_with_child",
    WifeNoChild          = "quran_4_12_wife_no_child",
    WifeWithChild        = "quran_4_12_wife_with_child",
    MaternalSiblings     = "quran_4_12_maternal_siblings",
    KalalaSiblings       = "quran_4_176_siblings",
    ResidueHadith        = "bukhari_residue",
    GrandmotherConsensus = "ijma_grandmother",
    BlockedByCloser      = "hajb_block",
});

impl Citation {
    /// Evidence text for report tables.
    pub fn text(self) -> &'static str {
        match self {
            Citation::SonsDaughters => "Quran 4:11 - Male gets share of two females.",
            Citation::ParentsWithChild => "Quran 4:11 - Parents 1/6 each (Child exists).",
            Citation::MotherThirdNoChild => "Quran 4:11 - Mother 1/3 (No Child/Siblings).",
            Citation::HusbandNoChild => "Quran 4:12 - Husband 1/2 (No Child).",
            Citation::HusbandWithChild => "Quran 4:12 - Husband 1/4 (Child exists).",
            Citation::WifeNoChild => "Quran 4:12 - Wife 1/4 (No Child).",
            Citation::WifeWithChild => "Quran 4:12 - Wife 1/8 (Child exists).",
            Citation::MaternalSiblings => "Quran 4:12 - Maternal siblings share 1/3.",
            Citation::KalalaSiblings => "Quran 4:176 - Kalala (Siblings) rules.",
            Citation::ResidueHadith => "Bukhari: Residue to nearest male kin.",
            Citation::GrandmotherConsensus => "Ijma: Grandmother 1/6 if Mother absent.",
            Citation::BlockedByCloser => "Excluded by closer relative.",
        }
    }
}
