//! Policy parameters with safe defaults and domain validation.
//!
//! `blocking_policy` is outcome-affecting and echoed into the run record;
//! `rounding_dp` only shapes displayed amounts.

use alloc::format;
use alloc::string::String;

use crate::serde_enum;

serde_enum!(BlockingPolicy => {
    /// Grandfather blocks collateral siblings exactly like the father.
    ConsensusSimple = "consensus_simple",
    /// Grandfather alone does not block full/paternal siblings.
    ShafiiMuqasama  = "shafii_muqasama",
});

/// Engine parameters. Defaults reproduce the single-madhab simplified policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Params {
    pub blocking_policy: BlockingPolicy,
    /// Decimal places for displayed amounts (0..=4).
    pub rounding_dp: u8,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            blocking_policy: BlockingPolicy::ConsensusSimple,
            rounding_dp: 2,
        }
    }
}

#[derive(Debug)]
pub enum ParamError {
    Domain(String),
}

impl core::fmt::Display for ParamError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParamError::Domain(m) => write!(f, "parameter domain: {m}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParamError {}

impl Params {
    /// Validate numeric domains (enums are already token-validated at parse).
    pub fn validate_domains(&self) -> Result<(), ParamError> {
        if self.rounding_dp > 4 {
            return Err(ParamError::Domain(format!(
                "rounding_dp out of range: {} (expected 0..=4)",
                self.rounding_dp
            )));
        }
        Ok(())
    }
}
