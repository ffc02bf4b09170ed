//! mirath_core — Core types and domains for the MIRATH inheritance engine.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`mirath_io`, `mirath_algo`, `mirath_pipeline`, `mirath_report`,
//! `mirath_cli`).
//!
//! - Output IDs: `CASE:`, `RES:`, `RUN:`
//! - Heir taxonomy: `Gender`, `HeirCounts`, `HeirClass`, `BlockingFacts`
//! - Share model: `Entitlement`, `ShareLine`, `Outcome`
//! - Policy parameters: `BlockingPolicy`, `Params`
//! - Exact fraction arithmetic (`Frac`, i128-based) and Decimal money helpers
//!
//! Serialization derives are gated behind the `serde` feature.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain validation & parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidId,
        InvalidToken,
        InvalidHex,
        InvalidTimestamp,
        InvalidFraction,
        DomainOutOfRange(&'static str),
        Overflow(&'static str),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidId => write!(f, "invalid id"),
                CoreError::InvalidToken => write!(f, "invalid token"),
                CoreError::InvalidHex => write!(f, "invalid hex"),
                CoreError::InvalidTimestamp => write!(f, "invalid timestamp"),
                CoreError::InvalidFraction => write!(f, "invalid fraction"),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
                CoreError::Overflow(op) => write!(f, "arithmetic overflow: {op}"),
            }
        }
    }

    #[cfg(feature = "std")]
    impl std::error::Error for CoreError {}
}

/// Define an enum with explicit wire tokens, a `FromStr` parser, and a
/// token-preserving `Display`. Serde derives stay behind the `serde` feature.
macro_rules! serde_enum {
    ($name:ident => { $( $(#[$meta:meta])* $variant:ident = $token:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $(
                $(#[$meta])*
                #[cfg_attr(feature = "serde", serde(rename = $token))]
                $variant,
            )+
        }

        impl $name {
            /// Canonical wire token for this variant.
            pub fn as_token(self) -> &'static str {
                match self {
                    $( Self::$variant => $token, )+
                }
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::errors::CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $token => Ok(Self::$variant), )+
                    _ => Err($crate::errors::CoreError::InvalidToken),
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_token())
            }
        }
    };
}

pub(crate) use serde_enum;

pub mod citations;
pub mod frac;
pub mod heirs;
pub mod ids;
pub mod money;
pub mod params;
pub mod shares;
