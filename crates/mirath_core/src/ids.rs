//! Canonical engine/output IDs.
//! Deterministic, ASCII-only, strict shapes; no I/O.

use alloc::borrow::ToOwned;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::errors::CoreError;

const MAX_ID_LEN: usize = 256;
const HEX64_LEN: usize = 64;

/// Quickly verify ASCII (no NUL).
#[inline]
fn is_ascii_no_nul(s: &str) -> bool {
    !s.as_bytes().iter().any(|&b| b == 0 || b > 0x7F)
}

/// Lowercase hex (length must be exactly 64).
#[inline]
pub fn is_valid_sha256(s: &str) -> bool {
    if s.len() != HEX64_LEN || !is_ascii_no_nul(s) {
        return false;
    }
    s.as_bytes()
        .iter()
        .all(|&b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Strict RFC3339 UTC instant "YYYY-MM-DDTHH:MM:SSZ" (20 bytes, 'Z' suffix).
#[inline]
pub fn is_ts_utc_z(ts: &str) -> bool {
    let b = ts.as_bytes();
    if b.len() != 20 {
        return false;
    }
    let digits = |r: core::ops::Range<usize>| b[r].iter().all(|&c| c.is_ascii_digit());
    digits(0..4)
        && b[4] == b'-'
        && digits(5..7)
        && b[7] == b'-'
        && digits(8..10)
        && b[10] == b'T'
        && digits(11..13)
        && b[13] == b':'
        && digits(14..16)
        && b[16] == b':'
        && digits(17..19)
        && b[19] == b'Z'
}

macro_rules! simple_string_newtype {
    ($(#[$m:meta])* $name:ident) => {
        $(#[$m])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            #[inline] pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl TryFrom<&str> for $name {
            type Error = CoreError;
            #[inline]
            fn try_from(value: &str) -> Result<Self, Self::Error> { value.parse() }
        }
    }
}

// === Hex-only newtype: Sha256 ===

simple_string_newtype!(
    /// Generic 64-hex lowercase SHA-256 digest newtype.
    Sha256
);

impl FromStr for Sha256 {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_ascii_no_nul(s) || s.len() > MAX_ID_LEN {
            return Err(CoreError::InvalidHex);
        }
        if !is_valid_sha256(s) {
            return Err(CoreError::InvalidHex);
        }
        Ok(Sha256(s.to_owned()))
    }
}
impl Sha256 {
    #[inline]
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

// === Prefixed output IDs: CASE, RES, RUN ===

simple_string_newtype!(
    /// "CASE:" + 64-hex lowercase (digest of the canonical case file)
    CaseId
);
simple_string_newtype!(
    /// "RES:" + 64-hex lowercase
    ResultId
);
simple_string_newtype!(
    /// "RUN:" + <RFC3339 UTC 'YYYY-MM-DDTHH:MM:SSZ'> + "-" + 64-hex lowercase
    RunId
);

#[inline]
fn is_case_shape(s: &str) -> bool {
    s.len() == 5 + HEX64_LEN
        && s.as_bytes().get(0..5) == Some(b"CASE:")
        && is_valid_sha256(&s[5..])
}

#[inline]
fn is_res_shape(s: &str) -> bool {
    s.len() == 4 + HEX64_LEN
        && s.as_bytes().get(0..4) == Some(b"RES:")
        && is_valid_sha256(&s[4..])
}

#[inline]
fn is_run_shape(s: &str) -> bool {
    // "RUN:" + ts(20) + "-" + hex64
    if s.len() != 4 + 20 + 1 + HEX64_LEN {
        return false;
    }
    let b = s.as_bytes();
    if b.get(0..4) != Some(b"RUN:") {
        return false;
    }
    if !is_ts_utc_z(&s[4..24]) {
        return false;
    }
    if b[24] != b'-' {
        return false;
    }
    is_valid_sha256(&s[25..])
}

impl FromStr for CaseId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_ascii_no_nul(s) || s.len() > MAX_ID_LEN || !is_case_shape(s) {
            return Err(CoreError::InvalidId);
        }
        Ok(CaseId(s.to_owned()))
    }
}
impl CaseId {
    #[inline]
    pub fn as_hex(&self) -> &str {
        &self.0[5..]
    }
}

impl FromStr for ResultId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_ascii_no_nul(s) || s.len() > MAX_ID_LEN || !is_res_shape(s) {
            return Err(CoreError::InvalidId);
        }
        Ok(ResultId(s.to_owned()))
    }
}
impl ResultId {
    #[inline]
    pub fn as_hex(&self) -> &str {
        &self.0[4..]
    }
}

impl FromStr for RunId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_ascii_no_nul(s) || s.len() > MAX_ID_LEN || !is_run_shape(s) {
            return Err(CoreError::InvalidId);
        }
        Ok(RunId(s.to_owned()))
    }
}

impl RunId {
    /// Fast accessor to the embedded timestamp (RFC3339 UTC).
    #[inline]
    pub fn timestamp_utc(&self) -> &str {
        // "RUN:" + <ts 20> + "-" + hex64
        &self.0[4..24]
    }

    #[inline]
    pub fn as_hex(&self) -> &str {
        &self.0[25..]
    }
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;

    const HEX: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn sha256_digest() {
        assert!(is_valid_sha256(HEX));
        let dig: Sha256 = HEX.parse().unwrap();
        assert_eq!(dig.as_hex(), HEX);
        assert_eq!(format!("{dig}"), HEX);
        assert!("0123XYZ".parse::<Sha256>().is_err());
        assert!(HEX.to_uppercase().parse::<Sha256>().is_err());
    }

    #[test]
    fn timestamp_shape() {
        assert!(is_ts_utc_z("2026-08-12T14:00:00Z"));
        assert!(!is_ts_utc_z("2026-08-12T14:00:00+00:00"));
        assert!(!is_ts_utc_z("2026-08-12 14:00:00Z"));
        assert!(!is_ts_utc_z("2026-08-12T14:00:00"));
    }

    #[test]
    fn case_res_run() {
        let case_s = format!("CASE:{HEX}");
        let res_s = format!("RES:{HEX}");
        let run_s = format!("RUN:2026-08-12T14:00:00Z-{HEX}");

        let case: CaseId = case_s.parse().unwrap();
        let res: ResultId = res_s.parse().unwrap();
        let run: RunId = run_s.parse().unwrap();

        assert_eq!(case.as_hex(), HEX);
        assert_eq!(res.as_hex(), HEX);
        assert_eq!(run.timestamp_utc(), "2026-08-12T14:00:00Z");
        assert_eq!(run.as_hex(), HEX);

        // Round-trip
        assert_eq!(format!("{case}"), case_s);
        assert_eq!(format!("{res}"), res_s);
        assert_eq!(format!("{run}"), run_s);

        // Bad shapes
        assert!("RES:DEADBEAF".parse::<ResultId>().is_err());
        assert!(format!("CASE:{}", &HEX[..60]).parse::<CaseId>().is_err());
        assert!(format!("RUN:2026-08-12T14:00:00-{HEX}").parse::<RunId>().is_err());
        assert!(format!("RUN:2026-08-12 14:00:00Z-{HEX}").parse::<RunId>().is_err());
    }
}
