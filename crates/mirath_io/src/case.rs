//! Case-file model and loader.
//!
//! The loader checks shape only (strict fields, schema version); domain
//! validation of counts and the estate lives in the pipeline stage.

use std::fs;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use mirath_core::heirs::{Gender, HeirCounts};
use mirath_core::money::Decimal;
use mirath_core::params::Params;

use crate::{IoError, IoResult};

/// Only supported case schema. Bump together with a loader migration.
pub const CASE_SCHEMA_VERSION: &str = "1";

/// Top-level case document as read from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseFile {
    pub schema_version: String,
    pub deceased: Gender,
    /// Accepts a JSON number or a decimal string; serialized as a string.
    pub net_estate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub heirs: HeirsSection,
    #[serde(default)]
    pub params: Params,
}

/// Survivor counts as written in the case file. Missing keys mean zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeirsSection {
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

impl CaseFile {
    /// Parse from raw bytes and enforce the schema version.
    pub fn from_slice(bytes: &[u8]) -> IoResult<Self> {
        let case: CaseFile = serde_json::from_slice(bytes)?;
        if case.schema_version != CASE_SCHEMA_VERSION {
            return Err(IoError::Invalid(format!(
                "unsupported schema_version {:?} (expected {:?})",
                case.schema_version, CASE_SCHEMA_VERSION
            )));
        }
        Ok(case)
    }

    /// Flatten into the engine's survivor-count struct.
    pub fn heir_counts(&self) -> HeirCounts {
        let h = &self.heirs;
        HeirCounts {
            gender: self.deceased,
            husband: h.husband,
            wives: h.wives,
            father: h.father,
            mother: h.mother,
            paternal_grandfather: h.paternal_grandfather,
            paternal_grandmother: h.paternal_grandmother,
            maternal_grandmother: h.maternal_grandmother,
            sons: h.sons,
            daughters: h.daughters,
            full_brothers: h.full_brothers,
            full_sisters: h.full_sisters,
            paternal_brothers: h.paternal_brothers,
            paternal_sisters: h.paternal_sisters,
            maternal_siblings: h.maternal_siblings,
        }
    }
}

/// A parsed case plus the exact bytes read, kept for `CASE:` hashing.
#[derive(Debug, Clone)]
pub struct LoadedCase {
    pub case: CaseFile,
    pub raw: Vec<u8>,
}

/// Read and parse one case file.
pub fn load_case_file(path: &Utf8Path) -> IoResult<LoadedCase> {
    let raw = fs::read(path.as_std_path()).map_err(|e| IoError::Path(format!("{path}: {e}")))?;
    let case = CaseFile::from_slice(&raw)?;
    Ok(LoadedCase { case, raw })
}
