//! LOAD: read the case file and pin its identity.
//!
//! The `CASE:` id is taken over the raw file bytes, not the re-serialized
//! model, so editing whitespace in the file changes the case identity. That
//! is intentional: the id certifies the document that was actually read.

use camino::Utf8Path;

use mirath_core::ids::CaseId;
use mirath_io::case::{load_case_file, CaseFile};
use mirath_io::hasher::case_id_from_bytes;

use crate::PipelineError;

/// A case ready for the rest of the pipeline.
#[derive(Debug, Clone)]
pub struct LoadedInput {
    pub case: CaseFile,
    pub raw: Vec<u8>,
    pub case_id: CaseId,
}

impl LoadedInput {
    /// Build from in-memory bytes (tests, stdin-style callers).
    pub fn from_bytes(raw: Vec<u8>) -> Result<Self, PipelineError> {
        let case = CaseFile::from_slice(&raw)?;
        let case_id = case_id_from_bytes(&raw)?;
        Ok(LoadedInput { case, raw, case_id })
    }
}

/// Load one case file and compute its `CASE:` id.
pub fn load_input(path: &Utf8Path) -> Result<LoadedInput, PipelineError> {
    let loaded = load_case_file(path)?;
    let case_id = case_id_from_bytes(&loaded.raw)?;
    Ok(LoadedInput { case: loaded.case, raw: loaded.raw, case_id })
}
