//! mirath_pipeline — deterministic pipeline surface
//! (load → validate → distribute → build result → build run record).
//!
//! This crate orchestrates; JSON shape and hashing are delegated to
//! `mirath_io`, rule math to `mirath_algo`. Everything here is pure given the
//! loaded bytes and a caller-supplied timestamp, so two runs over the same
//! case file produce byte-identical artifacts apart from the run timestamp.

#![forbid(unsafe_code)]

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mirath_core::errors::CoreError;
use mirath_core::frac::Frac;
use mirath_core::heirs::Gender;
use mirath_core::ids::{CaseId, ResultId, RunId};
use mirath_core::money::Decimal;
use mirath_core::params::Params;
use mirath_core::shares::{Outcome, ShareLine};
use mirath_io::IoError;

pub mod build_result;
pub mod build_run_record;
pub mod distribute;
pub mod load;
pub mod validate;

pub use build_result::build_result;
pub use build_run_record::build_run_record;
pub use distribute::{run_distribution, DistributionRun};
pub use load::{load_input, LoadedInput};
pub use validate::{validate_case, EntityRef, Severity, ValidationIssue, ValidationReport};

/// Engine identifiers echoed into every run record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMeta {
    pub vendor: String,
    pub name: String,
    pub version: String,
    pub build: String,
}

/// Identifiers for this build of the engine.
pub fn engine_identifiers() -> EngineMeta {
    EngineMeta {
        vendor: "mirath".to_string(),
        name: "mirath_engine".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        build: "dev".to_string(),
    }
}

/// Single error surface for the pipeline orchestration.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Filesystem, JSON, or hashing failures from `mirath_io`.
    #[error("io: {0}")]
    Io(#[from] IoError),

    /// Fatal validation report; the CLI maps this to its own exit code.
    #[error("validation failed: {0}")]
    Validate(String),

    /// Engine or artifact-assembly failures.
    #[error("build: {0}")]
    Build(String),
}

impl From<CoreError> for PipelineError {
    fn from(e: CoreError) -> Self {
        PipelineError::Build(e.to_string())
    }
}

// ------------------------- Result / RunRecord documents -------------------------
// Typed mirrors of the on-disk artifacts. Field names are the wire names; the
// `id` of each document is the digest of its own canonical body with the `id`
// field absent.

/// `result.json`: the full distribution outcome for one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDoc {
    /// "RES:<hex64>"
    pub id: ResultId,
    /// "CASE:<hex64>" over the raw case-file bytes.
    pub case_id: CaseId,
    pub deceased: Gender,
    pub net_estate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub params: Params,
    pub outcome: Outcome,
    /// Sum of granted fractions before Awal/Radd normalization.
    pub pre_normalization_total: Frac,
    /// Estate money never granted to any heir (zero unless the outcome is
    /// an unhandled residue).
    pub unallocated_amount: Decimal,
    /// Share table, sorted by amount descending (stable; blocked lines last).
    pub shares: Vec<ShareLine>,
}

/// Input digests echoed into the run record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInputs {
    pub case_id: CaseId,
    pub case_sha256: String,
}

/// Output digests echoed into the run record. `result_sha256` covers the
/// canonical result body without its `id` field, so it equals the hex of
/// `result_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutputs {
    pub result_id: ResultId,
    pub result_sha256: String,
}

/// `run_record.json`: who ran what, when, over which inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecordDoc {
    /// "RUN:<ts>-<hex64>"
    pub id: RunId,
    pub timestamp_utc: String,
    pub engine: EngineMeta,
    pub inputs: RunInputs,
    pub params: Params,
    pub outputs: RunOutputs,
}

/// Top-level pipeline outputs.
#[derive(Debug, Clone)]
pub struct PipelineOutputs {
    pub result: ResultDoc,
    pub run_record: RunRecordDoc,
}

/// Where `write_artifacts` placed the documents.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub result: Utf8PathBuf,
    pub run_record: Utf8PathBuf,
}

// -------------------------------- Public API --------------------------------

/// Run validate → distribute → build over an already-loaded case.
///
/// `timestamp_utc` must be a `YYYY-MM-DDTHH:MM:SSZ` UTC timestamp; it is the
/// only non-derived input to the run record.
pub fn run_case(
    input: &LoadedInput,
    engine: EngineMeta,
    timestamp_utc: &str,
) -> Result<PipelineOutputs, PipelineError> {
    let report = validate_case(&input.case);
    if report.is_fatal() {
        return Err(PipelineError::Validate(report.summary()));
    }

    let run = run_distribution(&input.case.heir_counts(), &input.case.params)?;
    let result = build_result(input, &run)?;
    let run_record = build_run_record(input, &result, engine, timestamp_utc)?;

    Ok(PipelineOutputs { result, run_record })
}

/// Convenience entry: load a case file from disk and run the pipeline with
/// this build's engine identifiers.
pub fn run_from_path(
    path: &Utf8Path,
    timestamp_utc: &str,
) -> Result<PipelineOutputs, PipelineError> {
    let input = load_input(path)?;
    run_case(&input, engine_identifiers(), timestamp_utc)
}

/// Write `result.json` and `run_record.json` (canonical bytes, atomic) into
/// `dir`, creating it if needed.
pub fn write_artifacts(
    outputs: &PipelineOutputs,
    dir: &Utf8Path,
) -> Result<ArtifactPaths, PipelineError> {
    fs::create_dir_all(dir.as_std_path()).map_err(IoError::from)?;

    let paths = ArtifactPaths {
        result: dir.join("result.json"),
        run_record: dir.join("run_record.json"),
    };

    let result_value = serde_json::to_value(&outputs.result).map_err(IoError::from)?;
    mirath_io::canonical_json::write_canonical_file(&paths.result, &result_value)?;

    let run_value = serde_json::to_value(&outputs.run_record).map_err(IoError::from)?;
    mirath_io::canonical_json::write_canonical_file(&paths.run_record, &run_value)?;

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_identifiers_are_stable() {
        let meta = engine_identifiers();
        assert_eq!(meta.vendor, "mirath");
        assert_eq!(meta.name, "mirath_engine");
        assert!(!meta.version.is_empty());
    }

    #[test]
    fn core_errors_surface_as_build_errors() {
        let err = PipelineError::from(CoreError::Overflow("frac add"));
        assert!(matches!(err, PipelineError::Build(_)));
        assert!(err.to_string().contains("overflow"));
    }
}
