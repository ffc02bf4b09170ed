//! mirath_report — pure offline report model + renderers (JSON/text).
//!
//! Determinism rules:
//! - No I/O here. Callers supply the typed artifacts already in memory.
//! - Percent strings use one-decimal formatting without float arithmetic.
//! - Stable section order and field names; renderers never recompute shares.

#![forbid(unsafe_code)]

pub mod render_json;
pub mod render_text;
pub mod structure;

pub use render_json::render_json;
pub use render_text::render_text;
pub use structure::{
    build_model, BlockedRow, CoverBlock, DiagnosticsBlock, EstateBlock, IntegrityBlock,
    ReportModel, ShareRow,
};

/// Errors while mapping artifacts into the report model or rendering it.
#[derive(Debug)]
pub enum ReportError {
    /// Share arithmetic (percent/rounding) failed.
    Arithmetic(String),
    /// A renderer could not produce output.
    Render(&'static str),
}

impl core::fmt::Display for ReportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReportError::Arithmetic(m) => write!(f, "report arithmetic: {m}"),
            ReportError::Render(what) => write!(f, "report render: {what}"),
        }
    }
}

impl std::error::Error for ReportError {}
