//! Pure report data model + mapper from the pipeline artifacts.
//! No I/O, no recomputation of shares, no floats. Deterministic ordering only.

use serde::Serialize;

use mirath_core::frac::Frac;
use mirath_core::money::{round_display, Decimal};
use mirath_core::shares::{fixed_label, Outcome};
use mirath_pipeline::{EngineMeta, ResultDoc, RunRecordDoc};

use crate::ReportError;

/// Top-level report model, in render order.
#[derive(Clone, Debug, Serialize)]
pub struct ReportModel {
    pub cover: CoverBlock,
    pub estate: EstateBlock,
    pub table: Vec<ShareRow>,
    pub blocked: Vec<BlockedRow>,
    pub diagnostics: DiagnosticsBlock,
    pub integrity: IntegrityBlock,
}

#[derive(Clone, Debug, Serialize)]
pub struct CoverBlock {
    pub title: String,
    /// "Balanced" | "Awal" | "Radd" | "Unhandled residue"
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct EstateBlock {
    pub deceased: String,
    pub net_estate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// One granted line of the distribution table.
#[derive(Clone, Debug, Serialize)]
pub struct ShareRow {
    pub heir: String,
    pub count: u32,
    pub share_label: String,
    /// One decimal, computed from the exact fraction ("59.3%").
    pub percent: String,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub citation: String,
}

/// A present-but-excluded category.
#[derive(Clone, Debug, Serialize)]
pub struct BlockedRow {
    pub heir: String,
    pub count: u32,
    pub note: String,
    pub citation: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct DiagnosticsBlock {
    /// Sum of granted fractions before normalization, as a fraction label.
    pub pre_normalization_total: String,
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unallocated_amount: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct IntegrityBlock {
    pub engine: EngineMeta,
    pub case_id: String,
    pub result_id: String,
    pub run_id: String,
    pub timestamp_utc: String,
}

/// Build the report model from the typed artifacts (pure, offline).
pub fn build_model(
    result: &ResultDoc,
    run: &RunRecordDoc,
) -> Result<ReportModel, ReportError> {
    let dp = result.params.rounding_dp;
    let (outcome, reason) = outcome_label(&result.outcome);

    let cover = CoverBlock {
        title: "Estate Distribution Result".to_string(),
        outcome: outcome.clone(),
        reason: reason.clone(),
    };

    let estate = EstateBlock {
        deceased: result.deceased.as_token().to_string(),
        net_estate: amount_string(result.net_estate, dp),
        currency: result.currency.clone(),
    };

    let mut table = Vec::new();
    let mut blocked = Vec::new();
    for line in &result.shares {
        if line.blocked {
            blocked.push(BlockedRow {
                heir: line.class.label().to_string(),
                count: line.count,
                note: line.note.clone().unwrap_or_default(),
                citation: line.citation.text().to_string(),
            });
        } else {
            table.push(ShareRow {
                heir: line.class.label().to_string(),
                count: line.count,
                share_label: line.share_label.clone(),
                percent: percent_string(line.frac)?,
                amount: amount_string(line.amount, dp),
                note: line.note.clone(),
                citation: line.citation.text().to_string(),
            });
        }
    }

    let unallocated = if result.unallocated_amount == Decimal::ZERO {
        None
    } else {
        Some(amount_string(result.unallocated_amount, dp))
    };
    let diagnostics = DiagnosticsBlock {
        pre_normalization_total: fixed_label(result.pre_normalization_total),
        outcome,
        detail: reason,
        unallocated_amount: unallocated,
    };

    let integrity = IntegrityBlock {
        engine: run.engine.clone(),
        case_id: run.inputs.case_id.as_str().to_string(),
        result_id: run.outputs.result_id.as_str().to_string(),
        run_id: run.id.as_str().to_string(),
        timestamp_utc: run.timestamp_utc.clone(),
    };

    Ok(ReportModel { cover, estate, table, blocked, diagnostics, integrity })
}

fn outcome_label(outcome: &Outcome) -> (String, Option<String>) {
    match outcome {
        Outcome::Balanced => ("Balanced".to_string(), None),
        Outcome::Awal { factor } => (
            "Awal".to_string(),
            Some(format!(
                "fixed shares summed to {}; every share was scaled down proportionally",
                fixed_label(*factor)
            )),
        ),
        Outcome::Radd { surplus } => (
            "Radd".to_string(),
            Some(format!(
                "fixed shares left {} of the estate; returned to non-spouse heirs",
                fixed_label(*surplus)
            )),
        ),
        Outcome::UnhandledResidue { fraction } => (
            "Unhandled residue".to_string(),
            Some(format!(
                "{} of the estate has no recognized taker",
                fixed_label(*fraction)
            )),
        ),
    }
}

/// One-decimal percent string from the exact fraction, half-even.
fn percent_string(frac: Frac) -> Result<String, ReportError> {
    let tenths = frac
        .percent_tenths()
        .map_err(|e| ReportError::Arithmetic(e.to_string()))?;
    Ok(format!("{}.{}%", tenths / 10, tenths % 10))
}

/// Render an amount rounded half-even to `dp` places, zero-padded to `dp`.
fn amount_string(d: Decimal, dp: u8) -> String {
    let rounded = round_display(d, dp);
    format!("{:.*}", dp as usize, rounded)
}
