//! BUILD_RESULT: assemble the canonical result document and its `RES:` id.
//!
//! The id is the SHA-256 of the canonical body with the `id` field absent;
//! `ResultNoId` below must therefore stay field-for-field in lock-step with
//! [`crate::ResultDoc`].

use serde::Serialize;

use mirath_core::frac::Frac;
use mirath_core::heirs::Gender;
use mirath_core::ids::CaseId;
use mirath_core::money::{self, Decimal};
use mirath_core::params::Params;
use mirath_core::shares::{Outcome, ShareLine};
use mirath_io::hasher;

use crate::{DistributionRun, LoadedInput, PipelineError, ResultDoc};

/// Idless body used for canonical hashing.
#[derive(Serialize)]
struct ResultNoId {
    case_id: CaseId,
    deceased: Gender,
    net_estate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<String>,
    params: Params,
    outcome: Outcome,
    pre_normalization_total: Frac,
    unallocated_amount: Decimal,
    shares: Vec<ShareLine>,
}

/// Derive money lines, order them, and seal the document under its digest.
pub fn build_result(
    input: &LoadedInput,
    run: &DistributionRun,
) -> Result<ResultDoc, PipelineError> {
    let estate = input.case.net_estate;

    let mut shares: Vec<ShareLine> = run
        .entitlements
        .iter()
        .map(|e| ShareLine::from_entitlement(e, estate))
        .collect::<Result<_, _>>()?;
    // Stable sort: equal amounts (and all blocked zero lines) keep stage order.
    shares.sort_by(|a, b| b.amount.cmp(&a.amount));

    let unallocated = money::amount_of(estate, run.outcome.unallocated())?;

    let body = ResultNoId {
        case_id: input.case_id.clone(),
        deceased: input.case.deceased,
        net_estate: estate,
        currency: input.case.currency.clone(),
        params: input.case.params,
        outcome: run.outcome,
        pre_normalization_total: run.pre_normalization_total,
        unallocated_amount: unallocated,
        shares,
    };
    let id = hasher::res_id_from_canonical(&body)?;

    Ok(ResultDoc {
        id,
        case_id: body.case_id,
        deceased: body.deceased,
        net_estate: body.net_estate,
        currency: body.currency,
        params: body.params,
        outcome: body.outcome,
        pre_normalization_total: body.pre_normalization_total,
        unallocated_amount: body.unallocated_amount,
        shares: body.shares,
    })
}
