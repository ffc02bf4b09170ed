//! BUILD_RUN_RECORD: pin the run (engine, timestamp, input and output
//! digests) under its `RUN:` id.

use serde::Serialize;

use mirath_io::hasher;

use crate::{
    EngineMeta, LoadedInput, PipelineError, ResultDoc, RunInputs, RunOutputs, RunRecordDoc,
};

/// Idless body used for canonical hashing; stays in lock-step with
/// [`crate::RunRecordDoc`].
#[derive(Serialize)]
struct RunNoId<'a> {
    timestamp_utc: &'a str,
    engine: &'a EngineMeta,
    inputs: &'a RunInputs,
    params: &'a mirath_core::params::Params,
    outputs: &'a RunOutputs,
}

/// Assemble the run record. `timestamp_utc` must be `YYYY-MM-DDTHH:MM:SSZ`.
pub fn build_run_record(
    input: &LoadedInput,
    result: &ResultDoc,
    engine: EngineMeta,
    timestamp_utc: &str,
) -> Result<RunRecordDoc, PipelineError> {
    let inputs = RunInputs {
        case_id: input.case_id.clone(),
        case_sha256: input.case_id.as_hex().to_string(),
    };
    let outputs = RunOutputs {
        result_id: result.id.clone(),
        result_sha256: result.id.as_hex().to_string(),
    };

    let body = RunNoId {
        timestamp_utc,
        engine: &engine,
        inputs: &inputs,
        params: &input.case.params,
        outputs: &outputs,
    };
    let id = hasher::run_id_from_canonical(timestamp_utc, &body)?;

    Ok(RunRecordDoc {
        id,
        timestamp_utc: timestamp_utc.to_string(),
        engine,
        inputs,
        params: input.case.params,
        outputs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_result, engine_identifiers, run_distribution};
    use serde_json::json;

    const TS: &str = "2026-08-23T09:30:00Z";

    fn fixture() -> (LoadedInput, ResultDoc) {
        let input = LoadedInput::from_bytes(
            json!({
                "schema_version": "1",
                "deceased": "male",
                "net_estate": "100000",
                "heirs": { "wives": 1, "father": 1 }
            })
            .to_string()
            .into_bytes(),
        )
        .unwrap();
        let run =
            run_distribution(&input.case.heir_counts(), &input.case.params).unwrap();
        let result = build_result(&input, &run).unwrap();
        (input, result)
    }

    #[test]
    fn record_links_case_and_result_digests() {
        let (input, result) = fixture();
        let record = build_run_record(&input, &result, engine_identifiers(), TS).unwrap();

        assert_eq!(record.inputs.case_id, input.case_id);
        assert_eq!(record.inputs.case_sha256, input.case_id.as_hex());
        assert_eq!(record.outputs.result_id, result.id);
        assert_eq!(record.outputs.result_sha256, result.id.as_hex());
        assert_eq!(record.id.timestamp_utc(), TS);
        assert_eq!(record.timestamp_utc, TS);
    }

    #[test]
    fn same_timestamp_means_same_run_id() {
        let (input, result) = fixture();
        let a = build_run_record(&input, &result, engine_identifiers(), TS).unwrap();
        let b = build_run_record(&input, &result, engine_identifiers(), TS).unwrap();
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn different_timestamp_changes_the_run_id() {
        let (input, result) = fixture();
        let a = build_run_record(&input, &result, engine_identifiers(), TS).unwrap();
        let b = build_run_record(
            &input,
            &result,
            engine_identifiers(),
            "2026-08-23T09:30:01Z",
        )
        .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn malformed_timestamp_is_rejected() {
        let (input, result) = fixture();
        let err = build_run_record(
            &input,
            &result,
            engine_identifiers(),
            "2026-08-23 09:30:00",
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
    }
}
