//! End-to-end pipeline scenarios: classic textbook cases through
//! load → validate → distribute → build, plus artifact round-trips.

use camino::Utf8PathBuf;
use rust_decimal_macros::dec;
use serde_json::json;

use mirath_core::frac::{Frac, ONE, ZERO};
use mirath_core::heirs::HeirClass;
use mirath_core::money::{round_display, Decimal};
use mirath_core::shares::{Outcome, ShareLine, NOTE_ASABA_SELF, NOTE_FIXED_PLUS_RADD};
use mirath_pipeline::{
    engine_identifiers, run_case, run_from_path, write_artifacts, LoadedInput, PipelineError,
    PipelineOutputs, ResultDoc, RunRecordDoc,
};

const TS: &str = "2026-08-23T12:00:00Z";

fn run(value: serde_json::Value) -> PipelineOutputs {
    let input = LoadedInput::from_bytes(value.to_string().into_bytes()).unwrap();
    run_case(&input, engine_identifiers(), TS).unwrap()
}

fn line(doc: &ResultDoc, class: HeirClass) -> &ShareLine {
    doc.shares
        .iter()
        .find(|l| l.class == class)
        .unwrap_or_else(|| panic!("no line for {class:?}"))
}

fn frac(n: i128, d: i128) -> Frac {
    Frac::new(n, d).unwrap()
}

#[test]
fn wife_and_father_without_descendants() {
    let out = run(json!({
        "schema_version": "1",
        "deceased": "male",
        "net_estate": "100000",
        "heirs": { "wives": 1, "father": 1 }
    }));
    let doc = &out.result;

    let wife = line(doc, HeirClass::Wives);
    assert_eq!(wife.share_label, "1/4");
    assert_eq!(wife.amount, dec!(25000));

    // No descendant: the father takes the residue only, no fixed 1/6.
    let father = line(doc, HeirClass::Father);
    assert_eq!(father.share_label, "Residue");
    assert_eq!(father.frac, frac(3, 4));
    assert_eq!(father.amount, dec!(75000));
    assert_eq!(father.note.as_deref(), Some(NOTE_ASABA_SELF));

    assert_eq!(doc.outcome, Outcome::Balanced);
    assert_eq!(doc.pre_normalization_total, ONE);
    assert_eq!(doc.unallocated_amount, Decimal::ZERO);
}

#[test]
fn two_sons_and_a_daughter_split_two_to_one() {
    let out = run(json!({
        "schema_version": "1",
        "deceased": "male",
        "net_estate": "120000",
        "heirs": { "sons": 2, "daughters": 1 }
    }));
    let doc = &out.result;

    let sons = line(doc, HeirClass::Sons);
    assert_eq!(sons.count, 2);
    assert_eq!(sons.share_label, "Residue (2:1)");
    assert_eq!(sons.frac, frac(4, 5));
    assert_eq!(sons.amount, dec!(96000));
    // 48,000 per son.
    assert_eq!(sons.amount / Decimal::from(2u32), dec!(48000));

    let daughters = line(doc, HeirClass::Daughters);
    assert_eq!(daughters.frac, frac(1, 5));
    assert_eq!(daughters.amount, dec!(24000));

    assert_eq!(doc.outcome, Outcome::Balanced);
}

#[test]
fn awal_rescales_the_nine_eighths_table() {
    let out = run(json!({
        "schema_version": "1",
        "deceased": "male",
        "net_estate": "100000",
        "heirs": { "wives": 1, "daughters": 2, "mother": 1, "father": 1 }
    }));
    let doc = &out.result;

    assert_eq!(doc.outcome, Outcome::Awal { factor: frac(9, 8) });
    assert_eq!(doc.pre_normalization_total, frac(9, 8));

    assert_eq!(line(doc, HeirClass::Wives).frac, frac(1, 9));
    assert_eq!(line(doc, HeirClass::Daughters).frac, frac(16, 27));
    assert_eq!(line(doc, HeirClass::Mother).frac, frac(4, 27));
    assert_eq!(line(doc, HeirClass::Father).frac, frac(4, 27));

    assert_eq!(round_display(line(doc, HeirClass::Wives).amount, 2), dec!(11111.11));
    assert_eq!(round_display(line(doc, HeirClass::Daughters).amount, 2), dec!(59259.26));
    assert_eq!(round_display(line(doc, HeirClass::Mother).amount, 2), dec!(14814.81));

    for l in doc.shares.iter().filter(|l| !l.blocked) {
        assert!(l.note.as_deref().unwrap_or("").contains("Awal"));
    }

    // Fractions still sum to exactly one after the rescale.
    let total = doc
        .shares
        .iter()
        .filter(|l| !l.blocked)
        .try_fold(ZERO, |acc, l| acc.checked_add(l.frac))
        .unwrap();
    assert_eq!(total, ONE);
}

#[test]
fn radd_returns_everything_to_a_lone_mother() {
    let out = run(json!({
        "schema_version": "1",
        "deceased": "male",
        "net_estate": "90000",
        "heirs": { "mother": 1 }
    }));
    let doc = &out.result;

    assert_eq!(doc.outcome, Outcome::Radd { surplus: frac(2, 3) });

    let mother = line(doc, HeirClass::Mother);
    assert_eq!(mother.frac, ONE);
    assert_eq!(mother.amount, dec!(90000));
    assert_eq!(mother.note.as_deref(), Some(NOTE_FIXED_PLUS_RADD));
}

#[test]
fn sons_block_full_brothers_but_the_line_stays_visible() {
    let out = run(json!({
        "schema_version": "1",
        "deceased": "male",
        "net_estate": "60000",
        "heirs": { "sons": 1, "full_brothers": 2 }
    }));
    let doc = &out.result;

    let brothers = line(doc, HeirClass::FullBrothers);
    assert!(brothers.blocked);
    assert_eq!(brothers.count, 2);
    assert_eq!(brothers.amount, Decimal::ZERO);
    assert!(brothers.frac.is_zero());

    let granted_total = doc
        .shares
        .iter()
        .filter(|l| !l.blocked)
        .try_fold(ZERO, |acc, l| acc.checked_add(l.frac))
        .unwrap();
    assert_eq!(granted_total, ONE);
    assert_eq!(line(doc, HeirClass::Sons).amount, dec!(60000));
}

#[test]
fn lone_spouse_leaves_an_unhandled_residue() {
    let out = run(json!({
        "schema_version": "1",
        "deceased": "female",
        "net_estate": "80000",
        "heirs": { "husband": 1 }
    }));
    let doc = &out.result;

    assert_eq!(doc.outcome, Outcome::UnhandledResidue { fraction: frac(1, 2) });
    assert_eq!(doc.unallocated_amount, dec!(40000));
    assert_eq!(line(doc, HeirClass::Husband).amount, dec!(40000));
}

#[test]
fn fatal_validation_stops_the_pipeline() {
    let input = LoadedInput::from_bytes(
        json!({
            "schema_version": "1",
            "deceased": "male",
            "net_estate": "1000",
            "heirs": { "wives": 5 }
        })
        .to_string()
        .into_bytes(),
    )
    .unwrap();
    let err = run_case(&input, engine_identifiers(), TS).unwrap_err();
    assert!(matches!(err, PipelineError::Validate(_)));
    assert!(err.to_string().contains("wives"));
}

#[test]
fn identical_inputs_produce_identical_outputs() {
    let case = json!({
        "schema_version": "1",
        "deceased": "female",
        "net_estate": "100000",
        "heirs": { "husband": 1, "mother": 1, "full_sisters": 2 }
    });
    let a = run(case.clone());
    let b = run(case);
    assert_eq!(a.result, b.result);
    assert_eq!(a.run_record, b.run_record);
}

#[test]
fn artifacts_round_trip_through_canonical_files() {
    let dir = tempfile::tempdir().unwrap();
    let case_path = dir.path().join("case.json");
    std::fs::write(
        &case_path,
        json!({
            "schema_version": "1",
            "deceased": "male",
            "net_estate": "100000",
            "heirs": { "wives": 1, "sons": 1, "daughters": 1 }
        })
        .to_string(),
    )
    .unwrap();
    let case_utf8 = Utf8PathBuf::from_path_buf(case_path).unwrap();

    let outputs = run_from_path(&case_utf8, TS).unwrap();

    let out_dir = Utf8PathBuf::from_path_buf(dir.path().join("out")).unwrap();
    let paths = write_artifacts(&outputs, &out_dir).unwrap();

    let result_bytes = std::fs::read(paths.result.as_std_path()).unwrap();
    let expected = mirath_io::canonical_json::to_canonical_bytes(
        &serde_json::to_value(&outputs.result).unwrap(),
    )
    .unwrap();
    assert_eq!(result_bytes, expected);

    let parsed: ResultDoc = serde_json::from_slice(&result_bytes).unwrap();
    assert_eq!(parsed, outputs.result);

    let record_bytes = std::fs::read(paths.run_record.as_std_path()).unwrap();
    let record: RunRecordDoc = serde_json::from_slice(&record_bytes).unwrap();
    assert_eq!(record, outputs.run_record);
    assert_eq!(record.outputs.result_id, outputs.result.id);
    assert_eq!(record.inputs.case_id, outputs.result.case_id);
}

#[test]
fn muqasama_policy_changes_only_the_sibling_facts() {
    let consensus = run(json!({
        "schema_version": "1",
        "deceased": "male",
        "net_estate": "100000",
        "heirs": { "paternal_grandfather": 1, "full_brothers": 1 }
    }));
    // Default policy: the grandfather blocks the brothers like a father would.
    assert!(line(&consensus.result, HeirClass::FullBrothers).blocked);
    assert_eq!(
        line(&consensus.result, HeirClass::PaternalGrandfather).frac,
        ONE
    );

    let muqasama = run(json!({
        "schema_version": "1",
        "deceased": "male",
        "net_estate": "100000",
        "heirs": { "paternal_grandfather": 1, "full_brothers": 1 },
        "params": { "blocking_policy": "shafii_muqasama" }
    }));
    // Brothers stay eligible but the grandfather still outranks them in the
    // residuary chain, so they simply drop out of the table: no blocked line,
    // no granted line.
    assert!(muqasama
        .result
        .shares
        .iter()
        .all(|l| l.class != HeirClass::FullBrothers));
    assert_eq!(
        line(&muqasama.result, HeirClass::PaternalGrandfather).frac,
        ONE
    );
}
