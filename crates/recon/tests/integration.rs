use std::path::PathBuf;

use crosscheck_recon::config::RunConfig;
use crosscheck_recon::engine::run;
use crosscheck_recon::error::ReconError;
use crosscheck_recon::loader::load_dataset;
use crosscheck_recon::model::{RunOutput, Side};
use crosscheck_recon::writer::write_dataset;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_and_run(config_toml: &str) -> RunOutput {
    let dir = fixtures_dir();
    let config = RunConfig::from_toml(config_toml).unwrap();

    let primary_text = std::fs::read_to_string(dir.join(&config.primary.file))
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", config.primary.file));
    let reference_text = std::fs::read_to_string(dir.join(&config.reference.file))
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", config.reference.file));

    let primary = load_dataset(&primary_text, config.primary.delimiter_byte()).unwrap();
    let reference = load_dataset(&reference_text, config.reference.delimiter_byte()).unwrap();

    run(&config, &primary, &reference).unwrap()
}

fn four_keys_toml() -> String {
    std::fs::read_to_string(fixtures_dir().join("four-keys.recon.toml")).unwrap()
}

// -------------------------------------------------------------------------
// Four-key insurance fixture
// -------------------------------------------------------------------------

#[test]
fn four_key_fixture_counts() {
    let output = load_and_run(&four_keys_toml());
    let result = &output.result;

    assert_eq!(result.summary.matched, 3);
    assert_eq!(result.summary.unmatched_primary, 1);
    assert_eq!(result.summary.unmatched_reference, 1);

    assert_eq!(
        result.unmatched_primary.records[0].get("TXT VEHICLE COVERNOTE"),
        Some("CN-999")
    );
    assert_eq!(
        result.unmatched_reference.records[0].get("Cover No"),
        Some("ZZ-3")
    );
}

#[test]
fn four_key_fixture_fallback_order() {
    let output = load_and_run(&four_keys_toml());
    let matched = &output.result.matched;

    // Row 1 matched on cover note, row 2 fell back to sticker, row 3 fell
    // back all the way to policy number.
    assert_eq!(matched.records[0].get("Policy No"), Some("POL-5001"));
    assert_eq!(matched.records[1].get("Policy No"), Some("POL-5002"));
    assert_eq!(matched.records[1].get("Sticker No"), Some("SK-2"));
    assert_eq!(matched.records[2].get("Status"), Some("lapsed"));
    assert_eq!(matched.records[2].get("Policy No"), Some("POL-9003"));
}

#[test]
fn four_key_fixture_merged_header() {
    let output = load_and_run(&four_keys_toml());
    assert_eq!(
        output.result.matched.header,
        vec![
            "TXT VEHICLE COVERNOTE",
            "TXT VEHICLESUBCLASS",
            "TXT REGISTRATION NO",
            "TXT Policy No Char",
            "Premium",
            "Cover No",
            "Sticker No",
            "Vehicle RegNo",
            "Policy No",
            "Status",
        ]
    );
    // Primary columns survive the merge untouched.
    assert_eq!(
        output.result.matched.records[0].get("TXT Policy No Char"),
        Some("POL-9001")
    );
}

#[test]
fn report_metadata() {
    let output = load_and_run(&four_keys_toml());
    let meta = &output.report.meta;

    assert_eq!(meta.config_name, "RI Monthly");
    assert_eq!(meta.engine_version, env!("CARGO_PKG_VERSION"));
    assert!(
        chrono::DateTime::parse_from_rfc3339(&meta.run_at).is_ok(),
        "run_at is not RFC 3339: {}",
        meta.run_at
    );
    assert_eq!(output.report.summary, output.result.summary);
}

#[test]
fn report_serializes_to_documented_shape() {
    let output = load_and_run(&four_keys_toml());
    let json: serde_json::Value =
        serde_json::to_value(&output.report).expect("report must serialize");

    assert_eq!(json["meta"]["config_name"], "RI Monthly");
    assert!(json["meta"]["engine_version"].is_string());
    assert!(json["meta"]["run_at"].is_string());
    assert_eq!(json["summary"]["matched"], 3);
    assert_eq!(json["summary"]["unmatched_primary"], 1);
    assert_eq!(json["summary"]["unmatched_reference"], 1);
}

#[test]
fn empty_reference_file_leaves_all_primary_unmatched() {
    let toml = r#"
name = "Empty Reference"

[primary]
file = "genesis.csv"

[reference]
file = "smart-empty.csv"

[[keys]]
primary = "TXT VEHICLE COVERNOTE"
reference = "Cover No"
"#;
    let output = load_and_run(toml);
    assert_eq!(output.result.summary.matched, 0);
    assert_eq!(output.result.summary.unmatched_primary, 4);
    assert_eq!(output.result.summary.unmatched_reference, 0);
}

#[test]
fn missing_key_column_fails_before_any_matching() {
    let dir = fixtures_dir();
    let toml = r#"
name = "Bad Keys"

[primary]
file = "genesis.csv"

[reference]
file = "smart-policy.csv"

[[keys]]
primary = "No Such Column"
reference = "Cover No"
"#;
    let config = RunConfig::from_toml(toml).unwrap();
    let primary_text = std::fs::read_to_string(dir.join(&config.primary.file)).unwrap();
    let reference_text = std::fs::read_to_string(dir.join(&config.reference.file)).unwrap();
    let primary = load_dataset(&primary_text, b',').unwrap();
    let reference = load_dataset(&reference_text, b',').unwrap();

    let err = run(&config, &primary, &reference).unwrap_err();
    match err {
        ReconError::MissingField { side, ref column } => {
            assert_eq!(side, Side::Primary);
            assert_eq!(column, "No Such Column");
        }
        other => panic!("expected MissingField, got {other:?}"),
    }
}

// -------------------------------------------------------------------------
// File round trip
// -------------------------------------------------------------------------

#[test]
fn matched_output_survives_file_round_trip() {
    let output = load_and_run(&four_keys_toml());
    let matched = &output.result.matched;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matched.csv");
    std::fs::write(&path, write_dataset(matched, b',').unwrap()).unwrap();

    let reloaded = load_dataset(&std::fs::read_to_string(&path).unwrap(), b',').unwrap();
    assert_eq!(&reloaded, matched);
}

// -------------------------------------------------------------------------
// Golden snapshot — lock the matched CSV layout
// -------------------------------------------------------------------------

/// Compare against a golden file. If it doesn't exist, create it and pass.
fn assert_golden(name: &str, actual: &str) {
    let path = fixtures_dir().join(format!("golden-{name}.csv"));
    if path.exists() {
        let expected = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("cannot read golden file {}: {e}", path.display()));
        assert_eq!(
            actual.trim(),
            expected.trim(),
            "golden CSV mismatch for '{}'. If the change is intentional, delete {} and re-run.",
            name,
            path.display()
        );
    } else {
        std::fs::write(&path, actual)
            .unwrap_or_else(|e| panic!("cannot write golden file {}: {e}", path.display()));
        eprintln!("created golden file: {}", path.display());
    }
}

#[test]
fn golden_four_keys_matched_csv() {
    let output = load_and_run(&four_keys_toml());
    let csv_text = write_dataset(&output.result.matched, b',').unwrap();
    assert_golden("four-keys-matched", &csv_text);
}
