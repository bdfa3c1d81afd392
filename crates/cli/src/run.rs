//! `xcheck run` / `xcheck validate` — config-driven reconciliation.

use std::path::{Path, PathBuf};

use crosscheck_recon::config::{InputConfig, RunConfig};
use crosscheck_recon::error::ReconError;
use crosscheck_recon::model::{Dataset, RunOutput, Side};
use crosscheck_recon::{load_dataset, write_dataset, DEFAULT_DELIMITER};

use crate::exit_codes::{
    EXIT_RECON_INVALID_CONFIG, EXIT_RECON_MALFORMED, EXIT_RECON_MISSING_KEY, EXIT_RECON_RUNTIME,
    EXIT_RECON_UNMATCHED,
};
use crate::ingest::read_file_as_utf8;
use crate::CliError;

fn recon_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError {
        code,
        message: msg.into(),
        hint: None,
    }
}

pub fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| recon_err(EXIT_RECON_RUNTIME, format!("cannot read config: {e}")))?;

    let config = RunConfig::from_toml(&config_str)
        .map_err(|e| recon_err(EXIT_RECON_INVALID_CONFIG, e.to_string()))?;

    // Resolve dataset and output paths relative to the config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let primary = load_input(base_dir, &config.primary)?;
    let reference = load_input(base_dir, &config.reference)?;

    let output = crosscheck_recon::run(&config, &primary, &reference).map_err(|e| match &e {
        ReconError::MissingField { side, .. } => {
            let header = match side {
                Side::Primary => &primary.header,
                Side::Reference => &reference.header,
            };
            CliError {
                code: EXIT_RECON_MISSING_KEY,
                message: e.to_string(),
                hint: Some(format!("available {side} columns: {}", header.join(", "))),
            }
        }
        _ => recon_err(EXIT_RECON_RUNTIME, e.to_string()),
    })?;

    write_outputs(base_dir, &config, &output)?;

    let json_str = serde_json::to_string_pretty(&output.report)
        .map_err(|e| recon_err(EXIT_RECON_RUNTIME, format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| recon_err(EXIT_RECON_RUNTIME, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &output.result.summary;
    eprintln!(
        "recon '{}': {} matched, {} unmatched primary, {} unmatched reference",
        config.name, s.matched, s.unmatched_primary, s.unmatched_reference,
    );

    if s.unmatched_primary > 0 || s.unmatched_reference > 0 {
        return Err(recon_err(EXIT_RECON_UNMATCHED, "unmatched records found"));
    }

    Ok(())
}

fn load_input(base_dir: &Path, input: &InputConfig) -> Result<Dataset, CliError> {
    let path = base_dir.join(&input.file);
    let text = read_file_as_utf8(&path).map_err(|e| {
        recon_err(
            EXIT_RECON_RUNTIME,
            format!("cannot read {}: {e}", path.display()),
        )
    })?;
    load_dataset(&text, input.delimiter_byte())
        .map_err(|e| recon_err(EXIT_RECON_MALFORMED, format!("{}: {e}", path.display())))
}

/// Write configured outputs. Dataset files are only written when the dataset
/// has rows; the report file is written on every successful run.
fn write_outputs(base_dir: &Path, config: &RunConfig, output: &RunOutput) -> Result<(), CliError> {
    let datasets = [
        (&config.output.matched, &output.result.matched),
        (
            &config.output.unmatched_primary,
            &output.result.unmatched_primary,
        ),
        (
            &config.output.unmatched_reference,
            &output.result.unmatched_reference,
        ),
    ];

    for (target, dataset) in datasets {
        if let Some(target) = target {
            if dataset.is_empty() {
                continue;
            }
            let path = base_dir.join(target);
            let text = write_dataset(dataset, DEFAULT_DELIMITER)
                .map_err(|e| recon_err(EXIT_RECON_RUNTIME, e.to_string()))?;
            std::fs::write(&path, text).map_err(|e| {
                recon_err(
                    EXIT_RECON_RUNTIME,
                    format!("cannot write {}: {e}", path.display()),
                )
            })?;
            eprintln!("wrote {}", path.display());
        }
    }

    if let Some(ref target) = config.output.report {
        let path = base_dir.join(target);
        let json_str = serde_json::to_string_pretty(&output.report)
            .map_err(|e| recon_err(EXIT_RECON_RUNTIME, format!("JSON serialization error: {e}")))?;
        std::fs::write(&path, json_str).map_err(|e| {
            recon_err(
                EXIT_RECON_RUNTIME,
                format!("cannot write {}: {e}", path.display()),
            )
        })?;
        eprintln!("wrote {}", path.display());
    }

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| recon_err(EXIT_RECON_RUNTIME, format!("cannot read config: {e}")))?;

    match RunConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!(
                "valid: recon '{}' with {} key pair(s)",
                config.name,
                config.keys.len(),
            );
            Ok(())
        }
        Err(e) => Err(recon_err(EXIT_RECON_INVALID_CONFIG, e.to_string())),
    }
}
