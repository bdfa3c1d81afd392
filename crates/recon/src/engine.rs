//! Multi-key fallback reconciliation.
//!
//! The engine joins two datasets with a first-match policy: for each primary
//! record, reference rows are scanned in dataset order and the first row
//! satisfying any key pair is taken, even when a later row would satisfy an
//! earlier-listed pair. Key pair order matters only within a single row.

use chrono::Utc;

use crate::config::RunConfig;
use crate::error::ReconError;
use crate::model::{
    Dataset, MatchKeySpec, ReconciliationResult, Record, RunMeta, RunOutput, RunReport,
    RunSummary, Side,
};

/// Reconcile `primary` against `reference` under `spec`.
///
/// Every column named by `spec` must exist on its side, checked before any
/// matching starts. Reference rows are never exclusively consumed: one row
/// may satisfy several primary records, and a row is reported unmatched only
/// if no value-identical row was ever matched.
pub fn reconcile(
    primary: &Dataset,
    reference: &Dataset,
    spec: &MatchKeySpec,
) -> Result<ReconciliationResult, ReconError> {
    for pair in &spec.pairs {
        if !primary.has_column(&pair.primary) {
            return Err(ReconError::MissingField {
                side: Side::Primary,
                column: pair.primary.clone(),
            });
        }
        if !reference.has_column(&pair.reference) {
            return Err(ReconError::MissingField {
                side: Side::Reference,
                column: pair.reference.clone(),
            });
        }
    }

    let mut matched = Dataset::new(merged_header(&primary.header, &reference.header));
    let mut unmatched_primary = Dataset::new(primary.header.clone());
    let mut unmatched_reference = Dataset::new(reference.header.clone());

    let mut consumed = vec![false; reference.records.len()];

    for record in &primary.records {
        match find_match(record, reference, spec) {
            Some(idx) => {
                consumed[idx] = true;
                matched
                    .records
                    .push(merge_records(record, &reference.records[idx]));
            }
            None => unmatched_primary.records.push(record.clone()),
        }
    }

    let consumed_rows: Vec<&Record> = reference
        .records
        .iter()
        .zip(&consumed)
        .filter(|(_, taken)| **taken)
        .map(|(record, _)| record)
        .collect();

    for record in &reference.records {
        if !consumed_rows.iter().any(|taken| *taken == record) {
            unmatched_reference.records.push(record.clone());
        }
    }

    let summary = RunSummary {
        matched: matched.len(),
        unmatched_primary: unmatched_primary.len(),
        unmatched_reference: unmatched_reference.len(),
    };

    Ok(ReconciliationResult {
        matched,
        unmatched_primary,
        unmatched_reference,
        summary,
    })
}

/// Reconcile under a full run configuration and wrap the result in a report
/// envelope with run metadata.
pub fn run(
    config: &RunConfig,
    primary: &Dataset,
    reference: &Dataset,
) -> Result<RunOutput, ReconError> {
    let spec = config.match_keys();
    let result = reconcile(primary, reference, &spec)?;
    let report = RunReport {
        meta: RunMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: Utc::now().to_rfc3339(),
        },
        summary: result.summary,
    };
    Ok(RunOutput { result, report })
}

/// Primary columns first, then reference-only columns in reference order.
fn merged_header(primary: &[String], reference: &[String]) -> Vec<String> {
    let mut header = primary.to_vec();
    for column in reference {
        if !header.contains(column) {
            header.push(column.clone());
        }
    }
    header
}

fn find_match(record: &Record, reference: &Dataset, spec: &MatchKeySpec) -> Option<usize> {
    for (idx, candidate) in reference.records.iter().enumerate() {
        for pair in &spec.pairs {
            if record.get(&pair.primary).unwrap_or("")
                == candidate.get(&pair.reference).unwrap_or("")
            {
                return Some(idx);
            }
        }
    }
    None
}

/// Merge a matched pair into one record. Reference values overwrite primary
/// values on shared column names.
fn merge_records(primary: &Record, reference: &Record) -> Record {
    let mut fields = primary.fields.clone();
    for (column, value) in &reference.fields {
        fields.insert(column.clone(), value.clone());
    }
    Record { fields }
}
