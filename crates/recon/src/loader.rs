//! Delimited text -> [`Dataset`]. Pure parsing: no file IO, no schema
//! validation against external templates.

use std::collections::HashMap;

use crate::error::ReconError;
use crate::model::{Dataset, Record};

/// Field separator used wherever a config or caller names none.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Parse delimited text into a dataset, preserving header and row order.
///
/// The first line is the header; column names are whitespace-trimmed. Every
/// data row must match the header's column count. Empty input (no header
/// line) and duplicate column names are rejected; a header with zero data
/// rows is a valid, empty dataset.
pub fn load_dataset(input: &str, delimiter: u8) -> Result<Dataset, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(input.as_bytes());

    let header: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::MalformedInput {
            line: 1,
            detail: e.to_string(),
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if header.is_empty() {
        return Err(ReconError::MalformedInput {
            line: 1,
            detail: "empty input: missing header row".into(),
        });
    }

    for (i, name) in header.iter().enumerate() {
        if header[..i].iter().any(|seen| seen == name) {
            return Err(ReconError::MalformedInput {
                line: 1,
                detail: format!("duplicate column '{name}' in header"),
            });
        }
    }

    let mut dataset = Dataset::new(header);

    for result in reader.records() {
        let row = result.map_err(|e| ReconError::MalformedInput {
            line: position_line(e.position()),
            detail: e.to_string(),
        })?;

        if row.len() != dataset.header.len() {
            return Err(ReconError::MalformedInput {
                line: position_line(row.position()),
                detail: format!(
                    "expected {} columns, found {}",
                    dataset.header.len(),
                    row.len()
                ),
            });
        }

        let mut fields = HashMap::with_capacity(dataset.header.len());
        for (name, value) in dataset.header.iter().zip(row.iter()) {
            fields.insert(name.clone(), value.to_string());
        }
        dataset.records.push(Record { fields });
    }

    Ok(dataset)
}

fn position_line(position: Option<&csv::Position>) -> usize {
    position.map(|p| p.line() as usize).unwrap_or(0)
}
