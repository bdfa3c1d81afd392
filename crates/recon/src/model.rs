use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Records + datasets
// ---------------------------------------------------------------------------

/// One row of a delimited input, keyed by trimmed header column name.
///
/// Column order lives on the owning [`Dataset`]; two records are equal when
/// their full field maps are equal, which is what the unmatched-reference
/// bookkeeping relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub fields: HashMap<String, String>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// An ordered sequence of records plus the header that defines column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub header: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.header.iter().any(|h| h == name)
    }
}

/// Which input ledger a record or column came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Primary,
    Reference,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Reference => write!(f, "reference"),
        }
    }
}

// ---------------------------------------------------------------------------
// Match keys
// ---------------------------------------------------------------------------

/// One fallback equality test: `primary[primary] == reference[reference]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    pub primary: String,
    pub reference: String,
}

/// Ordered fallback key pairs; earlier entries take priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchKeySpec {
    pub pairs: Vec<KeyPair>,
}

impl MatchKeySpec {
    pub fn new(pairs: Vec<KeyPair>) -> Self {
        Self { pairs }
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Output of one reconciliation run: three datasets plus their counts.
///
/// `matched` carries the merged header (primary columns first, then the
/// reference-only columns); the unmatched datasets round-trip their source
/// headers untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationResult {
    pub matched: Dataset,
    pub unmatched_primary: Dataset,
    pub unmatched_reference: Dataset,
    pub summary: RunSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub matched: usize,
    pub unmatched_primary: usize,
    pub unmatched_reference: usize,
}

// ---------------------------------------------------------------------------
// Report envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

/// Serializable envelope the CLI emits as the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub meta: RunMeta,
    pub summary: RunSummary,
}

/// A config-driven run: the full result plus its report envelope.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub result: ReconciliationResult,
    pub report: RunReport,
}
