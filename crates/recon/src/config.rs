use serde::Deserialize;

use crate::error::ReconError;
use crate::loader::DEFAULT_DELIMITER;
use crate::model::{KeyPair, MatchKeySpec};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RunConfig {
    pub name: String,
    pub primary: InputConfig,
    pub reference: InputConfig,
    pub keys: Vec<KeyPair>,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub file: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

fn default_delimiter() -> String {
    (DEFAULT_DELIMITER as char).to_string()
}

impl InputConfig {
    /// The delimiter as a single byte. Valid after [`RunConfig::validate`].
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter
            .as_bytes()
            .first()
            .copied()
            .unwrap_or(DEFAULT_DELIMITER)
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Optional file destinations. A dataset path is only written when that
/// dataset has rows; the report path is written on every successful run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub matched: Option<String>,
    #[serde(default)]
    pub unmatched_primary: Option<String>,
    #[serde(default)]
    pub unmatched_reference: Option<String>,
    #[serde(default)]
    pub report: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl RunConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: RunConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.name.trim().is_empty() {
            return Err(ReconError::ConfigValidation("name must not be empty".into()));
        }

        // At least one key pair; the engine treats an empty spec as
        // nothing-matches, which is never what a run config means.
        if self.keys.is_empty() {
            return Err(ReconError::ConfigValidation(
                "at least one [[keys]] entry is required".into(),
            ));
        }

        for (i, pair) in self.keys.iter().enumerate() {
            if pair.primary.trim().is_empty() || pair.reference.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "keys[{i}]: primary and reference column names must not be empty"
                )));
            }
        }

        for (label, input) in [("primary", &self.primary), ("reference", &self.reference)] {
            if input.file.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "{label}: file must not be empty"
                )));
            }
            if input.delimiter.len() != 1 {
                return Err(ReconError::ConfigValidation(format!(
                    "{label}: delimiter must be a single byte, got {:?}",
                    input.delimiter
                )));
            }
        }

        Ok(())
    }

    /// The ordered key pairs as a match spec for the engine.
    pub fn match_keys(&self) -> MatchKeySpec {
        MatchKeySpec::new(self.keys.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
