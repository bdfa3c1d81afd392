//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: pipeline scripts branch on them.
//!
//! # Exit Codes
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! | 0    | Success (for `run`: everything reconciled)     |
//! | 1    | General error (reserved, avoid)                |
//! | 2    | CLI usage error (bad args, unknown flag)       |
//! | 3    | Run completed with unmatched records           |
//! | 4    | Invalid config (TOML parse or validation)      |
//! | 5    | Malformed input dataset                        |
//! | 6    | Configured key column missing from a dataset   |
//! | 7    | Runtime error (unreadable file, bad output)    |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant below
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

/// Success. For `run`, no unmatched records on either side.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error: bad arguments, unknown subcommand or flag.
pub const EXIT_USAGE: u8 = 2;

/// Run completed but left unmatched primary or reference records.
pub const EXIT_RECON_UNMATCHED: u8 = 3;

/// Config rejected: TOML parse error or failed validation.
pub const EXIT_RECON_INVALID_CONFIG: u8 = 4;

/// A dataset could not be parsed (column count mismatch, empty input).
pub const EXIT_RECON_MALFORMED: u8 = 5;

/// A configured key column is absent from its dataset.
pub const EXIT_RECON_MISSING_KEY: u8 = 6;

/// Runtime failure: unreadable input, unwritable output, serialization.
pub const EXIT_RECON_RUNTIME: u8 = 7;
