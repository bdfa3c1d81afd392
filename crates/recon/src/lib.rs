//! `crosscheck-recon` — Multi-key fallback reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded datasets, returns matched and
//! unmatched partitions. No CLI or file IO dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod model;
pub mod writer;

pub use config::RunConfig;
pub use engine::{reconcile, run};
pub use error::ReconError;
pub use loader::{load_dataset, DEFAULT_DELIMITER};
pub use model::{Dataset, MatchKeySpec, ReconciliationResult, Record};
pub use writer::write_dataset;
