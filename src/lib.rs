// Deduplication core: single-key reducer and multi-key pipeline
pub mod core;

// Command line arguments for the lead-sift binary
pub mod cli;

// Configuration file model and loading
pub mod config;

pub mod constants;
pub mod error;
pub mod utils;

// Re-export main types for convenience
pub use crate::config::Config;
pub use crate::core::{
    deduplicate, deduplicate_by_key, ChangeEntry, ChangeLog, Dataset, DedupOptions, DedupOutcome,
    FieldDelta, PassStats, Record,
};
pub use crate::error::{DedupError, LoadError};
