pub mod record;
pub mod deduplication;

pub use deduplication::{deduplicate, deduplicate_by_key, log_changes, DedupOptions, DedupOutcome, PassStats};
pub use record::{ChangeEntry, ChangeLog, Dataset, FieldDelta, Record};
