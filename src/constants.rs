pub const DEFAULT_DEDUP_KEYS: &[&str] = &["email", "_id"];
pub const DEFAULT_TIMESTAMP_FIELD: &str = "entryDate";
pub const DEFAULT_RECORDS_FIELD: &str = "leads";
pub const DEFAULT_LOG_FILE: &str = "deduplication_log.json";
pub const EMBEDDED_LOG_FIELD: &str = "change_log";

pub const DEFAULT_VERBOSITY: &str = "normal";
pub const VERBOSITY_SILENT: &str = "silent";
pub const VERBOSITY_NORMAL: &str = "normal";
pub const VERBOSITY_VERBOSE: &str = "verbose";
pub const LOG_TARGET_CRATE: &str = "lead_sift";

pub const JSON_INDENT: &[u8] = b"    ";
pub const KEY_LIST_SEPARATOR: char = ',';
pub const MAX_EXACT_F64_INTEGER: f64 = 9_007_199_254_740_992.0;

pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 3600;
pub const MILLIS_PER_SECOND: u128 = 1000;
