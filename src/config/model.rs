use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use anyhow::Result;
use crate::constants::*;
use crate::core::DedupOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub deduplication: DeduplicationConfig,
    pub io: IoConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeduplicationConfig {
    pub keys: Vec<String>,
    pub timestamp_field: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    pub records_field: String,
    pub log_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbosity: String,
}

impl Default for DeduplicationConfig {
    fn default() -> Self {
        Self {
            keys: DEFAULT_DEDUP_KEYS.iter().map(|key| key.to_string()).collect(),
            timestamp_field: DEFAULT_TIMESTAMP_FIELD.to_string(),
        }
    }
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            records_field: DEFAULT_RECORDS_FIELD.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbosity: DEFAULT_VERBOSITY.to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let dedup = &self.deduplication;

        if dedup.keys.is_empty() {
            return Err(anyhow::anyhow!("At least one deduplication key is required"));
        }

        let mut seen = HashSet::new();
        for key in &dedup.keys {
            if key.trim().is_empty() {
                return Err(anyhow::anyhow!("Deduplication keys must not be empty"));
            }
            if !seen.insert(key.as_str()) {
                return Err(anyhow::anyhow!("Deduplication key '{}' is listed more than once", key));
            }
        }

        if dedup.timestamp_field.trim().is_empty() {
            return Err(anyhow::anyhow!("Timestamp field must not be empty"));
        }

        if self.io.records_field.trim().is_empty() {
            return Err(anyhow::anyhow!("Records field must not be empty"));
        }

        match self.logging.verbosity.as_str() {
            VERBOSITY_SILENT | VERBOSITY_NORMAL | VERBOSITY_VERBOSE => Ok(()),
            other => Err(anyhow::anyhow!(
                "Unknown verbosity '{}', expected one of {}, {}, {}",
                other, VERBOSITY_SILENT, VERBOSITY_NORMAL, VERBOSITY_VERBOSE
            )),
        }
    }

    pub fn dedup_options(&self) -> DedupOptions {
        DedupOptions {
            keys: self.deduplication.keys.clone(),
            timestamp_field: self.deduplication.timestamp_field.clone(),
        }
    }
}
