use clap::Parser;
use std::path::PathBuf;
use crate::config::Config;
use crate::constants::KEY_LIST_SEPARATOR;

#[derive(Parser, Debug)]
#[command(name = "lead-sift")]
#[command(about = "Lead Sift - deduplicate JSON lead records, keeping the most recent entry")]
#[command(version)]
pub struct Args {
    #[arg(help = "Input JSON file holding the records array")]
    pub input_file: PathBuf,

    #[arg(help = "Output JSON file for the deduplicated records")]
    pub output_file: PathBuf,

    #[arg(short, long, help = "Change log file [default: deduplication_log.json]")]
    pub log: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_delimiter = KEY_LIST_SEPARATOR,
        help = "Key fields to deduplicate by, in pass order [default: email,_id]"
    )]
    pub keys: Option<Vec<String>>,

    #[arg(short, long, help = "Field compared to pick the most recent record [default: entryDate]")]
    pub timestamp_field: Option<String>,

    #[arg(long, help = "Field of the input document holding the records [default: leads]")]
    pub records_field: Option<String>,

    #[arg(short, long, help = "Configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Write the change log into the output file instead of a separate log file")]
    pub embed_log: bool,

    #[arg(short, long, help = "Verbose output")]
    pub verbose: bool,
}

impl Args {
    /// Command line values take precedence over the configuration file.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(keys) = &self.keys {
            config.deduplication.keys = keys.iter().map(|key| key.trim().to_string()).collect();
        }
        if let Some(field) = &self.timestamp_field {
            config.deduplication.timestamp_field = field.clone();
        }
        if let Some(field) = &self.records_field {
            config.io.records_field = field.clone();
        }
        if let Some(log) = &self.log {
            config.io.log_file = log.to_string_lossy().into_owned();
        }
    }
}
