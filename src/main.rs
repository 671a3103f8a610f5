use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use lead_sift::cli::Args;
use lead_sift::config::Config;
use lead_sift::constants::VERBOSITY_VERBOSE;
use lead_sift::core::deduplicate;
use lead_sift::utils;
use lead_sift::utils::io::{load_dataset, write_change_log, write_output};
use lead_sift::utils::system::format_duration;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let start_time = Instant::now();

    let mut config = Config::load_or_default(args.config.as_deref()).await?;
    args.apply_overrides(&mut config);
    config.validate()?;

    let verbosity = if args.verbose { VERBOSITY_VERBOSE } else { config.logging.verbosity.as_str() };
    utils::setup_logging(verbosity)?;

    info!("Starting lead deduplication");
    info!("Input file: {}", args.input_file.display());
    info!("Keys: {}", config.deduplication.keys.join(", "));

    let records = load_dataset(&args.input_file, &config.io.records_field)
        .context("Failed to load input records")?;
    info!("Loaded {} records", records.len());

    let outcome = deduplicate(records, &config.dedup_options())
        .with_context(|| format!("Deduplication of {} failed", args.input_file.display()))?;

    for pass in &outcome.passes {
        info!(
            "Pass '{}': {} -> {} records ({} overwritten, {} discarded)",
            pass.key, pass.input_records, pass.output_records, pass.overwrites, pass.discarded
        );
    }

    if args.embed_log {
        write_output(
            &args.output_file,
            &config.io.records_field,
            &outcome.records,
            Some(&outcome.change_log),
        )?;
        println!("Deduplicated data and change log saved to {}", args.output_file.display());
    } else {
        let log_path = Path::new(&config.io.log_file);
        // Log first: a failed log write must leave no output behind.
        write_change_log(log_path, &outcome.change_log)
            .with_context(|| format!("Failed to write change log {}", log_path.display()))?;
        write_output(&args.output_file, &config.io.records_field, &outcome.records, None)
            .with_context(|| format!("Failed to write output {}", args.output_file.display()))?;
        println!("Deduplicated data saved to {}", args.output_file.display());
        println!("Log saved to {}", log_path.display());
    }

    info!("Unique records: {}", outcome.records.len());
    info!("Duplicates removed: {}", outcome.duplicates_removed());
    info!("Change entries: {}", outcome.change_log.len());
    info!("Processing time: {}", format_duration(start_time.elapsed()));

    Ok(())
}
