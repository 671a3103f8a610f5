pub mod io;
pub mod system;

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};
use crate::constants::{LOG_TARGET_CRATE, VERBOSITY_NORMAL, VERBOSITY_SILENT, VERBOSITY_VERBOSE};

pub fn verbosity_level(verbosity: &str) -> Level {
    match verbosity {
        VERBOSITY_SILENT => Level::ERROR,
        VERBOSITY_NORMAL => Level::INFO,
        VERBOSITY_VERBOSE => Level::DEBUG,
        _ => Level::INFO,
    }
}

pub fn setup_logging(verbosity: &str) -> Result<()> {
    let level = verbosity_level(verbosity);

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("{}={}", LOG_TARGET_CRATE, level).parse()?);

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
