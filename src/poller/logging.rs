//! Log backend for the `log` macros.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use super::error::PollerError;

const DEFAULT_FILTER: &str = "info";

/// Route `log` records to stdout and `log_file`, filtered by `RUST_LOG`.
///
/// A logger installed earlier (tests, embedding binaries) is left in place.
pub fn init_logging(log_file: &Path) -> Result<(), PollerError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(PollerError::Logging)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(io::stdout.and(Mutex::new(file)))
        .try_init();
    if installed.is_err() {
        log::debug!("logger already installed, keeping it");
    }
    Ok(())
}
