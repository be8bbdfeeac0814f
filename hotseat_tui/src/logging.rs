//! File logging.
//!
//! The terminal belongs to the TUI, so logs never go to stdout or stderr.
//! Without a configured file no subscriber is installed and every event is
//! dropped.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging to `path`, appending to it if it exists.
///
/// Log levels come from `RUST_LOG` and default to `info`. Records of the
/// `log` facade, which the rules engine uses, are forwarded as well.
///
/// # Errors
///
/// Returns error if the file can't be opened or a global subscriber is
/// already installed.
///
/// # Example
///
/// ```no_run
/// use hotseat_tui::logging;
///
/// logging::init(std::path::Path::new("hotseat.log")).unwrap();
/// tracing::info!("Client starting");
/// ```
pub fn init(path: &Path) -> anyhow::Result<()> {
    let file = open(path)?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(path = %path.display(), "Logging initialized");
    Ok(())
}

fn open(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
