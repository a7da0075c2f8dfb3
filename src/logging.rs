//! Logging module for SimpleClock
//! Sends tracing output to a log file, since the GUI build has no console

use std::env;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::Result;

pub const LOG_FILE_NAME: &str = "simple-clock.log";

/// Pick the filter directive: `RUST_LOG` wins over the stored setting
pub fn filter_spec(env_spec: Option<String>, setting: &str) -> String {
    env_spec
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| setting.to_string())
}

/// Install the global subscriber writing to `dir/simple-clock.log`
pub fn init(dir: &Path, setting: &str) -> Result<()> {
    let spec = filter_spec(env::var("RUST_LOG").ok(), setting);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))?;

    // A subscriber may already be installed (e.g. by tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(spec))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
