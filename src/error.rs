//! Error module for SimpleClock

use std::{io, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type for SimpleClock.
pub type Result<T> = StdResult<T, Error>;

/// Failures that can stop the clock from starting or saving settings.
#[derive(Debug, Error)]
pub enum Error {
    /// Errors from the SQLite settings store.
    #[error("Settings database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// I/O failure while preparing the data folder or log file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A window could not be registered or created.
    #[error("Window error: {0}")]
    Window(String),

    /// The desktop clock needs a Windows session.
    #[error("SimpleClock only runs on Windows")]
    Unsupported,
}
