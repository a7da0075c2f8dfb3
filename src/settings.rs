//! Settings module for SimpleClock
//! Handles the SQLite settings store in the user's local data folder

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

use crate::error::Result;

pub const KEY_TOPMOST: &str = "topmost";
pub const KEY_TICK_INTERVAL: &str = "tick_interval_ms";
pub const KEY_LOG_FILTER: &str = "log_filter";

pub const DEFAULT_TICK_INTERVAL_MS: u32 = 100;
pub const DEFAULT_LOG_FILTER: &str = "simple_clock=info";

/// Default settings seeded into a fresh database
const DEFAULTS: [(&str, &str); 3] = [
    (KEY_TOPMOST, "1"),              // 1 = always on top, 0 = normal
    (KEY_TICK_INTERVAL, "100"),      // Display refresh period
    (KEY_LOG_FILTER, DEFAULT_LOG_FILTER),
];

/// Get the hidden folder holding the settings database and log file
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".simple-clock")
}

/// Create the data folder if needed, hiding it on Windows
pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = data_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;

        #[cfg(windows)]
        {
            use std::os::windows::ffi::OsStrExt;
            use windows::core::PCWSTR;
            use windows::Win32::Storage::FileSystem::{SetFileAttributesW, FILE_ATTRIBUTE_HIDDEN};

            let path: Vec<u16> = dir.as_os_str().encode_wide().chain(std::iter::once(0)).collect();
            unsafe {
                let _ = SetFileAttributesW(PCWSTR(path.as_ptr()), FILE_ATTRIBUTE_HIDDEN);
            }
        }
    }
    Ok(dir)
}

/// Get the path to the settings database file
pub fn database_path() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join("settings.db"))
}

/// Parsed settings with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockSettings {
    pub topmost: bool,
    pub tick_interval_ms: u32,
    pub log_filter: String,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            topmost: true,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Key/value settings table backed by SQLite
pub struct SettingsStore {
    conn: Connection,
}

impl SettingsStore {
    pub fn open(path: &Path) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        for (key, value) in DEFAULTS {
            conn.execute(
                "INSERT OR IGNORE INTO settings (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }

        Ok(Self { conn })
    }

    /// Get a setting value
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Set a setting value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        debug!(key, value, "setting saved");
        Ok(())
    }

    /// Read every setting, falling back to defaults for missing or bad values
    pub fn load(&self) -> Result<ClockSettings> {
        let defaults = ClockSettings::default();

        let topmost = match self.get(KEY_TOPMOST)?.as_deref() {
            Some("1") => true,
            Some("0") => false,
            other => {
                if other.is_some() {
                    warn!(value = ?other, "invalid topmost setting, using default");
                }
                defaults.topmost
            }
        };

        let tick_interval_ms = self
            .get(KEY_TICK_INTERVAL)?
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or_else(|| {
                warn!("invalid tick interval setting, using default");
                defaults.tick_interval_ms
            });

        let log_filter = self
            .get(KEY_LOG_FILTER)?
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        Ok(ClockSettings {
            topmost,
            tick_interval_ms,
            log_filter,
        })
    }

    /// Remember the always-on-top choice for the next launch
    pub fn save_topmost(&self, topmost: bool) -> Result<()> {
        self.set(KEY_TOPMOST, if topmost { "1" } else { "0" })
    }
}
