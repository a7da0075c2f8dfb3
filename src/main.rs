//! SimpleClock - a small always-on-top desktop clock for Windows
//!
//! Shows the time with tenths of a second. Right-click switches to a stopwatch,
//! double-click docks the clock back to the bottom-right corner, F1 opens a help
//! popup next to it and F2 toggles always-on-top.

#![cfg_attr(windows, windows_subsystem = "windows")]
#![cfg_attr(not(windows), allow(dead_code))]

mod app;
mod constants;
mod display;
mod dpi;
mod error;
mod geometry;
mod help;
mod logging;
mod placement;
mod settings;
mod stopwatch;

#[cfg(windows)]
mod clock_window;
#[cfg(windows)]
mod help_window;
#[cfg(windows)]
mod instance;

use tracing::{error, info};

use error::Result;
use settings::{ClockSettings, SettingsStore};

fn main() {
    if let Err(e) = run() {
        error!(error = %e, "SimpleClock failed");
        report_fatal(&e.to_string());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let store = SettingsStore::open(&settings::database_path()?)?;
    let config = store.load()?;
    logging::init(&settings::data_dir(), &config.log_filter)?;
    info!(?config, "starting SimpleClock");

    start(store, &config)
}

#[cfg(windows)]
fn start(store: SettingsStore, config: &ClockSettings) -> Result<()> {
    let Some(_guard) = instance::acquire() else {
        info!("another instance is already running");
        show_message("SimpleClock is already running.", "Already Running");
        return Ok(());
    };
    clock_window::run(store, config)
}

#[cfg(not(windows))]
fn start(_store: SettingsStore, _config: &ClockSettings) -> Result<()> {
    Err(error::Error::Unsupported)
}

#[cfg(windows)]
fn show_message(text: &str, caption: &str) {
    use windows::core::PCWSTR;
    use windows::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_ICONWARNING, MB_OK};

    let text: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
    let caption: Vec<u16> = caption.encode_utf16().chain(std::iter::once(0)).collect();
    unsafe {
        MessageBoxW(
            None,
            PCWSTR(text.as_ptr()),
            PCWSTR(caption.as_ptr()),
            MB_OK | MB_ICONWARNING,
        );
    }
}

#[cfg(windows)]
fn report_fatal(message: &str) {
    show_message(&format!("SimpleClock could not start: {}", message), "SimpleClock Error");
}

#[cfg(not(windows))]
fn report_fatal(message: &str) {
    eprintln!("simple-clock: {}", message);
}
