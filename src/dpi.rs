//! DPI scaling helper module
//! Converts the clock's fixed 96-DPI pixel sizes to the system DPI

use std::sync::atomic::{AtomicU32, Ordering};

/// Cached DPI value (0 means not initialized)
static CACHED_DPI: AtomicU32 = AtomicU32::new(0);

/// Standard DPI (96 = 100% scaling)
pub const STANDARD_DPI: u32 = 96;

/// Get the current DPI value, asking the system once
pub fn dpi() -> u32 {
    let cached = CACHED_DPI.load(Ordering::SeqCst);
    if cached != 0 {
        return cached;
    }
    let dpi = system_dpi();
    CACHED_DPI.store(dpi, Ordering::SeqCst);
    dpi
}

#[cfg(windows)]
fn system_dpi() -> u32 {
    match unsafe { windows::Win32::UI::HiDpi::GetDpiForSystem() } {
        0 => STANDARD_DPI,
        dpi => dpi,
    }
}

#[cfg(not(windows))]
fn system_dpi() -> u32 {
    STANDARD_DPI
}

/// Scale an integer value by the system DPI
pub fn scale(value: i32) -> i32 {
    scale_for(value, dpi())
}

/// MulDiv-style rounding without going through floating point
pub fn scale_for(value: i32, dpi: u32) -> i32 {
    ((value as i64 * dpi as i64 + STANDARD_DPI as i64 / 2) / STANDARD_DPI as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_dpi_is_identity() {
        assert_eq!(scale_for(180, 96), 180);
        assert_eq!(scale_for(0, 96), 0);
    }

    #[test]
    fn test_common_scale_factors() {
        assert_eq!(scale_for(40, 120), 50);  // 125%
        assert_eq!(scale_for(40, 144), 60);  // 150%
        assert_eq!(scale_for(10, 192), 20);  // 200%
        assert_eq!(scale_for(13, 120), 16);  // 16.25 rounds down
        assert_eq!(scale_for(14, 144), 21);
    }
}
