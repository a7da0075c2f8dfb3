//! Display module for SimpleClock
//! Clock/stopwatch mode switching and the text shown on every tick

use std::time::{Duration, Instant};

use chrono::{NaiveDateTime, Timelike};
use tracing::debug;

use crate::stopwatch::ElapsedTimer;

/// What the clock face is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Clock,
    Stopwatch,
}

/// Label text and optional tooltip produced by a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readout {
    pub text: String,
    pub tooltip: Option<String>,
}

/// Owns the display mode and the stopwatch behind it.
///
/// The stopwatch runs exactly while the mode is `Stopwatch`.
#[derive(Debug, Clone, Default)]
pub struct ClockFace {
    mode: DisplayMode,
    stopwatch: ElapsedTimer,
}

impl ClockFace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn stopwatch_running(&self) -> bool {
        self.stopwatch.is_running()
    }

    /// Switch between clock and stopwatch, returning the new mode.
    /// Entering stopwatch mode always counts from zero.
    pub fn toggle(&mut self, at: Instant) -> DisplayMode {
        self.mode = match self.mode {
            DisplayMode::Clock => {
                self.stopwatch.restart(at);
                DisplayMode::Stopwatch
            }
            DisplayMode::Stopwatch => {
                self.stopwatch.stop(at);
                DisplayMode::Clock
            }
        };
        debug!(mode = ?self.mode, "display mode toggled");
        self.mode
    }

    /// Render the face for wall time `now` and monotonic time `at`
    pub fn tick(&self, now: NaiveDateTime, at: Instant) -> Readout {
        match self.mode {
            DisplayMode::Stopwatch => Readout {
                text: format_elapsed(self.stopwatch.elapsed(at)),
                tooltip: None,
            },
            DisplayMode::Clock => Readout {
                text: format_clock(now),
                tooltip: Some(format_date(now)),
            },
        }
    }
}

/// 12-hour time with tenths, e.g. "03:07:09.4 PM"
pub fn format_clock(now: NaiveDateTime) -> String {
    // Leap seconds report nanoseconds past 1e9
    let tenths = (now.nanosecond() / 100_000_000).min(9);
    format!(
        "{}.{} {}",
        now.format("%I:%M:%S"),
        tenths,
        now.format("%p")
    )
}

/// Long date for the tooltip, e.g. "Friday, March 01, 2024"
pub fn format_date(now: NaiveDateTime) -> String {
    now.format("%A, %B %d, %Y").to_string()
}

/// Stopwatch reading as "hh:mm:ss.t". Hours wrap at a day.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let hours = (total_secs / 3600) % 24;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    let tenths = elapsed.subsec_millis() / 100;
    format!("{:02}:{:02}:{:02}.{}", hours, minutes, secs, tenths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_milli_opt(h, m, s, ms))
            .unwrap()
    }

    #[test]
    fn test_starts_in_clock_mode() {
        let face = ClockFace::new();
        assert_eq!(face.mode(), DisplayMode::Clock);
        assert!(!face.stopwatch_running());
    }

    #[test]
    fn test_toggle_alternates_and_tracks_stopwatch() {
        let t0 = Instant::now();
        let mut face = ClockFace::new();
        for i in 0..9u32 {
            let mode = face.toggle(t0 + Duration::from_secs(i.into()));
            let expected = if i % 2 == 0 {
                DisplayMode::Stopwatch
            } else {
                DisplayMode::Clock
            };
            assert_eq!(mode, expected);
            assert_eq!(face.stopwatch_running(), mode == DisplayMode::Stopwatch);
        }
    }

    #[test]
    fn test_clock_readout() {
        let face = ClockFace::new();
        let readout = face.tick(at(15, 7, 9, 480), Instant::now());
        assert_eq!(readout.text, "03:07:09.4 PM");
        assert_eq!(readout.tooltip.as_deref(), Some("Friday, March 01, 2024"));
    }

    #[test]
    fn test_clock_readout_midnight_and_noon() {
        let face = ClockFace::new();
        let t = Instant::now();
        assert_eq!(face.tick(at(0, 0, 0, 0), t).text, "12:00:00.0 AM");
        assert_eq!(face.tick(at(12, 30, 0, 999), t).text, "12:30:00.9 PM");
        assert_eq!(face.tick(at(9, 5, 59, 100), t).text, "09:05:59.1 AM");
    }

    #[test]
    fn test_clock_readout_is_stable_for_fixed_time() {
        let face = ClockFace::new();
        let now = at(23, 59, 59, 950);
        let first = face.tick(now, Instant::now());
        let second = face.tick(now, Instant::now() + Duration::from_secs(5));
        assert_eq!(first, second);
    }

    #[test]
    fn test_stopwatch_readout_counts_from_toggle() {
        let t0 = Instant::now();
        let mut face = ClockFace::new();
        face.toggle(t0);

        let now = at(10, 0, 0, 0);
        let readout = face.tick(now, t0 + Duration::from_millis(83_250));
        assert_eq!(readout.text, "00:01:23.2");
        assert_eq!(readout.tooltip, None);
    }

    #[test]
    fn test_stopwatch_readout_never_decreases() {
        let t0 = Instant::now();
        let mut face = ClockFace::new();
        face.toggle(t0);

        let now = at(10, 0, 0, 0);
        let mut last = String::new();
        for step in 0..50u64 {
            let text = face.tick(now, t0 + Duration::from_millis(step * 100)).text;
            // Fixed-width format, so string order matches time order
            assert!(text >= last);
            last = text;
        }
        assert_eq!(last, "00:00:04.9");
    }

    #[test]
    fn test_double_toggle_returns_to_clock_and_next_run_starts_at_zero() {
        let t0 = Instant::now();
        let mut face = ClockFace::new();
        face.toggle(t0);
        face.toggle(t0 + Duration::from_secs(30));
        assert_eq!(face.mode(), DisplayMode::Clock);
        assert!(!face.stopwatch_running());

        let restart = t0 + Duration::from_secs(100);
        face.toggle(restart);
        let readout = face.tick(at(10, 0, 0, 0), restart);
        assert_eq!(readout.text, "00:00:00.0");
    }

    #[test]
    fn test_format_elapsed_wraps_hours_at_a_day() {
        assert_eq!(format_elapsed(Duration::from_secs(3 * 3600 + 4 * 60 + 5)), "03:04:05.0");
        assert_eq!(format_elapsed(Duration::from_secs(25 * 3600)), "01:00:00.0");
        assert_eq!(format_elapsed(Duration::from_millis(199)), "00:00:00.1");
    }

    #[test]
    fn test_format_date_pads_day() {
        let d = NaiveDate::from_ymd_opt(2025, 12, 7)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap();
        assert_eq!(format_date(d), "Sunday, December 07, 2025");
    }
}
