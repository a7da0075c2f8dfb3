//! Stopwatch module for SimpleClock
//! Monotonic elapsed-time accumulator driven by caller-supplied instants

use std::time::{Duration, Instant};

/// Accumulates running time between `start` and `stop`
#[derive(Debug, Clone, Default)]
pub struct ElapsedTimer {
    accumulated: Duration,
    started_at: Option<Instant>,
}

impl ElapsedTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting from `at`; a running timer keeps its original start
    pub fn start(&mut self, at: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(at);
        }
    }

    /// Stop counting and freeze the elapsed value
    pub fn stop(&mut self, at: Instant) {
        if let Some(started) = self.started_at.take() {
            self.accumulated += at.saturating_duration_since(started);
        }
    }

    /// Zero the timer and leave it stopped
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        self.started_at = None;
    }

    /// Zero the timer and start it again from `at`
    pub fn restart(&mut self, at: Instant) {
        self.reset();
        self.start(at);
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Total time counted so far, as seen at `at`
    pub fn elapsed(&self, at: Instant) -> Duration {
        match self.started_at {
            Some(started) => self.accumulated + at.saturating_duration_since(started),
            None => self.accumulated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_new_timer_is_stopped_at_zero() {
        let timer = ElapsedTimer::new();
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn test_elapsed_grows_while_running() {
        let t0 = Instant::now();
        let mut timer = ElapsedTimer::new();
        timer.start(t0);

        let mut last = Duration::ZERO;
        for step in 1..=20 {
            let elapsed = timer.elapsed(t0 + MS * (step * 100));
            assert!(elapsed >= last);
            last = elapsed;
        }
        assert_eq!(last, Duration::from_secs(2));
    }

    #[test]
    fn test_stop_freezes_value() {
        let t0 = Instant::now();
        let mut timer = ElapsedTimer::new();
        timer.start(t0);
        timer.stop(t0 + MS * 1500);

        assert!(!timer.is_running());
        assert_eq!(timer.elapsed(t0 + MS * 1500), MS * 1500);
        assert_eq!(timer.elapsed(t0 + Duration::from_secs(60)), MS * 1500);
    }

    #[test]
    fn test_start_after_stop_resumes() {
        let t0 = Instant::now();
        let mut timer = ElapsedTimer::new();
        timer.start(t0);
        timer.stop(t0 + MS * 300);
        timer.start(t0 + MS * 1000);
        assert_eq!(timer.elapsed(t0 + MS * 1200), MS * 500);
    }

    #[test]
    fn test_start_twice_keeps_first_start() {
        let t0 = Instant::now();
        let mut timer = ElapsedTimer::new();
        timer.start(t0);
        timer.start(t0 + MS * 700);
        assert_eq!(timer.elapsed(t0 + MS * 1000), MS * 1000);
    }

    #[test]
    fn test_restart_discards_previous_run() {
        let t0 = Instant::now();
        let mut timer = ElapsedTimer::new();
        timer.start(t0);
        timer.stop(t0 + Duration::from_secs(90));

        timer.restart(t0 + Duration::from_secs(100));
        assert!(timer.is_running());
        assert_eq!(timer.elapsed(t0 + Duration::from_secs(100)), Duration::ZERO);
        assert_eq!(timer.elapsed(t0 + Duration::from_secs(101)), Duration::from_secs(1));
    }

    #[test]
    fn test_earlier_instant_does_not_go_negative() {
        let t0 = Instant::now();
        let mut timer = ElapsedTimer::new();
        timer.start(t0 + MS * 500);
        assert_eq!(timer.elapsed(t0), Duration::ZERO);
    }
}
