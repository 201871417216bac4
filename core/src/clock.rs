use web_time::{Duration, Instant};

/// Game timer: idle until started, frozen forever once stopped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stopwatch {
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
}

impl Stopwatch {
    pub const fn new() -> Self {
        Self {
            started_at: None,
            stopped_at: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped_at.is_some()
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn stop(&mut self) {
        self.stop_at(Instant::now());
    }

    /// No-op unless the stopwatch is idle.
    pub fn start_at(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// No-op unless the stopwatch is running.
    pub fn stop_at(&mut self, now: Instant) {
        if self.is_running() {
            self.stopped_at = Some(now);
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        match (self.started_at, self.stopped_at) {
            (Some(started_at), Some(stopped_at)) => {
                stopped_at.saturating_duration_since(started_at)
            }
            (Some(started_at), None) => now.saturating_duration_since(started_at),
            (None, _) => Duration::ZERO,
        }
    }
}
