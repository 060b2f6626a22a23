//! Elapsed time between frames.

use embassy_time::{
    Duration,
    Instant,
};

/// Tracks when the previous frame started.
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Milliseconds since the previous call. The first call returns 0, as
    /// does a `now` earlier than the previous one.
    pub fn tick(&mut self, now: Instant) -> u32 {
        let elapsed = self
            .last
            .and_then(|last| now.checked_duration_since(last))
            .unwrap_or(Duration::from_ticks(0));
        self.last = Some(now);
        u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX)
    }

    /// Forget the previous frame, e.g. after the loop was paused.
    pub fn restart(&mut self) {
        self.last = None;
    }
}
