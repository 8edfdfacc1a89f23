use std::time::{Duration, Instant};

/// Quiet period after the last edit before the note is flushed to disk.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(2000);

/// Single-shot debounce timer driven by the UI loop.
///
/// Every call to [`AutosaveTimer::restart`] pushes the deadline out by the full
/// delay, so a burst of edits results in exactly one fire once the user stops
/// typing. The timer never runs on its own; the owner polls it each frame and
/// uses [`AutosaveTimer::remaining`] to schedule the next repaint.
#[derive(Debug, Clone)]
pub struct AutosaveTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for AutosaveTimer {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOSAVE_DELAY)
    }
}

impl AutosaveTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending fire and start counting down again from `now`.
    pub fn restart(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until the timer fires, `Duration::ZERO` once overdue.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Returns `true` exactly once when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
