// Debounced search input
//
// Driven by explicit timestamps rather than timers so the policy is
// deterministic and testable: the caller feeds keystrokes with `input` and
// polls with the current time.

use std::time::{Duration, Instant};

/// Quiescence delay before a pending query is released.
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Minimum non-empty query length that triggers a refetch.
pub const MIN_QUERY_LEN: usize = 3;

pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_DEBOUNCE_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a keystroke. Restarts the quiescence window.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now));
    }

    /// Release the pending text once it has been quiescent for the full
    /// delay and is either empty or at least three characters long. Shorter
    /// non-empty strings are held back and do not clear the previous result.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let (text, at) = self.pending.as_ref()?;
        if now.duration_since(*at) < self.delay {
            return None;
        }
        if !text.is_empty() && text.chars().count() < MIN_QUERY_LEN {
            return None;
        }
        self.pending.take().map(|(text, _)| text)
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
