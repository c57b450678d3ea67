use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default time `eventually_visible` waits for an element
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default pause between attempts
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Timeout and poll interval for a poll loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    timeout: Duration,
    poll_interval: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl WaitConfig {
    /// A zero poll interval is raised to one millisecond so the loop always yields.
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval: poll_interval.max(Duration::from_millis(1)),
        }
    }

    pub fn from_millis(timeout_ms: u64, poll_interval_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(timeout_ms),
            Duration::from_millis(poll_interval_ms),
        )
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self::new(timeout, self.poll_interval)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

/// What one attempt of a poll loop produced
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt<T> {
    /// The awaited condition holds; stop polling
    Done(T),
    /// Not yet; keep the value for reporting and try again
    Retry(T),
}

/// Poll loop states. `Polling` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollState {
    Polling,
    Matched,
    TimedOut,
}

/// Terminal result of a poll loop
#[derive(Debug, Clone)]
pub struct PollOutcome<T> {
    state: PollState,
    last: Option<T>,
    attempts: u32,
    elapsed: Duration,
}

impl<T> PollOutcome<T> {
    pub(crate) fn new(state: PollState, last: Option<T>, attempts: u32, elapsed: Duration) -> Self {
        debug_assert!(state != PollState::Polling, "outcome must be terminal");
        Self {
            state,
            last,
            attempts,
            elapsed,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn is_matched(&self) -> bool {
        self.state == PollState::Matched
    }

    /// Value of the final attempt: the match on success, the last miss on timeout
    pub fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }

    pub fn into_last(self) -> Option<T> {
        self.last
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
