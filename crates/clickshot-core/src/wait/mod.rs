mod handler;
mod types;

pub use handler::poll_until;
pub use types::{Attempt, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, PollOutcome, PollState, WaitConfig};
