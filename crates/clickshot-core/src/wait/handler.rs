use std::time::Instant;

use tracing::debug;

use super::types::{Attempt, PollOutcome, PollState, WaitConfig};

/// Run `attempt` until it reports [`Attempt::Done`] or the timeout elapses.
///
/// Time is measured with [`Instant`], so wall-clock adjustments do not affect
/// the deadline. The first attempt runs immediately. Between attempts the loop
/// sleeps for the poll interval, shortened so it never sleeps past the
/// deadline; one last attempt runs at the deadline before timing out. An
/// error from `attempt` ends the loop at once and is returned unchanged.
pub fn poll_until<T, E, F>(config: &WaitConfig, mut attempt: F) -> Result<PollOutcome<T>, E>
where
    F: FnMut() -> Result<Attempt<T>, E>,
{
    let start = Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let last = match attempt()? {
            Attempt::Done(value) => {
                debug!(event = "core.wait.poll_matched", attempts = attempts);
                return Ok(PollOutcome::new(
                    PollState::Matched,
                    Some(value),
                    attempts,
                    start.elapsed(),
                ));
            }
            Attempt::Retry(value) => value,
        };

        let elapsed = start.elapsed();
        if elapsed >= config.timeout() {
            debug!(
                event = "core.wait.poll_timed_out",
                attempts = attempts,
                elapsed_ms = elapsed.as_millis() as u64
            );
            return Ok(PollOutcome::new(
                PollState::TimedOut,
                Some(last),
                attempts,
                elapsed,
            ));
        }

        let remaining = config.timeout() - elapsed;
        std::thread::sleep(config.poll_interval().min(remaining));
    }
}
