use crate::error::Result;
use std::{thread,
          time::{Duration, Instant}};

/// Poll `condition` every `interval` until it holds or `timeout` elapses.
///
/// Returns whether the condition was met. The condition is always evaluated at least once,
/// so a zero timeout degrades to a single check. Driver errors from the condition propagate.
pub fn poll_until<F>(timeout: Duration, interval: Duration, mut condition: F) -> Result<bool>
where
    F: FnMut() -> Result<bool>,
{
    let deadline = Instant::now() + timeout;

    loop {
        if condition()? {
            return Ok(true);
        }

        let now = Instant::now();
        if now >= deadline {
            return Ok(false);
        }

        thread::sleep(interval.min(deadline - now));
    }
}
