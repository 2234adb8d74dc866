//! Retry with exponential backoff
//!
//! One utility, parameterized by attempt count and base delay, used
//! uniformly wherever a transient failure is worth retrying. The delay
//! doubles after each failed attempt: base, 2x base, 4x base, and so on.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Run `op` up to `max_attempts` times, sleeping an exponentially growing
/// delay between failures. The final error is returned once attempts are
/// exhausted.
///
/// With `max_attempts = 3` a run that fails twice and then succeeds incurs
/// exactly two backoff sleeps.
pub async fn retry_with_backoff<T, E, F, Fut>(
    max_attempts: u32,
    base_delay: Duration,
    mut op: F,
) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                attempt += 1;
                if attempt >= max_attempts {
                    return Err(e);
                }

                let delay = base_delay * 2u32.saturating_pow(attempt - 1);
                warn!(
                    "attempt {}/{} failed: {}; retrying in {:?}",
                    attempt, max_attempts, e, delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
