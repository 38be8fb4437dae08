//! Bounded polling.
//!
//! A poll issues at most `budget + 1` queries and sleeps at most `budget`
//! times. It never blocks indefinitely and cannot be cancelled from outside;
//! the budget is the only bound.

use std::future::Future;
use std::time::Duration;

use tracing::trace;

/// Interval and retry budget for a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Fixed sleep between queries.
    pub interval: Duration,
    /// Number of sleeps allowed before giving up.
    pub budget: u32,
}

impl PollPolicy {
    /// Creates a new policy.
    #[must_use]
    pub const fn new(interval: Duration, budget: u32) -> Self {
        Self { interval, budget }
    }

    /// Upper bound on the number of queries a poll issues.
    #[must_use]
    pub const fn max_queries(&self) -> u32 {
        self.budget.saturating_add(1)
    }
}

/// Terminal state of a poll that did not error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The condition held for this observation.
    Ready(T),
    /// Budget ran out; carries the last observation.
    Exhausted(T),
}

impl<T> PollOutcome<T> {
    /// Returns true if the condition was met.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Returns the observation regardless of outcome.
    pub fn into_inner(self) -> T {
        match self {
            Self::Ready(value) | Self::Exhausted(value) => value,
        }
    }
}

/// Repeatedly runs `fetch` until `ready` accepts the result or the budget is
/// spent.
///
/// A `fetch` error ends the poll immediately and is returned as-is.
///
/// # Errors
///
/// Returns the first error produced by `fetch`.
pub async fn poll_until<T, E, F, Fut, P>(
    policy: &PollPolicy,
    mut fetch: F,
    mut ready: P,
) -> Result<PollOutcome<T>, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: FnMut(&T) -> bool,
{
    let mut remaining = policy.budget;
    loop {
        let value = fetch().await?;
        if ready(&value) {
            return Ok(PollOutcome::Ready(value));
        }
        if remaining == 0 {
            return Ok(PollOutcome::Exhausted(value));
        }
        trace!(remaining, interval = ?policy.interval, "condition not met, sleeping");
        tokio::time::sleep(policy.interval).await;
        remaining -= 1;
    }
}
