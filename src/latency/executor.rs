//! Bounded delay execution.
//!
//! # Responsibilities
//! - Refuse delays above the configured maximum without waiting
//! - Run the wait as its own task and race it against a hard deadline
//! - Abandon the wait when the deadline wins
//!
//! # Design Decisions
//! - The deadline is `max_delay + grace`, independent of the requested value
//! - The wait and the deadline are two separate completion sources joined
//!   with `tokio::select!`; a stalled wait cannot hold back the deadline
//! - No shared mutable state; any number of invocations may run at once

use std::time::Duration;

use thiserror::Error;
use tokio::task::AbortHandle;
use tokio::time::{self, Instant};

use super::outcome::{DelayOutcome, DelayRequest, RejectReason};
use super::wait::{TokioWait, Wait};

/// Largest delay a caller may request, in milliseconds.
pub const MAX_DELAY_MS: u64 = 5000;

/// Slack granted on top of [`MAX_DELAY_MS`] before the deadline fires.
pub const DEADLINE_GRACE_MS: u64 = 500;

/// Immutable limits applied to every invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayLimits {
    max_delay: Duration,
    grace: Duration,
}

impl DelayLimits {
    pub fn new(max_delay_ms: u64, grace_ms: u64) -> Self {
        Self {
            max_delay: Duration::from_millis(max_delay_ms),
            grace: Duration::from_millis(grace_ms),
        }
    }

    pub fn max_delay_ms(&self) -> u64 {
        self.max_delay.as_millis() as u64
    }

    /// Hard ceiling for a single invocation, measured from the start of the wait.
    pub fn deadline(&self) -> Duration {
        self.max_delay + self.grace
    }
}

impl Default for DelayLimits {
    fn default() -> Self {
        Self::new(MAX_DELAY_MS, DEADLINE_GRACE_MS)
    }
}

/// Raised when the startup probe cannot complete a bounded wait.
#[derive(Debug, Error)]
pub enum SelfCheckError {
    #[error("timer probe task failed: {0}")]
    Probe(String),

    #[error("timer probe finished as {0} instead of success")]
    Outcome(&'static str),
}

/// Aborts the wait task when the invocation ends, whichever way it ends.
///
/// Covers the deadline branch as well as the caller's future being dropped
/// mid-wait (client disconnect). Aborting a finished task is a no-op.
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Turns a requested delay into a completed wait, a rejection or a timeout.
#[derive(Debug, Clone)]
pub struct BoundedDelayExecutor<W = TokioWait> {
    limits: DelayLimits,
    wait: W,
}

impl BoundedDelayExecutor<TokioWait> {
    pub fn new(limits: DelayLimits) -> Self {
        Self::with_wait(limits, TokioWait)
    }
}

impl Default for BoundedDelayExecutor {
    fn default() -> Self {
        Self::new(DelayLimits::default())
    }
}

impl<W: Wait> BoundedDelayExecutor<W> {
    /// Build an executor around a custom wait source.
    pub fn with_wait(limits: DelayLimits, wait: W) -> Self {
        Self { limits, wait }
    }

    pub fn limits(&self) -> DelayLimits {
        self.limits
    }

    /// Execute one bounded delay.
    ///
    /// Returns `Rejected` synchronously when the request exceeds the maximum.
    /// Otherwise the returned future resolves no later than
    /// [`DelayLimits::deadline`] after the wait started.
    pub async fn run(&self, request: DelayRequest) -> DelayOutcome {
        let requested_ms = request.requested_ms();
        let max_ms = self.limits.max_delay_ms();

        if requested_ms > max_ms {
            return DelayOutcome::Rejected {
                reason: RejectReason::ExceedsMaximum { requested_ms, max_ms },
            };
        }

        let deadline = Instant::now() + self.limits.deadline();
        let mut waiter = tokio::spawn(self.wait.wait(request.duration()));
        let _guard = AbortOnDrop(waiter.abort_handle());

        tokio::select! {
            biased;

            joined = &mut waiter => match joined {
                Ok(()) => DelayOutcome::Success { delay_ms: requested_ms },
                Err(e) => {
                    tracing::error!(
                        requested_ms,
                        error = %e,
                        "Delay task ended without completing"
                    );
                    DelayOutcome::TimedOut
                }
            },
            _ = time::sleep_until(deadline) => {
                tracing::debug!(
                    requested_ms,
                    deadline_ms = self.limits.deadline().as_millis() as u64,
                    "Deadline fired before delay completed, abandoning wait"
                );
                DelayOutcome::TimedOut
            }
        }
    }

    /// Run a zero-length bounded wait on a fresh task.
    ///
    /// A runtime without a timer driver makes the probe panic, which surfaces
    /// here as an error so startup can abort.
    pub async fn self_check(&self) -> Result<(), SelfCheckError> {
        let executor = self.clone();
        let outcome = tokio::spawn(async move { executor.run(DelayRequest::from_millis(0)).await })
            .await
            .map_err(|e| SelfCheckError::Probe(e.to_string()))?;

        if outcome.is_success() {
            Ok(())
        } else {
            Err(SelfCheckError::Outcome(outcome.label()))
        }
    }
}
