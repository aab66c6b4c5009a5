//! Value types flowing in and out of the bounded delay executor.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// A caller's desired artificial delay.
///
/// Unsigned by construction; the upper bound is enforced by the executor,
/// never by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRequest {
    requested_ms: u64,
}

impl DelayRequest {
    pub fn from_millis(requested_ms: u64) -> Self {
        Self { requested_ms }
    }

    pub fn requested_ms(&self) -> u64 {
        self.requested_ms
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.requested_ms)
    }
}

/// Why a request was refused before any wait started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    ExceedsMaximum { requested_ms: u64, max_ms: u64 },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::ExceedsMaximum { .. } => write!(f, "exceeds maximum allowed delay"),
        }
    }
}

/// Result of a single executor invocation.
///
/// Produced exactly once per call to [`BoundedDelayExecutor::run`] and
/// consumed by the HTTP layer.
///
/// [`BoundedDelayExecutor::run`]: super::BoundedDelayExecutor::run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayOutcome {
    /// The wait completed before the deadline.
    Success { delay_ms: u64 },
    /// The request was refused without waiting.
    Rejected { reason: RejectReason },
    /// The deadline fired first; the wait was abandoned.
    TimedOut,
}

impl DelayOutcome {
    /// Short label used for metrics and log fields.
    pub fn label(&self) -> &'static str {
        match self {
            DelayOutcome::Success { .. } => "success",
            DelayOutcome::Rejected { .. } => "rejected",
            DelayOutcome::TimedOut => "timed_out",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DelayOutcome::Success { .. })
    }

    /// Collapse the outcome into the error taxonomy of the latency endpoint.
    pub fn into_result(self) -> Result<u64, DelayError> {
        match self {
            DelayOutcome::Success { delay_ms } => Ok(delay_ms),
            DelayOutcome::Rejected {
                reason: RejectReason::ExceedsMaximum { requested_ms, max_ms },
            } => Err(DelayError::InvalidRequest { requested_ms, max_ms }),
            DelayOutcome::TimedOut => Err(DelayError::DeadlineExceeded),
        }
    }
}

/// Terminal, non-retriable failures of a bounded delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DelayError {
    #[error("requested delay of {requested_ms}ms exceeds the maximum of {max_ms}ms")]
    InvalidRequest { requested_ms: u64, max_ms: u64 },

    #[error("bounded wait did not complete within the safety window")]
    DeadlineExceeded,
}
