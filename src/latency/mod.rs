//! Bounded latency subsystem.
//!
//! # Data Flow
//! ```text
//! GET /api/latency?delay_ms=N
//!     → DelayRequest (unsigned, caller-supplied)
//!     → executor.rs: N > max?  → Rejected
//!                    otherwise → spawn wait.rs task
//!                                race against deadline (max + grace)
//!                                  wait first     → Success
//!                                  deadline first → abort wait, TimedOut
//!     → DelayOutcome → http layer picks 200 / 400 / 504
//! ```
//!
//! # Design Decisions
//! - Outcomes are values, not errors; the HTTP layer owns status codes
//! - Limits are immutable after startup and shared by value
//! - The wait is a trait so tests can inject stalls

pub mod executor;
pub mod outcome;
pub mod wait;

pub use executor::{
    BoundedDelayExecutor, DelayLimits, SelfCheckError, DEADLINE_GRACE_MS, MAX_DELAY_MS,
};
pub use outcome::{DelayError, DelayOutcome, DelayRequest, RejectReason};
pub use wait::{TokioWait, Wait};
