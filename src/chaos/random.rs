//! Randomized failure injection.
//!
//! A request fails when a uniform sample in `[0, 1)` falls below the
//! failure rate. Rates at or below 0 never fail; rates at or above 1
//! always fail. The rate is taken as given, with no clamping.

use rand::Rng;

/// Failure rate applied when the caller supplies none.
pub const DEFAULT_FAILURE_RATE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaosOutcome {
    Survived,
    Failed,
}

impl ChaosOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ChaosOutcome::Survived => "survived",
            ChaosOutcome::Failed => "failed",
        }
    }
}

/// Roll against the thread-local RNG.
pub fn roll(failure_rate: f64) -> ChaosOutcome {
    roll_with(&mut rand::thread_rng(), failure_rate)
}

/// Roll against a caller-provided RNG.
pub fn roll_with<R: Rng + ?Sized>(rng: &mut R, failure_rate: f64) -> ChaosOutcome {
    let sample: f64 = rng.gen();
    if sample < failure_rate {
        ChaosOutcome::Failed
    } else {
        ChaosOutcome::Survived
    }
}
