//! The suspendable wait raced by the executor.

use std::future::Future;
use std::time::Duration;

/// Source of the artificial delay.
///
/// The returned future is spawned as its own task, so it must be `'static`
/// and must not borrow from `self`.
pub trait Wait: Clone + Send + Sync + 'static {
    fn wait(&self, duration: Duration) -> impl Future<Output = ()> + Send + 'static;
}

/// Production wait backed by the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioWait;

impl Wait for TokioWait {
    fn wait(&self, duration: Duration) -> impl Future<Output = ()> + Send + 'static {
        tokio::time::sleep(duration)
    }
}
