use std::future::Future;
use std::time::Duration;

/// Source of the debounce delay.
///
/// The pipeline only ever asks the clock to sleep, so tests can substitute a clock
/// that resolves immediately or records the requested delays.
pub trait Clock: Send + Sync {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Clock backed by `tokio::time`, which also honours a paused test runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
