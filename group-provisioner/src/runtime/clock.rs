//! Clock and sleep abstraction for deadline supervision.

use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Time source the deployment coordinator runs against.
///
/// Production code uses [`TokioClock`]; tests substitute a simulated clock so
/// retry backoffs and the overall deadline elapse without real sleeping.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    async fn sleep(&self, duration: Duration);
}

/// Wall-clock time with `tokio::time` sleeps.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, TokioClock};
    use std::time::Duration;

    #[tokio::test]
    async fn tokio_clock_now_is_monotonic_across_sleeps() {
        let clock = TokioClock;
        let before = clock.now();
        clock.sleep(Duration::from_millis(1)).await;
        assert!(clock.now() >= before);
    }
}
