//! Sleeping between attempts.

use std::sync::Arc;
use std::time::Duration;

/// Blocks the caller between retry attempts.
///
/// The executor only ever waits through this trait, so tests can substitute
/// a recorder (see [`RecordingSleep`](crate::testing::RecordingSleep)) and
/// observe the exact delays without actually sleeping.
pub trait Sleep {
    /// Block for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Sleeps by blocking the current thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreadSleep;

impl Sleep for ThreadSleep {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

impl<S: Sleep + ?Sized> Sleep for &S {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

impl<S: Sleep + ?Sized> Sleep for Arc<S> {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_thread_sleep_blocks() {
        let start = Instant::now();
        ThreadSleep.sleep(Duration::from_millis(20));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_thread_sleep_zero_returns_immediately() {
        let start = Instant::now();
        ThreadSleep.sleep(Duration::ZERO);
        assert!(start.elapsed() < Duration::from_millis(20));
    }
}
