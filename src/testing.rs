//! Testing utilities for code that retries.
//!
//! Real backoff makes tests slow and timing-dependent. [`RecordingSleep`]
//! stands in for the blocking sleeper: it records every requested delay and
//! returns immediately, so tests can assert on the exact schedule.
//!
//! # Examples
//!
//! ```rust
//! use backoff_retry::testing::RecordingSleep;
//! use backoff_retry::{assert_delay_within, Retry, RetryPolicy};
//! use std::time::Duration;
//!
//! let sleeper = RecordingSleep::new();
//! let retry = Retry::with_sleeper(RetryPolicy::default().with_max_retries(2), &sleeper).unwrap();
//!
//! let _ = retry.call(|| Err::<(), _>("down"));
//!
//! assert_eq!(sleeper.count(), 1);
//! assert_delay_within!(
//!     sleeper.delays()[0],
//!     Duration::from_millis(100),
//!     Duration::from_millis(110)
//! );
//! ```

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::retry::Sleep;

/// A [`Sleep`] that records delays instead of sleeping.
///
/// Thread-safe, so one recorder can be shared through an `Arc` by executors
/// on several threads.
#[derive(Debug, Default)]
pub struct RecordingSleep {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleep {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All delays requested so far, in order.
    pub fn delays(&self) -> Vec<Duration> {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of delays requested so far.
    pub fn count(&self) -> usize {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Sum of all requested delays.
    pub fn total(&self) -> Duration {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .sum()
    }

    /// Forget all recorded delays.
    pub fn clear(&self) {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sleep for RecordingSleep {
    fn sleep(&self, duration: Duration) {
        self.delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
    }
}

/// Assert that a delay lies within an inclusive range.
///
/// # Example
///
/// ```rust
/// use backoff_retry::assert_delay_within;
/// use std::time::Duration;
///
/// assert_delay_within!(
///     Duration::from_millis(105),
///     Duration::from_millis(100),
///     Duration::from_millis(110)
/// );
/// ```
#[macro_export]
macro_rules! assert_delay_within {
    ($delay:expr, $low:expr, $high:expr) => {{
        let delay: ::std::time::Duration = $delay;
        let low: ::std::time::Duration = $low;
        let high: ::std::time::Duration = $high;
        assert!(
            delay >= low && delay <= high,
            "expected delay in [{:?}, {:?}], got {:?}",
            low,
            high,
            delay
        );
    }};
}
