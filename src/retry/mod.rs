//! Retry with capped exponential backoff and additive jitter.
//!
//! - **Policy**: [`RetryPolicy`] is just data - an attempt budget and delay
//!   bounds, with the delay math exposed as pure functions
//! - **Executor**: [`Retry`] validates a policy once and then runs operations
//!   under it, blocking between attempts
//! - **Transparent**: callers see either the success value or the error from
//!   the final attempt, unchanged
//!
//! # Quick Start
//!
//! ```rust
//! use backoff_retry::{Retry, RetryPolicy};
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::default()
//!     .with_max_retries(3)
//!     .with_base_delay(Duration::from_millis(1));
//!
//! let retry = Retry::new(policy).unwrap();
//! let value = retry.call(|| "42".parse::<i32>());
//!
//! assert_eq!(value, Ok(42));
//! ```
//!
//! # Backoff
//!
//! After a failed attempt `i` (0-indexed) the executor waits
//! `min(base_delay * 2^i, max_delay)` plus a uniformly random extra of up to
//! 10% (configurable with [`RetryPolicy::with_jitter`]). The final failure is
//! never followed by a wait.
//!
//! # Error Types
//!
//! - [`PolicyError`]: the policy allows no attempts
//! - [`RetryError`]: returned by the one-shot [`retry`] function, wrapping
//!   either a [`PolicyError`] or the operation's final error

mod error;
mod executor;
#[cfg(feature = "async")]
mod future;
mod policy;
mod sleep;

pub use error::{PolicyError, RetryError};
pub use executor::{retry, Retry};
pub use policy::{
    RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_JITTER, DEFAULT_MAX_DELAY, DEFAULT_MAX_RETRIES,
};
pub use sleep::{Sleep, ThreadSleep};
