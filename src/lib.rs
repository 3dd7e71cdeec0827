//! # backoff-retry
//!
//! Retry fallible operations with capped exponential backoff and additive
//! jitter.
//!
//! An operation is attempted up to a fixed budget of times. Between failed
//! attempts the calling thread sleeps for `min(base * 2^attempt, max)` plus up
//! to 10% random jitter, which keeps concurrent callers from retrying in
//! lockstep. The first success is returned as-is; if every attempt fails, the
//! error from the last one is returned unchanged.
//!
//! ## Quick Example
//!
//! ```rust
//! use backoff_retry::{retry, RetryPolicy};
//! use std::time::Duration;
//!
//! let mut remaining_failures = 2;
//! let result = retry(
//!     || {
//!         if remaining_failures > 0 {
//!             remaining_failures -= 1;
//!             Err("service unavailable")
//!         } else {
//!             Ok("ok")
//!         }
//!     },
//!     RetryPolicy::default().with_base_delay(Duration::from_millis(1)),
//! );
//!
//! assert_eq!(result, Ok("ok"));
//! ```
//!
//! ## Features
//!
//! - `async`: [`Retry::call_async`] for operations returning futures, sleeping
//!   with tokio instead of blocking
//! - `tracing`: debug events for each retry and a warning when the budget is
//!   exhausted
//! - `serde`: `Serialize`/`Deserialize` for [`RetryPolicy`]

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod retry;
pub mod testing;

// Re-exports
pub use retry::{retry, PolicyError, Retry, RetryError, RetryPolicy, Sleep, ThreadSleep};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::retry::{retry, PolicyError, Retry, RetryError, RetryPolicy, Sleep};
}
