//! The blocking retry executor.

use super::error::{PolicyError, RetryError};
use super::policy::RetryPolicy;
use super::sleep::{Sleep, ThreadSleep};

/// Runs fallible operations under a validated [`RetryPolicy`].
///
/// The policy is checked once, in [`Retry::new`], so every later call is
/// guaranteed at least one attempt. Each call owns its own attempt counter
/// and jitter source; a single `Retry` can be shared freely across threads
/// when its sleeper can.
///
/// # Examples
///
/// ```rust
/// use backoff_retry::{Retry, RetryPolicy};
/// use std::cell::Cell;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default()
///     .with_max_retries(3)
///     .with_base_delay(Duration::from_millis(1));
/// let retry = Retry::new(policy).unwrap();
///
/// let calls = Cell::new(0);
/// let result = retry.call(|| {
///     calls.set(calls.get() + 1);
///     if calls.get() < 3 { Err("transient") } else { Ok("ok") }
/// });
///
/// assert_eq!(result, Ok("ok"));
/// assert_eq!(calls.get(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Retry<S = ThreadSleep> {
    policy: RetryPolicy,
    sleeper: S,
}

impl Retry<ThreadSleep> {
    /// Create an executor that blocks the calling thread between attempts.
    ///
    /// Fails with [`PolicyError::ZeroAttempts`] if the policy allows no
    /// attempts.
    pub fn new(policy: RetryPolicy) -> Result<Self, PolicyError> {
        Self::with_sleeper(policy, ThreadSleep)
    }
}

impl Default for Retry<ThreadSleep> {
    fn default() -> Self {
        Self {
            policy: RetryPolicy::default(),
            sleeper: ThreadSleep,
        }
    }
}

impl<S: Sleep> Retry<S> {
    /// Create an executor that waits through a custom [`Sleep`].
    pub fn with_sleeper(policy: RetryPolicy, sleeper: S) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self { policy, sleeper })
    }

    /// Run `operation` until it succeeds or the attempt budget is spent.
    ///
    /// Returns the first success immediately. Earlier failures are
    /// discarded; the failure from the final attempt is returned unchanged.
    /// Blocks between attempts for the jittered backoff delay.
    pub fn call<T, E, F>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        let mut rng = rand::rng();
        let mut attempt = 0u32;

        loop {
            match operation() {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if self.policy.is_last_attempt(attempt) {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(attempts = attempt + 1, "retry budget exhausted");
                        return Err(error);
                    }

                    let delay = self.policy.delay_for_attempt(attempt, &mut rng);
                    #[cfg(feature = "tracing")]
                    tracing::debug!(attempt = attempt + 1, ?delay, "attempt failed, retrying");
                    self.sleeper.sleep(delay);
                    attempt += 1;
                }
            }
        }
    }

    /// Wrap `operation` into an equivalent operation with retry applied.
    ///
    /// Every invocation of the returned closure is an independent retry
    /// sequence with a fresh attempt budget.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backoff_retry::{Retry, RetryPolicy};
    /// use std::time::Duration;
    ///
    /// let retry = Retry::new(
    ///     RetryPolicy::default()
    ///         .with_max_retries(2)
    ///         .with_base_delay(Duration::from_millis(1)),
    /// )
    /// .unwrap();
    ///
    /// let mut flips = false;
    /// let mut flaky = retry.wrap(move || {
    ///     flips = !flips;
    ///     if flips { Err("odd call") } else { Ok(7) }
    /// });
    ///
    /// assert_eq!(flaky(), Ok(7));
    /// assert_eq!(flaky(), Ok(7));
    /// ```
    pub fn wrap<T, E, F>(self, mut operation: F) -> impl FnMut() -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        move || self.call(&mut operation)
    }

    /// Get the policy this executor runs under.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Get the sleeper used between attempts.
    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }
}

/// Retry `operation` under `policy`, blocking between attempts.
///
/// One-shot form of [`Retry::new`] followed by [`Retry::call`]. The policy is
/// validated before the first attempt.
///
/// # Examples
///
/// ```rust
/// use backoff_retry::{retry, RetryError, PolicyError, RetryPolicy};
///
/// let mut calls = 0;
/// let result = retry(
///     || {
///         calls += 1;
///         Ok::<_, String>(42)
///     },
///     RetryPolicy::default(),
/// );
/// assert_eq!(result, Ok(42));
/// assert_eq!(calls, 1);
///
/// let result = retry(|| Ok::<_, String>(42), RetryPolicy::default().with_max_retries(0));
/// assert_eq!(result, Err(RetryError::InvalidPolicy(PolicyError::ZeroAttempts)));
/// ```
pub fn retry<T, E, F>(operation: F, policy: RetryPolicy) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Result<T, E>,
{
    Retry::new(policy)?
        .call(operation)
        .map_err(RetryError::Operation)
}
