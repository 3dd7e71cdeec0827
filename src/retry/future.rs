//! Suspending retry for async operations.
//!
//! Requires the `async` feature. Same attempt budget, backoff and error
//! propagation as [`Retry::call`], but waits with `tokio::time::sleep`
//! instead of blocking the thread. The configured [`Sleep`] is not used.

use std::future::Future;

use super::executor::Retry;
use super::sleep::Sleep;

impl<S: Sleep> Retry<S> {
    /// Run an async `operation` until it succeeds or the budget is spent.
    ///
    /// Each attempt calls the factory again to get a fresh future.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backoff_retry::{Retry, RetryPolicy};
    /// use std::time::Duration;
    ///
    /// # tokio_test::block_on(async {
    /// let retry = Retry::new(
    ///     RetryPolicy::default()
    ///         .with_max_retries(3)
    ///         .with_base_delay(Duration::from_millis(1)),
    /// )
    /// .unwrap();
    ///
    /// let result = retry.call_async(|| async { Ok::<_, String>(42) }).await;
    /// assert_eq!(result, Ok(42));
    /// # });
    /// ```
    pub async fn call_async<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 0u32;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if self.policy().is_last_attempt(attempt) {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(attempts = attempt + 1, "retry budget exhausted");
                        return Err(error);
                    }

                    // ThreadRng is !Send; keep it out of the await.
                    let delay = self.policy().delay_for_attempt(attempt, &mut rand::rng());
                    #[cfg(feature = "tracing")]
                    tracing::debug!(attempt = attempt + 1, ?delay, "attempt failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
