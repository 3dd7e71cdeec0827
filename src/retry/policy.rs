//! Retry policy types and delay calculation.

use std::time::Duration;

use rand::Rng;

use super::error::PolicyError;

/// Default total number of attempts.
pub const DEFAULT_MAX_RETRIES: u32 = 5;
/// Default delay before the first retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(100);
/// Default cap on the pre-jitter delay.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);
/// Default jitter factor (up to +10% of the raw delay).
pub const DEFAULT_JITTER: f64 = 0.1;

/// A retry policy describing how to retry failed operations.
///
/// Policies are pure data - they describe retry behavior but don't execute it.
/// This makes them easy to test, clone, and inspect.
///
/// `max_retries` is the *total* attempt budget: a policy with
/// `max_retries = 3` runs the operation at most three times.
///
/// The delay inserted after a failed attempt `i` (0-indexed) is:
///
/// ```text
/// raw    = min(base_delay * 2^i, max_delay)
/// jitter = uniform(0, raw * jitter)
/// delay  = raw + jitter
/// ```
///
/// # Examples
///
/// ```rust
/// use backoff_retry::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
///
/// assert_eq!(policy.max_retries(), 5);
/// assert_eq!(policy.base_delay(), Duration::from_millis(100));
/// assert_eq!(policy.max_delay(), Duration::from_secs(30));
///
/// let policy = RetryPolicy::new(3, Duration::from_millis(50), Duration::from_secs(2));
/// assert_eq!(policy.raw_delay(1), Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
    max_delay: Duration,
    jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            jitter: DEFAULT_JITTER,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given attempt budget and delay bounds.
    ///
    /// Jitter keeps its default of 10%.
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
            jitter: DEFAULT_JITTER,
        }
    }

    /// Set the total number of attempts.
    ///
    /// This includes the initial attempt: `with_max_retries(1)` never retries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backoff_retry::RetryPolicy;
    ///
    /// let policy = RetryPolicy::default().with_max_retries(3);
    /// assert_eq!(policy.max_retries(), 3);
    /// ```
    pub fn with_max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Set the delay used for the first retry, before jitter.
    pub fn with_base_delay(mut self, d: Duration) -> Self {
        self.base_delay = d;
        self
    }

    /// Set the maximum delay cap.
    ///
    /// The pre-jitter delay never exceeds this value. Jitter is added on top,
    /// so the actual sleep can be up to `max_delay * (1 + jitter)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backoff_retry::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::default()
    ///     .with_base_delay(Duration::from_millis(100))
    ///     .with_max_delay(Duration::from_millis(500));
    ///
    /// // 100ms, 200ms, 400ms, 500ms, 500ms...
    /// assert_eq!(policy.raw_delay(2), Duration::from_millis(400));
    /// assert_eq!(policy.raw_delay(3), Duration::from_millis(500));
    /// ```
    pub fn with_max_delay(mut self, d: Duration) -> Self {
        self.max_delay = d;
        self
    }

    /// Set the jitter factor.
    ///
    /// The factor is the upper bound of the additive jitter as a fraction of
    /// the raw delay, clamped to `[0.0, 1.0]`. Non-finite values disable
    /// jitter. `0.0` makes delays deterministic.
    pub fn with_jitter(mut self, factor: f64) -> Self {
        self.jitter = clamp_jitter(factor);
        self
    }

    /// Get the total number of attempts.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Get the base delay.
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Get the maximum delay cap.
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Get the jitter factor.
    pub fn jitter(&self) -> f64 {
        self.jitter
    }

    /// Check that the policy allows at least one attempt.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backoff_retry::{PolicyError, RetryPolicy};
    ///
    /// assert!(RetryPolicy::default().validate().is_ok());
    /// assert_eq!(
    ///     RetryPolicy::default().with_max_retries(0).validate(),
    ///     Err(PolicyError::ZeroAttempts)
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.max_retries == 0 {
            return Err(PolicyError::ZeroAttempts);
        }
        Ok(())
    }

    /// Whether a failure on `attempt` (0-indexed) used up the budget.
    pub fn is_last_attempt(&self, attempt: u32) -> bool {
        attempt.saturating_add(1) >= self.max_retries
    }

    /// Calculate the pre-jitter delay after a failed attempt (0-indexed).
    ///
    /// Grows as `base_delay * 2^attempt` and is capped at `max_delay`.
    /// Computed exactly for every attempt; products beyond `Duration::MAX`
    /// saturate, so large attempt numbers yield exactly `max_delay`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backoff_retry::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::default();
    ///
    /// assert_eq!(policy.raw_delay(0), Duration::from_millis(100));
    /// assert_eq!(policy.raw_delay(1), Duration::from_millis(200));
    /// assert_eq!(policy.raw_delay(2), Duration::from_millis(400));
    /// assert_eq!(policy.raw_delay(64), Duration::from_secs(30));
    /// ```
    pub fn raw_delay(&self, attempt: u32) -> Duration {
        doubled(self.base_delay, attempt).min(self.max_delay)
    }

    /// The inclusive range the jittered delay after `attempt` falls in.
    pub fn delay_bounds(&self, attempt: u32) -> (Duration, Duration) {
        let raw = self.raw_delay(attempt);
        (raw, raw.saturating_add(self.max_jitter(raw)))
    }

    /// Calculate the delay after a failed attempt with jitter applied.
    ///
    /// Uses the supplied random source, which keeps the calculation pure
    /// with respect to global state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backoff_retry::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::default();
    /// let delay = policy.delay_for_attempt(1, &mut rand::rng());
    ///
    /// assert!(delay >= Duration::from_millis(200));
    /// assert!(delay <= Duration::from_millis(220));
    /// ```
    pub fn delay_for_attempt<R: Rng>(&self, attempt: u32, rng: &mut R) -> Duration {
        let raw = self.raw_delay(attempt);
        let max_jitter = nanos(self.max_jitter(raw));
        if max_jitter == 0 {
            return raw;
        }
        let jitter = Duration::from_nanos(rng.random_range(0..=max_jitter));
        raw.saturating_add(jitter)
    }

    // Deserialized policies skip `with_jitter`, so clamp again here.
    fn max_jitter(&self, raw: Duration) -> Duration {
        Duration::try_from_secs_f64(raw.as_secs_f64() * clamp_jitter(self.jitter))
            .unwrap_or(Duration::MAX)
    }
}

fn clamp_jitter(factor: f64) -> f64 {
    if factor.is_finite() {
        factor.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// `base * 2^exp`, saturating at `Duration::MAX`.
fn doubled(base: Duration, exp: u32) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;

    let base_nanos = base.as_nanos();
    if base_nanos == 0 {
        return Duration::ZERO;
    }
    if exp >= u128::BITS || base_nanos > u128::MAX >> exp {
        return Duration::MAX;
    }
    let total = base_nanos << exp;
    match u64::try_from(total / NANOS_PER_SEC) {
        Ok(secs) => Duration::new(secs, (total % NANOS_PER_SEC) as u32),
        Err(_) => Duration::MAX,
    }
}

fn nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod policy_tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.max_retries(), 5);
        assert_eq!(policy.base_delay(), Duration::from_millis(100));
        assert_eq!(policy.max_delay(), Duration::from_secs(30));
        assert_eq!(policy.jitter(), 0.1);
    }

    #[test]
    fn test_new_keeps_default_jitter() {
        let policy = RetryPolicy::new(3, Duration::from_millis(10), Duration::from_secs(1));

        assert_eq!(policy.max_retries(), 3);
        assert_eq!(policy.base_delay(), Duration::from_millis(10));
        assert_eq!(policy.max_delay(), Duration::from_secs(1));
        assert_eq!(policy.jitter(), DEFAULT_JITTER);
    }

    #[test]
    fn test_exponential_raw_delay() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.raw_delay(0), Duration::from_millis(100));
        assert_eq!(policy.raw_delay(1), Duration::from_millis(200));
        assert_eq!(policy.raw_delay(2), Duration::from_millis(400));
        assert_eq!(policy.raw_delay(3), Duration::from_millis(800));
    }

    #[test]
    fn test_max_delay_cap() {
        let policy = RetryPolicy::default().with_max_delay(Duration::from_millis(500));

        assert_eq!(policy.raw_delay(2), Duration::from_millis(400));
        assert_eq!(policy.raw_delay(3), Duration::from_millis(500)); // capped
        assert_eq!(policy.raw_delay(4), Duration::from_millis(500)); // capped
    }

    #[test]
    fn test_raw_delay_saturates_at_cap() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.raw_delay(31), Duration::from_secs(30));
        assert_eq!(policy.raw_delay(32), Duration::from_secs(30));
        assert_eq!(policy.raw_delay(u32::MAX), Duration::from_secs(30));
    }

    #[test]
    fn test_raw_delay_with_unbounded_cap() {
        let policy = RetryPolicy::default().with_max_delay(Duration::MAX);

        assert_eq!(policy.raw_delay(u32::MAX), Duration::MAX);
        // Adding jitter on top must not overflow.
        let (low, high) = policy.delay_bounds(u32::MAX);
        assert_eq!(low, Duration::MAX);
        assert_eq!(high, Duration::MAX);
    }

    #[test]
    fn test_raw_delay_keeps_doubling_past_32_attempts() {
        let policy = RetryPolicy::default()
            .with_base_delay(Duration::from_millis(1))
            .with_max_delay(Duration::MAX);

        assert_eq!(policy.raw_delay(32), Duration::from_millis(1 << 32));
        assert_eq!(policy.raw_delay(40), Duration::from_millis(1 << 40));
        assert_eq!(policy.raw_delay(40), Duration::new(1_099_511_627, 776_000_000));
    }

    #[test]
    fn test_raw_delay_exact_for_nanosecond_base() {
        let policy = RetryPolicy::default()
            .with_base_delay(Duration::from_nanos(1))
            .with_max_delay(Duration::MAX);

        assert_eq!(policy.raw_delay(32), Duration::from_nanos(1 << 32));
        assert_eq!(policy.raw_delay(63), Duration::from_nanos(1 << 63));
        assert_eq!(policy.raw_delay(100), Duration::MAX);
    }

    #[test]
    fn test_zero_base_delay() {
        let policy = RetryPolicy::default().with_base_delay(Duration::ZERO);
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(policy.raw_delay(10), Duration::ZERO);
        assert_eq!(policy.delay_for_attempt(10, &mut rng), Duration::ZERO);
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        let policy = RetryPolicy::default();
        let mut rng = StdRng::seed_from_u64(42);

        for attempt in 0..12 {
            let (low, high) = policy.delay_bounds(attempt);
            for _ in 0..50 {
                let delay = policy.delay_for_attempt(attempt, &mut rng);
                assert!(delay >= low, "{:?} below {:?}", delay, low);
                assert!(delay <= high, "{:?} above {:?}", delay, high);
            }
        }
    }

    #[test]
    fn test_jitter_is_applied() {
        let policy = RetryPolicy::default();
        let raw = policy.raw_delay(0);
        let mut rng = StdRng::seed_from_u64(42);

        let samples: Vec<Duration> = (0..32)
            .map(|_| policy.delay_for_attempt(0, &mut rng))
            .collect();

        assert!(samples.iter().any(|d| *d > raw), "no sample above {:?}", raw);
        assert!(
            samples.iter().any(|d| *d != samples[0]),
            "all samples equal {:?}",
            samples[0]
        );
        assert!(samples.iter().all(|d| *d <= Duration::from_millis(110)));
    }

    #[test]
    fn test_delay_bounds_are_ten_percent() {
        let policy = RetryPolicy::default();

        assert_eq!(
            policy.delay_bounds(0),
            (Duration::from_millis(100), Duration::from_millis(110))
        );
        assert_eq!(
            policy.delay_bounds(1),
            (Duration::from_millis(200), Duration::from_millis(220))
        );
    }

    #[test]
    fn test_zero_jitter_is_deterministic() {
        let policy = RetryPolicy::default().with_jitter(0.0);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            policy.delay_for_attempt(2, &mut rng),
            Duration::from_millis(400)
        );
    }

    #[test]
    fn test_jitter_is_clamped() {
        assert_eq!(RetryPolicy::default().with_jitter(2.5).jitter(), 1.0);
        assert_eq!(RetryPolicy::default().with_jitter(-0.5).jitter(), 0.0);
        assert_eq!(RetryPolicy::default().with_jitter(f64::NAN).jitter(), 0.0);
    }

    #[test]
    fn test_validate_zero_attempts() {
        let policy = RetryPolicy::default().with_max_retries(0);
        assert_eq!(policy.validate(), Err(PolicyError::ZeroAttempts));
    }

    #[test]
    fn test_validate_single_attempt() {
        let policy = RetryPolicy::default().with_max_retries(1);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_is_last_attempt() {
        let policy = RetryPolicy::default().with_max_retries(3);

        assert!(!policy.is_last_attempt(0));
        assert!(!policy.is_last_attempt(1));
        assert!(policy.is_last_attempt(2));
        assert!(policy.is_last_attempt(u32::MAX));
    }

    #[test]
    fn test_policy_is_clone() {
        let policy = RetryPolicy::default().with_max_retries(3);
        let cloned = policy.clone();
        assert_eq!(policy, cloned);
    }

    #[test]
    fn test_policy_is_debug() {
        let policy = RetryPolicy::default();
        let debug = format!("{:?}", policy);
        assert!(debug.contains("RetryPolicy"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_policy_deserializes_with_defaults() {
        let policy: RetryPolicy = serde_json::from_str(r#"{"max_retries": 2}"#).unwrap();

        assert_eq!(policy.max_retries(), 2);
        assert_eq!(policy.base_delay(), DEFAULT_BASE_DELAY);
        assert_eq!(policy.max_delay(), DEFAULT_MAX_DELAY);
    }
}
