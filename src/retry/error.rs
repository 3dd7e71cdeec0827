//! Error types for retry operations.

/// Error returned when a [`RetryPolicy`](super::RetryPolicy) cannot be executed.
///
/// Raised before the operation is attempted, so a misconfigured policy never
/// runs the operation at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyError {
    /// `max_retries` is zero, so no attempt would ever be made.
    ZeroAttempts,
}

impl std::fmt::Display for PolicyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroAttempts => write!(f, "retry policy must allow at least one attempt"),
        }
    }
}

impl std::error::Error for PolicyError {}

/// Error returned by the one-shot [`retry`](super::retry) function.
///
/// Either the policy was rejected up front, or every attempt failed and the
/// final error is carried unchanged.
///
/// # Examples
///
/// ```rust
/// use backoff_retry::{retry, RetryError, RetryPolicy};
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default()
///     .with_max_retries(2)
///     .with_base_delay(Duration::from_millis(1));
///
/// match retry(|| Err::<(), _>("always fails"), policy) {
///     Err(RetryError::Operation(e)) => assert_eq!(e, "always fails"),
///     other => panic!("Expected operation failure, got {:?}", other),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryError<E> {
    /// The policy was invalid; the operation was never attempted.
    InvalidPolicy(PolicyError),
    /// The error from the final attempt.
    Operation(E),
}

impl<E> RetryError<E> {
    /// Returns true if the policy was rejected before any attempt.
    pub fn is_invalid_policy(&self) -> bool {
        matches!(self, Self::InvalidPolicy(_))
    }

    /// Returns true if the operation itself failed.
    pub fn is_operation(&self) -> bool {
        matches!(self, Self::Operation(_))
    }

    /// Get the operation's error if present.
    pub fn into_operation_error(self) -> Option<E> {
        match self {
            Self::Operation(e) => Some(e),
            Self::InvalidPolicy(_) => None,
        }
    }

    /// Get a reference to the operation's error if present.
    pub fn operation_error(&self) -> Option<&E> {
        match self {
            Self::Operation(e) => Some(e),
            Self::InvalidPolicy(_) => None,
        }
    }
}

impl<E> From<PolicyError> for RetryError<E> {
    fn from(err: PolicyError) -> Self {
        Self::InvalidPolicy(err)
    }
}

impl<E: std::fmt::Display> std::fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy(e) => write!(f, "invalid retry policy: {}", e),
            Self::Operation(e) => write!(f, "{}", e),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for RetryError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPolicy(e) => Some(e),
            Self::Operation(e) => Some(e),
        }
    }
}
