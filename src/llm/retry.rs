//! Retry with exponential backoff around any generation service.
//!
//! Transient failures are retried locally; once the attempt budget is spent
//! the last failure surfaces as `GenerationError::Exhausted`.

use std::time::Duration;

use async_trait::async_trait;

use super::client::{GenerationError, GenerationRequest, GenerationService};

/// Exponential backoff policy: `base_delay * 2^attempt_index` between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the second attempt
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay to wait after the failed attempt with the given 0-based index
    pub fn delay(&self, attempt_index: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt_index))
    }

    /// Whether another attempt is allowed after `attempts_made` attempts
    pub fn should_retry(&self, attempts_made: u32) -> bool {
        attempts_made < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

/// Wraps a provider and applies a [`RetryPolicy`] to every call.
pub struct RetryingService<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S: GenerationService> RetryingService<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: GenerationService> GenerationService for RetryingService<S> {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let mut attempt: u32 = 0;
        loop {
            match self.inner.generate(request.clone()).await {
                Ok(text) => return Ok(text),
                Err(err) => {
                    attempt += 1;
                    if !err.is_retryable() || !self.policy.should_retry(attempt) {
                        log::error!(
                            "{}: generation failed after {} attempt(s): {}",
                            self.inner.describe(),
                            attempt,
                            err
                        );
                        return Err(GenerationError::Exhausted {
                            attempts: attempt,
                            source: Box::new(err),
                        });
                    }

                    let delay = self.policy.delay(attempt - 1);
                    log::warn!(
                        "{}: generation failed (attempt {}/{}): {}. Retrying in {:.1}s",
                        self.inner.describe(),
                        attempt,
                        self.policy.max_attempts,
                        err,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::ScriptedService;
    use tokio::time::Instant;

    #[test]
    fn test_policy_delays_double() {
        let policy = RetryPolicy::new(4, Duration::from_millis(500));
        assert_eq!(policy.delay(0), Duration::from_millis(500));
        assert_eq!(policy.delay(1), Duration::from_secs(1));
        assert_eq!(policy.delay(2), Duration::from_secs(2));
    }

    #[test]
    fn test_policy_zero_attempts_clamped() {
        let policy = RetryPolicy::new(0, Duration::from_secs(1));
        assert_eq!(policy.max_attempts, 1);
        assert!(!policy.should_retry(1));
    }

    #[test]
    fn test_policy_default() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_kth_attempt_with_increasing_delays() {
        let inner = ScriptedService::new("stub")
            .then_err(GenerationError::Network("reset".into()))
            .then_err(GenerationError::RateLimited { retry_after: None })
            .then_ok("done");
        let service = RetryingService::new(inner, RetryPolicy::new(4, Duration::from_secs(1)));

        let text = service.generate(GenerationRequest::new("", "hi", 0.1)).await.unwrap();
        assert_eq!(text, "done");

        let calls = service.inner().call_instants();
        assert_eq!(calls.len(), 3);
        let first_gap = calls[1] - calls[0];
        let second_gap = calls[2] - calls[1];
        assert_eq!(first_gap, Duration::from_secs(1));
        assert_eq!(second_gap, Duration::from_secs(2));
        assert!(second_gap > first_gap);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_after_configured_attempts() {
        let inner = ScriptedService::new("stub")
            .then_err(GenerationError::Network("a".into()))
            .then_err(GenerationError::Network("b".into()))
            .then_err(GenerationError::Network("c".into()))
            .then_ok("too late");
        let service = RetryingService::new(inner, RetryPolicy::new(3, Duration::from_millis(10)));

        let start = Instant::now();
        let err = service.generate(GenerationRequest::new("", "hi", 0.1)).await.unwrap_err();

        assert_eq!(service.inner().call_count(), 3);
        assert_eq!(err.attempts(), 3);
        match err {
            GenerationError::Exhausted { source, .. } => {
                assert!(matches!(*source, GenerationError::Network(ref m) if m == "c"));
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
        // 10ms + 20ms of backoff, no sleep after the final attempt
        assert_eq!(start.elapsed(), Duration::from_millis(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_fails_immediately() {
        let inner = ScriptedService::new("stub")
            .then_err(GenerationError::MissingApiKey {
                env_var: "OPENAI_API_KEY".into(),
            })
            .then_ok("unused");
        let service = RetryingService::new(inner, RetryPolicy::new(5, Duration::from_secs(1)));

        let err = service.generate(GenerationRequest::new("", "hi", 0.1)).await.unwrap_err();
        assert_eq!(service.inner().call_count(), 1);
        assert_eq!(err.attempts(), 1);
    }

    #[tokio::test]
    async fn test_describe_delegates() {
        let service = RetryingService::new(ScriptedService::new("mock/model"), RetryPolicy::default());
        assert_eq!(service.describe(), "mock/model");
    }
}
