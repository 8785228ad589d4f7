/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working(artifact)` - Always succeeds with the given artifact
 * - `MockProvider::failing()` - Always fails with an API error
 * - `MockProvider::unconfigured()` - Fails with a missing-credentials error
 * - `MockProvider::intermittent(artifact, n)` - Fails every n-th request
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::content::ContentRequest;
use crate::errors::ProviderError;
use crate::providers::Provider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with the configured artifact
    Working,
    /// Always fails with an API error
    Failing,
    /// Fails with a missing-credentials error (degraded provider)
    Unconfigured,
    /// Fails intermittently (every n-th request)
    Intermittent {
        /// Fail on every n-th attempt
        fail_every: usize,
    },
    /// Simulates a slow response before succeeding
    Slow {
        /// Delay before responding
        delay_ms: u64,
    },
}

/// Mock provider for exercising the fallback chain without network calls
#[derive(Debug)]
pub struct MockProvider<A> {
    /// Provider name reported to the resolver
    name: String,
    /// Behavior mode
    behavior: MockBehavior,
    /// Artifact returned on success
    artifact: Option<A>,
    /// Attempt counter, shared across clones
    attempt_count: Arc<AtomicUsize>,
}

impl<A: Clone> MockProvider<A> {
    /// Create a mock with an explicit behavior
    pub fn new(name: impl Into<String>, behavior: MockBehavior, artifact: Option<A>) -> Self {
        Self {
            name: name.into(),
            behavior,
            artifact,
            attempt_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock that always returns the given artifact
    pub fn working(name: impl Into<String>, artifact: A) -> Self {
        Self::new(name, MockBehavior::Working, Some(artifact))
    }

    /// Create a failing mock that always errors
    pub fn failing(name: impl Into<String>) -> Self {
        Self::new(name, MockBehavior::Failing, None)
    }

    /// Create a mock that reports missing credentials
    pub fn unconfigured(name: impl Into<String>) -> Self {
        Self::new(name, MockBehavior::Unconfigured, None)
    }

    /// Create an intermittently failing mock
    pub fn intermittent(name: impl Into<String>, artifact: A, fail_every: usize) -> Self {
        Self::new(name, MockBehavior::Intermittent { fail_every }, Some(artifact))
    }

    /// Number of attempts made against this mock
    pub fn attempts(&self) -> usize {
        self.attempt_count.load(Ordering::SeqCst)
    }

    fn success(&self) -> Result<A, ProviderError> {
        self.artifact.clone().ok_or_else(|| {
            ProviderError::RequestFailed("Mock has no artifact configured".to_string())
        })
    }
}

impl<A: Clone> Clone for MockProvider<A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            behavior: self.behavior,
            artifact: self.artifact.clone(),
            attempt_count: Arc::clone(&self.attempt_count),
        }
    }
}

#[async_trait]
impl<A> Provider<A> for MockProvider<A>
where
    A: Clone + Send + Sync + Debug,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn attempt(&self, _request: &ContentRequest) -> Result<A, ProviderError> {
        let count = self.attempt_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => self.success(),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: format!("Simulated failure from {}", self.name),
            }),

            MockBehavior::Unconfigured => Err(ProviderError::MissingCredentials(format!(
                "{} credential is not set",
                self.name
            ))),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated intermittent failure (attempt #{})", count + 1),
                    })
                } else {
                    self.success()
                }
            }

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                self.success()
            }
        }
    }
}
