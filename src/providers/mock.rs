/*!
 * Mock provider implementations for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::returning(text)` - Always succeeds with the given text
 * - `MockProvider::echo()` - Succeeds with a tagged copy of the input
 * - `MockProvider::intermittent(n)` - Fails every Nth request
 * - `MockProvider::failing(kind)` - Always fails with the given error kind
 * - `MockProvider::panicking()` - Panics inside the call
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// A request as seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct MockRequest {
    /// The text to translate
    pub text: String,
    /// Source language
    pub source_language: String,
    /// Target language
    pub target_language: String,
}

/// Kind of upstream failure to simulate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockFailure {
    /// Transport failure
    Connection,
    /// Non-success status
    Api,
    /// Malformed payload
    Parse,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with this text
    Returning(String),
    /// Succeeds with `[target] text`
    Echo,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing(MockFailure),
    /// Sleeps before echoing (for concurrency testing)
    Slow { delay_ms: u64 },
    /// Panics instead of answering
    Panicking,
}

/// Mock provider for testing resolution behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Most recent request, shared between clones
    last_request: Arc<Mutex<Option<MockRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a mock provider that always answers with `text`
    pub fn returning(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Returning(text.into()))
    }

    /// Create a mock provider that echoes the input
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Create an intermittently failing mock provider
    ///
    /// # Panics
    ///
    /// Panics if `fail_every` is zero.
    pub fn intermittent(fail_every: usize) -> Self {
        assert!(fail_every > 0, "fail_every must be at least 1");
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors
    pub fn failing(failure: MockFailure) -> Self {
        Self::new(MockBehavior::Failing(failure))
    }

    /// Create a mock that waits before answering
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Create a mock provider whose calls panic
    pub fn panicking() -> Self {
        Self::new(MockBehavior::Panicking)
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<MockRequest> {
        self.last_request.lock().clone()
    }

    fn failure(kind: MockFailure) -> ProviderError {
        match kind {
            MockFailure::Connection => ProviderError::ConnectionError("Simulated connection failure".to_string()),
            MockFailure::Api => ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            },
            MockFailure::Parse => ProviderError::ParseError("Simulated malformed payload".to_string()),
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior.clone(),
            request_count: Arc::clone(&self.request_count),
            last_request: Arc::clone(&self.last_request),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock() = Some(MockRequest {
            text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        });

        match &self.behavior {
            MockBehavior::Returning(translation) => Ok(translation.clone()),

            MockBehavior::Echo => Ok(format!("[{}] {}", target_language, text)),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(format!("[{}] {}", target_language, text))
                }
            }

            MockBehavior::Failing(kind) => Err(Self::failure(*kind)),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                Ok(format!("[{}] {}", target_language, text))
            }

            MockBehavior::Panicking => panic!("Simulated provider panic (request #{})", count + 1),
        }
    }
}
