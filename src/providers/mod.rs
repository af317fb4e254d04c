/*!
 * Provider implementations for external translation services.
 *
 * This module contains client implementations behind a common trait:
 * - MyMemory: the public MyMemory translation API
 * - Mock: scripted provider for tests and offline experiments
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// The resolver only needs one operation from a provider, so the trait stays
/// object safe and can be shared as `Arc<dyn Provider>` across requests.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short provider name used in logs
    fn name(&self) -> &str;

    /// Translate text with this provider
    ///
    /// # Arguments
    /// * `text` - The raw text to translate
    /// * `source_language` - Source language code, or `auto`
    /// * `target_language` - Target language code
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text as returned by the service
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;
}

pub mod mock;
pub mod mymemory;
