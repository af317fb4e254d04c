/*!
 * Core translation resolution.
 *
 * This module contains the `TranslationResolver`, which decides what text is
 * returned for a request: one attempt at the external provider, then the
 * static dictionary. It always produces a result for a well-formed request.
 */

use anyhow::Result;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::Config;
use crate::dictionary::Dictionary;
use crate::errors::ResolveError;
use crate::language_utils::describe_language;
use crate::providers::Provider;
use crate::providers::mymemory::MyMemory;
use super::formatting::strip_html_tags;

/// Source language sentinel asking the provider to detect the language
pub const AUTO_DETECT: &str = "auto";

/// A single translation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Text to translate
    pub text: String,

    /// Source language code, or `auto`
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code
    pub target_language: String,
}

fn default_source_language() -> String {
    AUTO_DETECT.to_string()
}

impl TranslationRequest {
    /// Create a request with an auto-detected source language
    pub fn new(text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_language: default_source_language(),
            target_language: target_language.into(),
        }
    }

    /// Set the source language; an empty code keeps `auto`
    pub fn with_source(mut self, source_language: impl Into<String>) -> Self {
        let source_language = source_language.into();
        if !source_language.is_empty() {
            self.source_language = source_language;
        }
        self
    }

    /// Check the required fields
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.text.is_empty() || self.target_language.is_empty() {
            return Err(ResolveError::InvalidRequest(
                "Missing text or target language".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where a translation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// The external translation service
    External,
    /// The local dictionary
    Fallback,
}

impl Provenance {
    /// Lowercase identifier, as used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::External => "external",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    /// Translated text, free of markup
    pub translated_text: String,
    /// Where the text came from
    pub provenance: Provenance,
}

impl TranslationResult {
    fn external(text: String) -> Self {
        Self { translated_text: text, provenance: Provenance::External }
    }

    fn fallback(text: String) -> Self {
        Self { translated_text: text, provenance: Provenance::Fallback }
    }
}

/// Resolves translations with an external provider and a dictionary fallback
#[derive(Debug, Clone)]
pub struct TranslationResolver {
    /// External provider; `None` runs the resolver offline
    provider: Option<Arc<dyn Provider>>,
    /// Read-only phrase table
    dictionary: Arc<Dictionary>,
}

impl TranslationResolver {
    /// Create a resolver that tries `provider` before the dictionary
    pub fn new(provider: Arc<dyn Provider>, dictionary: Arc<Dictionary>) -> Self {
        Self { provider: Some(provider), dictionary }
    }

    /// Create a resolver that only uses the dictionary
    pub fn offline(dictionary: Arc<Dictionary>) -> Self {
        Self { provider: None, dictionary }
    }

    /// Build the resolver described by the configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut dictionary = Dictionary::builtin().clone();
        if let Some(path) = &config.dictionary.extension_path {
            dictionary = dictionary.merge(Dictionary::load_extension(path)?);
        }
        info!("Dictionary ready with {} phrases", dictionary.len());
        let dictionary = Arc::new(dictionary);

        if !config.provider.enabled {
            info!("External provider disabled, answering from the dictionary only");
            return Ok(Self::offline(dictionary));
        }

        let timeout = config.provider.timeout_secs.map(Duration::from_secs);
        let provider = MyMemory::new_with_config(config.provider.endpoint.clone(), timeout)?;
        info!("Using MyMemory at {}", provider.endpoint());
        Ok(Self::new(Arc::new(provider), dictionary))
    }

    /// The dictionary backing the fallback path
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Whether an external provider is configured
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Resolve a request.
    ///
    /// Fails only when text or target language is missing. Upstream trouble
    /// is logged and answered from the dictionary.
    pub async fn resolve(&self, request: &TranslationRequest) -> Result<TranslationResult, ResolveError> {
        request.validate()?;

        info!(
            "Translation request: {} chars, {} -> {}",
            request.text.chars().count(),
            describe_language(&request.source_language),
            describe_language(&request.target_language)
        );

        if let Some(translated) = self.try_external(request).await {
            return Ok(TranslationResult::external(translated));
        }

        info!("Using dictionary fallback for {}", request.target_language);
        Ok(self.fallback(&request.text, &request.target_language))
    }

    /// Answer from the dictionary alone
    pub fn fallback(&self, text: &str, target_language: &str) -> TranslationResult {
        let translated = self.dictionary.translate(text, target_language);
        TranslationResult::fallback(strip_html_tags(&translated))
    }

    /// One attempt at the external provider; `None` means fall back
    async fn try_external(&self, request: &TranslationRequest) -> Option<String> {
        let provider = self.provider.as_ref()?;

        debug!("Trying {}...", provider.name());
        match provider
            .translate(&request.text, &request.source_language, &request.target_language)
            .await
        {
            Ok(raw) => {
                let cleaned = strip_html_tags(&raw);
                if cleaned.is_empty() {
                    warn!("{} returned an empty translation", provider.name());
                    return None;
                }
                debug!("{} success (cleaned): {}", provider.name(), cleaned);
                Some(cleaned)
            }
            Err(e) => {
                warn!("{} failed: {}", provider.name(), e);
                None
            }
        }
    }
}
