use anyhow::{Result, anyhow};
use isolang::Language;
use serde::{Deserialize, Serialize};

use crate::translation::AUTO_DETECT;

/// Language utilities for ISO language code handling
///
/// This module provides functions for validating ISO 639-1 codes, naming
/// languages for logs, and listing the target languages the relay offers.
/// Target languages offered to clients, in display order
pub const SUPPORTED_TARGET_LANGUAGES: &[&str] = &["fr", "es", "de", "it", "pt", "ja", "ko", "zh", "ar", "ru"];

/// A language as listed by the languages endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    /// ISO 639-1 code
    pub code: String,
    /// English name
    pub name: String,
}

/// Whether the code asks for source language detection
pub fn is_auto_detect(code: &str) -> bool {
    code.trim().eq_ignore_ascii_case(AUTO_DETECT)
}

/// Validate that a code is a known ISO 639-1 (2-letter) code
pub fn validate_language_code(code: &str) -> Result<()> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 && Language::from_639_1(&normalized_code).is_some() {
        return Ok(());
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    if is_auto_detect(code) {
        return Ok("Auto-detect".to_string());
    }

    let normalized_code = code.trim().to_lowercase();
    let lang = Language::from_639_1(&normalized_code)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}

/// Name of the language for log output, or the uppercased code when unknown
pub fn describe_language(code: &str) -> String {
    get_language_name(code).unwrap_or_else(|_| code.to_uppercase())
}

/// The target languages offered to clients
pub fn supported_languages() -> Vec<LanguageInfo> {
    SUPPORTED_TARGET_LANGUAGES
        .iter()
        .map(|code| LanguageInfo {
            code: code.to_string(),
            name: describe_language(code),
        })
        .collect()
}
