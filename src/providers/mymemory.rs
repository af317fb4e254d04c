use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Public MyMemory endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// Status MyMemory reports inside the payload on success
const SUCCESS_STATUS: u64 = 200;

/// MyMemory client for the `get` translation endpoint
#[derive(Debug)]
pub struct MyMemory {
    /// HTTP client for API requests
    client: Client,
    /// Full URL of the `get` endpoint
    endpoint: String,
}

/// Response body of the `get` endpoint
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryResponse {
    /// Translation payload, absent or null on some errors
    #[serde(default)]
    pub response_data: Option<MyMemoryResponseData>,

    /// Status code reported by the service; a number on success, sometimes a string on errors
    #[serde(default)]
    pub response_status: serde_json::Value,

    /// Human readable detail, mostly populated on errors
    #[serde(default)]
    pub response_details: Option<String>,
}

/// Translation payload inside a MyMemory response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryResponseData {
    /// The translated text, possibly containing markup
    #[serde(default)]
    pub translated_text: Option<String>,

    /// Match quality reported by the translation memory
    #[serde(default, rename = "match")]
    pub match_score: Option<f64>,
}

impl MyMemoryResponse {
    /// Whether the payload reports success
    pub fn is_success(&self) -> bool {
        self.response_status.as_u64() == Some(SUCCESS_STATUS)
    }

    /// Match quality of the returned translation, when reported
    pub fn match_score(&self) -> Option<f64> {
        self.response_data.as_ref().and_then(|data| data.match_score)
    }
}

impl MyMemory {
    /// Create a new client without a request timeout
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ProviderError> {
        Self::new_with_config(endpoint, None)
    }

    /// Create a new client with an optional request timeout
    pub fn new_with_config(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to build MyMemory HTTP client: {}", e)))?;

        let endpoint = endpoint.into();
        Ok(Self {
            client,
            endpoint: if endpoint.is_empty() { DEFAULT_ENDPOINT.to_string() } else { endpoint },
        })
    }

    /// The endpoint this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the request URL with the text and language pair as query parameters
    pub fn request_url(&self, text: &str, source_language: &str, target_language: &str) -> Result<Url, ProviderError> {
        let langpair = format!("{}|{}", source_language, target_language);
        Url::parse_with_params(&self.endpoint, &[("q", text), ("langpair", langpair.as_str())])
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid MyMemory endpoint {}: {}", self.endpoint, e)))
    }

    /// Send one `get` request and decode the body
    pub async fn complete(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<MyMemoryResponse, ProviderError> {
        let url = self.request_url(text, source_language, target_language)?;

        let response = self.client.get(url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to send request to MyMemory API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("MyMemory API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        response.json::<MyMemoryResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse MyMemory API response: {}", e)))
    }

    /// Extract the translated text from a successful response
    pub fn extract_text(response: &MyMemoryResponse) -> Result<String, ProviderError> {
        if !response.is_success() {
            let status_code = match &response.response_status {
                serde_json::Value::Number(n) => n.as_u64().unwrap_or(0),
                serde_json::Value::String(s) => s.parse().unwrap_or(0),
                _ => 0,
            };
            return Err(ProviderError::ApiError {
                status_code: u16::try_from(status_code).unwrap_or(0),
                message: response.response_details.clone()
                    .unwrap_or_else(|| "MyMemory reported a failure".to_string()),
            });
        }

        response.response_data.as_ref()
            .and_then(|data| data.translated_text.clone())
            .ok_or_else(|| ProviderError::ParseError("Missing responseData.translatedText".to_string()))
    }
}

#[async_trait]
impl Provider for MyMemory {
    fn name(&self) -> &str {
        "MyMemory"
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let response = self.complete(text, source_language, target_language).await?;
        let translated = Self::extract_text(&response)?;
        match response.match_score() {
            Some(score) => debug!(
                "MyMemory returned {} chars ({} -> {}), match {:.2}",
                translated.chars().count(), source_language, target_language, score
            ),
            None => debug!(
                "MyMemory returned {} chars ({} -> {})",
                translated.chars().count(), source_language, target_language
            ),
        }
        Ok(translated)
    }
}
