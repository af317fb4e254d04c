/*!
 * HTTP boundary of the relay.
 *
 * Routes:
 * - `POST /api/translate` - resolve `{ text, to, from? }` into the legacy
 *   `[ { translations: [ { text, to } ] } ]` shape
 * - `GET /api/languages` - target languages offered to clients
 * - `GET /health` - liveness check
 *
 * The provenance of each translation travels in the
 * `x-translation-provenance` header so the body keeps its legacy shape.
 */

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::app_config::ServerConfig;
use crate::errors::ResolveError;
use crate::language_utils::{supported_languages, LanguageInfo};
use crate::translation::{TranslationRequest, TranslationResolver, TranslationResult};

/// Response header carrying `external` or `fallback`
pub const PROVENANCE_HEADER: &str = "x-translation-provenance";

/// One translated text in the response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatedText {
    /// The translated text
    pub text: String,
    /// Target language code, echoed from the request
    pub to: String,
}

/// Element of the response array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationEnvelope {
    /// Always exactly one entry
    pub translations: Vec<TranslatedText>,
}

/// Error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Build the application router
pub fn router(resolver: Arc<TranslationResolver>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/languages", get(list_languages))
        .route("/api/translate", post(translate))
        .with_state(resolver)
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: &ServerConfig, resolver: Arc<TranslationResolver>) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to address {}", addr))?;

    info!("Translation relay listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(resolver))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Translation relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// Languages endpoint.
async fn list_languages() -> Json<Vec<LanguageInfo>> {
    Json(supported_languages())
}

/// Translate endpoint.
///
/// POST /api/translate
async fn translate(State(resolver): State<Arc<TranslationResolver>>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Rejecting unparseable request body: {}", e);
            return error_response(StatusCode::BAD_REQUEST, "Invalid JSON body");
        }
    };

    let request = request_from_payload(&payload);

    // Resolve on its own task so a panic inside resolution still gets an answer
    let task_resolver = Arc::clone(&resolver);
    let task_request = request.clone();
    let outcome = tokio::spawn(async move { task_resolver.resolve(&task_request).await }).await;

    let result = match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(ResolveError::InvalidRequest(message))) => {
            warn!("Rejecting translation request: {}", message);
            return error_response(StatusCode::BAD_REQUEST, &message);
        }
        Err(e) => {
            error!("Translation error: {}", e);
            resolver.fallback(&request.text, &request.target_language)
        }
    };

    translation_response(result, &request.target_language)
}

/// Read `text`, `to` and `from` from the payload; missing or non-string fields become empty
fn request_from_payload(payload: &Value) -> TranslationRequest {
    let field = |name: &str| payload.get(name).and_then(Value::as_str).unwrap_or_default().to_string();
    TranslationRequest::new(field("text"), field("to")).with_source(field("from"))
}

fn translation_response(result: TranslationResult, target_language: &str) -> Response {
    let body = vec![TranslationEnvelope {
        translations: vec![TranslatedText {
            text: result.translated_text,
            to: target_language.to_string(),
        }],
    }];

    let mut response = Json(body).into_response();
    response.headers_mut().insert(
        PROVENANCE_HEADER,
        HeaderValue::from_static(result.provenance.as_str()),
    );
    response
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse { error: message.to_string() })).into_response()
}
