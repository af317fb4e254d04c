/*!
 * # transrelay - translation relay with a dictionary fallback
 *
 * A Rust library and HTTP service that resolves short texts into a target
 * language for a browser translation UI.
 *
 * ## Features
 *
 * - Proxy the public MyMemory translation API
 * - Fall back to a built-in phrase dictionary on any upstream failure
 * - Optional dictionary extension file
 * - Explicit provenance (`external` or `fallback`) for every result
 * - Legacy-compatible `POST /api/translate` JSON route
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: Resolution of requests:
 *   - `translation::core`: The resolver and its request/result types
 *   - `translation::formatting`: Markup stripping
 * - `dictionary`: The static fallback phrase table
 * - `providers`: Client implementations for external services:
 *   - `providers::mymemory`: MyMemory API client
 *   - `providers::mock`: Scripted provider for tests
 * - `server`: HTTP routes
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod dictionary;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod server;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use dictionary::Dictionary;
pub use translation::{Provenance, TranslationRequest, TranslationResolver, TranslationResult};
pub use language_utils::{get_language_name, supported_languages};
pub use errors::{AppError, ProviderError, ResolveError};
