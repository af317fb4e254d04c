/*!
 * Translation resolution for the relay.
 *
 * - `core`: request/result types and the `TranslationResolver`
 * - `formatting`: markup cleanup applied to every returned text
 */

// Re-export main types for easier usage
pub use self::core::{Provenance, TranslationRequest, TranslationResolver, TranslationResult, AUTO_DETECT};
pub use self::formatting::strip_html_tags;

// Submodules
pub mod core;
pub mod formatting;
