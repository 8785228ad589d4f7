/*!
 * Backend fallback resolution.
 *
 * This module contains the ordered multi-backend fallback strategy used when
 * generating an image or translation for a flashcard:
 * - `resolver::chain`: the fallback chain itself
 * - `resolver::placeholder`: the always-succeeding local fallbacks
 * - `resolver::rate_limit`: the rolling-window action counter guarding
 *   user-initiated resolutions
 */

pub mod chain;
pub mod placeholder;
pub mod rate_limit;

// Re-export main types
pub use chain::{FallbackChain, LocalFallback, Resolution, LOCAL_PROVIDER};
pub use placeholder::{EchoTranslation, PlaceholderImage};
pub use rate_limit::ActionLimiter;
