/*!
 * The ordered multi-backend fallback chain.
 *
 * A chain tries a fixed, configuration-ordered list of providers and stops at
 * the first success. Every provider failure is converted into a diagnostic
 * string at the call boundary; when the whole list is exhausted, a final,
 * always-succeeding local fallback synthesizes a placeholder artifact from
 * the request's textual fields. A resolution therefore always terminates with
 * an artifact and never surfaces a provider error to the caller.
 *
 * No provider is retried within a single resolution, there is no backoff and
 * no dynamic re-ranking; priority is exactly the order the providers were
 * registered in.
 */

use log::{debug, warn};

use crate::content::ContentRequest;
use crate::providers::Provider;

/// Provider tag used when the local fallback produced the artifact
pub const LOCAL_PROVIDER: &str = "local";

/// The outcome of one resolution: the artifact, the provider that produced
/// it, and the diagnostics collected from earlier failed attempts
#[derive(Debug, Clone)]
pub struct Resolution<A> {
    /// The produced artifact
    pub artifact: A,
    /// Name of the provider that produced it (`"local"` for the fallback)
    pub provider: String,
    /// One diagnostic string per failed provider attempt, in chain order
    pub diagnostics: Vec<String>,
}

impl<A> Resolution<A> {
    /// Whether the artifact came from the local fallback rather than a
    /// remote provider
    pub fn is_fallback(&self) -> bool {
        self.provider == LOCAL_PROVIDER
    }
}

/// The terminal, always-succeeding step of a fallback chain.
///
/// Synthesizes a placeholder artifact purely from the request's textual
/// fields; it performs no network I/O and must be deterministic so that
/// resolving the same request twice yields structurally equivalent output.
pub trait LocalFallback<A>: Send + Sync {
    /// Synthesize a placeholder artifact for the request
    fn synthesize(&self, request: &ContentRequest) -> A;
}

/// An ordered provider list paired with its local fallback
pub struct FallbackChain<A> {
    /// Providers in priority order
    providers: Vec<Box<dyn Provider<A>>>,
    /// Terminal fallback
    fallback: Box<dyn LocalFallback<A>>,
}

impl<A> FallbackChain<A> {
    /// Create a chain from an ordered provider list and a local fallback
    pub fn new(providers: Vec<Box<dyn Provider<A>>>, fallback: Box<dyn LocalFallback<A>>) -> Self {
        Self {
            providers,
            fallback,
        }
    }

    /// Number of remote providers in the chain
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the chain has no remote providers (only the local fallback)
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Resolve a request by trying each provider in order and degrading to
    /// the local fallback when all of them fail
    pub async fn resolve(&self, request: &ContentRequest) -> Resolution<A> {
        let mut diagnostics = Vec::new();

        for provider in &self.providers {
            match provider.attempt(request).await {
                Ok(artifact) => {
                    debug!(
                        "Provider '{}' produced an artifact for '{}'",
                        provider.name(),
                        request.text
                    );
                    return Resolution {
                        artifact,
                        provider: provider.name().to_string(),
                        diagnostics,
                    };
                }
                Err(reason) => {
                    warn!(
                        "Provider '{}' failed for '{}': {}",
                        provider.name(),
                        request.text,
                        reason
                    );
                    diagnostics.push(format!("{}: {}", provider.name(), reason));
                }
            }
        }

        debug!(
            "All {} providers failed for '{}', using local fallback",
            self.providers.len(),
            request.text
        );

        Resolution {
            artifact: self.fallback.synthesize(request),
            provider: LOCAL_PROVIDER.to_string(),
            diagnostics,
        }
    }
}
