//! NluBackend trait definition.

use parley_types::chat::{DetectIntentRequest, DetectIntentResult};
use parley_types::error::NluError;

/// Trait for natural-language-understanding backends.
///
/// Narrow on purpose: one detect-intent call keyed by session path, text
/// and language. Implementations live in parley-infra (e.g. `DialogflowClient`).
pub trait NluBackend: Send + Sync {
    /// Human-readable backend name (e.g. "dialogflow").
    fn name(&self) -> &str;

    /// Detect the intent of a free-text query and return the fulfillment.
    fn detect_intent(
        &self,
        request: &DetectIntentRequest,
    ) -> impl std::future::Future<Output = Result<DetectIntentResult, NluError>> + Send;
}
