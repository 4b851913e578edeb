//! BoxNluBackend -- object-safe dynamic dispatch wrapper for NluBackend.
//!
//! 1. An object-safe `NluBackendDyn` trait with boxed futures
//! 2. Blanket impl of `NluBackendDyn` for all `T: NluBackend`
//! 3. `BoxNluBackend` wraps `Box<dyn NluBackendDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use parley_types::chat::{DetectIntentRequest, DetectIntentResult};
use parley_types::error::NluError;

use super::backend::NluBackend;

/// Object-safe version of [`NluBackend`] with boxed futures.
pub trait NluBackendDyn: Send + Sync {
    fn name(&self) -> &str;

    fn detect_intent_boxed<'a>(
        &'a self,
        request: &'a DetectIntentRequest,
    ) -> Pin<Box<dyn Future<Output = Result<DetectIntentResult, NluError>> + Send + 'a>>;
}

impl<T: NluBackend> NluBackendDyn for T {
    fn name(&self) -> &str {
        NluBackend::name(self)
    }

    fn detect_intent_boxed<'a>(
        &'a self,
        request: &'a DetectIntentRequest,
    ) -> Pin<Box<dyn Future<Output = Result<DetectIntentResult, NluError>> + Send + 'a>> {
        Box::pin(self.detect_intent(request))
    }
}

/// Type-erased NLU backend.
///
/// `NluBackend` uses RPITIT and cannot be a trait object directly;
/// `BoxNluBackend` exposes the same methods over `NluBackendDyn`.
pub struct BoxNluBackend {
    inner: Box<dyn NluBackendDyn + Send + Sync>,
}

impl BoxNluBackend {
    /// Wrap a concrete `NluBackend` in a type-erased box.
    pub fn new<T: NluBackend + 'static>(backend: T) -> Self {
        Self {
            inner: Box::new(backend),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn detect_intent(
        &self,
        request: &DetectIntentRequest,
    ) -> Result<DetectIntentResult, NluError> {
        self.inner.detect_intent_boxed(request).await
    }
}
