//! Payment processor trait and its type-erased wrapper.

use std::future::Future;
use std::pin::Pin;

use parley_types::error::PaymentError;
use parley_types::payment::{PaymentIntent, PaymentIntentRequest};

/// A payment processor able to create payment intents.
pub trait PaymentProcessor: Send + Sync {
    fn name(&self) -> &str;

    fn create_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> impl Future<Output = Result<PaymentIntent, PaymentError>> + Send;
}

/// Object-safe version of [`PaymentProcessor`] with boxed futures.
pub trait PaymentProcessorDyn: Send + Sync {
    fn name(&self) -> &str;

    fn create_intent_boxed<'a>(
        &'a self,
        request: &'a PaymentIntentRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PaymentIntent, PaymentError>> + Send + 'a>>;
}

impl<T: PaymentProcessor> PaymentProcessorDyn for T {
    fn name(&self) -> &str {
        PaymentProcessor::name(self)
    }

    fn create_intent_boxed<'a>(
        &'a self,
        request: &'a PaymentIntentRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PaymentIntent, PaymentError>> + Send + 'a>> {
        Box::pin(self.create_intent(request))
    }
}

/// Type-erased payment processor.
pub struct BoxPaymentProcessor {
    inner: Box<dyn PaymentProcessorDyn + Send + Sync>,
}

impl BoxPaymentProcessor {
    pub fn new<T: PaymentProcessor + 'static>(processor: T) -> Self {
        Self {
            inner: Box::new(processor),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn create_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        self.inner.create_intent_boxed(request).await
    }
}

impl std::fmt::Debug for BoxPaymentProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BoxPaymentProcessor")
            .field(&self.name())
            .finish()
    }
}
