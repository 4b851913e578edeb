use serde_json::Value;
use tracing::{error, info};

use parley_observe::stages;
use parley_types::error::PaymentError;
use parley_types::payment::{PaymentIntentCreated, PaymentIntentRequest};

use super::processor::BoxPaymentProcessor;

/// Name of the payload field carrying the amount in the smallest currency unit.
pub const AMOUNT_FIELD: &str = "amount";

/// Creates payment intents for the payment route.
///
/// `processor` is `None` when no processor key is configured; every request
/// then fails with [`PaymentError::NotConfigured`].
#[derive(Debug)]
pub struct PaymentService {
    processor: Option<BoxPaymentProcessor>,
    currency: String,
}

impl PaymentService {
    pub fn new(processor: Option<BoxPaymentProcessor>, currency: impl Into<String>) -> Self {
        Self {
            processor,
            currency: currency.into().to_lowercase(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.processor.is_some()
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Create a payment intent from a parsed request body.
    pub async fn create_intent(
        &self,
        payload: Option<&Value>,
    ) -> Result<PaymentIntentCreated, PaymentError> {
        let Some(processor) = &self.processor else {
            error!(stage = stages::PAYMENT_ERROR, "payment processor not configured");
            return Err(PaymentError::NotConfigured);
        };

        let amount = parse_amount(payload).inspect_err(|e| {
            error!(stage = stages::PAYMENT_ERROR, error = %e, "invalid payment amount");
        })?;

        info!(
            stage = stages::PAYMENT_REQUEST,
            amount,
            currency = %self.currency,
            processor = processor.name(),
            "creating payment intent"
        );

        let request = PaymentIntentRequest {
            amount,
            currency: self.currency.clone(),
        };

        let intent = processor.create_intent(&request).await.inspect_err(|e| {
            error!(
                stage = stages::PAYMENT_ERROR,
                error_message = %e,
                "payment intent creation failed"
            );
        })?;

        info!(intent_id = %intent.id, status = %intent.status, "payment intent created");

        Ok(PaymentIntentCreated {
            client_secret: intent.client_secret,
        })
    }
}

/// Positive integer amounts only. Floats, strings and zero are rejected.
fn parse_amount(payload: Option<&Value>) -> Result<u64, PaymentError> {
    payload
        .and_then(Value::as_object)
        .and_then(|body| body.get(AMOUNT_FIELD))
        .and_then(Value::as_u64)
        .filter(|amount| *amount > 0)
        .ok_or(PaymentError::InvalidAmount)
}
