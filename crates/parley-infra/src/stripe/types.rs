//! Stripe REST API types.

use serde::{Deserialize, Serialize};

/// Form body for `POST /v1/payment_intents`.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePaymentIntentForm {
    pub amount: u64,
    pub currency: String,
}

/// The subset of the PaymentIntent object Parley reads.
#[derive(Debug, Clone, Deserialize)]
pub struct StripePaymentIntent {
    pub id: String,
    pub client_secret: Option<String>,
    pub amount: u64,
    pub currency: String,
    pub status: String,
}

/// Stripe error envelope: `{"error": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorEnvelope {
    pub error: StripeError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeError {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub code: Option<String>,
    pub param: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_envelope_parses() {
        let env: StripeErrorEnvelope = serde_json::from_value(json!({
            "error": {
                "message": "Invalid API Key provided: sk_test_****",
                "type": "invalid_request_error"
            }
        }))
        .unwrap();
        assert_eq!(env.error.kind.as_deref(), Some("invalid_request_error"));
        assert!(env.error.code.is_none());
    }

    #[test]
    fn test_payment_intent_parses() {
        let intent: StripePaymentIntent = serde_json::from_value(json!({
            "id": "pi_1",
            "object": "payment_intent",
            "amount": 49900,
            "currency": "inr",
            "client_secret": "pi_1_secret_x",
            "status": "requires_payment_method"
        }))
        .unwrap();
        assert_eq!(intent.client_secret.as_deref(), Some("pi_1_secret_x"));
    }
}
