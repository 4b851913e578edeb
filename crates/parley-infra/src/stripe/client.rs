//! StripeClient -- concrete [`PaymentProcessor`] for Stripe.
//!
//! The secret key is wrapped in [`SecretString`] and only exposed when
//! building the `Authorization` header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use parley_core::payment::processor::PaymentProcessor;
use parley_types::error::PaymentError;
use parley_types::payment::{PaymentIntent, PaymentIntentRequest};

use super::types::{CreatePaymentIntentForm, StripeErrorEnvelope, StripePaymentIntent};

/// Default Stripe API base URL.
pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Stripe REST client.
///
/// Does not implement `Debug` so the secret key cannot leak through it.
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: SecretString,
    base_url: String,
}

impl StripeClient {
    pub fn new(secret_key: SecretString, base_url: impl Into<String>) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            secret_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl PaymentProcessor for StripeClient {
    fn name(&self) -> &str {
        "stripe"
    }

    async fn create_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let form = CreatePaymentIntentForm {
            amount: request.amount,
            currency: request.currency.clone(),
        };

        let response = self
            .http
            .post(self.url("/v1/payment_intents"))
            .bearer_auth(self.secret_key.expose_secret())
            .form(&form)
            .send()
            .await
            .map_err(|e| PaymentError::Upstream {
                message: format!("HTTP request failed: {e}"),
                kind: None,
                code: None,
                status: None,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_body(status.as_u16(), &body));
        }

        let intent: StripePaymentIntent =
            response.json().await.map_err(|e| PaymentError::Upstream {
                message: format!("failed to parse response: {e}"),
                kind: None,
                code: None,
                status: Some(status.as_u16()),
            })?;

        let client_secret = intent.client_secret.ok_or_else(|| PaymentError::Upstream {
            message: "payment intent has no client secret".to_string(),
            kind: None,
            code: None,
            status: Some(status.as_u16()),
        })?;

        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
            amount: intent.amount,
            currency: intent.currency,
            status: intent.status,
        })
    }
}

/// Map a Stripe error response to [`PaymentError::Upstream`], keeping the
/// error object's `type` and `code` when present.
pub(crate) fn map_error_body(status: u16, body: &str) -> PaymentError {
    match serde_json::from_str::<StripeErrorEnvelope>(body) {
        Ok(envelope) => PaymentError::Upstream {
            message: envelope
                .error
                .message
                .unwrap_or_else(|| format!("HTTP {status}")),
            kind: envelope.error.kind,
            code: envelope.error.code,
            status: Some(status),
        },
        Err(_) => PaymentError::Upstream {
            message: format!("HTTP {status}: {body}"),
            kind: None,
            code: None,
            status: Some(status),
        },
    }
}
