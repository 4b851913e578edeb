//! DialogflowClient -- concrete [`NluBackend`] for Dialogflow ES.
//!
//! Sends `detectIntent` requests to the Dialogflow v2 REST API with a
//! bearer token from [`ServiceAccountAuth`].

use secrecy::ExposeSecret;

use parley_core::nlu::backend::NluBackend;
use parley_types::chat::{DetectIntentRequest, DetectIntentResult};
use parley_types::error::NluError;

use super::auth::ServiceAccountAuth;
use super::types::{DetectIntentBody, DetectIntentResponse, GoogleErrorEnvelope};

/// Default Dialogflow API endpoint.
pub const DEFAULT_DIALOGFLOW_ENDPOINT: &str = "https://dialogflow.googleapis.com";

/// Dialogflow ES client bound to one service account.
///
/// Does not implement `Debug`; see [`ServiceAccountAuth`].
pub struct DialogflowClient {
    http: reqwest::Client,
    auth: ServiceAccountAuth,
    endpoint: String,
}

impl DialogflowClient {
    pub fn new(http: reqwest::Client, auth: ServiceAccountAuth, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            auth,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the detect-intent URL for a session path.
    fn url(&self, session_path: &str) -> String {
        format!("{}/v2/{}:detectIntent", self.endpoint, session_path)
    }
}

impl NluBackend for DialogflowClient {
    fn name(&self) -> &str {
        "dialogflow"
    }

    async fn detect_intent(
        &self,
        request: &DetectIntentRequest,
    ) -> Result<DetectIntentResult, NluError> {
        let token = self.auth.access_token().await?;
        let body = DetectIntentBody::text(&request.text, &request.language_code);

        let response = self
            .http
            .post(self.url(&request.session_path))
            .bearer_auth(token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| NluError::Upstream {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(map_error_status(status.as_u16(), &error_body));
        }

        let parsed: DetectIntentResponse = response.json().await.map_err(|e| {
            NluError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        let result = parsed.query_result.unwrap_or_default();
        Ok(DetectIntentResult {
            fulfillment_text: result.fulfillment_text,
            intent_display_name: result.intent.and_then(|intent| intent.display_name),
            confidence: result.intent_detection_confidence,
        })
    }
}

/// Map a non-success status and body to an [`NluError`].
///
/// The message is Google's `error.message` when the body is a Google error
/// envelope, otherwise `HTTP <status>: <body>`.
pub(crate) fn map_error_status(status: u16, body: &str) -> NluError {
    let message = serde_json::from_str::<GoogleErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .unwrap_or_else(|| format!("HTTP {status}: {body}"));

    match status {
        401 | 403 => NluError::Authentication(message),
        429 => NluError::RateLimited(message),
        _ => NluError::Upstream { message },
    }
}
