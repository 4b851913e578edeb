//! Chat service: one detect-intent call per inbound message.
//!
//! The readiness check runs before payload validation, so a malformed body
//! sent while the client is not ready still gets "not initialized".

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use parley_observe::stages;
use parley_types::chat::{ChatReply, ConversationSession, DetectIntentRequest, LANGUAGE_CODE};
use parley_types::client::ClientStatus;
use parley_types::error::{ChatError, NluError};
use parley_types::time::now_iso8601;

use super::validation::validate_message;
use crate::nlu::state::NluClientSlot;

/// Serves chatbot requests against the shared NLU client slot.
#[derive(Debug, Clone)]
pub struct ChatService {
    client: Arc<NluClientSlot>,
    request_timeout: Option<Duration>,
}

impl ChatService {
    pub fn new(client: Arc<NluClientSlot>) -> Self {
        Self {
            client,
            request_timeout: None,
        }
    }

    /// Bound each detect-intent call. Exceeding it fails the request with
    /// [`NluError::Timeout`].
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn client_status(&self) -> ClientStatus {
        self.client.status()
    }

    /// Handle one chat payload (`None` when the body was absent or not JSON).
    pub async fn handle_payload(&self, payload: Option<&Value>) -> Result<ChatReply, ChatError> {
        let Some(handle) = self.client.handle() else {
            error!(
                stage = stages::REQUEST_ERROR,
                client_status = %self.client.status(),
                "Dialogflow client not initialized"
            );
            return Err(ChatError::ClientUninitialized);
        };

        let message = validate_message(payload).map_err(|e| {
            warn!(stage = stages::VALIDATION_ERROR, error = %e, "invalid chat payload");
            e
        })?;

        let session = ConversationSession::new(handle.account_id());
        info!(
            stage = stages::PROCESSING_REQUEST,
            session_id = %session.session_id,
            message_length = message.chars().count(),
            "sending detect-intent request"
        );

        let request = DetectIntentRequest {
            session_path: session.path,
            text: message.to_string(),
            language_code: LANGUAGE_CODE.to_string(),
        };

        let outcome = match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, handle.backend().detect_intent(&request))
                .await
                .unwrap_or(Err(NluError::Timeout(limit.as_secs()))),
            None => handle.backend().detect_intent(&request).await,
        };

        let result = outcome.map_err(|e| {
            error!(
                stage = stages::REQUEST_ERROR,
                session_id = %session.session_id,
                error_type = nlu_error_kind(&e),
                error_message = %e,
                "detect-intent request failed"
            );
            ChatError::Upstream(e)
        })?;

        info!(
            stage = stages::RESPONSE_RECEIVED,
            session_id = %session.session_id,
            has_response = true,
            has_text = result.fulfillment_text.is_some(),
            intent = result.intent_display_name.as_deref().unwrap_or(""),
            "detect-intent response received"
        );
        if let Some(confidence) = result.confidence {
            debug!(confidence, "intent detection confidence");
        }

        Ok(ChatReply {
            reply: result.fulfillment_text.unwrap_or_default(),
            timestamp: now_iso8601(),
        })
    }
}

fn nlu_error_kind(error: &NluError) -> &'static str {
    match error {
        NluError::Upstream { .. } => "UpstreamError",
        NluError::Authentication(_) => "AuthenticationError",
        NluError::RateLimited(_) => "RateLimitError",
        NluError::Deserialization(_) => "DeserializationError",
        NluError::Timeout(_) => "TimeoutError",
    }
}
