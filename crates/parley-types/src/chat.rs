//! Chat request/response types.
//!
//! These model the chatbot route: the per-request conversation session, the
//! provider-agnostic detect-intent request/result, and the success body.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Language tag sent with every detect-intent query.
pub const LANGUAGE_CODE: &str = "en-US";

/// A single-use conversation session.
///
/// Created per inbound chat request and dropped after the response; there is
/// no multi-turn memory across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSession {
    pub session_id: Uuid,
    pub path: String,
}

impl ConversationSession {
    /// Create a session with a fresh random (v4) identifier.
    pub fn new(account_id: &str) -> Self {
        Self::with_id(account_id, Uuid::new_v4())
    }

    /// Create a session for a known identifier.
    pub fn with_id(account_id: &str, session_id: Uuid) -> Self {
        Self {
            session_id,
            path: session_path(account_id, &session_id),
        }
    }
}

/// Build the backend session path for an account and session id.
pub fn session_path(account_id: &str, session_id: &Uuid) -> String {
    format!("projects/{account_id}/agent/sessions/{session_id}")
}

/// Provider-agnostic detect-intent request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectIntentRequest {
    pub session_path: String,
    pub text: String,
    pub language_code: String,
}

/// Provider-agnostic detect-intent result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectIntentResult {
    pub fulfillment_text: Option<String>,
    pub intent_display_name: Option<String>,
    pub confidence: Option<f64>,
}

/// Successful chatbot response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub timestamp: String,
}
