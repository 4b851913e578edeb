//! Dialogflow v2 and Google OAuth wire types.
//!
//! These are Dialogflow-specific request/response structures. They are NOT
//! the provider-agnostic detect-intent types from parley-types.

use serde::{Deserialize, Serialize};

/// Request body for `projects/*/agent/sessions/*:detectIntent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectIntentBody {
    pub query_input: QueryInput,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryInput {
    pub text: TextInput,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInput {
    pub text: String,
    pub language_code: String,
}

impl DetectIntentBody {
    pub fn text(text: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            query_input: QueryInput {
                text: TextInput {
                    text: text.into(),
                    language_code: language_code.into(),
                },
            },
        }
    }
}

/// Response body of `detectIntent`. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectIntentResponse {
    pub response_id: Option<String>,
    pub query_result: Option<QueryResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub query_text: Option<String>,
    pub fulfillment_text: Option<String>,
    pub intent: Option<Intent>,
    pub intent_detection_confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: Option<String>,
    pub display_name: Option<String>,
}

/// Google API error envelope: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorEnvelope {
    pub error: GoogleError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleError {
    pub code: Option<u16>,
    pub message: Option<String>,
    pub status: Option<String>,
}

/// Claims of the service-account JWT assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Successful OAuth token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
}

/// OAuth token endpoint error: `{"error", "error_description"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}
