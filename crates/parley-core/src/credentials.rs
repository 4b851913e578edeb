//! Credential validation for the NLU service account.
//!
//! Checks run in two passes:
//! 1. Presence: every absent or empty variable is collected and reported at once.
//! 2. Format: identity must contain `@`; the key (after `\n` unescaping) must
//!    contain a PKCS#8 private-key header.
//!
//! Key material is never logged, only whether it is present.

use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use parley_observe::stages;
use parley_types::credentials::{
    CLIENT_EMAIL_VAR, PRIVATE_KEY_VAR, PROJECT_ID_VAR, RawCredentialConfig, ServiceCredentials,
    ValidatedConfig,
};
use parley_types::error::ConfigError;

/// Marker that must appear in the private key once newlines are normalized.
pub const PEM_PRIVATE_KEY_MARKER: &str = "BEGIN PRIVATE KEY";

/// Validate raw configuration into a project id plus service credentials.
pub fn validate_credentials(raw: RawCredentialConfig) -> Result<ValidatedConfig, ConfigError> {
    let project_id = non_empty(raw.project_id);
    let client_email = non_empty(raw.client_email);
    let private_key = raw
        .private_key
        .filter(|key| !key.expose_secret().is_empty());

    let (project_id, client_email, private_key) = match (project_id, client_email, private_key) {
        (Some(p), Some(e), Some(k)) => (p, e, k),
        (p, e, k) => {
            let missing = [
                (PROJECT_ID_VAR, p.is_none()),
                (CLIENT_EMAIL_VAR, e.is_none()),
                (PRIVATE_KEY_VAR, k.is_none()),
            ]
            .into_iter()
            .filter(|(_, absent)| *absent)
            .map(|(name, _)| name.to_string())
            .collect();
            return Err(ConfigError::MissingVariables(missing));
        }
    };

    info!(
        stage = stages::ENV_VARS_STATUS,
        project_id_length = project_id.len(),
        client_email_length = client_email.len(),
        private_key_exists = true,
        "chatbot environment variables present"
    );

    let key_material = normalize_private_key(&private_key);

    if !client_email.contains('@') {
        return Err(ConfigError::InvalidCredentialFormat(
            "Invalid client email format".to_string(),
        ));
    }

    if !key_material.expose_secret().contains(PEM_PRIVATE_KEY_MARKER) {
        return Err(ConfigError::InvalidCredentialFormat(
            "Invalid private key format".to_string(),
        ));
    }

    info!(
        stage = stages::CREDENTIALS_VALIDATION,
        "credentials format validated successfully"
    );

    Ok(ValidatedConfig {
        project_id,
        credentials: ServiceCredentials::new(client_email, key_material),
    })
}

/// Replace literal `\n` escape sequences with real newlines.
///
/// Keys pasted into `.env` files usually arrive single-line with escaped
/// newlines; PEM parsers need the real ones.
pub fn normalize_private_key(key: &SecretString) -> SecretString {
    SecretString::from(key.expose_secret().replace("\\n", "\n"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
