//! Service-account credential types.
//!
//! `RawCredentialConfig` is what the process configuration hands over before
//! any checks run. `ServiceCredentials` only exists after validation
//! (see `parley_core::credentials`).

use secrecy::SecretString;

/// Environment variable holding the NLU project / account identifier.
pub const PROJECT_ID_VAR: &str = "PROJECT_ID";

/// Environment variable holding the service-account identity (client email).
pub const CLIENT_EMAIL_VAR: &str = "GOOGLE_CLIENT_EMAIL";

/// Environment variable holding the newline-escaped PEM private key.
pub const PRIVATE_KEY_VAR: &str = "GOOGLE_PRIVATE_KEY";

/// Unvalidated chatbot configuration values, as read from the environment.
#[derive(Default)]
pub struct RawCredentialConfig {
    pub project_id: Option<String>,
    pub client_email: Option<String>,
    pub private_key: Option<SecretString>,
}

impl std::fmt::Debug for RawCredentialConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawCredentialConfig")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key_present", &self.private_key.is_some())
            .finish()
    }
}

/// Validated service-account credentials.
///
/// Immutable once built. The key material is held as a [`SecretString`] with
/// escaped newlines already normalized, so it never shows up in `Debug`.
#[derive(Debug)]
pub struct ServiceCredentials {
    identity: String,
    key_material: SecretString,
}

impl ServiceCredentials {
    /// Build credentials from already-validated parts.
    ///
    /// Callers outside `parley-core` should go through the validator instead.
    pub fn new(identity: String, key_material: SecretString) -> Self {
        Self {
            identity,
            key_material,
        }
    }

    /// The service-account identity (e.g. `bot@project.iam.gserviceaccount.com`).
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// The PEM-encoded private key.
    pub fn key_material(&self) -> &SecretString {
        &self.key_material
    }
}

/// Output of a successful validation: project id plus credentials.
#[derive(Debug)]
pub struct ValidatedConfig {
    pub project_id: String,
    pub credentials: ServiceCredentials,
}
