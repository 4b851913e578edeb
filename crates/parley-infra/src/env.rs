//! Environment-backed configuration source.
//!
//! Reads the chatbot credential variables and the payment processor key.
//! Values that are not valid Unicode are treated as absent. Empty values are
//! passed through; the credential validator decides what "missing" means.

use secrecy::SecretString;

use parley_types::credentials::{
    CLIENT_EMAIL_VAR, PRIVATE_KEY_VAR, PROJECT_ID_VAR, RawCredentialConfig,
};

/// Environment variable holding the Stripe secret key.
pub const STRIPE_SECRET_KEY_VAR: &str = "STRIPE_SECRET_KEY";

type Lookup = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Reads configuration values by variable name.
///
/// `new()` reads the process environment; `from_lookup` takes any function,
/// which keeps tests off the shared process environment.
pub struct EnvConfigSource {
    lookup: Box<Lookup>,
}

impl EnvConfigSource {
    pub fn new() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Box::new(lookup),
        }
    }

    fn var(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
    }

    /// The three chatbot credential variables, unvalidated.
    pub fn load_raw_credentials(&self) -> RawCredentialConfig {
        RawCredentialConfig {
            project_id: self.var(PROJECT_ID_VAR),
            client_email: self.var(CLIENT_EMAIL_VAR),
            private_key: self.var(PRIVATE_KEY_VAR).map(SecretString::from),
        }
    }

    /// The Stripe secret key, if set and non-empty.
    pub fn stripe_secret_key(&self) -> Option<SecretString> {
        self.var(STRIPE_SECRET_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .map(SecretString::from)
    }
}

impl Default for EnvConfigSource {
    fn default() -> Self {
        Self::new()
    }
}
