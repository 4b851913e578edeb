//! Startup factory for the Dialogflow client.
//!
//! Each `build()` call is one initialization attempt: read configuration,
//! validate it, then construct the HTTP client and signing key.

use std::time::Duration;

use tracing::info;

use parley_core::credentials::validate_credentials;
use parley_core::nlu::box_backend::BoxNluBackend;
use parley_core::nlu::handle::ClientHandle;
use parley_core::nlu::initializer::NluClientFactory;
use parley_observe::stages;
use parley_types::error::InitError;

use super::auth::{DEFAULT_TOKEN_URI, ServiceAccountAuth};
use super::client::{DEFAULT_DIALOGFLOW_ENDPOINT, DialogflowClient};
use crate::env::EnvConfigSource;

/// Endpoints and transport limits for the Dialogflow client.
#[derive(Debug, Clone)]
pub struct DialogflowSettings {
    pub endpoint: String,
    pub token_uri: String,
    pub connect_timeout: Duration,
    pub http_timeout: Duration,
}

impl Default for DialogflowSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_DIALOGFLOW_ENDPOINT.to_string(),
            token_uri: DEFAULT_TOKEN_URI.to_string(),
            connect_timeout: Duration::from_secs(5),
            http_timeout: Duration::from_secs(30),
        }
    }
}

/// Builds [`DialogflowClient`] handles from an [`EnvConfigSource`].
pub struct DialogflowClientFactory {
    source: EnvConfigSource,
    settings: DialogflowSettings,
}

impl DialogflowClientFactory {
    pub fn new(source: EnvConfigSource, settings: DialogflowSettings) -> Self {
        Self { source, settings }
    }
}

impl NluClientFactory for DialogflowClientFactory {
    fn build(&self) -> Result<ClientHandle, InitError> {
        let validated = validate_credentials(self.source.load_raw_credentials())?;

        let http = reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.http_timeout)
            .build()
            .map_err(|e| InitError::ClientConstruction(format!("HTTP client: {e}")))?;

        let auth = ServiceAccountAuth::new(
            http.clone(),
            &validated.credentials,
            self.settings.token_uri.clone(),
        )?;

        info!(
            stage = stages::CLIENT_CREATION,
            project_id = %validated.project_id,
            identity = %auth.identity(),
            endpoint = %self.settings.endpoint,
            "Dialogflow client created"
        );

        let client = DialogflowClient::new(http, auth, self.settings.endpoint.clone());
        Ok(ClientHandle::new(
            BoxNluBackend::new(client),
            validated.project_id,
        ))
    }
}
