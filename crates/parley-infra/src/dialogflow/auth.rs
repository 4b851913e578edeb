//! Google service-account authentication.
//!
//! Exchanges an RS256-signed JWT assertion for an OAuth access token at the
//! token endpoint and caches it until shortly before expiry. The signing key
//! is parsed once, at construction, so a malformed key fails client
//! construction rather than the first request.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Mutex;
use tracing::debug;

use parley_types::credentials::ServiceCredentials;
use parley_types::error::{InitError, NluError};

use super::types::{AssertionClaims, TokenErrorResponse, TokenResponse};

/// OAuth scope for the Dialogflow API.
pub const DIALOGFLOW_SCOPE: &str = "https://www.googleapis.com/auth/dialogflow";

/// Default Google OAuth token endpoint.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each assertion (Google's maximum).
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Tokens are refreshed this long before they expire.
const REFRESH_MARGIN_SECS: i64 = 60;

struct CachedToken {
    token: SecretString,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Access-token source for one service account.
///
/// Does not implement `Debug`: it holds the signing key and cached token.
pub struct ServiceAccountAuth {
    http: reqwest::Client,
    identity: String,
    signing_key: EncodingKey,
    token_uri: String,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    pub fn new(
        http: reqwest::Client,
        credentials: &ServiceCredentials,
        token_uri: impl Into<String>,
    ) -> Result<Self, InitError> {
        let signing_key =
            EncodingKey::from_rsa_pem(credentials.key_material().expose_secret().as_bytes())
                .map_err(|e| InitError::ClientConstruction(format!("invalid signing key: {e}")))?;

        Ok(Self {
            http,
            identity: credentials.identity().to_string(),
            signing_key,
            token_uri: token_uri.into(),
            cached: Mutex::new(None),
        })
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Sign a JWT assertion issued at `now`.
    pub fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String, NluError> {
        let claims = AssertionClaims {
            iss: self.identity.clone(),
            scope: DIALOGFLOW_SCOPE.to_string(),
            aud: self.token_uri.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
        };
        encode(&Header::new(Algorithm::RS256), &claims, &self.signing_key)
            .map_err(|e| NluError::Authentication(format!("jwt encode: {e}")))
    }

    /// A valid access token, fetching a new one when the cache is stale.
    ///
    /// The lock is held across the exchange so concurrent callers wait for a
    /// single refresh instead of each hitting the token endpoint.
    pub async fn access_token(&self) -> Result<SecretString, NluError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(SecretString::from(token.token.expose_secret().to_owned()));
        }

        let fresh = self.exchange(now).await?;
        let token = SecretString::from(fresh.token.expose_secret().to_owned());
        *cached = Some(fresh);
        Ok(token)
    }

    async fn exchange(&self, now: DateTime<Utc>) -> Result<CachedToken, NluError> {
        let assertion = self.sign_assertion(now)?;

        let response = self
            .http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| NluError::Upstream {
                message: format!("token request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<TokenErrorResponse>(&body)
                .map(|e| match e.error_description {
                    Some(description) => format!("{}: {description}", e.error),
                    None => e.error,
                })
                .unwrap_or(body);
            return Err(NluError::Authentication(format!(
                "token exchange failed (HTTP {status}): {detail}"
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            NluError::Deserialization(format!("failed to parse token response: {e}"))
        })?;

        let lifetime = token.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);
        debug!(
            identity = %self.identity,
            expires_in = lifetime,
            "obtained access token"
        );

        Ok(CachedToken {
            token: SecretString::from(token.access_token),
            expires_at: now + Duration::seconds(lifetime),
        })
    }
}
