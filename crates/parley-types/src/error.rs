use thiserror::Error;

/// Errors from validating chatbot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "Missing required environment variables: {}. Please ensure all required variables are set in your .env file",
        .0.join(", ")
    )]
    MissingVariables(Vec<String>),

    #[error("{0}")]
    InvalidCredentialFormat(String),
}

impl ConfigError {
    /// Names of the missing variables, empty for format errors.
    pub fn missing(&self) -> &[String] {
        match self {
            ConfigError::MissingVariables(names) => names,
            ConfigError::InvalidCredentialFormat(_) => &[],
        }
    }
}

/// Errors from a single NLU client initialization attempt.
#[derive(Debug, Clone, Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("client construction failed: {0}")]
    ClientConstruction(String),

    #[error("initialization already in progress")]
    InProgress,
}

/// Errors from the NLU backend.
#[derive(Debug, Clone, Error)]
pub enum NluError {
    #[error("{message}")]
    Upstream { message: String },

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("quota exceeded: {0}")]
    RateLimited(String),

    #[error("invalid response: {0}")]
    Deserialization(String),

    #[error("detect intent timed out after {0}s")]
    Timeout(u64),
}

/// Per-request validation failures on the chatbot payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChatValidationError {
    #[error("'message' is required.")]
    MissingMessage,

    #[error("'message' must be a string.")]
    NotAString,
}

/// Errors surfaced by the chat request flow.
#[derive(Debug, Clone, Error)]
pub enum ChatError {
    #[error("Dialogflow client not initialized")]
    ClientUninitialized,

    #[error(transparent)]
    Validation(#[from] ChatValidationError),

    #[error(transparent)]
    Upstream(#[from] NluError),
}

/// Errors surfaced by the payment route.
#[derive(Debug, Clone, Error)]
pub enum PaymentError {
    #[error("'amount' must be a positive integer.")]
    InvalidAmount,

    #[error("Payment processor not configured")]
    NotConfigured,

    #[error("{message}")]
    Upstream {
        message: String,
        kind: Option<String>,
        code: Option<String>,
        status: Option<u16>,
    },
}
