//! Diagnostic stage names.
//!
//! Every diagnostic record carries a `stage` field with one of these values so
//! log consumers can follow the chatbot lifecycle without parsing messages:
//!
//! ```no_run
//! use parley_observe::stages;
//! tracing::info!(stage = stages::INIT_SUCCESS, "client initialized");
//! ```

// --- Credential validation ---

/// Presence/length report of the chatbot environment variables.
pub const ENV_VARS_STATUS: &str = "ENV_VARS_STATUS";

/// Credential format checks passed.
pub const CREDENTIALS_VALIDATION: &str = "CREDENTIALS_VALIDATION";

// --- Client initialization ---

/// The NLU client object was constructed.
pub const CLIENT_CREATION: &str = "CLIENT_CREATION";

/// A single initialization attempt failed.
pub const INITIALIZATION_ERROR: &str = "INITIALIZATION_ERROR";

/// Initialization completed; the client is ready.
pub const INIT_SUCCESS: &str = "INIT_SUCCESS";

/// An attempt failed; another may follow.
pub const INIT_RETRY: &str = "INIT_RETRY";

/// Attempt bound reached; initialization failed.
pub const INIT_FAILED: &str = "INIT_FAILED";

/// Initialization failure reported by the process supervisor.
pub const FATAL_ERROR: &str = "FATAL_ERROR";

// --- Chat requests ---

/// A chat request could not be served (client missing or backend failure).
pub const REQUEST_ERROR: &str = "REQUEST_ERROR";

/// The chat payload failed validation.
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";

/// A detect-intent call is about to be sent.
pub const PROCESSING_REQUEST: &str = "PROCESSING_REQUEST";

/// The detect-intent call returned.
pub const RESPONSE_RECEIVED: &str = "RESPONSE_RECEIVED";

// --- Payments ---

/// A payment intent is about to be created.
pub const PAYMENT_REQUEST: &str = "PAYMENT_REQUEST";

/// Payment intent creation failed.
pub const PAYMENT_ERROR: &str = "PAYMENT_ERROR";
