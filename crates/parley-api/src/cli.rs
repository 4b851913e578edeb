//! CLI definitions for the `parley` binary.
//!
//! Every setting is a flag with an environment-variable fallback, so the
//! server can be configured entirely from `.env`.

use clap::{Parser, Subcommand};

use parley_infra::dialogflow::auth::DEFAULT_TOKEN_URI;
use parley_infra::dialogflow::client::DEFAULT_DIALOGFLOW_ENDPOINT;
use parley_infra::stripe::client::DEFAULT_STRIPE_API_BASE;
use parley_types::payment::DEFAULT_CURRENCY;

/// Chatbot and payment backend for the web frontend.
#[derive(Parser, Debug)]
#[command(name = "parley", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000, global = true)]
    pub port: u16,

    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0", global = true)]
    pub host: String,

    /// Path prefix for the chatbot and payment routes.
    #[arg(long, env = "BASE_PATH", default_value = "/api2", global = true)]
    pub base_path: String,

    /// Origin allowed by CORS (`*` allows any).
    #[arg(
        long,
        env = "CORS_ORIGIN",
        default_value = "http://localhost:5173",
        global = true
    )]
    pub cors_origin: String,

    /// Deadline for each detect-intent call, in seconds.
    #[arg(
        long,
        env = "NLU_REQUEST_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub nlu_timeout_secs: u64,

    /// Dialogflow API base URL.
    #[arg(
        long,
        env = "DIALOGFLOW_ENDPOINT",
        default_value = DEFAULT_DIALOGFLOW_ENDPOINT,
        global = true
    )]
    pub dialogflow_endpoint: String,

    /// Google OAuth token endpoint.
    #[arg(long, env = "GOOGLE_TOKEN_URI", default_value = DEFAULT_TOKEN_URI, global = true)]
    pub token_uri: String,

    /// Stripe API base URL.
    #[arg(
        long,
        env = "STRIPE_API_BASE",
        default_value = DEFAULT_STRIPE_API_BASE,
        global = true
    )]
    pub stripe_endpoint: String,

    /// Currency for payment intents (lowercase ISO 4217).
    #[arg(long, env = "PAYMENT_CURRENCY", default_value = DEFAULT_CURRENCY, global = true)]
    pub currency: String,

    /// Also export spans to stdout through OpenTelemetry.
    #[arg(long, env = "PARLEY_OTEL", default_value_t = false, global = true)]
    pub otel: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default).
    #[default]
    Serve,

    /// Validate chatbot and payment configuration without contacting any service.
    Check,
}
