//! Parley REST API entry point.
//!
//! Binary name: `parley`
//!
//! Loads `.env`, parses CLI arguments, wires services, then either checks
//! configuration or starts the HTTP server. The NLU client is initialized in
//! a background task so the server accepts requests immediately.

mod cli;
mod http;
mod state;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error, info, warn};

use parley_core::chat::service::ChatService;
use parley_core::nlu::initializer::{NluClientFactory, initialize_client};
use parley_core::nlu::state::NluClientSlot;
use parley_core::payment::processor::BoxPaymentProcessor;
use parley_core::payment::service::PaymentService;
use parley_core::retry::RetryPolicy;
use parley_infra::dialogflow::{DialogflowClientFactory, DialogflowSettings};
use parley_infra::env::{EnvConfigSource, STRIPE_SECRET_KEY_VAR};
use parley_infra::stripe::StripeClient;
use parley_observe::stages;
use parley_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use http::router::{RouterConfig, build_router};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Values already in the environment win over `.env`.
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    init_tracing(cli.otel).map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "failed to load .env"),
    }

    let result = match cli.command.unwrap_or_default() {
        Commands::Serve => serve(&cli).await,
        Commands::Check => check(&cli),
    };

    shutdown_tracing();
    result
}

fn dialogflow_factory(cli: &Cli) -> DialogflowClientFactory {
    DialogflowClientFactory::new(
        EnvConfigSource::new(),
        DialogflowSettings {
            endpoint: cli.dialogflow_endpoint.clone(),
            token_uri: cli.token_uri.clone(),
            ..DialogflowSettings::default()
        },
    )
}

fn payment_service(cli: &Cli, source: &EnvConfigSource) -> anyhow::Result<PaymentService> {
    let processor = match source.stripe_secret_key() {
        Some(key) => {
            let client = StripeClient::new(key, cli.stripe_endpoint.clone())
                .context("failed to build Stripe client")?;
            Some(BoxPaymentProcessor::new(client))
        }
        None => {
            warn!(
                stage = stages::PAYMENT_ERROR,
                "{STRIPE_SECRET_KEY_VAR} is not set; the payment route will answer 500"
            );
            None
        }
    };
    Ok(PaymentService::new(processor, cli.currency.clone()))
}

async fn serve(cli: &Cli) -> anyhow::Result<()> {
    let router_config = RouterConfig::new(&cli.base_path, &cli.cors_origin)?;
    let source = EnvConfigSource::new();

    let slot = Arc::new(NluClientSlot::new());
    let chat = ChatService::new(Arc::clone(&slot))
        .with_request_timeout(Duration::from_secs(cli.nlu_timeout_secs));
    let payments = payment_service(cli, &source)?;
    info!(
        payments = payments.is_configured(),
        currency = payments.currency(),
        "payment service ready"
    );
    let state = AppState::new(chat, payments);

    let factory = dialogflow_factory(cli);
    tokio::spawn(async move {
        if let Err(e) = initialize_client(&slot, &factory, &RetryPolicy::startup()).await {
            error!(
                stage = stages::FATAL_ERROR,
                error = %e,
                "chatbot unavailable: NLU client initialization failed"
            );
        }
    });

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        addr = %listener.local_addr()?,
        base_path = %router_config.base_path,
        "Parley API listening"
    );

    let router = build_router(state, &router_config);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Validate configuration offline. Returns an error (non-zero exit) when
/// the chatbot cannot be initialized from the current environment.
fn check(cli: &Cli) -> anyhow::Result<()> {
    RouterConfig::new(&cli.base_path, &cli.cors_origin)?;

    let factory = dialogflow_factory(cli);
    let handle = factory
        .build()
        .map_err(|e| anyhow::anyhow!("chatbot configuration invalid: {e}"))?;
    println!("chatbot: ok (project {})", handle.account_id());

    let source = EnvConfigSource::new();
    let payments = payment_service(cli, &source)?;
    if payments.is_configured() {
        println!("payments: ok (currency {})", payments.currency());
    } else {
        println!("payments: not configured ({STRIPE_SECRET_KEY_VAR} unset)");
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
