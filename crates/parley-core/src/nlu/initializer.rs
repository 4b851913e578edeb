//! NLU client initialization with bounded retry.
//!
//! Runs once at startup: moves the slot to `Initializing`, asks the factory
//! for a client up to `policy.max_attempts` times, then records `Ready` or
//! `Failed`. Requests that arrive meanwhile see "not initialized".

use std::sync::Arc;

use tracing::{error, info, warn};

use parley_observe::stages;
use parley_types::error::InitError;

use super::handle::ClientHandle;
use super::state::{ClientState, NluClientSlot};
use crate::retry::{RetryPolicy, retry_with_backoff};

/// Builds a [`ClientHandle`] from process configuration.
///
/// One call is one attempt: validate configuration, then construct the
/// client. Implementations live in parley-infra.
pub trait NluClientFactory: Send + Sync {
    fn build(&self) -> Result<ClientHandle, InitError>;
}

/// Initialize the client in `slot` using `factory`, retrying per `policy`.
///
/// On exhaustion the last error is returned and the slot is left `Failed`.
/// Calling this on a slot that already left `Uninitialized` does not build
/// anything: it reports the recorded outcome (or `InProgress`).
pub async fn initialize_client<F: NluClientFactory + ?Sized>(
    slot: &NluClientSlot,
    factory: &F,
    policy: &RetryPolicy,
) -> Result<Arc<ClientHandle>, InitError> {
    if !slot.begin() {
        return match slot.state() {
            ClientState::Ready(handle) => Ok(handle),
            ClientState::Failed(error) => Err(error),
            ClientState::Uninitialized | ClientState::Initializing => Err(InitError::InProgress),
        };
    }

    let max_attempts = policy.max_attempts.max(1);
    let outcome = retry_with_backoff(policy, |attempt| async move {
        factory.build().inspect_err(|e| {
            error!(
                stage = stages::INITIALIZATION_ERROR,
                error_type = init_error_kind(e),
                missing_variables = %missing_variables(e),
                error_message = %e,
                "client initialization attempt failed"
            );
            warn!(
                stage = stages::INIT_RETRY,
                attempt,
                max_attempts,
                error = %e,
                "client initialization attempt {attempt}/{max_attempts} failed"
            );
        })
    })
    .await;

    match outcome {
        Ok(handle) => {
            info!(
                stage = stages::INIT_SUCCESS,
                backend = handle.backend().name(),
                "NLU client initialized successfully"
            );
            match slot.finish(Ok(handle)) {
                ClientState::Ready(handle) => Ok(handle),
                ClientState::Failed(error) => Err(error),
                _ => Err(InitError::InProgress),
            }
        }
        Err(exhausted) => {
            error!(
                stage = stages::INIT_FAILED,
                attempts = exhausted.attempts,
                "max retry attempts reached, initialization failed"
            );
            let error = exhausted.into_inner();
            slot.finish(Err(error.clone()));
            Err(error)
        }
    }
}

/// Comma-separated missing variable names, empty for other failures.
fn missing_variables(error: &InitError) -> String {
    match error {
        InitError::Config(config) => config.missing().join(", "),
        _ => String::new(),
    }
}

fn init_error_kind(error: &InitError) -> &'static str {
    match error {
        InitError::Config(_) => "ConfigurationError",
        InitError::ClientConstruction(_) => "ClientConstructionError",
        InitError::InProgress => "InProgress",
    }
}
