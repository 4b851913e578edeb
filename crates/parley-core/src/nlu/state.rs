//! Process-wide NLU client state.
//!
//! `Uninitialized -> Initializing -> {Ready | Failed}`. `Failed` is terminal:
//! nothing moves the slot out of it for the lifetime of the process.
//!
//! The slot is written once by the initializer and read by every chat
//! request. Readers clone the `Arc<ClientHandle>` out and drop the lock
//! before awaiting anything.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use parley_types::client::ClientStatus;
use parley_types::error::InitError;

use super::handle::ClientHandle;

/// Lifecycle state of the NLU client.
#[derive(Debug, Clone)]
pub enum ClientState {
    Uninitialized,
    Initializing,
    Ready(Arc<ClientHandle>),
    Failed(InitError),
}

impl ClientState {
    pub fn status(&self) -> ClientStatus {
        match self {
            ClientState::Uninitialized => ClientStatus::Uninitialized,
            ClientState::Initializing => ClientStatus::Initializing,
            ClientState::Ready(_) => ClientStatus::Ready,
            ClientState::Failed(_) => ClientStatus::Failed,
        }
    }
}

/// Shared holder of the [`ClientState`].
#[derive(Debug)]
pub struct NluClientSlot {
    state: RwLock<ClientState>,
}

impl NluClientSlot {
    /// A slot that has not started initializing.
    pub fn new() -> Self {
        Self::with_state(ClientState::Uninitialized)
    }

    /// A slot that is already `Ready` with the given handle.
    pub fn ready(handle: ClientHandle) -> Self {
        Self::with_state(ClientState::Ready(Arc::new(handle)))
    }

    /// A slot that has already `Failed`.
    pub fn failed(error: InitError) -> Self {
        Self::with_state(ClientState::Failed(error))
    }

    fn with_state(state: ClientState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ClientState {
        self.read().clone()
    }

    pub fn status(&self) -> ClientStatus {
        self.read().status()
    }

    /// The client handle, if and only if the slot is `Ready`.
    pub fn handle(&self) -> Option<Arc<ClientHandle>> {
        match &*self.read() {
            ClientState::Ready(handle) => Some(Arc::clone(handle)),
            _ => None,
        }
    }

    /// `Uninitialized -> Initializing`. Returns `false` if initialization
    /// already started (or finished), leaving the state unchanged.
    pub(crate) fn begin(&self) -> bool {
        let mut state = self.write();
        match *state {
            ClientState::Uninitialized => {
                *state = ClientState::Initializing;
                true
            }
            _ => false,
        }
    }

    /// `Initializing -> Ready | Failed`. Ignored from any other state.
    pub(crate) fn finish(&self, outcome: Result<ClientHandle, InitError>) -> ClientState {
        let mut state = self.write();
        if matches!(*state, ClientState::Initializing) {
            *state = match outcome {
                Ok(handle) => ClientState::Ready(Arc::new(handle)),
                Err(error) => ClientState::Failed(error),
            };
        }
        state.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, ClientState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ClientState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for NluClientSlot {
    fn default() -> Self {
        Self::new()
    }
}
