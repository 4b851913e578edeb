//! NLU client lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payload-free view of the NLU client state, used for health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Uninitialized,
    Initializing,
    Ready,
    Failed,
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientStatus::Uninitialized => write!(f, "uninitialized"),
            ClientStatus::Initializing => write!(f, "initializing"),
            ClientStatus::Ready => write!(f, "ready"),
            ClientStatus::Failed => write!(f, "failed"),
        }
    }
}
