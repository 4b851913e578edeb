//! NLU backend abstractions and client lifecycle.
//!
//! - `NluBackend`: RPITIT trait for concrete backends (Dialogflow)
//! - `BoxNluBackend`: object-safe wrapper for dynamic dispatch
//! - `ClientHandle` / `NluClientSlot`: the once-written client state
//! - `initializer`: bounded-retry startup that fills the slot

pub mod backend;
pub mod box_backend;
pub mod handle;
pub mod initializer;
pub mod state;
