//! Observability for Parley: subscriber setup and the stage vocabulary used
//! by every diagnostic record.

pub mod stages;
pub mod tracing_setup;
