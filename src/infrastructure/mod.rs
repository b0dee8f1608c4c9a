//! Infrastructure layer: configuration, reconnect policy, and the session
//! runtime that wires adapters to the application core.

pub mod backoff;
pub(crate) mod bootstrap;
pub mod config;
pub mod runtime;
