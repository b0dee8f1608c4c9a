//! Port implementations and the command-line entry point.

pub mod inbound;
pub mod outbound;
