//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the venue (orders, discovery) and the event sink.

pub mod exchange;
pub mod recorder;
