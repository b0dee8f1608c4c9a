//! Polymarket integration: Gamma discovery, the market-channel quote
//! stream, and (with the `polymarket` feature) live CLOB execution.

pub mod discovery;
pub mod dto;
#[cfg(feature = "polymarket")]
pub mod executor;
pub mod stream;

pub use discovery::GammaDiscovery;
#[cfg(feature = "polymarket")]
pub use executor::PolymarketExecutor;
pub use stream::PolymarketQuoteStream;
