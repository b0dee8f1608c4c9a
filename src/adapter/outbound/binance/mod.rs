//! Binance reference-price integration.

pub mod dto;
pub mod stream;

pub use stream::BinanceTradeStream;
