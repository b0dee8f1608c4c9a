//! Infrastructure configuration modules.

pub mod logging;
pub mod market;
pub mod network;
pub mod reconnection;
pub mod risk;
pub mod settings;
pub mod strategy;

pub use settings::{Config, ConfigOverrides};
