//! Scripted market resolver.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::MarketHandle;
use crate::error::{DiscoveryError, Error};
use crate::port::MarketResolver;

/// One scripted lookup result.
#[derive(Debug, Clone)]
pub enum Lookup {
    Found(MarketHandle),
    Missing,
    Fail(String),
}

/// Pops one scripted lookup per `resolve()`; once the script runs out it
/// keeps returning `Missing`.
#[derive(Default)]
pub struct ScriptedResolver {
    script: Mutex<VecDeque<Lookup>>,
    calls: AtomicU32,
}

impl ScriptedResolver {
    pub fn new(script: Vec<Lookup>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn push(&self, lookup: Lookup) {
        self.script.lock().push_back(lookup);
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketResolver for ScriptedResolver {
    async fn resolve(&self) -> Result<Option<MarketHandle>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().pop_front().unwrap_or(Lookup::Missing) {
            Lookup::Found(market) => Ok(Some(market)),
            Lookup::Missing => Ok(None),
            Lookup::Fail(reason) => Err(DiscoveryError::Malformed(reason).into()),
        }
    }
}
