//! Resolver doubles

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tessera_core::effects::{LocatorResolver, ResolveError};
use tessera_core::{Locator, TesseraError};

/// Wraps a resolver and records every call made through it
#[derive(Debug, Default)]
pub struct CountingResolver<R> {
    inner: R,
    calls: AtomicUsize,
    seen: Mutex<Vec<Locator>>,
}

impl<R> CountingResolver<R> {
    /// Wrap `inner`
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Number of `resolve` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Locators passed to `resolve`, in call order
    pub fn seen(&self) -> Vec<Locator> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl<R: LocatorResolver> LocatorResolver for CountingResolver<R> {
    async fn resolve(&self, locator: &Locator) -> Result<Vec<u8>, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(*locator);
        self.inner.resolve(locator).await
    }
}

/// Returns the same bytes for every locator
#[derive(Debug, Clone)]
pub struct StaticResolver {
    bytes: Vec<u8>,
}

impl StaticResolver {
    /// Always answer with `bytes`
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

#[async_trait]
impl LocatorResolver for StaticResolver {
    async fn resolve(&self, _locator: &Locator) -> Result<Vec<u8>, ResolveError> {
        Ok(self.bytes.clone())
    }
}

/// Fails every resolution
#[derive(Debug, Clone)]
pub struct FailingResolver {
    message: String,
}

impl FailingResolver {
    /// Fail with `message`
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl LocatorResolver for FailingResolver {
    async fn resolve(&self, _locator: &Locator) -> Result<Vec<u8>, ResolveError> {
        Err(TesseraError::resolution(self.message.clone()))
    }
}
