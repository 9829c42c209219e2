//! Locator resolver handlers

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tessera_core::effects::{LocatorResolver, ResolveError};
use tessera_core::{Locator, TesseraError};
use tokio::sync::RwLock;

/// Adapts a synchronous closure into a [`LocatorResolver`].
///
/// Any error the closure returns becomes [`TesseraError::Resolution`] carrying
/// the closure's error text.
pub struct FnResolver<F> {
    resolve: F,
}

impl<F> FnResolver<F> {
    /// Wrap a closure
    pub fn new(resolve: F) -> Self {
        Self { resolve }
    }
}

impl<F> fmt::Debug for FnResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnResolver").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, E> LocatorResolver for FnResolver<F>
where
    F: Fn(&Locator) -> Result<Vec<u8>, E> + Send + Sync,
    E: fmt::Display + 'static,
{
    async fn resolve(&self, locator: &Locator) -> Result<Vec<u8>, ResolveError> {
        (self.resolve)(locator).map_err(|e| TesseraError::resolution(e.to_string()))
    }
}

/// Shorthand for [`FnResolver::new`]
pub fn resolver_fn<F, E>(resolve: F) -> FnResolver<F>
where
    F: Fn(&Locator) -> Result<Vec<u8>, E> + Send + Sync,
    E: fmt::Display + 'static,
{
    FnResolver::new(resolve)
}

/// In-memory ciphertext store addressed by locator
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<RwLock<HashMap<Locator, Vec<u8>>>>,
}

impl MemoryBlobStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store ciphertext at `locator`, replacing what was there
    pub async fn put(&self, locator: Locator, ciphertext: Vec<u8>) {
        self.blobs.write().await.insert(locator, ciphertext);
    }

    /// Remove the ciphertext at `locator`
    pub async fn remove(&self, locator: &Locator) -> bool {
        self.blobs.write().await.remove(locator).is_some()
    }
}

#[async_trait]
impl LocatorResolver for MemoryBlobStore {
    async fn resolve(&self, locator: &Locator) -> Result<Vec<u8>, ResolveError> {
        self.blobs
            .read()
            .await
            .get(locator)
            .cloned()
            .ok_or_else(|| TesseraError::resolution(format!("no ciphertext at {locator}")))
    }
}
