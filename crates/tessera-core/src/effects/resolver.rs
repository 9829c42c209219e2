//! Locator resolution
//!
//! The resolver is a capability handed to each decrypt call: one method,
//! locator in, ciphertext out. Failures must be
//! [`TesseraError::Resolution`](crate::TesseraError::Resolution).

use crate::types::Locator;
use crate::TesseraError;
use async_trait::async_trait;

/// Locator resolution failure
pub type ResolveError = TesseraError;

/// Maps a locator to the ciphertext bytes stored behind it
#[async_trait]
pub trait LocatorResolver: Send + Sync {
    /// Fetch the ciphertext at `locator`
    async fn resolve(&self, locator: &Locator) -> Result<Vec<u8>, ResolveError>;
}

#[async_trait]
impl<T: LocatorResolver + ?Sized> LocatorResolver for std::sync::Arc<T> {
    async fn resolve(&self, locator: &Locator) -> Result<Vec<u8>, ResolveError> {
        (**self).resolve(locator).await
    }
}

#[async_trait]
impl<T: LocatorResolver + ?Sized> LocatorResolver for &T {
    async fn resolve(&self, locator: &Locator) -> Result<Vec<u8>, ResolveError> {
        (**self).resolve(locator).await
    }
}
