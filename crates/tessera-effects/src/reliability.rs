//! Deadlines for collaborator calls
//!
//! Record operations never retry and never time out on their own. Hosts that
//! want a deadline wrap their ledger or resolver here; an elapsed deadline
//! surfaces as the collaborator's own failure kind so callers see an outage,
//! not a new error class.

use async_trait::async_trait;
use std::time::Duration;
use tessera_core::effects::{LedgerEffects, LedgerError, LocatorResolver, ResolveError};
use tessera_core::{Address, Fingerprint, Locator, RawPermission, RawRecord, TesseraError};

async fn with_deadline<T, F>(
    deadline: Option<Duration>,
    call: F,
    on_elapsed: impl FnOnce(Duration) -> TesseraError,
) -> Result<T, TesseraError>
where
    F: std::future::Future<Output = Result<T, TesseraError>>,
{
    match deadline {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(on_elapsed(limit)),
        },
        None => call.await,
    }
}

/// Ledger wrapper that fails calls exceeding a deadline with `LedgerUnavailable`
#[derive(Debug, Clone)]
pub struct TimeoutLedger<L> {
    inner: L,
    deadline: Option<Duration>,
}

impl<L> TimeoutLedger<L> {
    /// Wrap `inner`; `None` passes calls through untouched
    pub fn new(inner: L, deadline: Option<Duration>) -> Self {
        Self { inner, deadline }
    }

    /// The wrapped ledger
    pub fn inner(&self) -> &L {
        &self.inner
    }
}

fn ledger_elapsed(call: &'static str) -> impl FnOnce(Duration) -> TesseraError {
    move |limit| {
        tracing::warn!(call, timeout_ms = limit.as_millis() as u64, "Ledger call timed out");
        TesseraError::ledger_unavailable(format!("{call} timed out after {limit:?}"))
    }
}

#[async_trait]
impl<L: LedgerEffects> LedgerEffects for TimeoutLedger<L> {
    async fn attestation(
        &self,
        fingerprint: &Fingerprint,
        identity: &Address,
    ) -> Result<bool, LedgerError> {
        with_deadline(
            self.deadline,
            self.inner.attestation(fingerprint, identity),
            ledger_elapsed("getAttestation"),
        )
        .await
    }

    async fn permission(
        &self,
        fingerprint: &Fingerprint,
        identity: &Address,
    ) -> Result<RawPermission, LedgerError> {
        with_deadline(
            self.deadline,
            self.inner.permission(fingerprint, identity),
            ledger_elapsed("getPermission"),
        )
        .await
    }

    async fn record(&self, fingerprint: &Fingerprint) -> Result<RawRecord, LedgerError> {
        with_deadline(
            self.deadline,
            self.inner.record(fingerprint),
            ledger_elapsed("records"),
        )
        .await
    }
}

/// Resolver wrapper that fails calls exceeding a deadline with `Resolution`
#[derive(Debug, Clone)]
pub struct TimeoutResolver<R> {
    inner: R,
    deadline: Option<Duration>,
}

impl<R> TimeoutResolver<R> {
    /// Wrap `inner`; `None` passes calls through untouched
    pub fn new(inner: R, deadline: Option<Duration>) -> Self {
        Self { inner, deadline }
    }
}

#[async_trait]
impl<R: LocatorResolver> LocatorResolver for TimeoutResolver<R> {
    async fn resolve(&self, locator: &Locator) -> Result<Vec<u8>, ResolveError> {
        with_deadline(self.deadline, self.inner.resolve(locator), |limit| {
            tracing::warn!(
                locator = %locator,
                timeout_ms = limit.as_millis() as u64,
                "Locator resolution timed out"
            );
            TesseraError::resolution(format!("resolving {locator} timed out after {limit:?}"))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryBlobStore, MemoryLedgerHandler};
    use assert_matches::assert_matches;

    struct StalledResolver;

    #[async_trait]
    impl LocatorResolver for StalledResolver {
        async fn resolve(&self, _locator: &Locator) -> Result<Vec<u8>, ResolveError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Vec::new())
        }
    }

    struct StalledLedger;

    #[async_trait]
    impl LedgerEffects for StalledLedger {
        async fn attestation(
            &self,
            _fingerprint: &Fingerprint,
            _identity: &Address,
        ) -> Result<bool, LedgerError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(true)
        }

        async fn permission(
            &self,
            _fingerprint: &Fingerprint,
            _identity: &Address,
        ) -> Result<RawPermission, LedgerError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(RawPermission::default())
        }

        async fn record(&self, _fingerprint: &Fingerprint) -> Result<RawRecord, LedgerError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(RawRecord::default())
        }
    }

    fn locator() -> Locator {
        Locator::new([4u8; 32]).unwrap()
    }

    #[tokio::test]
    async fn test_stalled_resolver_times_out_as_resolution_failure() {
        let resolver = TimeoutResolver::new(StalledResolver, Some(Duration::from_millis(20)));
        assert_matches!(
            resolver.resolve(&locator()).await,
            Err(TesseraError::Resolution { .. })
        );
    }

    #[tokio::test]
    async fn test_stalled_ledger_times_out_as_unavailable() {
        let ledger = TimeoutLedger::new(StalledLedger, Some(Duration::from_millis(20)));
        let fp = Fingerprint::of(b"foobar");
        assert_matches!(
            ledger.attestation(&fp, &Address::ZERO).await,
            Err(TesseraError::LedgerUnavailable { .. })
        );
        assert_matches!(
            ledger.record(&fp).await,
            Err(TesseraError::LedgerUnavailable { .. })
        );
    }

    #[tokio::test]
    async fn test_fast_calls_pass_through() {
        let store = MemoryBlobStore::new();
        store.put(locator(), vec![1]).await;
        let resolver = TimeoutResolver::new(store, Some(Duration::from_secs(5)));
        assert_eq!(resolver.resolve(&locator()).await.unwrap(), vec![1]);

        let ledger = TimeoutLedger::new(MemoryLedgerHandler::new(), None);
        let fp = Fingerprint::of(b"foobar");
        assert!(!ledger.attestation(&fp, &Address::ZERO).await.unwrap());
    }
}
