//! Read-only ledger contract surface
//!
//! Methods mirror the contract calls one-to-one and speak the wire encoding
//! (fixed-size byte arrays, zero sentinels). Decoding happens in the record
//! crate's gateway, never in handlers.
//!
//! A handler that cannot reach the ledger must return
//! [`TesseraError::LedgerUnavailable`](crate::TesseraError::LedgerUnavailable).
//! It must never answer `false` or a default tuple in place of an error.

use crate::types::{Address, Fingerprint, RawPermission, RawRecord};
use crate::TesseraError;
use async_trait::async_trait;

/// Ledger read failure
pub type LedgerError = TesseraError;

/// Read-only view of the ledger's record, attestation and permission tables
#[async_trait]
pub trait LedgerEffects: Send + Sync {
    /// `getAttestation(fingerprint, identity)`: whether `identity` attested the record
    async fn attestation(
        &self,
        fingerprint: &Fingerprint,
        identity: &Address,
    ) -> Result<bool, LedgerError>;

    /// `getPermission(fingerprint, identity)`: `(canAccess, dataUri)` for `identity`
    async fn permission(
        &self,
        fingerprint: &Fingerprint,
        identity: &Address,
    ) -> Result<RawPermission, LedgerError>;

    /// `records(fingerprint)`: the record entry, zero-owner when absent
    async fn record(&self, fingerprint: &Fingerprint) -> Result<RawRecord, LedgerError>;
}

#[async_trait]
impl<T: LedgerEffects + ?Sized> LedgerEffects for std::sync::Arc<T> {
    async fn attestation(
        &self,
        fingerprint: &Fingerprint,
        identity: &Address,
    ) -> Result<bool, LedgerError> {
        (**self).attestation(fingerprint, identity).await
    }

    async fn permission(
        &self,
        fingerprint: &Fingerprint,
        identity: &Address,
    ) -> Result<RawPermission, LedgerError> {
        (**self).permission(fingerprint, identity).await
    }

    async fn record(&self, fingerprint: &Fingerprint) -> Result<RawRecord, LedgerError> {
        (**self).record(fingerprint).await
    }
}
