//! Ledger gateway
//!
//! The only place that sees the ledger's wire encoding. Everything above it
//! works with [`Permission`] and `Option<StoredRecord>`; the zero sentinels
//! stop here.

use tessera_core::{Address, Fingerprint, LedgerEffects, Permission, Result, StoredRecord};

/// Decoding adapter over a [`LedgerEffects`] handler
#[derive(Debug, Clone)]
pub struct LedgerGateway<L> {
    ledger: L,
}

impl<L: LedgerEffects> LedgerGateway<L> {
    /// Wrap a ledger handler
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    /// The underlying handler
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Whether `identity` attested the record. Ledger failures propagate.
    pub async fn get_attestation(
        &self,
        fingerprint: &Fingerprint,
        identity: &Address,
    ) -> Result<bool> {
        self.ledger.attestation(fingerprint, identity).await
    }

    /// `identity`'s permission on the record, sentinel decoded
    pub async fn get_permission(
        &self,
        fingerprint: &Fingerprint,
        identity: &Address,
    ) -> Result<Permission> {
        let raw = self.ledger.permission(fingerprint, identity).await?;
        if raw.is_inconsistent() {
            tracing::warn!(
                fingerprint = %fingerprint,
                viewer = %identity,
                "Ledger reports a grant without a locator; treating as no access"
            );
        }
        Ok(Permission::from_wire(raw))
    }

    /// The record entry, or `None` if the ledger has none
    pub async fn get_record(&self, fingerprint: &Fingerprint) -> Result<Option<StoredRecord>> {
        let raw = self.ledger.record(fingerprint).await?;
        StoredRecord::from_wire(raw)
    }
}
