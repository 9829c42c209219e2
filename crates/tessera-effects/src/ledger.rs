//! In-memory ledger handler
//!
//! Holds the three tables a deployed contract would, keyed by fingerprint and
//! stored in wire form. The seeding methods stand in for the transactions
//! that populate a real ledger and are meant for tests and simulation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tessera_core::effects::{LedgerEffects, LedgerError};
use tessera_core::{
    Address, Fingerprint, Locator, Permission, RawPermission, RawRecord, StoredRecord,
    TesseraError,
};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct LedgerTables {
    records: HashMap<Fingerprint, RawRecord>,
    attestations: HashMap<(Fingerprint, Address), bool>,
    permissions: HashMap<(Fingerprint, Address), RawPermission>,
}

/// In-memory ledger for testing and simulation
#[derive(Debug, Clone, Default)]
pub struct MemoryLedgerHandler {
    tables: Arc<RwLock<LedgerTables>>,
    offline: Arc<AtomicBool>,
}

impl MemoryLedgerHandler {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an outage: while offline every read fails with `LedgerUnavailable`
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), LedgerError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(TesseraError::ledger_unavailable("memory ledger is offline"))
        } else {
            Ok(())
        }
    }

    /// Store a record entry under its own fingerprint
    pub async fn insert_record(&self, record: StoredRecord) {
        self.insert_record_at(record.fingerprint, record).await;
    }

    /// Store a record entry under an arbitrary key, e.g. to model a ledger
    /// whose stored fingerprint disagrees with its index
    pub async fn insert_record_at(&self, key: Fingerprint, record: StoredRecord) {
        let mut tables = self.tables.write().await;
        tables.records.insert(key, record.to_wire());
    }

    /// Record an attestation by `attester` and bump the record's attestation count
    pub async fn attest(&self, fingerprint: Fingerprint, attester: Address) {
        let mut tables = self.tables.write().await;
        let previous = tables.attestations.insert((fingerprint, attester), true);
        if previous != Some(true) {
            if let Some(record) = tables.records.get_mut(&fingerprint) {
                record.sig_count += 1;
            }
        }
    }

    /// Grant `viewer` access to the ciphertext at `data_uri`
    pub async fn grant_access(&self, fingerprint: Fingerprint, viewer: Address, data_uri: Locator) {
        self.put_raw_permission(fingerprint, viewer, Permission::Granted { data_uri }.to_wire())
            .await;
    }

    /// Withdraw any grant held by `viewer`
    pub async fn revoke_access(&self, fingerprint: Fingerprint, viewer: Address) {
        let mut tables = self.tables.write().await;
        tables.permissions.remove(&(fingerprint, viewer));
    }

    /// Write a permission tuple verbatim.
    ///
    /// Lets tests reproduce malformed ledger answers such as a grant with
    /// the zero locator.
    pub async fn put_raw_permission(
        &self,
        fingerprint: Fingerprint,
        viewer: Address,
        raw: RawPermission,
    ) {
        let mut tables = self.tables.write().await;
        tables.permissions.insert((fingerprint, viewer), raw);
    }
}

#[async_trait]
impl LedgerEffects for MemoryLedgerHandler {
    async fn attestation(
        &self,
        fingerprint: &Fingerprint,
        identity: &Address,
    ) -> Result<bool, LedgerError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .attestations
            .get(&(*fingerprint, *identity))
            .copied()
            .unwrap_or(false))
    }

    async fn permission(
        &self,
        fingerprint: &Fingerprint,
        identity: &Address,
    ) -> Result<RawPermission, LedgerError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .permissions
            .get(&(*fingerprint, *identity))
            .copied()
            .unwrap_or_default())
    }

    async fn record(&self, fingerprint: &Fingerprint) -> Result<RawRecord, LedgerError> {
        self.check_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .records
            .get(fingerprint)
            .copied()
            .unwrap_or_default())
    }
}
