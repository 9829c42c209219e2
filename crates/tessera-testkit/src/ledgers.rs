//! Ledger doubles

use async_trait::async_trait;
use tessera_core::effects::{LedgerEffects, LedgerError};
use tessera_core::{Address, Fingerprint, RawPermission, RawRecord, TesseraError};

/// Ledger that can never be reached
#[derive(Debug, Clone, Copy, Default)]
pub struct UnreachableLedger;

impl UnreachableLedger {
    fn error(call: &str) -> LedgerError {
        TesseraError::ledger_unavailable(format!("{call}: connection refused"))
    }
}

#[async_trait]
impl LedgerEffects for UnreachableLedger {
    async fn attestation(
        &self,
        _fingerprint: &Fingerprint,
        _identity: &Address,
    ) -> Result<bool, LedgerError> {
        Err(Self::error("getAttestation"))
    }

    async fn permission(
        &self,
        _fingerprint: &Fingerprint,
        _identity: &Address,
    ) -> Result<RawPermission, LedgerError> {
        Err(Self::error("getPermission"))
    }

    async fn record(&self, _fingerprint: &Fingerprint) -> Result<RawRecord, LedgerError> {
        Err(Self::error("records"))
    }
}
