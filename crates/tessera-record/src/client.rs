//! Client facade: owns the collaborators and hands out record views

use crate::gateway::LedgerGateway;
use crate::record::Record;
use tessera_core::{CipherEffects, Fingerprint, LedgerEffects, RecordConfig, TesseraConfig};
use tessera_effects::{TimeoutLedger, TimeoutResolver};

/// Entry point for record queries.
///
/// Holds the ledger gateway, the cipher and the verification settings.
/// Cheap views onto individual records are obtained with
/// [`record`](Self::record); any number may be in use concurrently.
#[derive(Debug, Clone)]
pub struct RecordClient<L, C> {
    gateway: LedgerGateway<L>,
    cipher: C,
    config: RecordConfig,
}

impl<L: LedgerEffects, C: CipherEffects> RecordClient<L, C> {
    /// Client with default verification settings
    pub fn new(ledger: L, cipher: C) -> Self {
        Self::with_config(ledger, cipher, RecordConfig::default())
    }

    /// Client with explicit verification settings
    pub fn with_config(ledger: L, cipher: C, config: RecordConfig) -> Self {
        Self {
            gateway: LedgerGateway::new(ledger),
            cipher,
            config,
        }
    }

    /// View onto the record identified by `fingerprint`
    pub fn record(&self, fingerprint: Fingerprint) -> Record<'_, L, C> {
        Record::new(fingerprint, &self.gateway, &self.cipher, &self.config)
    }

    /// The ledger gateway
    pub fn gateway(&self) -> &LedgerGateway<L> {
        &self.gateway
    }

    /// The cipher handler
    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    /// Verification settings
    pub fn config(&self) -> &RecordConfig {
        &self.config
    }
}

impl<L: LedgerEffects, C: CipherEffects> RecordClient<TimeoutLedger<L>, C> {
    /// Client built from a full configuration: ledger calls get the
    /// configured deadline and verification follows `config.verification`.
    pub fn from_config(ledger: L, cipher: C, config: &TesseraConfig) -> Self {
        let ledger = TimeoutLedger::new(ledger, config.timeouts.ledger_timeout());
        Self::with_config(ledger, cipher, config.verification.clone())
    }
}

/// Wrap a resolver with the resolver deadline from `config`
pub fn bounded_resolver<R>(resolver: R, config: &TesseraConfig) -> TimeoutResolver<R> {
    TimeoutResolver::new(resolver, config.timeouts.resolver_timeout())
}
