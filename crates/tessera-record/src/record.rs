//! Record view: attestation and permission queries, decrypt-and-verify
//!
//! A [`Record`] is bound to the fingerprint it was opened with and borrows
//! its collaborators from a [`RecordClient`](crate::RecordClient). It holds no
//! state between calls; every query reads the ledger afresh.
//!
//! Both decrypt paths run the same fixed sequence and stop at the first
//! failure:
//!
//! 1. pick a locator (owner's for [`Record::decrypt_data`], the viewer's
//!    grant for [`Record::decrypt_permissioned`], after the grant check)
//! 2. resolve it to ciphertext
//! 3. decrypt
//! 4. hash the plaintext and compare with the record's fingerprint
//!
//! Plaintext is only returned after step 4 succeeds.

use crate::gateway::LedgerGateway;
use tessera_core::{
    hash, Address, CipherEffects, Fingerprint, LedgerEffects, Locator, LocatorResolver,
    Permission, PrivateKey, RecordConfig, Result, StoredRecord, TesseraError,
};

/// Ephemeral view of one ledger-anchored record
#[derive(Debug)]
pub struct Record<'a, L, C> {
    fingerprint: Fingerprint,
    gateway: &'a LedgerGateway<L>,
    cipher: &'a C,
    config: &'a RecordConfig,
}

impl<L, C> Clone for Record<'_, L, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L, C> Copy for Record<'_, L, C> {}

impl<'a, L: LedgerEffects, C: CipherEffects> Record<'a, L, C> {
    /// Open a view on the record identified by `fingerprint`.
    ///
    /// Nothing is read from the ledger until a query runs.
    pub fn new(
        fingerprint: Fingerprint,
        gateway: &'a LedgerGateway<L>,
        cipher: &'a C,
        config: &'a RecordConfig,
    ) -> Self {
        Self {
            fingerprint,
            gateway,
            cipher,
            config,
        }
    }

    /// The fingerprint this record was opened with; plaintext must hash to it
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Whether `identity` has attested this record
    pub async fn get_attestation(&self, identity: &Address) -> Result<bool> {
        self.gateway
            .get_attestation(&self.fingerprint, identity)
            .await
    }

    /// `viewer`'s access to this record and, if granted, their locator
    pub async fn get_permission(&self, viewer: &Address) -> Result<Permission> {
        self.gateway.get_permission(&self.fingerprint, viewer).await
    }

    /// The ledger's entry for this record
    pub async fn stored(&self) -> Result<StoredRecord> {
        self.gateway
            .get_record(&self.fingerprint)
            .await?
            .ok_or_else(|| TesseraError::record_not_found(self.fingerprint.to_hex()))
    }

    /// Whether `metadata` hashes to the metadata hash stored with the record
    pub async fn verify_metadata(&self, metadata: &str) -> Result<bool> {
        let stored = self.stored().await?;
        Ok(stored.metadata_hash.matches(metadata.as_bytes()))
    }

    /// Whether `candidate` is this record's plaintext. Pure; no I/O.
    pub fn verify_data(&self, candidate: &[u8]) -> bool {
        self.fingerprint.matches(candidate)
    }

    /// Decrypt the owner's copy of the record.
    ///
    /// Resolves the locator stored with the record, decrypts with
    /// `private_key` and verifies the plaintext against this record's
    /// fingerprint. No permission check is made.
    pub async fn decrypt_data<R>(&self, private_key: &PrivateKey, resolver: &R) -> Result<Vec<u8>>
    where
        R: LocatorResolver + ?Sized,
    {
        let stored = self.stored().await?;
        if self.config.cross_check_ledger_fingerprint && stored.fingerprint != self.fingerprint {
            tracing::warn!(
                fingerprint = %self.fingerprint,
                stored = %stored.fingerprint,
                "Ledger fingerprint for record disagrees with the requested one"
            );
            return Err(TesseraError::ledger_inconsistency(format!(
                "ledger stores fingerprint {} for record {}",
                stored.fingerprint, self.fingerprint
            )));
        }

        self.open(&stored.data_uri, private_key, resolver).await
    }

    /// Decrypt `viewer`'s shared copy of the record.
    ///
    /// Fails with [`TesseraError::PermissionDenied`] before touching the
    /// resolver or the cipher when `viewer` holds no grant. Otherwise runs
    /// the same resolve, decrypt and verify sequence as
    /// [`decrypt_data`](Self::decrypt_data) against the viewer's locator.
    pub async fn decrypt_permissioned<R>(
        &self,
        viewer: &Address,
        private_key: &PrivateKey,
        resolver: &R,
    ) -> Result<Vec<u8>>
    where
        R: LocatorResolver + ?Sized,
    {
        let data_uri = match self.get_permission(viewer).await? {
            Permission::Granted { data_uri } => data_uri,
            Permission::Denied => {
                tracing::warn!(
                    fingerprint = %self.fingerprint,
                    viewer = %viewer,
                    "Viewer has no permission on record"
                );
                return Err(TesseraError::permission_denied(viewer.to_string()));
            }
        };

        self.open(&data_uri, private_key, resolver).await
    }

    async fn open<R>(
        &self,
        locator: &Locator,
        private_key: &PrivateKey,
        resolver: &R,
    ) -> Result<Vec<u8>>
    where
        R: LocatorResolver + ?Sized,
    {
        tracing::debug!(
            fingerprint = %self.fingerprint,
            locator = %locator,
            "Resolving ciphertext"
        );
        let ciphertext = resolver.resolve(locator).await?;

        tracing::debug!(
            fingerprint = %self.fingerprint,
            ciphertext_len = ciphertext.len(),
            "Decrypting ciphertext"
        );
        let plaintext = self.cipher.decrypt(private_key, &ciphertext)?;

        let actual = Fingerprint::from_bytes(hash::hash(&plaintext));
        if actual != self.fingerprint {
            tracing::warn!(
                fingerprint = %self.fingerprint,
                actual = %actual,
                locator = %locator,
                "Decrypted plaintext does not match record fingerprint"
            );
            return Err(TesseraError::hash_mismatch(
                self.fingerprint.to_hex(),
                actual.to_hex(),
            ));
        }

        tracing::debug!(fingerprint = %self.fingerprint, "Record plaintext verified");
        Ok(plaintext)
    }
}
