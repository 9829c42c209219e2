//! End-to-end record flows against the in-memory ledger and blob store

use assert_matches::assert_matches;
use tessera_core::{Fingerprint, RawPermission, StoredRecord, TesseraError};
use tessera_effects::{HpkeCipherHandler, MemoryLedgerHandler};
use tessera_record::RecordClient;
use tessera_testkit::{
    test_keypair, test_locator, CountingResolver, FailingResolver, RecordFixture,
    StaticResolver, UnreachableLedger, TEST_DATA, TEST_METADATA, WRONG_DATA,
};

fn client(fx: &RecordFixture) -> RecordClient<MemoryLedgerHandler, HpkeCipherHandler> {
    RecordClient::new(fx.ledger.clone(), fx.cipher)
}

#[tokio::test]
async fn test_provider_attestation_is_visible() {
    let fx = RecordFixture::new().await;
    let client = client(&fx);
    let record = client.record(fx.fingerprint);

    assert!(record.get_attestation(&fx.accounts.provider).await.unwrap());
    assert!(!record.get_attestation(&fx.accounts.user2).await.unwrap());
    assert!(!record.get_attestation(&fx.accounts.admin).await.unwrap());

    let stored = record.stored().await.unwrap();
    assert_eq!(stored.owner, fx.accounts.user1);
    assert_eq!(stored.attestation_count, 1);
}

#[tokio::test]
async fn test_owner_decrypts_own_copy() {
    let fx = RecordFixture::new().await;
    let client = client(&fx);
    let resolver = CountingResolver::new(fx.blobs.clone());

    let plaintext = client
        .record(fx.fingerprint)
        .decrypt_data(&fx.owner_keys.private, &resolver)
        .await
        .unwrap();

    assert_eq!(plaintext, TEST_DATA);
    assert_eq!(resolver.seen(), vec![fx.owner_uri]);
}

#[tokio::test]
async fn test_shared_viewer_decrypts_granted_copy() {
    let fx = RecordFixture::new().await;
    let client = client(&fx);
    let record = client.record(fx.fingerprint);
    let resolver = CountingResolver::new(fx.blobs.clone());

    let permission = record.get_permission(&fx.accounts.user2).await.unwrap();
    assert!(permission.can_access());
    assert_eq!(permission.data_uri(), Some(&fx.shared_uri));

    let plaintext = record
        .decrypt_permissioned(&fx.accounts.user2, &fx.viewer_keys.private, &resolver)
        .await
        .unwrap();

    assert_eq!(plaintext, TEST_DATA);
    assert!(record.verify_data(&plaintext));
    assert_eq!(resolver.seen(), vec![fx.shared_uri]);
}

#[tokio::test]
async fn test_viewer_without_grant_is_denied_before_resolving() {
    let fx = RecordFixture::new().await;
    let client = client(&fx);
    let record = client.record(fx.fingerprint);
    let resolver = CountingResolver::new(fx.blobs.clone());

    assert!(!record
        .get_permission(&fx.accounts.user3)
        .await
        .unwrap()
        .can_access());

    let result = record
        .decrypt_permissioned(&fx.accounts.user3, &fx.viewer_keys.private, &resolver)
        .await;

    assert_matches!(result, Err(TesseraError::PermissionDenied { .. }));
    assert_eq!(resolver.calls(), 0);
}

#[tokio::test]
async fn test_revoked_grant_is_denied() {
    let fx = RecordFixture::new().await;
    let client = client(&fx);
    let record = client.record(fx.fingerprint);

    fx.ledger
        .revoke_access(fx.fingerprint, fx.accounts.user2)
        .await;

    assert_matches!(
        record
            .decrypt_permissioned(&fx.accounts.user2, &fx.viewer_keys.private, &fx.blobs)
            .await,
        Err(TesseraError::PermissionDenied { .. })
    );
}

#[tokio::test]
async fn test_grant_with_zero_locator_reads_as_denied() {
    let fx = RecordFixture::new().await;
    let client = client(&fx);
    let record = client.record(fx.fingerprint);
    let resolver = CountingResolver::new(fx.blobs.clone());

    fx.ledger
        .put_raw_permission(
            fx.fingerprint,
            fx.accounts.user3,
            RawPermission {
                can_access: true,
                data_uri: [0u8; 32],
            },
        )
        .await;

    assert!(!record
        .get_permission(&fx.accounts.user3)
        .await
        .unwrap()
        .can_access());
    assert_matches!(
        record
            .decrypt_permissioned(&fx.accounts.user3, &fx.viewer_keys.private, &resolver)
            .await,
        Err(TesseraError::PermissionDenied { .. })
    );
    assert_eq!(resolver.calls(), 0);
}

#[tokio::test]
async fn test_tampered_plaintext_is_a_hash_mismatch() {
    let fx = RecordFixture::new().await;
    let client = client(&fx);
    let record = client.record(fx.fingerprint);

    // Decrypts cleanly under the viewer's key but is not the record
    let forged = StaticResolver::new(fx.seal(&fx.viewer_keys, WRONG_DATA));
    let result = record
        .decrypt_permissioned(&fx.accounts.user2, &fx.viewer_keys.private, &forged)
        .await;

    assert_matches!(
        result,
        Err(TesseraError::HashMismatch { expected, actual }) => {
            assert_eq!(expected, fx.fingerprint.to_hex());
            assert_eq!(actual, Fingerprint::of(WRONG_DATA).to_hex());
        }
    );
    assert!(!record.verify_data(WRONG_DATA));
}

#[tokio::test]
async fn test_owner_copy_with_wrong_plaintext_is_a_hash_mismatch() {
    let fx = RecordFixture::new().await;
    let client = client(&fx);
    let record = client.record(fx.fingerprint);

    let forged = CountingResolver::new(StaticResolver::new(fx.seal(&fx.owner_keys, WRONG_DATA)));
    let result = record.decrypt_data(&fx.owner_keys.private, &forged).await;

    assert_matches!(
        result,
        Err(TesseraError::HashMismatch { expected, actual }) => {
            assert_eq!(expected, fx.fingerprint.to_hex());
            assert_eq!(actual, Fingerprint::of(WRONG_DATA).to_hex());
        }
    );
    assert_eq!(forged.seen(), vec![fx.owner_uri]);
}

#[tokio::test]
async fn test_wrong_key_is_a_decryption_failure() {
    let fx = RecordFixture::new().await;
    let client = client(&fx);
    let record = client.record(fx.fingerprint);
    let stranger = test_keypair(0x33);

    assert_matches!(
        record.decrypt_data(&stranger.private, &fx.blobs).await,
        Err(TesseraError::Decryption { .. })
    );
    // The owner's key does not open the viewer's copy either
    assert_matches!(
        record
            .decrypt_permissioned(&fx.accounts.user2, &fx.owner_keys.private, &fx.blobs)
            .await,
        Err(TesseraError::Decryption { .. })
    );
}

#[tokio::test]
async fn test_garbage_ciphertext_is_a_decryption_failure() {
    let fx = RecordFixture::new().await;
    let client = client(&fx);

    let garbage = StaticResolver::new(vec![0xab; 12]);
    assert_matches!(
        client
            .record(fx.fingerprint)
            .decrypt_data(&fx.owner_keys.private, &garbage)
            .await,
        Err(TesseraError::Decryption { .. })
    );
}

#[tokio::test]
async fn test_resolution_failure_propagates() {
    let fx = RecordFixture::new().await;
    let client = client(&fx);
    let record = client.record(fx.fingerprint);

    assert_matches!(
        record
            .decrypt_data(&fx.owner_keys.private, &FailingResolver::new("gateway timeout"))
            .await,
        Err(TesseraError::Resolution { message }) if message == "gateway timeout"
    );

    fx.blobs.remove(&fx.shared_uri).await;
    assert_matches!(
        record
            .decrypt_permissioned(&fx.accounts.user2, &fx.viewer_keys.private, &fx.blobs)
            .await,
        Err(TesseraError::Resolution { .. })
    );
}

#[tokio::test]
async fn test_unknown_record_is_not_found() {
    let fx = RecordFixture::new().await;
    let client = client(&fx);
    let resolver = CountingResolver::new(fx.blobs.clone());
    let record = client.record(Fingerprint::of(b"never added"));

    assert_matches!(record.stored().await, Err(TesseraError::RecordNotFound { .. }));
    assert_matches!(
        record.decrypt_data(&fx.owner_keys.private, &resolver).await,
        Err(TesseraError::RecordNotFound { .. })
    );
    assert_eq!(resolver.calls(), 0);

    // Queries on unknown records still answer from the ledger's defaults
    assert!(!record.get_attestation(&fx.accounts.provider).await.unwrap());
    assert!(!record
        .get_permission(&fx.accounts.user2)
        .await
        .unwrap()
        .can_access());
}

async fn mismatched_ledger_entry(fx: &RecordFixture) -> Fingerprint {
    let key = Fingerprint::of(b"indexed under another hash");
    fx.ledger
        .insert_record_at(
            key,
            StoredRecord {
                fingerprint: fx.fingerprint,
                owner: fx.accounts.user1,
                metadata_hash: Fingerprint::of(TEST_METADATA.as_bytes()),
                attestation_count: 0,
                iris_score: 1,
                data_uri: fx.owner_uri,
                timestamp: 1_520_000_000,
            },
        )
        .await;
    key
}

#[tokio::test]
async fn test_cross_check_rejects_disagreeing_ledger_fingerprint() {
    let fx = RecordFixture::new().await;
    let key = mismatched_ledger_entry(&fx).await;
    let client = client(&fx);
    let resolver = CountingResolver::new(fx.blobs.clone());

    assert_matches!(
        client
            .record(key)
            .decrypt_data(&fx.owner_keys.private, &resolver)
            .await,
        Err(TesseraError::LedgerInconsistency { .. })
    );
    assert_eq!(resolver.calls(), 0);
}

#[tokio::test]
async fn test_without_cross_check_plaintext_verification_still_applies() {
    let fx = RecordFixture::new().await;
    let key = mismatched_ledger_entry(&fx).await;
    let mut config = tessera_core::RecordConfig::default();
    config.cross_check_ledger_fingerprint = false;
    let client = RecordClient::with_config(fx.ledger.clone(), fx.cipher, config);

    // The plaintext hashes to the stored fingerprint, not to the one the
    // record was opened with
    assert_matches!(
        client
            .record(key)
            .decrypt_data(&fx.owner_keys.private, &fx.blobs)
            .await,
        Err(TesseraError::HashMismatch { .. })
    );
}

#[tokio::test]
async fn test_zero_data_uri_is_a_ledger_inconsistency() {
    let fx = RecordFixture::new().await;
    let client = client(&fx);
    let fingerprint = Fingerprint::of(b"half written");
    let mut raw = StoredRecord {
        fingerprint,
        owner: fx.accounts.user1,
        metadata_hash: Fingerprint::of(TEST_METADATA.as_bytes()),
        attestation_count: 0,
        iris_score: 0,
        data_uri: test_locator(0x42),
        timestamp: 0,
    }
    .to_wire();
    raw.data_uri = [0u8; 32];

    let ledger = ZeroUriLedger { inner: fx.ledger.clone(), raw };
    let client_with_bad_entry = RecordClient::new(ledger, fx.cipher);
    assert_matches!(
        client_with_bad_entry.record(fingerprint).stored().await,
        Err(TesseraError::LedgerInconsistency { .. })
    );

    // The well-formed record is unaffected
    assert!(client.record(fx.fingerprint).stored().await.is_ok());
}

struct ZeroUriLedger {
    inner: MemoryLedgerHandler,
    raw: tessera_core::RawRecord,
}

#[async_trait::async_trait]
impl tessera_core::LedgerEffects for ZeroUriLedger {
    async fn attestation(
        &self,
        fingerprint: &Fingerprint,
        identity: &tessera_core::Address,
    ) -> Result<bool, TesseraError> {
        self.inner.attestation(fingerprint, identity).await
    }

    async fn permission(
        &self,
        fingerprint: &Fingerprint,
        identity: &tessera_core::Address,
    ) -> Result<RawPermission, TesseraError> {
        self.inner.permission(fingerprint, identity).await
    }

    async fn record(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<tessera_core::RawRecord, TesseraError> {
        if *fingerprint == Fingerprint::from_bytes(self.raw.data_hash) {
            Ok(self.raw)
        } else {
            self.inner.record(fingerprint).await
        }
    }
}

#[tokio::test]
async fn test_verify_metadata() {
    let fx = RecordFixture::new().await;
    let client = client(&fx);
    let record = client.record(fx.fingerprint);

    assert!(record.verify_metadata(TEST_METADATA).await.unwrap());
    assert!(!record.verify_metadata("Heart_Rate").await.unwrap());
}

#[tokio::test]
async fn test_ledger_outage_is_an_error_not_a_denial() {
    let fx = RecordFixture::new().await;
    let client = client(&fx);
    let record = client.record(fx.fingerprint);
    let resolver = CountingResolver::new(fx.blobs.clone());

    fx.ledger.set_offline(true);

    assert_matches!(
        record.get_attestation(&fx.accounts.provider).await,
        Err(TesseraError::LedgerUnavailable { .. })
    );
    assert_matches!(
        record.get_permission(&fx.accounts.user2).await,
        Err(TesseraError::LedgerUnavailable { .. })
    );
    assert_matches!(
        record
            .decrypt_permissioned(&fx.accounts.user2, &fx.viewer_keys.private, &resolver)
            .await,
        Err(TesseraError::LedgerUnavailable { .. })
    );
    assert_matches!(
        record.decrypt_data(&fx.owner_keys.private, &resolver).await,
        Err(TesseraError::LedgerUnavailable { .. })
    );
    assert_eq!(resolver.calls(), 0);

    fx.ledger.set_offline(false);
    assert!(record.get_attestation(&fx.accounts.provider).await.unwrap());
}

#[tokio::test]
async fn test_unreachable_ledger() {
    let fx = RecordFixture::new().await;
    let client = RecordClient::new(UnreachableLedger, fx.cipher);
    let record = client.record(fx.fingerprint);

    let err = record
        .get_attestation(&fx.accounts.provider)
        .await
        .unwrap_err();
    assert!(err.is_transient());
    assert_matches!(err, TesseraError::LedgerUnavailable { .. });
}

#[tokio::test]
async fn test_records_are_independent_and_repeatable() {
    let fx = RecordFixture::new().await;
    let client = client(&fx);

    let other_data = b"second record";
    let other = Fingerprint::of(other_data);
    let other_uri = test_locator(0x77);
    fx.ledger
        .insert_record(StoredRecord {
            fingerprint: other,
            owner: fx.accounts.user3,
            metadata_hash: Fingerprint::of(b"Glucose"),
            attestation_count: 0,
            iris_score: 0,
            data_uri: other_uri,
            timestamp: 2,
        })
        .await;
    fx.blobs
        .put(other_uri, fx.seal(&fx.owner_keys, other_data))
        .await;

    let first = client.record(fx.fingerprint);
    let second = client.record(other);

    for _ in 0..2 {
        assert_eq!(
            first
                .decrypt_data(&fx.owner_keys.private, &fx.blobs)
                .await
                .unwrap(),
            TEST_DATA
        );
        assert_eq!(
            second
                .decrypt_data(&fx.owner_keys.private, &fx.blobs)
                .await
                .unwrap(),
            other_data
        );
    }
    assert!(!second.get_attestation(&fx.accounts.provider).await.unwrap());
    assert!(!second
        .get_permission(&fx.accounts.user2)
        .await
        .unwrap()
        .can_access());
}

#[tokio::test]
async fn test_queries_are_idempotent() {
    let fx = RecordFixture::new().await;
    let client = client(&fx);
    let record = client.record(fx.fingerprint);

    for who in [fx.accounts.provider, fx.accounts.user2, fx.accounts.user3] {
        let attested = record.get_attestation(&who).await.unwrap();
        let permission = record.get_permission(&who).await.unwrap();
        assert_eq!(record.get_attestation(&who).await.unwrap(), attested);
        assert_eq!(record.get_permission(&who).await.unwrap(), permission);
    }
    assert_eq!(
        record.get_permission(&fx.accounts.user3).await.unwrap(),
        tessera_core::Permission::Denied
    );
}

#[tokio::test]
async fn test_concurrent_decryptions() {
    let fx = RecordFixture::new().await;
    let client = client(&fx);
    let record = client.record(fx.fingerprint);
    let resolver = CountingResolver::new(fx.blobs.clone());

    let owner_reads = (0..8).map(|_| record.decrypt_data(&fx.owner_keys.private, &resolver));
    let results = futures::future::join_all(owner_reads).await;
    assert!(results.iter().all(|r| r.as_deref() == Ok(TEST_DATA)));

    let viewer_reads = (0..8).map(|_| {
        record.decrypt_permissioned(&fx.accounts.user2, &fx.viewer_keys.private, &resolver)
    });
    let results = futures::future::join_all(viewer_reads).await;
    assert!(results.iter().all(|r| r.as_deref() == Ok(TEST_DATA)));

    assert_eq!(resolver.calls(), 16);
}
