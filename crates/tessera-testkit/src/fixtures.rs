//! Record fixtures
//!
//! [`RecordFixture`] seeds an in-memory ledger the way a real deployment
//! would look after a provider added a record for its owner, attested it and
//! the owner shared it with one viewer.

use tessera_core::{Address, CipherEffects, Fingerprint, KeyPair, Locator, StoredRecord};
use tessera_effects::{HpkeCipherHandler, MemoryBlobStore, MemoryLedgerHandler};

/// Plaintext of the fixture record
pub const TEST_DATA: &[u8] = b"foobar";

/// Plaintext that decrypts cleanly but is not the fixture record
pub const WRONG_DATA: &[u8] = b"fox";

/// Metadata string stored (hashed) with the fixture record
pub const TEST_METADATA: &str = "Blood_Pressure";

/// Deterministic test address
pub fn test_address(seed: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = 0xa0;
    bytes[19] = seed;
    Address(bytes)
}

/// Deterministic, non-sentinel test locator
pub fn test_locator(seed: u8) -> Locator {
    let mut bytes = [seed; 32];
    bytes[0] = 0x10;
    Locator::new(bytes).expect("first byte is non-zero")
}

/// Deterministic HPKE key pair
pub fn test_keypair(seed: u8) -> KeyPair {
    HpkeCipherHandler::new()
        .derive_keypair(&[seed; 32])
        .expect("32 bytes of ikm")
}

/// Accounts taking part in the fixture
#[derive(Debug, Clone, Copy)]
pub struct TestAccounts {
    /// Contract administrator; never appears in record tables
    pub admin: Address,
    /// Record owner
    pub user1: Address,
    /// Viewer the record is shared with
    pub user2: Address,
    /// Viewer with no grant
    pub user3: Address,
    /// Provider that added and attested the record
    pub provider: Address,
}

impl Default for TestAccounts {
    fn default() -> Self {
        Self {
            admin: test_address(1),
            user1: test_address(2),
            user2: test_address(3),
            user3: test_address(4),
            provider: test_address(5),
        }
    }
}

/// Ledger, ciphertext store and keys for one shared record
#[derive(Debug, Clone)]
pub struct RecordFixture {
    /// Seeded ledger
    pub ledger: MemoryLedgerHandler,
    /// Ciphertext for both copies of the record
    pub blobs: MemoryBlobStore,
    /// Cipher used to produce the ciphertext
    pub cipher: HpkeCipherHandler,
    /// Participants
    pub accounts: TestAccounts,
    /// Fingerprint of [`TEST_DATA`]
    pub fingerprint: Fingerprint,
    /// Owner's keys; the owner's copy is encrypted to these
    pub owner_keys: KeyPair,
    /// `user2`'s keys; the shared copy is encrypted to these
    pub viewer_keys: KeyPair,
    /// Locator of the owner's copy
    pub owner_uri: Locator,
    /// Locator of `user2`'s shared copy
    pub shared_uri: Locator,
}

impl RecordFixture {
    /// Provider adds [`TEST_DATA`] for `user1`, attests it, and `user1`
    /// shares it with `user2`
    pub async fn new() -> Self {
        let accounts = TestAccounts::default();
        let cipher = HpkeCipherHandler::new();
        let fingerprint = Fingerprint::of(TEST_DATA);
        let owner_uri = test_locator(0x59);
        let shared_uri = test_locator(0xde);

        let ledger = MemoryLedgerHandler::new();
        ledger
            .insert_record(StoredRecord {
                fingerprint,
                owner: accounts.user1,
                metadata_hash: Fingerprint::of(TEST_METADATA.as_bytes()),
                attestation_count: 0,
                iris_score: 1,
                data_uri: owner_uri,
                timestamp: 1_520_000_000,
            })
            .await;
        ledger.attest(fingerprint, accounts.provider).await;
        ledger.grant_access(fingerprint, accounts.user2, shared_uri).await;

        let fixture = Self {
            ledger,
            blobs: MemoryBlobStore::new(),
            cipher,
            accounts,
            fingerprint,
            owner_keys: test_keypair(0x11),
            viewer_keys: test_keypair(0x22),
            owner_uri,
            shared_uri,
        };

        let owner_copy = fixture.seal(&fixture.owner_keys, TEST_DATA);
        let shared_copy = fixture.seal(&fixture.viewer_keys, TEST_DATA);
        fixture.blobs.put(owner_uri, owner_copy).await;
        fixture.blobs.put(shared_uri, shared_copy).await;
        fixture
    }

    /// Encrypt `plaintext` to `keys`
    pub fn seal(&self, keys: &KeyPair, plaintext: &[u8]) -> Vec<u8> {
        self.cipher
            .encrypt(&keys.public, plaintext)
            .expect("fixture keys are valid")
    }
}
