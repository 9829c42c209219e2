//! Record fingerprints
//!
//! A fingerprint is the hash of a record's plaintext and the only identity a
//! record has. It keys every ledger table and is what decrypted plaintext is
//! checked against.

use super::impl_hex_newtype;
use crate::hash::{hash, DIGEST_LEN};

/// Content fingerprint of a record's plaintext
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint(pub [u8; DIGEST_LEN]);

impl Fingerprint {
    /// Wrap raw digest bytes, e.g. a fingerprint read back from the ledger
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Fingerprint of the given plaintext
    pub fn of(plaintext: &[u8]) -> Self {
        Self(hash(plaintext))
    }

    /// Whether `plaintext` hashes to this fingerprint
    pub fn matches(&self, plaintext: &[u8]) -> bool {
        Self::of(plaintext) == *self
    }

    /// Raw digest bytes
    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// `0x`-prefixed hex rendering
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl From<[u8; DIGEST_LEN]> for Fingerprint {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Fingerprint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl_hex_newtype!(Fingerprint, DIGEST_LEN, |bytes| Ok(Fingerprint(bytes)));
