//! Content hashing for record fingerprints
//!
//! Hashing is pure and synchronous, so it is not modelled as an effect. The
//! algorithm is chosen once, through [`ALGORITHM`], and every fingerprint in
//! the system (record identity, post-decryption verification, local
//! verification, metadata hashes) goes through [`hash`] or [`hasher`].
//!
//! Current algorithm: **SHA-256** (32-byte output). Fingerprints written by
//! a ledger that hashes with Keccak-256 will not verify under it.
//!
//! ```ignore
//! use tessera_core::hash::hash;
//!
//! let digest = hash(b"foobar");
//! assert_eq!(digest.len(), 32);
//! ```

// The one module allowed to name the concrete digest type.
#![allow(clippy::disallowed_types)]

use sha2::{Digest, Sha256};
use std::fmt;

/// Length in bytes of every digest produced by this module
pub const DIGEST_LEN: usize = 32;

/// Synchronous content-addressing hash
pub trait HashAlgorithm: Send + Sync + fmt::Debug {
    /// Hash arbitrary bytes to a 32-byte digest
    fn hash(&self, data: &[u8]) -> [u8; DIGEST_LEN];

    /// Create an incremental hasher for multi-part input
    fn hasher(&self) -> Box<dyn Hasher>;
}

/// Incremental hashing of multi-part data
pub trait Hasher: Send {
    /// Feed more data
    fn update(&mut self, data: &[u8]);

    /// Consume the hasher and return the digest
    fn finalize(self: Box<Self>) -> [u8; DIGEST_LEN];
}

/// SHA-256 (NIST FIPS 180-4)
#[derive(Debug, Clone, Copy)]
pub struct Sha256Algorithm;

impl HashAlgorithm for Sha256Algorithm {
    fn hash(&self, data: &[u8]) -> [u8; DIGEST_LEN] {
        let mut output = [0u8; DIGEST_LEN];
        output.copy_from_slice(&Sha256::digest(data));
        output
    }

    fn hasher(&self) -> Box<dyn Hasher> {
        Box::new(Sha256Hasher(Sha256::new()))
    }
}

struct Sha256Hasher(Sha256);

impl Hasher for Sha256Hasher {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> [u8; DIGEST_LEN] {
        let mut output = [0u8; DIGEST_LEN];
        output.copy_from_slice(&self.0.finalize());
        output
    }
}

/// The hash algorithm used for every fingerprint.
///
/// Changing it changes record identity: fingerprints already on a ledger
/// stop matching.
pub const ALGORITHM: Sha256Algorithm = Sha256Algorithm;

/// Hash bytes with the global algorithm
#[inline]
pub fn hash(data: &[u8]) -> [u8; DIGEST_LEN] {
    ALGORITHM.hash(data)
}

/// Incremental hasher using the global algorithm
#[inline]
pub fn hasher() -> Box<dyn Hasher> {
    ALGORITHM.hasher()
}
