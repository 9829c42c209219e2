//! Asymmetric key material for record encryption
//!
//! Keys are opaque byte strings here; their encoding belongs to whichever
//! cipher handler produced them.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Public key ciphertext is produced for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(pub Vec<u8>);

impl PublicKey {
    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// `0x`-prefixed hex rendering
    pub fn to_hex(&self) -> String {
        super::to_prefixed_hex(&self.0)
    }
}

/// Private key that opens ciphertext produced for its public half
///
/// Bytes are wiped on drop and never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(Vec<u8>);

impl PrivateKey {
    /// Wrap raw key bytes
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// Matching public/private key pair
#[derive(Debug, Clone)]
pub struct KeyPair {
    /// Public half, handed to whoever encrypts for this key
    pub public: PublicKey,
    /// Private half, passed to decrypt calls
    pub private: PrivateKey,
}

impl KeyPair {
    /// Assemble a key pair from raw bytes
    pub fn new(public: Vec<u8>, private: Vec<u8>) -> Self {
        Self {
            public: PublicKey(public),
            private: PrivateKey::new(private),
        }
    }
}
