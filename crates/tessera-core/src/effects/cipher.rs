//! Asymmetric encryption
//!
//! Records only ever decrypt. `encrypt` exists for the parties that produce
//! ciphertext for a record, and for tests.

use crate::types::{KeyPair, PrivateKey, PublicKey};
use crate::TesseraError;

/// Cipher failure
pub type CipherError = TesseraError;

/// Public-key encryption to a recipient and decryption by that recipient
pub trait CipherEffects: Send + Sync {
    /// Encrypt `plaintext` so that only the holder of `public_key`'s private half can read it
    fn encrypt(&self, public_key: &PublicKey, plaintext: &[u8]) -> Result<Vec<u8>, CipherError>;

    /// Decrypt `ciphertext`.
    ///
    /// Fails with [`TesseraError::Decryption`] when the ciphertext was not
    /// produced for `private_key`'s public half or has been altered.
    fn decrypt(&self, private_key: &PrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError>;

    /// Generate a fresh key pair
    fn generate_keypair(&self) -> Result<KeyPair, CipherError>;

    /// Derive a key pair deterministically from input keying material
    fn derive_keypair(&self, ikm: &[u8]) -> Result<KeyPair, CipherError>;

    /// Public half of a private key
    fn public_key(&self, private_key: &PrivateKey) -> Result<PublicKey, CipherError>;
}
