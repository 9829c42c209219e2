//! HPKE cipher handler
//!
//! Ciphertext layout: the 32-byte X25519 encapsulated key followed by the
//! AEAD ciphertext. Suite: X25519 + HKDF-SHA256 + AES-256-GCM, base mode,
//! fixed info string, empty AAD.

use hpke::{
    aead::AesGcm256, kdf::HkdfSha256, kem::X25519HkdfSha256, single_shot_open, single_shot_seal,
    Deserializable, Kem, OpModeR, OpModeS, Serializable,
};
use tessera_core::effects::{CipherEffects, CipherError};
use tessera_core::{KeyPair, PrivateKey, PublicKey, TesseraError};

type HpkeKem = X25519HkdfSha256;
type HpkeKdf = HkdfSha256;
type HpkeAead = AesGcm256;

/// Length of the X25519 encapsulated key that prefixes every ciphertext
pub const ENCAPPED_KEY_LEN: usize = 32;

const INFO: &[u8] = b"tessera-record-encryption-v1";

/// Production cipher: HPKE single-shot seal/open
#[derive(Debug, Clone, Copy, Default)]
pub struct HpkeCipherHandler;

impl HpkeCipherHandler {
    /// Create a new HPKE handler
    pub fn new() -> Self {
        Self
    }

    fn private_key(private_key: &PrivateKey) -> Result<<HpkeKem as Kem>::PrivateKey, CipherError> {
        <HpkeKem as Kem>::PrivateKey::from_bytes(private_key.as_bytes())
            .map_err(|e| TesseraError::decryption(format!("Invalid HPKE private key: {e:?}")))
    }

    fn keypair(
        private_key: <HpkeKem as Kem>::PrivateKey,
        public_key: <HpkeKem as Kem>::PublicKey,
    ) -> KeyPair {
        KeyPair::new(
            public_key.to_bytes().to_vec(),
            private_key.to_bytes().to_vec(),
        )
    }
}

impl CipherEffects for HpkeCipherHandler {
    fn encrypt(&self, public_key: &PublicKey, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let recipient = <HpkeKem as Kem>::PublicKey::from_bytes(public_key.as_bytes())
            .map_err(|e| TesseraError::invalid(format!("Invalid HPKE public key: {e:?}")))?;

        let mut rng = rand::thread_rng();
        let (encapped_key, ciphertext) = single_shot_seal::<HpkeAead, HpkeKdf, HpkeKem, _>(
            &OpModeS::Base,
            &recipient,
            INFO,
            plaintext,
            b"",
            &mut rng,
        )
        .map_err(|e| TesseraError::invalid(format!("HPKE encryption failed: {e:?}")))?;

        let mut sealed = Vec::with_capacity(ENCAPPED_KEY_LEN + ciphertext.len());
        sealed.extend_from_slice(&encapped_key.to_bytes());
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    fn decrypt(&self, private_key: &PrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let recipient = Self::private_key(private_key)?;

        if ciphertext.len() < ENCAPPED_KEY_LEN {
            return Err(TesseraError::decryption(
                "Ciphertext too short to contain HPKE encapsulated key",
            ));
        }
        let (encapped_key_bytes, sealed) = ciphertext.split_at(ENCAPPED_KEY_LEN);
        let encapped_key = <HpkeKem as Kem>::EncappedKey::from_bytes(encapped_key_bytes)
            .map_err(|e| {
                TesseraError::decryption(format!("Invalid HPKE encapsulated key: {e:?}"))
            })?;

        single_shot_open::<HpkeAead, HpkeKdf, HpkeKem>(
            &OpModeR::Base,
            &recipient,
            &encapped_key,
            INFO,
            sealed,
            b"",
        )
        .map_err(|e| TesseraError::decryption(format!("HPKE decryption failed: {e:?}")))
    }

    fn generate_keypair(&self) -> Result<KeyPair, CipherError> {
        let mut rng = rand::thread_rng();
        let (private_key, public_key) = HpkeKem::gen_keypair(&mut rng);
        Ok(Self::keypair(private_key, public_key))
    }

    fn derive_keypair(&self, ikm: &[u8]) -> Result<KeyPair, CipherError> {
        if ikm.len() < 32 {
            return Err(TesseraError::invalid(
                "HPKE key derivation needs at least 32 bytes of input keying material",
            ));
        }
        let (private_key, public_key) = HpkeKem::derive_keypair(ikm);
        Ok(Self::keypair(private_key, public_key))
    }

    fn public_key(&self, private_key: &PrivateKey) -> Result<PublicKey, CipherError> {
        let private_key = <HpkeKem as Kem>::PrivateKey::from_bytes(private_key.as_bytes())
            .map_err(|e| TesseraError::invalid(format!("Invalid HPKE private key: {e:?}")))?;
        Ok(PublicKey(HpkeKem::sk_to_pk(&private_key).to_bytes().to_vec()))
    }
}
