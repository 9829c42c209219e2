//! # Tessera Core - Foundation
//!
//! Types, hashing, errors and effect traits shared by every Tessera crate.
//!
//! - **Fingerprints**: content hashes that identify records ([`Fingerprint`], [`hash`])
//! - **Ledger wire types**: addresses, locators, permission and record tuples
//!   with their zero sentinels, plus the decoded forms used everywhere else
//! - **Effect traits**: [`LedgerEffects`], [`LocatorResolver`], [`CipherEffects`]
//! - **Errors**: one [`TesseraError`] enum covering every failure class
//! - **Configuration**: [`TesseraConfig`] with TOML and environment layering
//!
//! Handlers for the effect traits live in `tessera-effects`; record
//! orchestration lives in `tessera-record`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod effects;
pub mod errors;
pub mod hash;
pub mod types;

pub use config::{
    ConfigValidation, LoggingConfig, RecordConfig, TesseraConfig, TesseraConfigSource,
    TimeoutConfig,
};
pub use effects::{CipherEffects, LedgerEffects, LocatorResolver};
pub use errors::{ErrorKind, Result, TesseraError};
pub use types::{
    Address, Fingerprint, KeyPair, Locator, Permission, PrivateKey, PublicKey, RawPermission,
    RawRecord, StoredRecord,
};
