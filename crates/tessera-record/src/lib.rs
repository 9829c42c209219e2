//! # Tessera Record - Domain
//!
//! Retrieval, decryption and verification of records whose fingerprint,
//! attestations and access grants are anchored on a ledger.
//!
//! ```rust,ignore
//! use tessera_effects::{HpkeCipherHandler, MemoryBlobStore};
//! use tessera_record::RecordClient;
//!
//! let client = RecordClient::new(ledger, HpkeCipherHandler::new());
//! let record = client.record(fingerprint);
//!
//! let plaintext = record
//!     .decrypt_permissioned(&viewer, &viewer_key, &blob_store)
//!     .await?;
//! assert!(record.verify_data(&plaintext));
//! ```
//!
//! Failures are [`TesseraError`](tessera_core::TesseraError) variants; a
//! ledger outage is never reported as "no permission" or "not attested".

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod gateway;
pub mod record;

pub use client::{bounded_resolver, RecordClient};
pub use gateway::LedgerGateway;
pub use record::Record;
