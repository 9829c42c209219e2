//! # Tessera Effects - Handlers
//!
//! Implementations of the effect traits defined in `tessera-core`:
//!
//! - [`HpkeCipherHandler`]: X25519 HPKE encryption for record ciphertext
//! - [`MemoryLedgerHandler`]: in-memory ledger tables for tests and simulation
//! - [`MemoryBlobStore`], [`FnResolver`]: locator resolvers
//! - [`TimeoutLedger`], [`TimeoutResolver`]: per-call deadlines for collaborators
//!
//! Handlers are stateless with respect to record queries and safe to share
//! across concurrent calls.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cipher;
pub mod ledger;
pub mod logging;
pub mod reliability;
pub mod resolver;

pub use cipher::HpkeCipherHandler;
pub use ledger::MemoryLedgerHandler;
pub use logging::init_tracing;
pub use reliability::{TimeoutLedger, TimeoutResolver};
pub use resolver::{resolver_fn, FnResolver, MemoryBlobStore};
