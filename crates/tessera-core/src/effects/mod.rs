//! Effect trait definitions
//!
//! A record query touches three collaborators it does not own: the ledger,
//! the locator resolver and the asymmetric cipher. Each is an injected trait
//! here; handlers live in `tessera-effects` and test doubles in
//! `tessera-testkit`.
//!
//! The ledger and resolver are the only suspension points and are async. The
//! cipher is CPU-bound and synchronous.

pub mod cipher;
pub mod ledger;
pub mod resolver;

pub use cipher::{CipherEffects, CipherError};
pub use ledger::{LedgerEffects, LedgerError};
pub use resolver::{LocatorResolver, ResolveError};
