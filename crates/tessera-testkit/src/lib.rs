//! Tessera Testing Infrastructure
//!
//! Fixtures and collaborator doubles for record tests.
//!
//! ```rust,ignore
//! use tessera_testkit::RecordFixture;
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let fx = RecordFixture::new().await;
//!     let client = RecordClient::new(fx.ledger.clone(), fx.cipher);
//!     let record = client.record(fx.fingerprint);
//!     // ... test logic
//! }
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod fixtures;
pub mod ledgers;
pub mod resolvers;

pub use fixtures::*;
pub use ledgers::*;
pub use resolvers::*;
