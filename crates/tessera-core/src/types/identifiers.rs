//! Ledger identities and ciphertext locators

use super::impl_hex_newtype;
use crate::errors::{Result, TesseraError};

/// Length of an account address on the ledger
pub const ADDRESS_LEN: usize = 20;

/// Length of a locator at the ledger boundary
pub const LOCATOR_LEN: usize = 32;

/// Account identity on the ledger (attesters, owners, viewers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero address; the ledger's "nobody"
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    /// Wrap raw address bytes
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Whether this is the all-zero address
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl_hex_newtype!(Address, ADDRESS_LEN, |bytes| Ok(Address(bytes)));

/// Opaque pointer to ciphertext held outside the ledger
///
/// A `Locator` is never all-zero. The ledger encodes "no locator" as 32 zero
/// bytes; that sentinel is decoded to `None` by [`Locator::from_wire`] and
/// cannot be constructed as a `Locator`, so it can never reach a resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Locator([u8; LOCATOR_LEN]);

impl Locator {
    /// The ledger's encoding of "no locator"
    pub const SENTINEL: [u8; LOCATOR_LEN] = [0u8; LOCATOR_LEN];

    /// Create a locator, rejecting the zero sentinel
    pub fn new(bytes: [u8; LOCATOR_LEN]) -> Result<Self> {
        Self::from_wire(bytes)
            .ok_or_else(|| TesseraError::invalid("locator must not be the all-zero sentinel"))
    }

    /// Decode a locator read from the ledger
    pub fn from_wire(bytes: [u8; LOCATOR_LEN]) -> Option<Self> {
        if bytes == Self::SENTINEL {
            None
        } else {
            Some(Self(bytes))
        }
    }

    /// Encode an optional locator for the ledger
    pub fn to_wire(locator: Option<&Locator>) -> [u8; LOCATOR_LEN] {
        locator.map_or(Self::SENTINEL, |l| l.0)
    }

    /// Raw locator bytes
    pub const fn as_bytes(&self) -> &[u8; LOCATOR_LEN] {
        &self.0
    }
}

impl TryFrom<[u8; LOCATOR_LEN]> for Locator {
    type Error = TesseraError;

    fn try_from(bytes: [u8; LOCATOR_LEN]) -> Result<Self> {
        Self::new(bytes)
    }
}

impl_hex_newtype!(Locator, LOCATOR_LEN, Locator::new);
