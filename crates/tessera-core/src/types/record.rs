//! Ledger-side record state, in wire form and decoded form
//!
//! The `Raw*` types mirror the contract surface exactly, sentinels included.
//! Everything past the ledger gateway works with the decoded types, where
//! absence is `None`/`Denied` rather than a run of zero bytes.

use super::identifiers::{Address, Locator, ADDRESS_LEN, LOCATOR_LEN};
use super::Fingerprint;
use crate::errors::{Result, TesseraError};
use crate::hash::DIGEST_LEN;
use serde::{Deserialize, Serialize};

/// Permission tuple as returned by the ledger: `(canAccess, dataUri)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawPermission {
    /// Whether a grant exists
    pub can_access: bool,
    /// Grantee-specific locator, all-zero when there is no grant
    pub data_uri: [u8; LOCATOR_LEN],
}

/// A viewer's access to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Access granted; ciphertext for this viewer lives at `data_uri`
    Granted {
        /// Viewer-specific ciphertext locator
        data_uri: Locator,
    },
    /// No grant recorded
    Denied,
}

impl Permission {
    /// Whether the viewer may access the record
    pub fn can_access(&self) -> bool {
        matches!(self, Self::Granted { .. })
    }

    /// The viewer's locator, if access is granted
    pub fn data_uri(&self) -> Option<&Locator> {
        match self {
            Self::Granted { data_uri } => Some(data_uri),
            Self::Denied => None,
        }
    }

    /// Decode the ledger's permission tuple.
    ///
    /// A grant without a locator has nothing to resolve and decodes as
    /// `Denied`; callers that care can detect it with
    /// [`RawPermission::is_inconsistent`].
    pub fn from_wire(raw: RawPermission) -> Self {
        match (raw.can_access, Locator::from_wire(raw.data_uri)) {
            (true, Some(data_uri)) => Self::Granted { data_uri },
            _ => Self::Denied,
        }
    }

    /// Encode for the ledger
    pub fn to_wire(&self) -> RawPermission {
        RawPermission {
            can_access: self.can_access(),
            data_uri: Locator::to_wire(self.data_uri()),
        }
    }
}

impl RawPermission {
    /// A grant flagged as present but carrying the zero locator
    pub fn is_inconsistent(&self) -> bool {
        self.can_access && self.data_uri == Locator::SENTINEL
    }
}

/// Record entry as returned by the ledger's record table.
///
/// A zero `owner` means the ledger has no record under the requested key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// Fingerprint the ledger stores for the record
    pub data_hash: [u8; DIGEST_LEN],
    /// Owning account
    pub owner: [u8; ADDRESS_LEN],
    /// Hash of the record's metadata string
    pub metadata_hash: [u8; DIGEST_LEN],
    /// Number of attestations recorded
    pub sig_count: u64,
    /// Aggregate provenance score of the attesters
    pub iris_score: u64,
    /// Owner's ciphertext locator
    pub data_uri: [u8; LOCATOR_LEN],
    /// Ledger timestamp of the record's creation
    pub timestamp: u64,
}

/// Decoded record entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Fingerprint the ledger stores for the record
    pub fingerprint: Fingerprint,
    /// Owning account
    pub owner: Address,
    /// Hash of the record's metadata string
    pub metadata_hash: Fingerprint,
    /// Number of attestations recorded
    pub attestation_count: u64,
    /// Aggregate provenance score of the attesters
    pub iris_score: u64,
    /// Owner's ciphertext locator
    pub data_uri: Locator,
    /// Ledger timestamp of the record's creation
    pub timestamp: u64,
}

impl StoredRecord {
    /// Decode a record entry. `Ok(None)` when the ledger has no record.
    pub fn from_wire(raw: RawRecord) -> Result<Option<Self>> {
        let owner = Address(raw.owner);
        if owner.is_zero() {
            return Ok(None);
        }
        let data_uri = Locator::from_wire(raw.data_uri).ok_or_else(|| {
            TesseraError::ledger_inconsistency(format!(
                "record {} has an owner but no data locator",
                Fingerprint(raw.data_hash)
            ))
        })?;
        Ok(Some(Self {
            fingerprint: Fingerprint(raw.data_hash),
            owner,
            metadata_hash: Fingerprint(raw.metadata_hash),
            attestation_count: raw.sig_count,
            iris_score: raw.iris_score,
            data_uri,
            timestamp: raw.timestamp,
        }))
    }

    /// Encode for the ledger
    pub fn to_wire(&self) -> RawRecord {
        RawRecord {
            data_hash: self.fingerprint.0,
            owner: self.owner.0,
            metadata_hash: self.metadata_hash.0,
            sig_count: self.attestation_count,
            iris_score: self.iris_score,
            data_uri: *self.data_uri.as_bytes(),
            timestamp: self.timestamp,
        }
    }
}
