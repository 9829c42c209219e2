//! Unified error system for Tessera
//!
//! Every failure a record query can produce is one variant of [`TesseraError`].
//! Callers match on the variant, or on [`ErrorKind`], to decide what to do
//! next. [`TesseraError::is_transient`] marks the ones worth retrying.

use serde::{Deserialize, Serialize};

/// Unified error type for all Tessera operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum TesseraError {
    /// The ledger could not be reached or did not answer
    #[error("Ledger unavailable: {message}")]
    LedgerUnavailable {
        /// Transport or availability failure description
        message: String,
    },

    /// A locator could not be resolved to ciphertext bytes
    #[error("Resolution failed: {message}")]
    Resolution {
        /// Resolver failure description
        message: String,
    },

    /// The cipher rejected the ciphertext for the given key
    #[error("Decryption failed: {message}")]
    Decryption {
        /// Cipher failure description
        message: String,
    },

    /// Decryption succeeded but the plaintext does not hash to the expected fingerprint
    #[error("plaintext data hash mismatch: expected {expected}, got {actual}")]
    HashMismatch {
        /// Hex rendering of the expected fingerprint
        expected: String,
        /// Hex rendering of the fingerprint recomputed over the plaintext
        actual: String,
    },

    /// The viewer holds no grant for the record
    #[error("viewer has no permission to view the data: {viewer}")]
    PermissionDenied {
        /// Hex rendering of the viewer identity
        viewer: String,
    },

    /// The ledger holds no entry for the fingerprint
    #[error("Record not found: {fingerprint}")]
    RecordNotFound {
        /// Hex rendering of the missing fingerprint
        fingerprint: String,
    },

    /// The ledger answered, but its answer contradicts itself or the caller
    #[error("Ledger inconsistency: {message}")]
    LedgerInconsistency {
        /// Description of the contradiction
        message: String,
    },

    /// Invalid input
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration problem
        message: String,
    },
}

/// Fieldless discriminant of [`TesseraError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// See [`TesseraError::LedgerUnavailable`]
    LedgerUnavailable,
    /// See [`TesseraError::Resolution`]
    Resolution,
    /// See [`TesseraError::Decryption`]
    Decryption,
    /// See [`TesseraError::HashMismatch`]
    HashMismatch,
    /// See [`TesseraError::PermissionDenied`]
    PermissionDenied,
    /// See [`TesseraError::RecordNotFound`]
    RecordNotFound,
    /// See [`TesseraError::LedgerInconsistency`]
    LedgerInconsistency,
    /// See [`TesseraError::Invalid`]
    Invalid,
    /// See [`TesseraError::Config`]
    Config,
}

impl TesseraError {
    /// Create a ledger unavailable error
    pub fn ledger_unavailable(message: impl Into<String>) -> Self {
        Self::LedgerUnavailable {
            message: message.into(),
        }
    }

    /// Create a resolution error
    pub fn resolution(message: impl Into<String>) -> Self {
        Self::Resolution {
            message: message.into(),
        }
    }

    /// Create a decryption error
    pub fn decryption(message: impl Into<String>) -> Self {
        Self::Decryption {
            message: message.into(),
        }
    }

    /// Create a hash mismatch error
    pub fn hash_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::HashMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(viewer: impl Into<String>) -> Self {
        Self::PermissionDenied {
            viewer: viewer.into(),
        }
    }

    /// Create a record not found error
    pub fn record_not_found(fingerprint: impl Into<String>) -> Self {
        Self::RecordNotFound {
            fingerprint: fingerprint.into(),
        }
    }

    /// Create a ledger inconsistency error
    pub fn ledger_inconsistency(message: impl Into<String>) -> Self {
        Self::LedgerInconsistency {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The variant of this error without its payload
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LedgerUnavailable { .. } => ErrorKind::LedgerUnavailable,
            Self::Resolution { .. } => ErrorKind::Resolution,
            Self::Decryption { .. } => ErrorKind::Decryption,
            Self::HashMismatch { .. } => ErrorKind::HashMismatch,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::RecordNotFound { .. } => ErrorKind::RecordNotFound,
            Self::LedgerInconsistency { .. } => ErrorKind::LedgerInconsistency,
            Self::Invalid { .. } => ErrorKind::Invalid,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    /// Whether the same call may succeed later without any change by the caller
    ///
    /// Only collaborator outages qualify. Denials, integrity failures and key
    /// errors never clear up on their own.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::LedgerUnavailable { .. } | Self::Resolution { .. }
        )
    }
}

/// Standard Result type for Tessera operations
pub type Result<T> = std::result::Result<T, TesseraError>;

impl From<hex::FromHexError> for TesseraError {
    fn from(err: hex::FromHexError) -> Self {
        Self::invalid(format!("bad hex: {err}"))
    }
}

impl From<toml::de::Error> for TesseraError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}
