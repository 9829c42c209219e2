//! Value types shared across Tessera crates

pub mod fingerprint;
pub mod identifiers;
pub mod keys;
pub mod record;

pub use fingerprint::Fingerprint;
pub use identifiers::{Address, Locator};
pub use keys::{KeyPair, PrivateKey, PublicKey};
pub use record::{Permission, RawPermission, RawRecord, StoredRecord};

use crate::errors::{Result, TesseraError};

/// Render bytes as `0x`-prefixed lowercase hex
pub(crate) fn to_prefixed_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse exactly `N` bytes of hex, with or without a `0x` prefix
pub(crate) fn parse_fixed_hex<const N: usize>(s: &str) -> Result<[u8; N]> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.len() != N * 2 {
        return Err(TesseraError::invalid(format!(
            "expected {} hex digits, got {}",
            N * 2,
            digits.len()
        )));
    }
    let mut bytes = [0u8; N];
    hex::decode_to_slice(digits, &mut bytes)?;
    Ok(bytes)
}

/// Implements `Display`, `FromStr` and hex-string serde for a newtype over
/// `[u8; $len]`. `$ctor` turns parsed bytes into the type and may reject them.
macro_rules! impl_hex_newtype {
    ($ty:ident, $len:expr, $ctor:expr) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::types::to_prefixed_hex(&self.0))
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::errors::TesseraError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let bytes = $crate::types::parse_fixed_hex::<$len>(s)?;
                let ctor: fn([u8; $len]) -> $crate::errors::Result<$ty> = $ctor;
                ctor(bytes)
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use impl_hex_newtype;
