//! Hashing and hex encoding helpers

use sha3::{Digest, Keccak256};

/// Compute the keccak-256 digest of `data`
///
/// # Examples
///
/// ```
/// use minter::util::keccak256;
///
/// let hash = keccak256(b"");
/// assert_eq!(
///     hex::encode(hash),
///     "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
/// );
/// ```
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Returns the 4-byte selector of a canonical function signature
///
/// # Examples
///
/// ```
/// use minter::util::selector;
///
/// assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
/// ```
#[must_use]
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Encode bytes as `0x`-prefixed lowercase hex
#[must_use]
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode hex with or without a `0x` prefix
///
/// # Errors
///
/// Returns an error if the input is not valid hex.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(strip_0x(s))
}

/// Strip a leading `0x`/`0X` if present
#[must_use]
pub fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Parse a JSON-RPC quantity (`0x`-prefixed, no leading zeros)
///
/// # Errors
///
/// Returns an error if the string is not a hex quantity that fits in a `u64`.
pub fn parse_quantity(s: &str) -> Result<u64, String> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| format!("quantity {s:?} lacks 0x prefix"))?;
    if digits.is_empty() {
        return Err(format!("empty quantity {s:?}"));
    }
    u64::from_str_radix(digits, 16).map_err(|e| format!("invalid quantity {s:?}: {e}"))
}

/// Format a `u64` as a JSON-RPC quantity
#[must_use]
pub fn format_quantity(value: u64) -> String {
    format!("{value:#x}")
}

/// serde adapter for quantities carried as hex strings
pub mod quantity {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_quantity(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_quantity(&s).map_err(D::Error::custom)
    }

    /// Same as the parent adapter for `Option<u64>`, where `null` maps to `None`
    pub mod option {
        use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<u64>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => serializer.serialize_str(&super::super::format_quantity(*v)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<u64>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|s| super::super::parse_quantity(&s).map_err(D::Error::custom))
                .transpose()
        }
    }
}
