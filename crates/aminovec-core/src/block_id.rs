//! Block identifiers.
//!
//! Omission: every field follows the implicit-presence rule, so a block id
//! with an empty hash and an all-zero parts header encodes to zero bytes.

use aminovec_canonical::{Record, ToValue, Value};
use serde::Serialize;

use crate::errors::CoreError;
use crate::json::hex_upper;

/// Header of the part set a block was split into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartSetHeader {
    /// Number of parts. Must not be negative.
    pub total: i64,
    /// Merkle root of the parts.
    #[serde(with = "hex_upper")]
    pub hash: Vec<u8>,
}

impl PartSetHeader {
    /// Whether both fields hold their defaults.
    pub fn is_zero(&self) -> bool {
        self.total == 0 && self.hash.is_empty()
    }
}

impl ToValue for PartSetHeader {
    /// `1 total`, `2 hash`.
    fn to_value(&self) -> Value {
        Record::new("PartSetHeader")
            .field(1, "total", Value::Count(self.total))
            .field(2, "hash", self.hash.clone())
            .into()
    }
}

/// Identifier of a block: its hash plus its part set header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockId {
    /// Block hash.
    #[serde(with = "hex_upper")]
    pub hash: Vec<u8>,
    /// Part set header.
    pub parts: PartSetHeader,
}

impl BlockId {
    /// Builds a block id from hex hashes.
    pub fn from_hex(hash: &str, parts_total: i64, parts_hash: &str) -> Result<Self, CoreError> {
        Ok(Self {
            hash: hex::decode(hash).map_err(|source| CoreError::Hex {
                field: "block_id.hash",
                source,
            })?,
            parts: PartSetHeader {
                total: parts_total,
                hash: hex::decode(parts_hash).map_err(|source| CoreError::Hex {
                    field: "block_id.parts.hash",
                    source,
                })?,
            },
        })
    }

    /// Whether this is the nil block id.
    pub fn is_zero(&self) -> bool {
        self.hash.is_empty() && self.parts.is_zero()
    }

    /// Canonical form used inside sign bytes.
    pub fn to_canonical(&self) -> CanonicalBlockId {
        CanonicalBlockId {
            hash: self.hash.clone(),
            parts: CanonicalPartSetHeader {
                hash: self.parts.hash.clone(),
                total: self.parts.total,
            },
        }
    }
}

impl ToValue for BlockId {
    /// `1 hash`, `2 parts`.
    fn to_value(&self) -> Value {
        Record::new("BlockID")
            .field(1, "hash", self.hash.clone())
            .field(2, "parts", self.parts.to_value())
            .into()
    }
}

/// Part set header with the hash ahead of the count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalPartSetHeader {
    /// Merkle root of the parts.
    pub hash: Vec<u8>,
    /// Number of parts.
    pub total: i64,
}

impl ToValue for CanonicalPartSetHeader {
    /// `1 hash`, `2 total`.
    fn to_value(&self) -> Value {
        Record::new("CanonicalPartSetHeader")
            .field(1, "hash", self.hash.clone())
            .field(2, "total", Value::Count(self.total))
            .into()
    }
}

/// Block id as it appears in canonical votes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalBlockId {
    /// Block hash.
    pub hash: Vec<u8>,
    /// Canonical part set header.
    pub parts: CanonicalPartSetHeader,
}

impl ToValue for CanonicalBlockId {
    /// `1 hash`, `2 parts`.
    fn to_value(&self) -> Value {
        Record::new("CanonicalBlockID")
            .field(1, "hash", self.hash.clone())
            .field(2, "parts", self.parts.to_value())
            .into()
    }
}
