//! Votes and their canonical form.
//!
//! A [`Vote`] is never encoded directly. [`canonicalize_vote`] projects it
//! onto a [`CanonicalVote`] (no signature, no validator identity, plus the
//! chain id) and that projection is what gets encoded and signed.

use aminovec_canonical::{EncodeError, Encoder, Record, Timestamp, ToValue, Value};
use serde::{Serialize, Serializer};

use crate::block_id::{BlockId, CanonicalBlockId};
use crate::json::{base64_std, hex_upper};

/// Kind of signed consensus message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SignedMsgType {
    /// First voting step.
    Prevote = 0x01,
    /// Second voting step.
    Precommit = 0x02,
    /// Block proposal.
    Proposal = 0x20,
}

impl SignedMsgType {
    /// Wire byte.
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl Serialize for SignedMsgType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_byte())
    }
}

/// A validator's vote as gossiped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vote {
    /// Vote kind.
    #[serde(rename = "type")]
    pub vote_type: SignedMsgType,
    /// Block height.
    pub height: i64,
    /// Consensus round.
    pub round: i32,
    /// Voted block; the zero value votes nil.
    pub block_id: BlockId,
    /// When the validator cast the vote.
    pub timestamp: Timestamp,
    /// Address of the voting validator.
    #[serde(with = "hex_upper")]
    pub validator_address: Vec<u8>,
    /// Index of the validator in the validator set.
    pub validator_index: i32,
    /// Signature over the sign bytes.
    #[serde(with = "base64_std")]
    pub signature: Vec<u8>,
}

/// Projection of a [`Vote`] that validators sign.
///
/// Fields, in wire order: `1 type`, `2 height` (fixed64), `3 round`
/// (fixed64), `4 block_id`, `5 timestamp`, `6 chain_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalVote {
    /// Vote kind.
    pub vote_type: SignedMsgType,
    /// Block height.
    pub height: i64,
    /// Consensus round, widened.
    pub round: i64,
    /// Canonical block id.
    pub block_id: CanonicalBlockId,
    /// Vote time.
    pub timestamp: Timestamp,
    /// Chain the vote belongs to.
    pub chain_id: String,
}

/// Projects `vote` onto its canonical form for `chain_id`.
///
/// Drops the signature and the validator address and index. The result
/// depends only on the arguments.
pub fn canonicalize_vote(chain_id: &str, vote: &Vote) -> CanonicalVote {
    CanonicalVote {
        vote_type: vote.vote_type,
        height: vote.height,
        round: i64::from(vote.round),
        block_id: vote.block_id.to_canonical(),
        timestamp: vote.timestamp,
        chain_id: chain_id.to_string(),
    }
}

/// Length-prefixed encoding of the canonical vote: the bytes a validator signs.
pub fn vote_sign_bytes(
    chain_id: &str,
    vote: &Vote,
    encoder: &Encoder<'_>,
) -> Result<Vec<u8>, EncodeError> {
    encoder.encode_length_prefixed(&canonicalize_vote(chain_id, vote).to_value())
}

impl ToValue for CanonicalVote {
    fn to_value(&self) -> Value {
        Record::new("CanonicalVote")
            .field(1, "type", Value::Int(i64::from(self.vote_type.as_byte())))
            .field(2, "height", Value::Fixed64(self.height))
            .field(3, "round", Value::Fixed64(self.round))
            .field(4, "block_id", self.block_id.to_value())
            .field(5, "timestamp", self.timestamp)
            .field(6, "chain_id", self.chain_id.as_str())
            .into()
    }
}
