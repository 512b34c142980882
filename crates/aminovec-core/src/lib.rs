//! Tendermint domain types encoded by the reference-vector generator.
//!
//! This crate provides:
//! - Public keys as a closed enum over registered concrete types
//! - Block ids and part set headers, plain and canonical
//! - Votes and the vote canonicalizer
//! - Validator hash inputs
//!
//! Every type implements [`aminovec_canonical::ToValue`] with an explicit
//! field declaration; none of them rely on struct field order.
//!
#![deny(missing_docs)]

/// Block ids and part set headers.
pub mod block_id;
/// Error types for building domain values.
pub mod errors;
mod json;
/// Public keys.
pub mod pubkey;
/// Validator hash inputs.
pub mod validator;
/// Votes and canonical votes.
pub mod vote;

pub use block_id::{BlockId, CanonicalBlockId, CanonicalPartSetHeader, PartSetHeader};
pub use errors::CoreError;
pub use pubkey::PubKey;
pub use validator::ValidatorHashInput;
pub use vote::{canonicalize_vote, vote_sign_bytes, CanonicalVote, SignedMsgType, Vote};
