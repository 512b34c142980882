//! Sample values covered by the fixtures.
//!
//! Values are literals picked for coverage. Order matters: downstream
//! suites index into the generated arrays.

use aminovec_canonical::Timestamp;
use aminovec_core::{BlockId, PartSetHeader, PubKey, SignedMsgType, ValidatorHashInput, Vote};
use ed25519_dalek::SigningKey;
use sha2::{Digest, Sha256};

/// Secret the sample ed25519 key is derived from.
pub const PUBKEY_SECRET: &[u8] = b"foo";

const SAMPLE_HASH: &[u8; 20] = b"01234567890123456789";

/// Signed integers for the varint fixture.
pub fn varints() -> Vec<i64> {
    vec![
        0,
        1,
        255,
        256,
        1234,
        100_000,
        10_000_000_000,
        -1,
        -1234,
        i64::MIN,
        i64::MAX,
    ]
}

/// Votes for the canonical vote fixture.
pub fn votes() -> Vec<Vote> {
    vec![Vote {
        vote_type: SignedMsgType::Prevote,
        height: 1_234_567_890,
        round: 2,
        block_id: sample_block_id(),
        timestamp: Timestamp::from_unix(123_456_789, 123_456_789),
        validator_address: Vec::new(),
        validator_index: 0,
        signature: Vec::new(),
    }]
}

/// Instants for the timestamp fixture.
pub fn times() -> Vec<Timestamp> {
    vec![
        Timestamp::from_unix(123_456_789, 123_456_789),
        Timestamp::UNIX_EPOCH,
        Timestamp::from_unix(1_500_000_000, 0),
        Timestamp::from_unix(-86_400, 1),
    ]
}

/// Block ids for the block id fixture: nil, then populated.
pub fn block_ids() -> Vec<BlockId> {
    vec![BlockId::default(), sample_block_id()]
}

/// Ed25519 public key of the private key seeded by `sha256(PUBKEY_SECRET)`.
pub fn pubkey() -> PubKey {
    let seed: [u8; 32] = Sha256::digest(PUBKEY_SECRET).into();
    PubKey::Ed25519(SigningKey::from_bytes(&seed).verifying_key().to_bytes())
}

/// Validator hash input holding [`pubkey`].
pub fn validator_hash_input() -> ValidatorHashInput {
    ValidatorHashInput {
        pub_key: pubkey(),
        voting_power: 1234,
    }
}

fn sample_block_id() -> BlockId {
    BlockId {
        hash: SAMPLE_HASH.to_vec(),
        parts: PartSetHeader {
            total: 1,
            hash: SAMPLE_HASH.to_vec(),
        },
    }
}
