use aminovec_canonical::{Encoder, Registry, Timestamp, ToValue};
use aminovec_core::{
    canonicalize_vote, vote_sign_bytes, BlockId, PartSetHeader, PubKey, SignedMsgType,
    ValidatorHashInput, Vote,
};
use serde_json::json;

const CHAIN_ID: &str = "chain-id";

fn reference_vote() -> Vote {
    Vote {
        vote_type: SignedMsgType::Prevote,
        height: 1_234_567_890,
        round: 2,
        block_id: BlockId {
            hash: b"01234567890123456789".to_vec(),
            parts: PartSetHeader {
                total: 1,
                hash: b"01234567890123456789".to_vec(),
            },
        },
        timestamp: Timestamp::from_unix(123_456_789, 123_456_789),
        validator_address: Vec::new(),
        validator_index: 0,
        signature: Vec::new(),
    }
}

fn canonical_bytes(vote: &Vote) -> Vec<u8> {
    let registry = Registry::standard();
    Encoder::new(&registry)
        .encode_typed(&canonicalize_vote(CHAIN_ID, vote))
        .unwrap()
}

#[test]
fn reference_vote_golden_bytes() {
    assert_eq!(
        hex::encode(canonical_bytes(&reference_vote())),
        concat!(
            "0801",
            "11d202964900000000",
            "190200000000000000",
            "2230",
            "0a143031323334353637383930313233343536373839",
            "1218",
            "0a143031323334353637383930313233343536373839",
            "1001",
            "2a0a08959aef3a10959aef3a",
            "3208636861696e2d6964",
        )
    );
}

#[test]
fn canonicalization_is_deterministic() {
    let vote = reference_vote();
    assert_eq!(canonical_bytes(&vote), canonical_bytes(&vote));
    assert_eq!(
        canonicalize_vote(CHAIN_ID, &vote),
        canonicalize_vote(CHAIN_ID, &vote)
    );
}

#[test]
fn signature_and_validator_identity_do_not_affect_encoding() {
    let original = reference_vote();
    let mut signed = reference_vote();
    signed.signature = vec![0x5a; 64];
    signed.validator_address = vec![0x13; 20];
    signed.validator_index = 4;
    assert_eq!(canonical_bytes(&original), canonical_bytes(&signed));
}

#[test]
fn chain_id_changes_encoding() {
    let registry = Registry::standard();
    let encoder = Encoder::new(&registry);
    let vote = reference_vote();
    let a = encoder
        .encode(&canonicalize_vote("chain-a", &vote).to_value())
        .unwrap();
    let b = encoder
        .encode(&canonicalize_vote("chain-b", &vote).to_value())
        .unwrap();
    assert_ne!(a, b);
    assert_eq!(a.len(), b.len());
}

#[test]
fn nil_vote_omits_block_id() {
    let mut vote = reference_vote();
    vote.block_id = BlockId::default();
    let hex = hex::encode(canonical_bytes(&vote));
    assert!(!hex.contains("2230"));
    assert!(hex.starts_with("080111d202964900000000190200000000000000"));
    assert!(hex[40..].starts_with("2a0a"));
}

#[test]
fn sign_bytes_wrap_canonical_encoding() {
    let registry = Registry::standard();
    let encoder = Encoder::new(&registry);
    let sign_bytes = vote_sign_bytes(CHAIN_ID, &reference_vote(), &encoder).unwrap();
    assert_eq!(sign_bytes[0], 92);
    assert_eq!(&sign_bytes[1..], canonical_bytes(&reference_vote()).as_slice());
}

#[test]
fn vote_json_matches_go_shape() {
    let mut vote = reference_vote();
    vote.signature = vec![1, 2, 3];
    let value = serde_json::to_value(&vote).unwrap();
    assert_eq!(
        value,
        json!({
            "type": 1,
            "height": 1_234_567_890,
            "round": 2,
            "block_id": {
                "hash": "3031323334353637383930313233343536373839",
                "parts": {
                    "total": 1,
                    "hash": "3031323334353637383930313233343536373839"
                }
            },
            "timestamp": "1973-11-29T21:33:09.123456789Z",
            "validator_address": "",
            "validator_index": 0,
            "signature": "AQID"
        })
    );
}

#[test]
fn validator_hash_input_json_and_bytes() {
    let input = ValidatorHashInput {
        pub_key: PubKey::Ed25519([0; 32]),
        voting_power: 1234,
    };
    assert_eq!(
        serde_json::to_value(&input).unwrap(),
        json!({
            "pub_key": {
                "type": "tendermint/PubKeyEd25519",
                "value": "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA="
            },
            "voting_power": 1234
        })
    );

    let registry = Registry::standard();
    let bytes = Encoder::new(&registry).encode_typed(&input).unwrap();
    assert_eq!(
        hex::encode(bytes),
        format!("0a251624de6420{}10d209", "00".repeat(32))
    );
}

#[test]
fn unsigned_vote_renders_null_signature() {
    let value = serde_json::to_value(reference_vote()).unwrap();
    assert_eq!(value["signature"], serde_json::Value::Null);
    assert_eq!(value["validator_address"], "");
}
