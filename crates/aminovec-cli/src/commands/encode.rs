//! Encode command implementation.

use aminovec_canonical::{encode_uvarint, encode_varint, Encoder, Registry, Timestamp, ToValue};
use aminovec_core::{BlockId, PubKey};

use crate::output::print_hex;

pub fn varint(value: i64) -> Result<(), Box<dyn std::error::Error>> {
    print_hex(&encode_varint(value));
    Ok(())
}

pub fn uvarint(value: u64) -> Result<(), Box<dyn std::error::Error>> {
    print_hex(&encode_uvarint(value));
    Ok(())
}

pub fn time(value: String) -> Result<(), Box<dyn std::error::Error>> {
    let timestamp = Timestamp::parse(&value)?;
    encode_with_standard_registry(&timestamp)
}

pub fn pubkey(key_type: String, value: String) -> Result<(), Box<dyn std::error::Error>> {
    let key = PubKey::from_base64(&key_type, &value)?;
    encode_with_standard_registry(&key)
}

pub fn block_id(
    hash: String,
    total: i64,
    parts_hash: String,
    canonical: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let block_id = BlockId::from_hex(&hash, total, &parts_hash)?;
    if canonical {
        encode_with_standard_registry(&block_id.to_canonical())
    } else {
        encode_with_standard_registry(&block_id)
    }
}

fn encode_with_standard_registry<T: ToValue>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::standard();
    let bytes = Encoder::new(&registry).encode_typed(value)?;
    print_hex(&bytes);
    Ok(())
}
