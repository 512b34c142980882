use std::fmt;

use tracing::trace;

use crate::error::EncodeError;
use crate::registry::Registry;
use crate::timestamp::Timestamp;
use crate::value::{Field, Record, ToValue, Value};
use crate::varint::{put_uvarint, put_varint};

/// Location of a value inside the structure being encoded.
#[derive(Debug, Clone)]
struct Path {
    segments: Vec<&'static str>,
}

impl Path {
    fn root(name: &'static str) -> Self {
        Self {
            segments: vec![name],
        }
    }

    fn push_field(&self, field: &'static str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field);
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Encoder producing canonical bytes for [`Value`]s.
///
/// Polymorphic values are resolved against the registry the encoder was
/// created with; the registry is never modified.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'r> {
    registry: &'r Registry,
}

impl<'r> Encoder<'r> {
    /// Creates an encoder over a frozen registry.
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Produces the bare encoding of `value` (no outer length prefix).
    pub fn encode(&self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        self.write_bare(value, &Path::root(value.type_name()), &mut out)?;
        Ok(out)
    }

    /// Produces the bare encoding of a domain value.
    pub fn encode_typed<T: ToValue + ?Sized>(&self, value: &T) -> Result<Vec<u8>, EncodeError> {
        self.encode(&value.to_value())
    }

    /// Produces the bare encoding preceded by its length as an unsigned varint.
    pub fn encode_length_prefixed(&self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        let bare = self.encode(value)?;
        let mut out = Vec::with_capacity(bare.len() + 2);
        write_prefixed(&mut out, &bare);
        Ok(out)
    }

    fn write_bare(&self, value: &Value, path: &Path, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        match value {
            Value::Varint(v) => put_varint(out, *v),
            Value::Int(v) => put_uvarint(out, *v as u64),
            Value::Count(v) => {
                if *v < 0 {
                    return Err(
                        EncodeError::out_of_range(v, "count must not be negative").at(path)
                    );
                }
                put_uvarint(out, *v as u64);
            }
            Value::Fixed64(v) => out.extend_from_slice(&v.to_le_bytes()),
            Value::Bool(b) => put_uvarint(out, u64::from(*b)),
            Value::Bytes(bytes) => write_prefixed(out, bytes),
            Value::Str(s) => write_prefixed(out, s.as_bytes()),
            Value::Time(ts) => {
                ts.check_range().map_err(|e| e.at(path))?;
                self.write_fields(&time_record(ts), path, out)?;
            }
            Value::Record(record) => self.write_fields(record, path, out)?,
            Value::Interface(interface) => {
                let prefix = self
                    .registry
                    .lookup(interface.capability, interface.name)
                    .map_err(|e| e.at(path))?;
                out.extend_from_slice(prefix.as_bytes());
                self.write_bare(&interface.value, path, out)?;
            }
        }
        Ok(())
    }

    fn write_fields(&self, record: &Record, path: &Path, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        for field in record.fields() {
            self.write_field(field, &path.push_field(field.name), out)?;
        }
        Ok(())
    }

    fn write_field(&self, field: &Field, path: &Path, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let mut bare = Vec::new();
        self.write_bare(&field.value, path, &mut bare)?;
        if field.value.is_default(&bare) {
            trace!(%path, "omitting default field");
            return Ok(());
        }
        let key = (u64::from(field.number) << 3) | field.value.wire_type() as u64;
        put_uvarint(out, key);
        if field.value.is_nested() {
            write_prefixed(out, &bare);
        } else {
            out.extend_from_slice(&bare);
        }
        Ok(())
    }
}

/// `seconds` then `nanos`, both as two's-complement varints.
fn time_record(ts: &Timestamp) -> Record {
    Record::new("Timestamp")
        .field(1, "seconds", Value::Int(ts.seconds()))
        .field(2, "nanos", Value::Int(i64::from(ts.nanos())))
}

fn write_prefixed(out: &mut Vec<u8>, bytes: &[u8]) {
    put_uvarint(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Capability, PUB_KEY_ED25519_NAME, PUB_KEY_SR25519_NAME};
    use crate::value::Interface;

    fn encode_hex(value: &Value) -> String {
        let registry = Registry::standard();
        hex::encode(Encoder::new(&registry).encode(value).unwrap())
    }

    #[test]
    fn integers_delegate_to_varints() {
        assert_eq!(encode_hex(&Value::Varint(0)), "00");
        assert_eq!(encode_hex(&Value::Varint(1)), "02");
        assert_eq!(encode_hex(&Value::Int(1)), "01");
        assert_eq!(encode_hex(&Value::Int(-1)), "ffffffffffffffffff01");
        assert_eq!(encode_hex(&Value::Count(300)), "ac02");
        assert_eq!(encode_hex(&Value::Fixed64(2)), "0200000000000000");
        assert_eq!(encode_hex(&Value::Bool(true)), "01");
    }

    #[test]
    fn bytes_and_strings_are_length_prefixed() {
        assert_eq!(
            encode_hex(&Value::Bytes(vec![0, 1, 2, 3, 4, 5, 6, 7])),
            "080001020304050607"
        );
        assert_eq!(encode_hex(&Value::from("chain-id")), "08636861696e2d6964");
        assert_eq!(encode_hex(&Value::Bytes(Vec::new())), "00");
    }

    #[test]
    fn record_fields_follow_declaration_order() {
        let record = Record::new("Pair")
            .field(1, "left", Value::Int(5))
            .field(2, "right", Value::from("x"));
        assert_eq!(encode_hex(&record.into()), "0805120178");
    }

    #[test]
    fn default_fields_are_omitted() {
        let record = Record::new("Sparse")
            .field(1, "zero", Value::Int(0))
            .field(2, "empty", Value::Bytes(Vec::new()))
            .field(3, "off", Value::Bool(false))
            .field(4, "nested", Record::new("Inner").field(1, "zero", Value::Count(0)))
            .field(5, "set", Value::Int(7));
        assert_eq!(encode_hex(&record.into()), "2807");
    }

    #[test]
    fn nested_records_are_length_prefixed() {
        let record = Record::new("Outer")
            .field(1, "inner", Record::new("Inner").field(1, "n", Value::Int(2)));
        assert_eq!(encode_hex(&record.into()), "0a020802");
    }

    #[test]
    fn timestamp_encodes_seconds_and_nanos() {
        let ts = Timestamp::from_unix(123_456_789, 123_456_789);
        assert_eq!(encode_hex(&ts.into()), "08959aef3a10959aef3a");
    }

    #[test]
    fn timestamp_without_nanos_omits_second_field() {
        let ts = Timestamp::from_unix(1, 0);
        assert_eq!(encode_hex(&ts.into()), "0801");
        assert_eq!(encode_hex(&Timestamp::UNIX_EPOCH.into()), "");
    }

    #[test]
    fn timestamp_out_of_range_is_rejected() {
        let registry = Registry::standard();
        let encoder = Encoder::new(&registry);
        let record = Record::new("Event").field(1, "at", Timestamp::from_unix(i64::MIN / 2, 0));
        let err = encoder.encode(&record.into()).unwrap_err();
        assert_eq!(err.kind(), "ValueOutOfRange");
        assert_eq!(err.path(), "Event.at");
    }

    #[test]
    fn negative_count_is_rejected_with_path() {
        let registry = Registry::standard();
        let record = Record::new("Header").field(1, "total", Value::Count(-1));
        let err = Encoder::new(&registry).encode(&record.into()).unwrap_err();
        assert_eq!(
            err,
            EncodeError::ValueOutOfRange {
                path: "Header.total".into(),
                value: "-1".into(),
                reason: "count must not be negative",
            }
        );
    }

    #[test]
    fn interfaces_are_prefixed() {
        let key = Interface::new(Capability::PUB_KEY, PUB_KEY_ED25519_NAME, vec![0xab; 2]);
        assert_eq!(encode_hex(&key.clone().into()), "1624de6402abab");

        let holder = Record::new("Holder").field(1, "key", key);
        assert_eq!(encode_hex(&holder.into()), "0a071624de6402abab");
    }

    #[test]
    fn unregistered_interface_fails() {
        let registry = Registry::standard();
        let key = Interface::new(Capability::PUB_KEY, PUB_KEY_SR25519_NAME, vec![0u8; 32]);
        let holder = Record::new("Holder").field(1, "key", key);
        let err = Encoder::new(&registry).encode(&holder.into()).unwrap_err();
        assert_eq!(err.kind(), "UnregisteredType");
        assert_eq!(err.path(), "Holder.key");
    }

    #[test]
    fn length_prefixed_wraps_bare_encoding() {
        let registry = Registry::standard();
        let encoder = Encoder::new(&registry);
        let ts: Value = Timestamp::from_unix(1, 0).into();
        assert_eq!(hex::encode(encoder.encode_length_prefixed(&ts).unwrap()), "020801");
        assert_eq!(
            hex::encode(encoder.encode_length_prefixed(&Timestamp::UNIX_EPOCH.into()).unwrap()),
            "00"
        );
    }

    #[test]
    fn encoding_is_deterministic() {
        let registry = Registry::standard();
        let encoder = Encoder::new(&registry);
        let value: Value = Record::new("R")
            .field(1, "t", Timestamp::from_unix(5, 6))
            .field(2, "s", Value::from("abc"))
            .into();
        assert_eq!(encoder.encode(&value).unwrap(), encoder.encode(&value).unwrap());
    }
}
