//! Typed values accepted by the encoder.
//!
//! A [`Record`] declares its fields explicitly, with field numbers, in the
//! order they are written. Domain types build their records through
//! [`ToValue`].

use crate::registry::Capability;
use crate::timestamp::Timestamp;

/// Low three bits of a field key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WireType {
    /// Base-128 varint.
    Varint = 0,
    /// Eight little-endian bytes.
    Fixed64 = 1,
    /// Varint length followed by that many bytes.
    ByteLength = 2,
}

/// A value with its encoding already decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Zig-zag signed varint.
    Varint(i64),
    /// Signed integer written as the unsigned varint of its two's complement.
    Int(i64),
    /// Non-negative integer written as an unsigned varint.
    Count(i64),
    /// Eight little-endian bytes.
    Fixed64(i64),
    /// `0` or `1` varint.
    Bool(bool),
    /// Length-prefixed raw bytes.
    Bytes(Vec<u8>),
    /// Length-prefixed UTF-8.
    Str(String),
    /// UTC instant.
    Time(Timestamp),
    /// Ordered numbered fields.
    Record(Record),
    /// Registered concrete value of a capability.
    Interface(Interface),
}

impl Value {
    /// Wire type used when this value is a record field.
    pub fn wire_type(&self) -> WireType {
        match self {
            Value::Varint(_) | Value::Int(_) | Value::Count(_) | Value::Bool(_) => {
                WireType::Varint
            }
            Value::Fixed64(_) => WireType::Fixed64,
            Value::Bytes(_)
            | Value::Str(_)
            | Value::Time(_)
            | Value::Record(_)
            | Value::Interface(_) => WireType::ByteLength,
        }
    }

    /// Whether the bare encoding needs its own length prefix inside a field.
    ///
    /// Bytes and strings already carry one.
    pub(crate) fn is_nested(&self) -> bool {
        matches!(self, Value::Time(_) | Value::Record(_) | Value::Interface(_))
    }

    /// Whether a field holding this value is omitted, given its bare encoding.
    ///
    /// Zero integers, `false`, empty bytes and strings, and records or
    /// timestamps with an empty encoding are defaults. Interfaces never are.
    pub(crate) fn is_default(&self, bare: &[u8]) -> bool {
        match self {
            Value::Varint(v) | Value::Int(v) | Value::Count(v) | Value::Fixed64(v) => *v == 0,
            Value::Bool(b) => !*b,
            Value::Bytes(b) => b.is_empty(),
            Value::Str(s) => s.is_empty(),
            Value::Time(_) | Value::Record(_) => bare.is_empty(),
            Value::Interface(_) => false,
        }
    }

    /// Name used as the root of error paths.
    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Value::Varint(_) => "varint",
            Value::Int(_) => "int",
            Value::Count(_) => "count",
            Value::Fixed64(_) => "fixed64",
            Value::Bool(_) => "bool",
            Value::Bytes(_) => "bytes",
            Value::Str(_) => "string",
            Value::Time(_) => "Timestamp",
            Value::Record(record) => record.name,
            Value::Interface(interface) => interface.name,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<Timestamp> for Value {
    fn from(value: Timestamp) -> Self {
        Value::Time(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl From<Interface> for Value {
    fn from(value: Interface) -> Self {
        Value::Interface(value)
    }
}

/// One declared record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field number written in the key.
    pub number: u32,
    /// Field name, used in error paths.
    pub name: &'static str,
    /// Field value.
    pub value: Value,
}

/// Named record with fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: &'static str,
    fields: Vec<Field>,
}

impl Record {
    /// Starts a record with no fields.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    /// Appends a field. Field numbers must increase.
    pub fn field(mut self, number: u32, name: &'static str, value: impl Into<Value>) -> Self {
        debug_assert!(
            self.fields.last().map_or(true, |f| f.number < number),
            "field {name} of {} declared out of order",
            self.name
        );
        self.fields.push(Field {
            number,
            name,
            value: value.into(),
        });
        self
    }

    /// Record type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// A concrete value standing in for a capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    /// Capability the value implements.
    pub capability: Capability,
    /// Registered concrete type name.
    pub name: &'static str,
    /// Encoding of the concrete value itself.
    pub value: Box<Value>,
}

impl Interface {
    /// Wraps a concrete value.
    pub fn new(capability: Capability, name: &'static str, value: impl Into<Value>) -> Self {
        Self {
            capability,
            name,
            value: Box::new(value.into()),
        }
    }
}

/// Types with a canonical [`Value`] form.
pub trait ToValue {
    /// Builds the value handed to the encoder.
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for Timestamp {
    fn to_value(&self) -> Value {
        Value::Time(*self)
    }
}
