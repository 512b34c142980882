//! Canonical amino binary encoding.
//!
//! Values are encoded protobuf3-style: numbered fields in declaration order,
//! keys and lengths as unsigned varints, default-valued fields omitted.
//! Polymorphic values carry the 4-byte prefix of their registered concrete
//! type. Everything that decides output bytes lives in this crate.
//!
#![deny(missing_docs)]

/// Value encoder.
pub mod encoder;
/// Encoding errors.
pub mod error;
/// Concrete type registry for polymorphic values.
pub mod registry;
/// UTC timestamps with nanosecond granularity.
pub mod timestamp;
/// Typed values and the record declaration builder.
pub mod value;
/// Signed and unsigned varints.
pub mod varint;

pub use encoder::Encoder;
pub use error::EncodeError;
pub use registry::{Capability, Entry, Prefix, Registry, RegistryBuilder, RegistryError};
pub use timestamp::{Timestamp, TimestampError};
pub use value::{Field, Interface, Record, ToValue, Value, WireType};
pub use varint::{
    decode_uvarint, decode_varint, encode_uvarint, encode_varint, put_uvarint, put_varint,
    uvarint_len, varint_len, VarintError,
};
