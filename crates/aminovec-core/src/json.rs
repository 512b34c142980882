//! Serde helpers matching Go's `encoding/json` renderings.

/// Bytes as uppercase hex (`HexBytes`).
pub(crate) mod hex_upper {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode_upper(bytes))
    }
}

/// Bytes as standard padded base64 (`[]byte`). Empty bytes are a nil slice
/// and render as `null`.
pub(crate) mod base64_std {
    use base64::Engine;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        if bytes.is_empty() {
            return serializer.serialize_none();
        }
        serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
    }
}
