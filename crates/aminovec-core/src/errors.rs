use thiserror::Error;

/// Errors raised while building domain values from external representations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A hex field could not be decoded.
    #[error("invalid hex in {field}: {source}")]
    Hex {
        /// Field being decoded.
        field: &'static str,
        /// Underlying decoder error.
        #[source]
        source: hex::FromHexError,
    },
    /// A base64 field could not be decoded.
    #[error("invalid base64 in {field}: {source}")]
    Base64 {
        /// Field being decoded.
        field: &'static str,
        /// Underlying decoder error.
        #[source]
        source: base64::DecodeError,
    },
    /// Public key bytes have the wrong length for the algorithm.
    #[error("{name} key must be {expected} bytes, got {actual}")]
    KeyLength {
        /// Registered key type name.
        name: &'static str,
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// No public key algorithm goes by this name.
    #[error("unknown public key type '{0}'")]
    UnknownKeyType(String),
}
