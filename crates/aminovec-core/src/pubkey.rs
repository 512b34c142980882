//! Public keys as a closed set of registered concrete types.

use aminovec_canonical::registry::{
    PUB_KEY_ED25519_NAME, PUB_KEY_SECP256K1_NAME, PUB_KEY_SR25519_NAME,
};
use aminovec_canonical::{Capability, Interface, ToValue, Value};
use base64::Engine;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::errors::CoreError;

/// Ed25519 public key length.
pub const ED25519_KEY_LEN: usize = 32;
/// Compressed secp256k1 public key length.
pub const SECP256K1_KEY_LEN: usize = 33;
/// Sr25519 public key length.
pub const SR25519_KEY_LEN: usize = 32;

/// Public key of one of the known algorithms.
///
/// Encodes as `prefix || len || key`, where the prefix comes from the
/// registry entry of the variant's name under [`Capability::PUB_KEY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PubKey {
    /// `tendermint/PubKeyEd25519`
    Ed25519([u8; ED25519_KEY_LEN]),
    /// `tendermint/PubKeySecp256k1`
    Secp256k1([u8; SECP256K1_KEY_LEN]),
    /// `tendermint/PubKeySr25519`
    Sr25519([u8; SR25519_KEY_LEN]),
}

impl PubKey {
    /// Registered concrete name.
    pub fn name(&self) -> &'static str {
        match self {
            PubKey::Ed25519(_) => PUB_KEY_ED25519_NAME,
            PubKey::Secp256k1(_) => PUB_KEY_SECP256K1_NAME,
            PubKey::Sr25519(_) => PUB_KEY_SR25519_NAME,
        }
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PubKey::Ed25519(key) | PubKey::Sr25519(key) => key.as_slice(),
            PubKey::Secp256k1(key) => key.as_slice(),
        }
    }

    /// Builds a key from its registered name (or short algorithm name) and bytes.
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self, CoreError> {
        match name {
            PUB_KEY_ED25519_NAME | "ed25519" => {
                Ok(PubKey::Ed25519(fixed(PUB_KEY_ED25519_NAME, bytes)?))
            }
            PUB_KEY_SECP256K1_NAME | "secp256k1" => {
                Ok(PubKey::Secp256k1(fixed(PUB_KEY_SECP256K1_NAME, bytes)?))
            }
            PUB_KEY_SR25519_NAME | "sr25519" => {
                Ok(PubKey::Sr25519(fixed(PUB_KEY_SR25519_NAME, bytes)?))
            }
            other => Err(CoreError::UnknownKeyType(other.to_string())),
        }
    }

    /// Builds a key from the JSON form: type name plus base64 value.
    pub fn from_base64(name: &str, value: &str) -> Result<Self, CoreError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(value)
            .map_err(|source| CoreError::Base64 {
                field: "pub_key.value",
                source,
            })?;
        Self::from_bytes(name, &bytes)
    }
}

fn fixed<const N: usize>(name: &'static str, bytes: &[u8]) -> Result<[u8; N], CoreError> {
    bytes.try_into().map_err(|_| CoreError::KeyLength {
        name,
        expected: N,
        actual: bytes.len(),
    })
}

impl ToValue for PubKey {
    fn to_value(&self) -> Value {
        Interface::new(Capability::PUB_KEY, self.name(), self.as_bytes()).into()
    }
}

impl Serialize for PubKey {
    /// `{"type": "<registered name>", "value": "<base64>"}`
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PubKey", 2)?;
        state.serialize_field("type", self.name())?;
        state.serialize_field(
            "value",
            &base64::engine::general_purpose::STANDARD.encode(self.as_bytes()),
        )?;
        state.end()
    }
}
