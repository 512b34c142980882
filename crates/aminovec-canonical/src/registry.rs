//! Registry of concrete types implementing a polymorphic capability.
//!
//! Every concrete type is tagged with a 4-byte prefix that disambiguates its
//! encoding among the implementations of the same capability. The registry
//! is assembled once through [`RegistryBuilder`] and is read-only afterwards.

use std::fmt;

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::error::EncodeError;

/// Length of a concrete type prefix in bytes.
pub const PREFIX_LEN: usize = 4;

/// Number of disambiguation bytes skipped before the prefix.
const DISAMB_LEN: usize = 3;

/// Registered name of the ed25519 public key.
pub const PUB_KEY_ED25519_NAME: &str = "tendermint/PubKeyEd25519";
/// Registered name of the secp256k1 public key.
pub const PUB_KEY_SECP256K1_NAME: &str = "tendermint/PubKeySecp256k1";
/// Registered name of the sr25519 public key.
pub const PUB_KEY_SR25519_NAME: &str = "tendermint/PubKeySr25519";

/// Abstract role satisfied by several concrete types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capability(&'static str);

impl Capability {
    /// Public key capability (`crypto.PubKey`).
    pub const PUB_KEY: Capability = Capability("crypto.PubKey");

    /// Declares a capability by name.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Capability name.
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Fixed-width prefix identifying a concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefix([u8; PREFIX_LEN]);

impl Prefix {
    /// Wraps raw prefix bytes.
    pub const fn new(bytes: [u8; PREFIX_LEN]) -> Self {
        Self(bytes)
    }

    /// Derives the prefix from a registered name.
    ///
    /// `sha256(name)`, minus leading zero bytes, minus three disambiguation
    /// bytes, minus leading zero bytes again; the next four bytes are the prefix.
    pub fn from_name(name: &str) -> Self {
        let hash = Sha256::digest(name.as_bytes());
        let rest = skip_zeros(&hash);
        let rest = skip_zeros(&rest[DISAMB_LEN..]);
        let mut bytes = [0u8; PREFIX_LEN];
        bytes.copy_from_slice(&rest[..PREFIX_LEN]);
        Self(bytes)
    }

    /// Prefix bytes.
    pub fn as_bytes(&self) -> &[u8; PREFIX_LEN] {
        &self.0
    }
}

fn skip_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for Prefix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Errors raised while building a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The concrete name is already registered.
    #[error("concrete type {name} is already registered")]
    DuplicateName {
        /// Offending name.
        name: &'static str,
    },
    /// Two concrete types of one capability share a prefix.
    #[error("prefix {prefix} of {name} collides with {existing} under {capability}")]
    PrefixCollision {
        /// Capability both types implement.
        capability: Capability,
        /// Name being registered.
        name: &'static str,
        /// Name already holding the prefix.
        existing: &'static str,
        /// Shared prefix.
        prefix: Prefix,
    },
}

/// One registered concrete type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Capability implemented.
    pub capability: Capability,
    /// Registered concrete name.
    pub name: &'static str,
    /// Prefix written before the concrete encoding.
    pub prefix: Prefix,
}

/// Collects registrations before freezing them into a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<Entry>,
}

impl RegistryBuilder {
    /// Starts an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` under `capability` with an explicit prefix.
    pub fn register(
        &mut self,
        capability: Capability,
        name: &'static str,
        prefix: Prefix,
    ) -> Result<&mut Self, RegistryError> {
        if self.entries.iter().any(|e| e.name == name) {
            return Err(RegistryError::DuplicateName { name });
        }
        if let Some(existing) = self
            .entries
            .iter()
            .find(|e| e.capability == capability && e.prefix == prefix)
        {
            return Err(RegistryError::PrefixCollision {
                capability,
                name,
                existing: existing.name,
                prefix,
            });
        }
        self.entries.push(Entry {
            capability,
            name,
            prefix,
        });
        Ok(self)
    }

    /// Registers `name` under `capability` with its name-derived prefix.
    pub fn register_concrete(
        &mut self,
        capability: Capability,
        name: &'static str,
    ) -> Result<&mut Self, RegistryError> {
        self.register(capability, name, Prefix::from_name(name))
    }

    /// Freezes the registrations.
    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
        }
    }
}

/// Immutable lookup table from (capability, concrete name) to prefix.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    /// Starts a builder.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry used for fixture generation: ed25519 and secp256k1 keys.
    pub fn standard() -> Self {
        let mut builder = RegistryBuilder::new();
        builder
            .register_concrete(Capability::PUB_KEY, PUB_KEY_ED25519_NAME)
            .and_then(|b| b.register_concrete(Capability::PUB_KEY, PUB_KEY_SECP256K1_NAME))
            .expect("standard prefixes are distinct");
        builder.build()
    }

    /// Finds the prefix of `name` under `capability`.
    pub fn lookup(&self, capability: Capability, name: &'static str) -> Result<Prefix, EncodeError> {
        self.entries
            .iter()
            .find(|e| e.capability == capability && e.name == name)
            .map(|e| e.prefix)
            .ok_or_else(|| EncodeError::UnregisteredType {
                capability,
                name,
                path: String::new(),
            })
    }

    /// Registered entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Number of registered concrete types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_known_prefixes() {
        assert_eq!(Prefix::from_name(PUB_KEY_ED25519_NAME).to_string(), "1624de64");
        assert_eq!(Prefix::from_name(PUB_KEY_SECP256K1_NAME).to_string(), "eb5ae987");
        assert_eq!(Prefix::from_name(PUB_KEY_SR25519_NAME).to_string(), "0dfb1005");
    }

    #[test]
    fn standard_registry_resolves_pub_keys() {
        let registry = Registry::standard();
        assert_eq!(registry.len(), 2);
        let prefix = registry
            .lookup(Capability::PUB_KEY, PUB_KEY_ED25519_NAME)
            .unwrap();
        assert_eq!(prefix.as_bytes(), &[0x16, 0x24, 0xde, 0x64]);
    }

    #[test]
    fn lookup_of_unregistered_type_fails() {
        let registry = Registry::standard();
        let err = registry
            .lookup(Capability::PUB_KEY, PUB_KEY_SR25519_NAME)
            .unwrap_err();
        assert!(matches!(
            err,
            EncodeError::UnregisteredType { name: PUB_KEY_SR25519_NAME, .. }
        ));
    }

    #[test]
    fn lookup_is_scoped_by_capability() {
        let other = Capability::new("crypto.PrivKey");
        let registry = Registry::standard();
        assert!(registry.lookup(other, PUB_KEY_ED25519_NAME).is_err());
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut builder = Registry::builder();
        builder
            .register_concrete(Capability::PUB_KEY, PUB_KEY_ED25519_NAME)
            .unwrap();
        let err = builder
            .register(Capability::PUB_KEY, PUB_KEY_ED25519_NAME, Prefix::new([1, 2, 3, 4]))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName { name: PUB_KEY_ED25519_NAME });
    }

    #[test]
    fn rejects_prefix_collisions_within_capability() {
        let mut builder = Registry::builder();
        builder
            .register(Capability::PUB_KEY, "a", Prefix::new([1, 2, 3, 4]))
            .unwrap();
        let err = builder
            .register(Capability::PUB_KEY, "b", Prefix::new([1, 2, 3, 4]))
            .unwrap_err();
        assert!(matches!(err, RegistryError::PrefixCollision { existing: "a", .. }));

        // Same prefix under another capability is fine.
        builder
            .register(Capability::new("other"), "c", Prefix::new([1, 2, 3, 4]))
            .unwrap();
    }

    #[test]
    fn entries_keep_registration_order() {
        let names: Vec<_> = Registry::standard().entries().map(|e| e.name).collect();
        assert_eq!(names, vec![PUB_KEY_ED25519_NAME, PUB_KEY_SECP256K1_NAME]);
    }
}
