//! Fixture assembly.
//!
//! Each catalog becomes one JSON document of `{"value", "encoding"}` pairs.
//! Catalogs are all-or-nothing: the first value that fails to encode aborts
//! its catalog, and [`FixtureSet::generate`] aborts the whole batch.

use aminovec_canonical::{encode_varint, EncodeError, Encoder};
use aminovec_core::canonicalize_vote;
use serde::Serialize;
use tracing::debug;

use crate::catalog;
use crate::errors::FixtureError;

/// One value with the lowercase hex of its encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureEntry<T> {
    /// Original value.
    pub value: T,
    /// Lowercase hex of the canonical encoding.
    pub encoding: String,
}

/// Encodes every value of a catalog, keeping catalog order.
pub fn assemble<'a, T, F>(
    catalog: &'static str,
    values: &'a [T],
    mut encode: F,
) -> Result<Vec<FixtureEntry<&'a T>>, FixtureError>
where
    T: Serialize,
    F: FnMut(&T) -> Result<Vec<u8>, EncodeError>,
{
    let entries = values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let bytes = encode(value).map_err(|source| FixtureError::Encode {
                catalog,
                index,
                value: serde_json::to_string(value).unwrap_or_else(|_| "?".to_string()),
                source,
            })?;
            Ok(FixtureEntry {
                value,
                encoding: hex::encode(bytes),
            })
        })
        .collect::<Result<Vec<_>, FixtureError>>()?;
    debug!(catalog, entries = entries.len(), "assembled catalog");
    Ok(entries)
}

/// Encodes a single-value catalog.
pub fn assemble_one<'a, T, F>(
    catalog: &'static str,
    value: &'a T,
    encode: F,
) -> Result<FixtureEntry<&'a T>, FixtureError>
where
    T: Serialize,
    F: FnMut(&T) -> Result<Vec<u8>, EncodeError>,
{
    let mut entries = assemble(catalog, std::slice::from_ref(value), encode)?;
    Ok(entries.remove(0))
}

/// Renders fixture entries as JSON indented by two spaces.
pub fn encode_pretty_json<T: Serialize + ?Sized>(entries: &T) -> Result<String, FixtureError> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// A rendered fixture document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    /// File name, e.g. `varint.json`.
    pub name: &'static str,
    /// Number of entries rendered.
    pub entries: usize,
    /// Rendered JSON.
    pub json: String,
}

impl Fixture {
    /// Renders a multi-value catalog as a JSON array.
    pub fn list<T: Serialize>(
        name: &'static str,
        entries: &[FixtureEntry<T>],
    ) -> Result<Self, FixtureError> {
        Ok(Self {
            name,
            entries: entries.len(),
            json: encode_pretty_json(entries)?,
        })
    }

    /// Renders a single-value catalog as one JSON object.
    pub fn single<T: Serialize>(
        name: &'static str,
        entry: &FixtureEntry<T>,
    ) -> Result<Self, FixtureError> {
        Ok(Self {
            name,
            entries: 1,
            json: encode_pretty_json(entry)?,
        })
    }
}

/// Every fixture document, rendered in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSet {
    fixtures: Vec<Fixture>,
}

impl FixtureSet {
    /// Encodes all catalogs. Any failure aborts the whole set.
    pub fn generate(encoder: &Encoder<'_>, chain_id: &str) -> Result<Self, FixtureError> {
        let varints = catalog::varints();
        let votes = catalog::votes();
        let times = catalog::times();
        let block_ids = catalog::block_ids();
        let pubkey = catalog::pubkey();
        let validator = catalog::validator_hash_input();

        let fixtures = vec![
            Fixture::list(
                "varint.json",
                &assemble("varint", &varints, |v| Ok(encode_varint(*v)))?,
            )?,
            Fixture::list(
                "vote.json",
                &assemble("vote", &votes, |vote| {
                    encoder.encode_typed(&canonicalize_vote(chain_id, vote))
                })?,
            )?,
            Fixture::list(
                "time.json",
                &assemble("time", &times, |t| encoder.encode_typed(t))?,
            )?,
            Fixture::list(
                "block_id.json",
                &assemble("block_id", &block_ids, |b| encoder.encode_typed(b))?,
            )?,
            Fixture::single(
                "pubkey.json",
                &assemble_one("pubkey", &pubkey, |k| encoder.encode_typed(k))?,
            )?,
            Fixture::single(
                "validator_hash_input.json",
                &assemble_one("validator_hash_input", &validator, |v| {
                    encoder.encode_typed(v)
                })?,
            )?,
        ];
        debug!(fixtures = fixtures.len(), chain_id, "generated fixture set");
        Ok(Self { fixtures })
    }

    /// Fixtures in generation order.
    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    /// Looks up a fixture by file name.
    pub fn get(&self, name: &str) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| f.name == name)
    }
}
