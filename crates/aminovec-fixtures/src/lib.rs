//! Reference fixtures for amino-compatible encoders.
//!
//! Sample catalogs are encoded with [`aminovec_canonical::Encoder`], paired
//! with their JSON renderings, and written as one file per catalog:
//!
//! ```no_run
//! use aminovec_canonical::{Encoder, Registry};
//! use aminovec_fixtures::{FixtureSet, FixtureWriter, WriteOptions};
//!
//! let registry = Registry::standard();
//! let set = FixtureSet::generate(&Encoder::new(&registry), "chain-id")?;
//! FixtureWriter::new("test/fixtures", WriteOptions::default()).write_all(&set)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
#![deny(missing_docs)]

/// Catalog encoding and JSON rendering.
pub mod assembler;
/// Sample values.
pub mod catalog;
/// Fixture errors.
pub mod errors;
/// Fixture file output.
pub mod writer;

pub use assembler::{assemble, assemble_one, encode_pretty_json, Fixture, FixtureEntry, FixtureSet};
pub use errors::FixtureError;
pub use writer::{FixtureWriter, WriteOptions, FILE_MODE};
