//! Generate command implementation.

use aminovec_canonical::{Encoder, Registry};
use aminovec_fixtures::{FixtureSet, FixtureWriter, WriteOptions};
use tracing::info;

pub fn run(out_dir: String, chain_id: String, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::standard();
    let encoder = Encoder::new(&registry);

    // Everything is rendered before the first file is touched.
    let set = FixtureSet::generate(&encoder, &chain_id)?;

    let writer = FixtureWriter::new(&out_dir, WriteOptions { force });
    let written = writer.write_all(&set)?;
    info!(dir = %writer.dir().display(), files = written.len(), "fixtures written");

    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
