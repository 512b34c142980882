//! List command implementation.

use aminovec_canonical::{Encoder, Registry};
use aminovec_fixtures::FixtureSet;
use serde_json::json;

use crate::output::{format_catalog_row, format_entry_row, print_table_header};
use crate::DEFAULT_CHAIN_ID;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::standard();
    let set = FixtureSet::generate(&Encoder::new(&registry), DEFAULT_CHAIN_ID)?;

    if json {
        let types: Vec<_> = registry
            .entries()
            .map(|e| {
                json!({
                    "capability": e.capability.name(),
                    "name": e.name,
                    "prefix": e.prefix.to_string(),
                })
            })
            .collect();
        let catalogs: Vec<_> = set
            .fixtures()
            .iter()
            .map(|f| json!({ "file": f.name, "entries": f.entries }))
            .collect();
        let doc = json!({ "types": types, "catalogs": catalogs });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    print_table_header("PREFIX", "CAPABILITY", "CONCRETE TYPE");
    for entry in registry.entries() {
        println!("{}", format_entry_row(entry));
    }
    println!();
    print_table_header("ENTRIES", "", "FILE");
    for fixture in set.fixtures() {
        println!("{}", format_catalog_row(fixture));
    }
    Ok(())
}
