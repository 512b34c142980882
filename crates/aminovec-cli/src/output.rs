//! Output formatting utilities.

use aminovec_canonical::Entry;
use aminovec_fixtures::Fixture;

/// Prints bytes as one line of lowercase hex.
pub fn print_hex(bytes: &[u8]) {
    println!("{}", hex::encode(bytes));
}

/// Formats a registry entry as a table row.
pub fn format_entry_row(entry: &Entry) -> String {
    format!(
        "{:<10} {:<16} {}",
        entry.prefix.to_string(),
        entry.capability.name(),
        entry.name
    )
}

/// Formats a fixture catalog as a table row.
pub fn format_catalog_row(fixture: &Fixture) -> String {
    format!("{:<10} {:<16} {}", fixture.entries, "", fixture.name)
}

/// Prints a table header.
pub fn print_table_header(first: &str, second: &str, third: &str) {
    println!("{:<10} {:<16} {}", first, second, third);
    println!("{}", "-".repeat(60));
}
