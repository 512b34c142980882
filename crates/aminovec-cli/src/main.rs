//! aminovec CLI - generates amino reference vectors and encodes single values.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{encode, generate, list};

/// Chain id baked into canonical vote fixtures.
pub const DEFAULT_CHAIN_ID: &str = "chain-id";
/// Directory fixtures are written to.
pub const DEFAULT_OUT_DIR: &str = "test/fixtures";

#[derive(Parser)]
#[command(name = "aminovec")]
#[command(about = "Amino reference vector generator")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode every catalog and write the fixture files
    Generate {
        /// Output directory
        #[arg(long, default_value = DEFAULT_OUT_DIR)]
        out_dir: String,
        /// Chain id for canonical votes
        #[arg(long, default_value = DEFAULT_CHAIN_ID)]
        chain_id: String,
        /// Overwrite existing fixture files
        #[arg(long)]
        force: bool,
    },
    /// Print the encoding of a single value as lowercase hex
    Encode {
        #[command(subcommand)]
        value: EncodeTarget,
    },
    /// List registered concrete types and fixture catalogs
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum EncodeTarget {
    /// Zig-zag signed varint
    Varint {
        #[arg(allow_hyphen_values = true)]
        value: i64,
    },
    /// Unsigned varint
    Uvarint { value: u64 },
    /// Timestamp as `YYYY-MM-DDTHH:MM:SS[.fraction]Z`
    Time { value: String },
    /// Public key, prefixed with its registered type
    Pubkey {
        /// Key type: ed25519, secp256k1 or a registered name
        key_type: String,
        /// Key bytes as standard base64
        value: String,
    },
    /// Block id from hex hashes
    BlockId {
        /// Block hash (hex)
        hash: String,
        /// Number of parts
        #[arg(allow_hyphen_values = true)]
        total: i64,
        /// Part set hash (hex)
        parts_hash: String,
        /// Encode the canonical form used in sign bytes
        #[arg(long)]
        canonical: bool,
    },
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            out_dir,
            chain_id,
            force,
        } => generate::run(out_dir, chain_id, force),
        Commands::Encode { value } => match value {
            EncodeTarget::Varint { value } => encode::varint(value),
            EncodeTarget::Uvarint { value } => encode::uvarint(value),
            EncodeTarget::Time { value } => encode::time(value),
            EncodeTarget::Pubkey { key_type, value } => encode::pubkey(key_type, value),
            EncodeTarget::BlockId {
                hash,
                total,
                parts_hash,
                canonical,
            } => encode::block_id(hash, total, parts_hash, canonical),
        },
        Commands::List { json } => list::run(json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
