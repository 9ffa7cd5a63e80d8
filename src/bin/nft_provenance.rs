//! nft-provenance: resolve a marketplace link into a provenance record.
//!
//! Takes an OpenSea or LooksRare link, runs one resolution, and prints
//! where the NFT's data lives, who owns it, and whether its metadata
//! pointer can be silently replaced.
//!
//! ```bash
//! nft-provenance https://opensea.io/assets/ethereum/0xbc4c.../4593
//! nft-provenance --json https://looksrare.org/collections/0xbc4c.../4593
//! ```

use anyhow::Result;
use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use nft_provenance::{link, MutabilityVerdict, NftRecord, Resolver};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Marketplace link for the NFT to resolve.
    url: String,

    /// Print the raw record as JSON instead of the summary.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let identity = link::parse(&args.url)?;
    let record = Resolver::with_defaults().resolve(&identity)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    print_summary(&record, identity.token_id);
    Ok(())
}

fn print_summary(record: &NftRecord, token_id: u64) {
    println!("{} #{}", record.name, token_id);
    match &record.owner_address {
        Some(owner) => println!("Owned by {owner}"),
        None => println!("Ownership: not queryable (semi-fungible standard)"),
    }

    if record.token_uri.is_empty() {
        println!("No on-chain token URI (pre-standard contract).");
        return;
    }

    println!("Token URI: {}", record.token_uri);
    if record.on_chain {
        println!("Metadata is embedded on-chain in the token URI:");
    } else {
        println!("Metadata is stored off-chain at that URI:");
    }
    for (key, value) in record.token_data_entries() {
        println!("  {key}: {}", display_value(value));
    }

    match &record.mutability {
        MutabilityVerdict::ChangeableBy(function) => println!(
            "Mutable: a privileged party can call {function} and repoint this token's metadata."
        ),
        MutabilityVerdict::Immutable => {
            println!("No known pointer-changing function answered as gated.")
        }
        MutabilityVerdict::Unknown => println!("Mutability could not be determined."),
    }
}

/// Render one metadata value, truncating embedded data URIs (full SVG
/// payloads are kept in the record, not on the terminal).
fn display_value(value: &Value) -> String {
    const EMBEDDED_DISPLAY_LIMIT: usize = 80;
    if let Some(s) = value.as_str() {
        if s.starts_with("data:") && s.len() > EMBEDDED_DISPLAY_LIMIT {
            let cut: String = s.chars().take(EMBEDDED_DISPLAY_LIMIT).collect();
            return format!("{cut}... ({} bytes embedded)", s.len());
        }
        return s.to_string();
    }
    value.to_string()
}
