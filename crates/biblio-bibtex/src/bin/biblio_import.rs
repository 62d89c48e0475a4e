//! biblio-import
//!
//! Imports a BibTeX file against a registry of known authors and prints the
//! import report as JSON.

use std::io::Read;
use std::path::PathBuf;

use biblio_bibtex::{import_bibtex, ImportConfig};
use biblio_domain::AuthorRegistry;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "biblio-import", version, about = "Import a BibTeX document")]
struct Args {
    /// BibTeX file to import, `-` for stdin
    input: PathBuf,

    /// JSON array of known authors
    #[arg(short, long)]
    authors: Option<PathBuf>,

    /// TOML configuration file (defaults to the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print compact instead of pretty JSON
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ImportConfig::load(path)?,
        None => ImportConfig::load_default()?,
    };

    let registry = match &args.authors {
        Some(path) => {
            let registry = AuthorRegistry::from_json(&std::fs::read_to_string(path)?)?;
            tracing::info!("Loaded {} known authors from {:?}", registry.len(), path);
            registry
        }
        None => AuthorRegistry::new(),
    };

    let text = if args.input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(&args.input)?
    };

    let report = import_bibtex(&text, &registry, &config).map_err(|e| {
        tracing::error!("Failed to import {:?}: {}", args.input, e);
        e
    })?;

    let json = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{}", json);

    Ok(())
}
