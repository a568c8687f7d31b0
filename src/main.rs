//! # Butterfly-ev CLI
//!
//! Command-line interface for the butterfly-encoding library.
//! Builds edge attribute schemas from JSON definitions and shows where every
//! attribute lands in the per-edge record.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use butterfly_encoding::{EncodingSchema, NameValidator, SchemaBuilder, SchemaConfig};
use clap::{Parser, Subcommand};
use log::{error, info};

mod cli;

/// Command-line interface for butterfly-ev
#[derive(Parser)]
#[command(name = "butterfly-ev")]
#[command(about = "Inspect and snapshot bit-packed edge attribute schemas")]
#[command(long_about = "Builds edge attribute schemas from JSON definitions:
  butterfly-ev layout schema.json              # Show the bit layout
  butterfly-ev snapshot schema.json -o s.json  # Write the persisted schema
  butterfly-ev check-name max_speed in_city    # Validate attribute names")]
#[command(version = env!("BUTTERFLY_VERSION"))]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every attribute's placement and the record size
    Layout {
        /// Schema definition (JSON)
        config: PathBuf,
    },
    /// Build the schema and emit its snapshot
    Snapshot {
        /// Schema definition (JSON)
        config: PathBuf,

        /// Output file path, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check attribute names against the naming rules
    CheckName {
        /// Names to check
        #[arg(required = true)]
        names: Vec<String>,

        /// Replace the default reserved words (comma separated)
        #[arg(long, value_delimiter = ',')]
        reserved: Option<Vec<String>>,
    },
}

fn main() {
    if let Err(e) = run() {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    match cli.command {
        Command::Layout { config } => {
            let schema = build_schema(&config)?;
            println!("{}", cli::format_layout(&schema));
        }
        Command::Snapshot { config, output } => {
            let schema = build_schema(&config)?;
            let snapshot = schema.snapshot();
            match output {
                Some(path) => {
                    snapshot
                        .write(&path)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("📁 Snapshot saved to {}", path.display());
                }
                None => println!("{}", snapshot.to_json()?),
            }
        }
        Command::CheckName { names, reserved } => {
            let validator = match reserved {
                Some(words) => NameValidator::with_reserved_words(words),
                None => NameValidator::default(),
            };
            let mut all_valid = true;
            for name in &names {
                let (valid, line) = cli::format_name_check(&validator, name);
                all_valid &= valid;
                println!("{line}");
            }
            if !all_valid {
                anyhow::bail!("invalid attribute names");
            }
        }
    }

    Ok(())
}

/// Load a schema definition and register all of its attributes
fn build_schema(path: &Path) -> Result<EncodingSchema> {
    let config = SchemaConfig::from_path(path)
        .with_context(|| format!("Failed to load schema definition {}", path.display()))?;
    let schema = SchemaBuilder::from_config(&config)
        .and_then(SchemaBuilder::build)
        .with_context(|| format!("Invalid schema definition {}", path.display()))?;
    info!(
        "🦋 {} attributes, {} bytes per edge",
        schema.len(),
        schema.bytes_per_edge()
    );
    Ok(schema)
}
