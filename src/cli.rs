//! Command-line runner for schema generation.
//!
//! Models live in caller code, so the binary shell is the caller's: register
//! models, build a [`Config`], and hand `std::env::args` to [`run_from`].

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::config::Config;
use crate::error::Error;
use crate::generate::{compile_models, render_schemas, write_schemas};
use crate::model::ModelRegistry;

/// Generate Avro schema files from registered models.
#[derive(Parser, Debug)]
#[command(name = "avrodecl", version, about = "Generate Avro schema files from registered models")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Generator commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write model schemas to local files
    Generate {
        /// Output directory, overriding the configured one
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Print schemas to stdout instead of writing files
        #[arg(long)]
        dry_run: bool,
    },
}

/// Parse `args` and run the generator.
///
/// # Errors
/// Returns config validation failures, the first schema build error, or an
/// IO error from writing output files.
pub fn run_from<I, T>(registry: &ModelRegistry, config: &Config, args: I) -> Result<(), Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    run(registry, config, Cli::parse_from(args))
}

/// Run the generator with already-parsed arguments.
///
/// # Errors
/// Same as [`run_from`].
pub fn run(registry: &ModelRegistry, config: &Config, cli: Cli) -> Result<(), Error> {
    config.validate(registry)?;

    match cli.command {
        Command::Generate { out_dir, dry_run } => {
            let models = compile_models(registry, &config.models)?;
            let out_dir = out_dir.or_else(|| config.out_dir.clone());

            match out_dir {
                Some(dir) if !dry_run => write_schemas(&models, &dir),
                _ => {
                    match render_schemas(&models) {
                        Some(rendered) => {
                            println!("Printing schemas to stdout, as no output directory is set\n");
                            println!("{rendered}");
                        }
                        None => warn!("No valid models found to print"),
                    }
                    Ok(())
                }
            }
        }
    }
}
