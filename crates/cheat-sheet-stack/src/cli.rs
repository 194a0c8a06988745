//! # Command Line
//!
//! Argument parsing and the two commands behind the binary. Lives in the
//! library so tests can drive a command and inspect what it printed.
//!
//! Stdout only ever carries command output (the manifest JSON, or the
//! `list` lines); logs go to stderr.

use crate::config::StackConfig;
use crate::error::AppError;
use crate::stack::assemble;
use clap::{Args, Parser, Subcommand};
use construct_framework::{Manifest, Scope};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Environment variable read when `--config` is not given.
pub const CONFIG_ENV: &str = "CHEAT_SHEET_CONFIG";

#[derive(Debug, Parser)]
#[command(
    name = "cheat-sheet-stack",
    about = "Declare the cheat-sheet stack and emit its resource manifest"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Assemble the stack and write the manifest as JSON
    Synth {
        #[command(flatten)]
        stack: StackArgs,
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Assemble the stack and print one `kind name` line per resource
    List {
        #[command(flatten)]
        stack: StackArgs,
    },
}

#[derive(Debug, Args)]
pub struct StackArgs {
    /// TOML configuration file
    #[arg(long, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,
    /// Leave out the network and REST gateway, whatever the config says
    #[arg(long)]
    pub no_networking: bool,
}

/// Loads the config, applies flag overrides, assembles and synthesizes.
pub fn build(args: &StackArgs) -> Result<Manifest, AppError> {
    let mut config = StackConfig::load(args.config.as_deref())?;
    if args.no_networking {
        config.networking = false;
    }

    let mut scope = Scope::new(config.stack_name.clone());
    assemble(&mut scope, &config)?;
    Ok(scope.synthesize())
}

/// One `kind name` line per resource, in declaration order.
pub fn list_lines(manifest: &Manifest) -> Vec<String> {
    manifest
        .resources
        .iter()
        .map(|resource| format!("{} {}", resource.kind, resource.logical_name))
        .collect()
}

/// Runs `cli`, writing command output to `stdout`.
pub async fn run<W: Write>(cli: Cli, stdout: &mut W) -> Result<(), AppError> {
    match cli.command {
        Commands::Synth { stack, out } => {
            let manifest = build(&stack)?;
            let json = manifest.to_json_pretty()?;
            match out {
                Some(path) => {
                    tokio::fs::write(&path, json)
                        .await
                        .map_err(|source| AppError::Output {
                            path: path.clone(),
                            source,
                        })?;
                    info!(path = %path.display(), resources = manifest.resources.len(), "Manifest written");
                }
                None => writeln!(stdout, "{json}").map_err(AppError::Stdout)?,
            }
        }
        Commands::List { stack } => {
            let manifest = build(&stack)?;
            for line in list_lines(&manifest) {
                writeln!(stdout, "{line}").map_err(AppError::Stdout)?;
            }
        }
    }
    Ok(())
}
