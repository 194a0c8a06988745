//! # Cheat-sheet Stack CLI
//!
//! Assembles the stack and hands the manifest to whatever provisions it.
//!
//! ```bash
//! cheat-sheet-stack synth --out manifest.json
//! cheat-sheet-stack list --no-networking
//! RUST_LOG=debug cheat-sheet-stack synth --config stack.toml > manifest.json
//! ```

use cheat_sheet_stack::cli::{run, Cli};
use cheat_sheet_stack::AppError;
use clap::Parser;
use construct_framework::tracing::setup_tracing;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Setup tracing once, on stderr
    setup_tracing();

    let cli = Cli::parse();
    run(cli, &mut std::io::stdout().lock()).await
}
