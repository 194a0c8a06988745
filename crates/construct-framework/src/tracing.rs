//! # Observability
//!
//! The framework logs through the `tracing` crate. Every registration and
//! wiring call emits a structured event carrying `scope` and `name` fields:
//!
//! - `debug!` on entry with the full override payload
//! - `info!` once a resource is registered or wired
//! - `warn!` when a call is rejected, with the reason
//!
//! ```text
//! DEBUG Create scope="CdkAwsCheatSheetStack" kind=Queue name="CdkQueue1" overrides={}
//! INFO Registered scope="CdkAwsCheatSheetStack" kind=Queue name="CdkQueue1" size=1
//! INFO Wired scope="CdkAwsCheatSheetStack" name="CdkTopic1" wiring=subscription to CdkQueue1
//! ```
//!
//! Control verbosity with `RUST_LOG` (`info`, `debug`, `construct_framework=debug`).
//!
//! Logs always go to stderr. Stdout belongs to the manifest, so
//! `RUST_LOG=debug cheat-sheet-stack synth > manifest.json` still produces
//! valid JSON.

/// Installs the global subscriber: `RUST_LOG` filtering, compact output on
/// stderr, no module targets.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
