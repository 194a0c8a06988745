//! # Cheat-sheet Stack
//!
//! The stack definition built on [`construct_framework`], exposed as a library
//! so integration tests can assemble it without the binary.
//!
//! - [`stack`]: the assembly routine and the handles it returns
//! - [`cli`]: argument parsing and the `synth` / `list` commands
//! - [`config`]: TOML configuration with defaults for every key
//! - [`error`]: the application error type

pub mod cli;
pub mod config;
pub mod error;
pub mod stack;

pub use config::StackConfig;
pub use error::AppError;
pub use stack::{assemble, CheatSheetStack, NetworkingStack};
