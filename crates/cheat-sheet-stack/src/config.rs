//! # Stack Configuration
//!
//! Everything the assembly routine reads comes from [`StackConfig`]. All fields
//! have defaults, so an empty file (or no file at all) declares the stack with
//! its stock names and settings.
//!
//! ```toml
//! stack_name = "CdkAwsCheatSheetStack"
//! handlers_dir = "lambdas"
//! networking = true
//!
//! [event_source]
//! batch_size = 10
//! max_batching_window_secs = 5
//! report_batch_item_failures = true
//! ```

use crate::error::AppError;
use construct_framework::{Duration, EventSourceOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_STACK_NAME: &str = "CdkAwsCheatSheetStack";
pub const DEFAULT_HANDLERS_DIR: &str = "lambdas";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StackConfig {
    /// Name of the scope every resource is registered in.
    pub stack_name: String,
    /// Directory holding the function handler sources.
    pub handlers_dir: PathBuf,
    /// Declare the network, REST gateway and its function.
    pub networking: bool,
    pub event_source: EventSourceSettings,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            stack_name: DEFAULT_STACK_NAME.to_string(),
            handlers_dir: PathBuf::from(DEFAULT_HANDLERS_DIR),
            networking: true,
            event_source: EventSourceSettings::default(),
        }
    }
}

/// Polling settings for the database-update function's queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventSourceSettings {
    pub batch_size: u32,
    /// Seconds to wait for a fuller batch. `0` turns batching windows off.
    pub max_batching_window_secs: u64,
    pub report_batch_item_failures: bool,
}

impl Default for EventSourceSettings {
    fn default() -> Self {
        Self {
            batch_size: 10,
            max_batching_window_secs: 5,
            report_batch_item_failures: true,
        }
    }
}

impl From<EventSourceSettings> for EventSourceOptions {
    fn from(settings: EventSourceSettings) -> Self {
        Self {
            batch_size: settings.batch_size,
            max_batching_window: (settings.max_batching_window_secs > 0)
                .then(|| Duration::seconds(settings.max_batching_window_secs)),
            report_batch_item_failures: settings.report_batch_item_failures,
        }
    }
}

impl StackConfig {
    pub fn from_toml_str(raw: &str, path: &Path) -> Result<Self, AppError> {
        toml::from_str(raw).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let Some(path) = path else {
            debug!("No config file, using defaults");
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw, path)?;
        info!(path = %path.display(), stack = %config.stack_name, "Loaded config");
        Ok(config)
    }

    /// Handler entry path for a source file inside `handlers_dir`.
    pub fn handler_entry(&self, file: &str) -> String {
        self.handlers_dir.join(file).to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_file_means_defaults() {
        let config = StackConfig::from_toml_str("", Path::new("empty.toml")).unwrap();
        assert_eq!(config, StackConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let raw = r#"
            networking = false

            [event_source]
            batch_size = 5
        "#;
        let config = StackConfig::from_toml_str(raw, Path::new("partial.toml")).unwrap();
        assert!(!config.networking);
        assert_eq!(config.stack_name, DEFAULT_STACK_NAME);
        assert_eq!(config.event_source.batch_size, 5);
        assert_eq!(config.event_source.max_batching_window_secs, 5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = StackConfig::from_toml_str("colour = \"blue\"", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, AppError::ConfigParse { .. }));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "stack_name = \"FromDisk\"").unwrap();

        let config = StackConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.stack_name, "FromDisk");
    }

    #[test]
    fn load_reports_missing_files() {
        let err = StackConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }));
    }

    #[test]
    fn event_settings_convert_to_options() {
        let options: EventSourceOptions = EventSourceSettings::default().into();
        assert_eq!(options.batch_size, 10);
        assert_eq!(options.max_batching_window, Some(Duration::seconds(5)));
        assert!(options.report_batch_item_failures);
    }

    #[test]
    fn zero_window_means_no_batching_window() {
        let raw = "[event_source]\nmax_batching_window_secs = 0\n";
        let config = StackConfig::from_toml_str(raw, Path::new("nowindow.toml")).unwrap();

        let options: EventSourceOptions = config.event_source.into();
        assert_eq!(options.max_batching_window, None);
        assert_eq!(options.batch_size, 10);
    }
}
