//! Serverless functions and their managed runtimes.
//!
//! The function body is never part of the record. A function points at its
//! handler by source file (`entry`) and exported symbol (`handler`); bundling
//! and deploying that code belongs to the provisioning engine.

use crate::duration::Duration;
use crate::resource::{Construct, ResourceType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Managed runtimes a function can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Runtime {
    #[serde(rename = "nodejs18.x")]
    Nodejs18X,
    #[serde(rename = "nodejs20.x")]
    Nodejs20X,
    #[serde(rename = "nodejs22.x")]
    Nodejs22X,
    #[serde(rename = "python3.12")]
    Python312,
    #[serde(rename = "provided.al2023")]
    ProvidedAl2023,
}

/// Runtime every function gets unless overridden.
pub const DEFAULT_RUNTIME: Runtime = Runtime::Nodejs22X;

impl Display for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            Runtime::Nodejs18X => "nodejs18.x",
            Runtime::Nodejs20X => "nodejs20.x",
            Runtime::Nodejs22X => "nodejs22.x",
            Runtime::Python312 => "python3.12",
            Runtime::ProvidedAl2023 => "provided.al2023",
        };
        f.write_str(id)
    }
}

/// A serverless function.
///
/// # Defaults
/// - `functionName`: the logical name
/// - `runtime`: [`DEFAULT_RUNTIME`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    pub function_name: String,
    pub runtime: Runtime,
    /// Source file containing the handler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    /// Exported symbol inside `entry`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<Runtime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FunctionOverrides {
    /// Overrides pointing the function at `export` inside `entry`.
    pub fn handler(entry: impl Into<String>, export: impl Into<String>) -> Self {
        Self {
            entry: Some(entry.into()),
            handler: Some(export.into()),
            ..Self::default()
        }
    }
}

impl Construct for Function {
    const TYPE: ResourceType = ResourceType::Function;
    type Overrides = FunctionOverrides;

    fn defaults(name: &str) -> Self {
        Self {
            function_name: name.to_string(),
            runtime: DEFAULT_RUNTIME,
            entry: None,
            handler: None,
            memory_size: None,
            timeout: None,
            environment: None,
            description: None,
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.handler.is_some() && self.entry.is_none() {
            return Err("handler is set without an entry file".to_string());
        }
        Ok(())
    }
}
