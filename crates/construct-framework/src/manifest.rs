//! # Manifest
//!
//! The frozen output of a [`Scope`](crate::Scope). Turning it into a
//! provider template is the provisioning engine's job; this crate only
//! guarantees the manifest is complete and deterministic.

use crate::declaration::ResourceSpec;
use crate::error::ConstructError;
use crate::resource::ResourceType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub stack: String,
    /// In declaration order.
    pub resources: Vec<ResourceSpec>,
}

impl Manifest {
    pub fn get(&self, name: &str) -> Option<&ResourceSpec> {
        self.resources.iter().find(|r| r.logical_name == name)
    }

    pub fn of_kind(&self, kind: ResourceType) -> impl Iterator<Item = &ResourceSpec> {
        self.resources.iter().filter(move |r| r.kind == kind)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConstructError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
