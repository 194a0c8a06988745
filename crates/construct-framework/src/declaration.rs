//! # Resource Declarations
//!
//! [`ResourceSpec`] is what the scope stores for every registered resource:
//! the merged option map plus the wiring records attached to it. It is the
//! unit handed to the provisioning engine.

use crate::options::Options;
use crate::resource::ResourceType;
use crate::wiring::Wiring;
use serde::{Deserialize, Serialize};

/// A declarative description of one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpec {
    /// Unique within `parent`.
    pub logical_name: String,
    pub kind: ResourceType,
    /// Merged defaults and overrides.
    pub options: Options,
    /// Name of the owning scope.
    pub parent: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wiring: Vec<Wiring>,
}

impl ResourceSpec {
    /// Queues this topic forwards to, in declaration order.
    pub fn subscriptions(&self) -> Vec<&str> {
        self.wiring
            .iter()
            .filter_map(|w| match w {
                Wiring::Subscription { queue } => Some(queue.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn api_methods(&self) -> Vec<&Wiring> {
        self.wiring
            .iter()
            .filter(|w| matches!(w, Wiring::ApiMethod { .. }))
            .collect()
    }

    pub fn provider_type(&self) -> &'static str {
        self.kind.provider_type()
    }
}
