use crate::handle::Handle;
use crate::resource::{Construct, Reference, ResourceType};
use serde::{Deserialize, Serialize};

use super::Network;

/// A security group attached to a [`Network`].
///
/// The network reference has no default; supply it with
/// [`SecurityGroupOverrides::in_network`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityGroup {
    pub security_group_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_all_outbound: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityGroupOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_all_outbound: Option<bool>,
}

impl SecurityGroupOverrides {
    pub fn in_network(network: &Handle<Network>) -> Self {
        Self {
            vpc: Some(network.name().to_string()),
            ..Self::default()
        }
    }
}

impl Construct for SecurityGroup {
    const TYPE: ResourceType = ResourceType::SecurityGroup;
    type Overrides = SecurityGroupOverrides;

    fn defaults(name: &str) -> Self {
        Self {
            security_group_name: name.to_string(),
            vpc: None,
            description: None,
            allow_all_outbound: None,
        }
    }

    fn validate(&self) -> Result<(), String> {
        match &self.vpc {
            Some(_) => Ok(()),
            None => Err("a security group needs a vpc".to_string()),
        }
    }

    fn references(&self) -> Vec<Reference> {
        self.vpc
            .iter()
            .map(|name| Reference {
                kind: ResourceType::Network,
                name: name.clone(),
            })
            .collect()
    }
}
