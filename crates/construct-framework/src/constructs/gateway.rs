//! API gateways: the REST flavour and the lighter HTTP flavour.
//!
//! Both accept methods through [`Scope::add_api_method`](crate::Scope::add_api_method);
//! the [`ApiGateway`] marker restricts that call to these two kinds.

use crate::resource::{Construct, ResourceType};
use serde::{Deserialize, Serialize};

/// Marker for constructs that can route HTTP methods to functions.
pub trait ApiGateway: Construct {}

/// A REST API gateway. Defaults to `restApiName` = logical name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestGateway {
    pub rest_api_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the engine should create a default deployment stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestGatewayOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_api_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deploy: Option<bool>,
}

impl Construct for RestGateway {
    const TYPE: ResourceType = ResourceType::RestGateway;
    type Overrides = RestGatewayOverrides;

    fn defaults(name: &str) -> Self {
        Self {
            rest_api_name: name.to_string(),
            description: None,
            deploy: None,
        }
    }
}

impl ApiGateway for RestGateway {}

/// An HTTP API gateway. Defaults to `apiName` = logical name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpGateway {
    pub api_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpGatewayOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Construct for HttpGateway {
    const TYPE: ResourceType = ResourceType::HttpGateway;
    type Overrides = HttpGatewayOverrides;

    fn defaults(name: &str) -> Self {
        Self {
            api_name: name.to_string(),
            description: None,
        }
    }
}

impl ApiGateway for HttpGateway {}
