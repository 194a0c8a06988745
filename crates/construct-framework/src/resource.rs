//! # Construct Trait
//!
//! The `Construct` trait is the contract every resource kind implements so that
//! the generic [`Scope`](crate::Scope) can declare it. A kind supplies its
//! default record for a given logical name, a partial `Overrides` type, and
//! optionally extra validation and cross-resource references.
//!
//! # Architecture Note
//! The scope never sees the typed records while it stores them: defaults and
//! overrides are both flattened into [`Options`] maps and merged key by key.
//! The typed record is only materialised to check that the merged map still
//! describes a valid resource, and again when a caller asks for
//! [`Scope::props`](crate::Scope::props).

use crate::constructs::{Function, HttpGateway, Network, Queue, RestGateway, SecurityGroup, Topic};
use crate::error::ConstructError;
use crate::options::{from_options, to_options, Options};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// The kinds of resource a scope can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Queue,
    Topic,
    Function,
    Network,
    SecurityGroup,
    RestGateway,
    HttpGateway,
}

impl ResourceType {
    pub const ALL: [ResourceType; 7] = [
        ResourceType::Queue,
        ResourceType::Topic,
        ResourceType::Function,
        ResourceType::Network,
        ResourceType::SecurityGroup,
        ResourceType::RestGateway,
        ResourceType::HttpGateway,
    ];

    /// The resource type name the provisioning engine knows this kind by.
    pub fn provider_type(self) -> &'static str {
        match self {
            ResourceType::Queue => "AWS::SQS::Queue",
            ResourceType::Topic => "AWS::SNS::Topic",
            ResourceType::Function => "AWS::Lambda::Function",
            ResourceType::Network => "AWS::EC2::VPC",
            ResourceType::SecurityGroup => "AWS::EC2::SecurityGroup",
            ResourceType::RestGateway => "AWS::ApiGateway::RestApi",
            ResourceType::HttpGateway => "AWS::ApiGatewayV2::Api",
        }
    }

    /// Default option map for a resource of this kind named `name`.
    pub fn default_options(self, name: &str) -> Result<Options, ConstructError> {
        match self {
            ResourceType::Queue => to_options(&Queue::defaults(name)),
            ResourceType::Topic => to_options(&Topic::defaults(name)),
            ResourceType::Function => to_options(&Function::defaults(name)),
            ResourceType::Network => to_options(&Network::defaults(name)),
            ResourceType::SecurityGroup => to_options(&SecurityGroup::defaults(name)),
            ResourceType::RestGateway => to_options(&RestGateway::defaults(name)),
            ResourceType::HttpGateway => to_options(&HttpGateway::defaults(name)),
        }
    }

    /// Decodes and validates a merged option map, returning the references it makes.
    pub(crate) fn check(self, name: &str, options: &Options) -> Result<Vec<Reference>, ConstructError> {
        match self {
            ResourceType::Queue => check_as::<Queue>(name, options),
            ResourceType::Topic => check_as::<Topic>(name, options),
            ResourceType::Function => check_as::<Function>(name, options),
            ResourceType::Network => check_as::<Network>(name, options),
            ResourceType::SecurityGroup => check_as::<SecurityGroup>(name, options),
            ResourceType::RestGateway => check_as::<RestGateway>(name, options),
            ResourceType::HttpGateway => check_as::<HttpGateway>(name, options),
        }
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ResourceType::Queue => "Queue",
            ResourceType::Topic => "Topic",
            ResourceType::Function => "Function",
            ResourceType::Network => "Network",
            ResourceType::SecurityGroup => "SecurityGroup",
            ResourceType::RestGateway => "RestGateway",
            ResourceType::HttpGateway => "HttpGateway",
        };
        f.write_str(label)
    }
}

/// A by-name reference from one resource's options to another resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub kind: ResourceType,
    pub name: String,
}

/// Trait that any resource kind must implement to be declared in a [`Scope`](crate::Scope).
///
/// The implementing type is the fully-populated record for one resource. Its
/// serialized field names are the option keys.
pub trait Construct: Serialize + DeserializeOwned + Debug + Clone + 'static {
    /// Which [`ResourceType`] this record describes.
    const TYPE: ResourceType;

    /// Partial configuration accepted by the factory.
    ///
    /// Every field should be optional and skipped when absent, so that the
    /// serialized form contains only the keys the caller actually set.
    type Overrides: Serialize + Debug + Default;

    /// The default record for a resource called `name`.
    fn defaults(name: &str) -> Self;

    /// Checks invariants that the type system alone cannot express.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Other resources this record points at by logical name.
    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }
}

fn check_as<K: Construct>(name: &str, options: &Options) -> Result<Vec<Reference>, ConstructError> {
    let record: K = from_options(name, options)?;
    record
        .validate()
        .map_err(|reason| ConstructError::InvalidOption {
            name: name.to_string(),
            reason,
        })?;
    Ok(record.references())
}
