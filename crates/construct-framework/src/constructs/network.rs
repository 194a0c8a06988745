//! # Virtual Networks
//!
//! A [`Network`] is a private address space carved into subnets. The default
//! layout is the cheapest useful one: a single availability zone, no NAT
//! gateways, and one private-with-egress plus one public `/24` subnet inside
//! `10.0.0.0/16`.

use crate::resource::{Construct, ResourceType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::net::Ipv4Addr;
use std::str::FromStr;

pub const DEFAULT_CIDR: &str = "10.0.0.0/16";
pub const DEFAULT_SUBNET_MASK: u8 = 24;
pub const PRIVATE_SUBNET_NAME: &str = "Private subnet with egress";
pub const PUBLIC_SUBNET_NAME: &str = "Public subnet";

/// An IPv4 address block in `a.b.c.d/n` notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CidrBlock {
    address: Ipv4Addr,
    prefix: u8,
}

impl CidrBlock {
    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }
}

impl FromStr for CidrBlock {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address, prefix) = s
            .split_once('/')
            .ok_or_else(|| format!("'{s}' is not in a.b.c.d/n notation"))?;
        let address = address
            .parse::<Ipv4Addr>()
            .map_err(|e| format!("'{s}': {e}"))?;
        let prefix = prefix
            .parse::<u8>()
            .map_err(|e| format!("'{s}': bad prefix length: {e}"))?;
        if prefix > 32 {
            return Err(format!("'{s}': prefix length {prefix} exceeds 32"));
        }
        Ok(Self { address, prefix })
    }
}

impl TryFrom<String> for CidrBlock {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CidrBlock> for String {
    fn from(block: CidrBlock) -> Self {
        block.to_string()
    }
}

impl Display for CidrBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubnetType {
    Public,
    PrivateWithEgress,
    PrivateIsolated,
}

/// One subnet group, repeated in every availability zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetConfiguration {
    pub cidr_mask: u8,
    pub name: String,
    pub subnet_type: SubnetType,
}

impl SubnetConfiguration {
    /// A `/24` subnet group of the given type.
    pub fn new(name: impl Into<String>, subnet_type: SubnetType) -> Self {
        Self {
            cidr_mask: DEFAULT_SUBNET_MASK,
            name: name.into(),
            subnet_type,
        }
    }
}

/// A virtual network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub vpc_name: String,
    pub nat_gateways: u32,
    pub max_azs: u32,
    pub ip_addresses: CidrBlock,
    pub subnet_configuration: Vec<SubnetConfiguration>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nat_gateways: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_azs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_addresses: Option<CidrBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_configuration: Option<Vec<SubnetConfiguration>>,
}

impl Construct for Network {
    const TYPE: ResourceType = ResourceType::Network;
    type Overrides = NetworkOverrides;

    fn defaults(name: &str) -> Self {
        let ip_addresses = CidrBlock {
            address: Ipv4Addr::new(10, 0, 0, 0),
            prefix: 16,
        };
        Self {
            vpc_name: name.to_string(),
            nat_gateways: 0,
            max_azs: 1,
            ip_addresses,
            subnet_configuration: vec![
                SubnetConfiguration::new(PRIVATE_SUBNET_NAME, SubnetType::PrivateWithEgress),
                SubnetConfiguration::new(PUBLIC_SUBNET_NAME, SubnetType::Public),
            ],
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.max_azs == 0 {
            return Err("maxAzs must be at least 1".to_string());
        }
        let prefix = self.ip_addresses.prefix();
        let mut names = HashSet::new();
        for subnet in &self.subnet_configuration {
            if subnet.cidr_mask > 32 || subnet.cidr_mask < prefix {
                return Err(format!(
                    "subnet '{}' mask /{} does not fit inside {}",
                    subnet.name, subnet.cidr_mask, self.ip_addresses
                ));
            }
            if !names.insert(subnet.name.as_str()) {
                return Err(format!("subnet name '{}' is used twice", subnet.name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::to_options;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn cidr_parses_and_displays() {
        let block: CidrBlock = DEFAULT_CIDR.parse().unwrap();
        assert_eq!(block.address(), Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(block.prefix(), 16);
        assert_eq!(block.to_string(), DEFAULT_CIDR);
    }

    #[test]
    fn cidr_rejects_garbage() {
        assert!("10.0.0.0".parse::<CidrBlock>().is_err());
        assert!("10.0.0.0/33".parse::<CidrBlock>().is_err());
        assert!("10.0.0/16".parse::<CidrBlock>().is_err());
    }

    #[test]
    fn defaults_match_the_cheap_single_az_layout() {
        let options = to_options(&Network::defaults("CDK-vpc")).unwrap();
        assert_eq!(
            serde_json::Value::Object(options),
            json!({
                "vpcName": "CDK-vpc",
                "natGateways": 0,
                "maxAzs": 1,
                "ipAddresses": "10.0.0.0/16",
                "subnetConfiguration": [
                    { "cidrMask": 24, "name": "Private subnet with egress", "subnetType": "PRIVATE_WITH_EGRESS" },
                    { "cidrMask": 24, "name": "Public subnet", "subnetType": "PUBLIC" }
                ]
            })
        );
    }

    #[test]
    fn subnet_wider_than_network_is_rejected() {
        let mut network = Network::defaults("n");
        network.subnet_configuration[0].cidr_mask = 8;
        assert!(network.validate().is_err());
    }

    #[test]
    fn duplicate_subnet_names_are_rejected() {
        let mut network = Network::defaults("n");
        network.subnet_configuration[1].name = PRIVATE_SUBNET_NAME.to_string();
        assert!(network.validate().is_err());
    }
}
