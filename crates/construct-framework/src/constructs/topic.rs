use crate::resource::{Construct, ResourceType};
use serde::{Deserialize, Serialize};

/// A publish/subscribe topic. Defaults to `topicName` = logical name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub topic_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fifo: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifo: Option<bool>,
}

impl Construct for Topic {
    const TYPE: ResourceType = ResourceType::Topic;
    type Overrides = TopicOverrides;

    fn defaults(name: &str) -> Self {
        Self {
            topic_name: name.to_string(),
            display_name: None,
            fifo: None,
        }
    }
}
