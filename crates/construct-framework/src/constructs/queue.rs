use crate::duration::Duration;
use crate::resource::{Construct, ResourceType};
use serde::{Deserialize, Serialize};

pub const DEFAULT_VISIBILITY_TIMEOUT: Duration = Duration::seconds(300);

/// A message queue.
///
/// # Defaults
/// - `queueName`: the logical name
/// - `visibilityTimeout`: [`DEFAULT_VISIBILITY_TIMEOUT`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Queue {
    pub queue_name: String,
    pub visibility_timeout: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_period: Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_delay: Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fifo: Option<bool>,
}

/// Partial configuration for a [`Queue`]. Unset fields keep their defaults.
///
/// ```rust
/// use construct_framework::{Duration, QueueOverrides, Queue, Scope};
///
/// let mut scope = Scope::new("Docs");
/// let overrides = QueueOverrides {
///     delivery_delay: Some(Duration::seconds(10)),
///     ..QueueOverrides::default()
/// };
/// let queue = scope.create::<Queue>("Delayed", overrides).unwrap();
///
/// let props = scope.props(&queue).unwrap();
/// assert_eq!(props.delivery_delay, Some(Duration::seconds(10)));
/// assert_eq!(props.visibility_timeout, Duration::seconds(300));
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility_timeout: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_period: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_delay: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifo: Option<bool>,
}

impl Construct for Queue {
    const TYPE: ResourceType = ResourceType::Queue;
    type Overrides = QueueOverrides;

    fn defaults(name: &str) -> Self {
        Self {
            queue_name: name.to_string(),
            visibility_timeout: DEFAULT_VISIBILITY_TIMEOUT,
            retention_period: None,
            delivery_delay: None,
            fifo: None,
        }
    }
}
