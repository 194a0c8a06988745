//! # Wiring
//!
//! Wiring routines connect resources that are already registered. Each call
//! appends one [`Wiring`] record to the resource that owns the relationship:
//!
//! | Routine                               | Recorded on | Record                  |
//! |---------------------------------------|-------------|-------------------------|
//! | [`Scope::subscribe`]                  | topic       | [`Wiring::Subscription`] |
//! | [`Scope::add_api_method`]             | gateway     | [`Wiring::ApiMethod`]    |
//! | [`Scope::add_event_source`]           | function    | [`Wiring::EventSource`]  |
//! | [`Scope::grant_consume_messages`]     | queue       | [`Wiring::ConsumeGrant`] |
//! | [`Scope::grant_invoke`]               | function    | [`Wiring::InvokeGrant`]  |
//!
//! Records keep declaration order. Delivery, ordering and retry semantics of
//! the deployed resources belong to the provider, not to these records.

use crate::constructs::{ApiGateway, Function, Queue, Topic};
use crate::duration::Duration;
use crate::error::ConstructError;
use crate::handle::{Handle, ResourceHandle};
use crate::scope::Scope;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use tracing::{info, warn};

pub const MAX_BATCH_SIZE: u32 = 10_000;
pub const MAX_BATCHING_WINDOW: Duration = Duration::minutes(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Any,
}

impl FromStr for HttpMethod {
    type Err = ConstructError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            "ANY" => Ok(HttpMethod::Any),
            _ => Err(ConstructError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Any => "ANY",
        };
        f.write_str(verb)
    }
}

/// How a function polls a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSourceOptions {
    pub batch_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_batching_window: Option<Duration>,
    pub report_batch_item_failures: bool,
}

impl Default for EventSourceOptions {
    fn default() -> Self {
        Self {
            batch_size: 10,
            max_batching_window: None,
            report_batch_item_failures: false,
        }
    }
}

impl EventSourceOptions {
    fn check(&self) -> Result<(), String> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(format!(
                "batch size {} is outside 1..={MAX_BATCH_SIZE}",
                self.batch_size
            ));
        }
        if let Some(window) = self.max_batching_window {
            if window > MAX_BATCHING_WINDOW {
                return Err(format!(
                    "batching window {window} exceeds {MAX_BATCHING_WINDOW}"
                ));
            }
        }
        Ok(())
    }
}

/// A relationship recorded on the resource that owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Wiring {
    /// Messages published to this topic are forwarded to `queue`.
    Subscription { queue: String },
    /// Calls matching `method` on `path` invoke `function`.
    ApiMethod {
        path: String,
        method: HttpMethod,
        function: String,
    },
    /// This function consumes batches from `queue`.
    EventSource {
        queue: String,
        options: EventSourceOptions,
    },
    /// `grantee` may receive and delete messages from this queue.
    ConsumeGrant { grantee: String },
    /// `principal` may invoke this function.
    InvokeGrant { principal: String },
}

impl Wiring {
    /// Whether `self` and `other` describe the same relationship.
    ///
    /// Two methods on the same path and verb collide even if they target
    /// different functions.
    fn collides_with(&self, other: &Wiring) -> bool {
        match (self, other) {
            (
                Wiring::ApiMethod { path, method, .. },
                Wiring::ApiMethod {
                    path: other_path,
                    method: other_method,
                    ..
                },
            ) => path == other_path && method == other_method,
            (Wiring::EventSource { queue, .. }, Wiring::EventSource { queue: other, .. }) => queue == other,
            _ => self == other,
        }
    }

    fn describe(&self) -> String {
        match self {
            Wiring::Subscription { queue } => format!("subscription to {queue}"),
            Wiring::ApiMethod { path, method, .. } => format!("{method} /{path}"),
            Wiring::EventSource { queue, .. } => format!("event source {queue}"),
            Wiring::ConsumeGrant { grantee } => format!("consume grant for {grantee}"),
            Wiring::InvokeGrant { principal } => format!("invoke grant for {principal}"),
        }
    }
}

/// Trims surrounding slashes and rejects empty paths or empty segments.
fn normalize_path(path: &str) -> Option<String> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() || trimmed.split('/').any(str::is_empty) {
        return None;
    }
    Some(trimmed.to_string())
}

impl Scope {
    /// Forwards messages published to `topic` into `queue`.
    pub fn subscribe(&mut self, topic: &Handle<Topic>, queue: &Handle<Queue>) -> Result<(), ConstructError> {
        self.resolve(queue.untyped())?;
        self.attach(
            topic.untyped(),
            Wiring::Subscription {
                queue: queue.name().to_string(),
            },
        )
    }

    /// Routes `method` calls on `path` of `gateway` to `function`.
    pub fn add_api_method<G: ApiGateway>(
        &mut self,
        gateway: &Handle<G>,
        path: &str,
        method: HttpMethod,
        function: &Handle<Function>,
    ) -> Result<(), ConstructError> {
        self.resolve(function.untyped())?;
        let path = normalize_path(path).ok_or_else(|| ConstructError::InvalidWiring {
            name: gateway.name().to_string(),
            reason: format!("'{path}' is not a usable resource path"),
        })?;
        self.attach(
            gateway.untyped(),
            Wiring::ApiMethod {
                path,
                method,
                function: function.name().to_string(),
            },
        )
    }

    /// Lets `function` receive and delete messages from `queue`.
    pub fn grant_consume_messages(
        &mut self,
        queue: &Handle<Queue>,
        function: &Handle<Function>,
    ) -> Result<(), ConstructError> {
        self.resolve(function.untyped())?;
        self.attach(
            queue.untyped(),
            Wiring::ConsumeGrant {
                grantee: function.name().to_string(),
            },
        )
    }

    /// Makes `function` poll `queue` in batches.
    pub fn add_event_source(
        &mut self,
        function: &Handle<Function>,
        queue: &Handle<Queue>,
        options: EventSourceOptions,
    ) -> Result<(), ConstructError> {
        self.resolve(queue.untyped())?;
        options.check().map_err(|reason| ConstructError::InvalidWiring {
            name: function.name().to_string(),
            reason,
        })?;
        self.attach(
            function.untyped(),
            Wiring::EventSource {
                queue: queue.name().to_string(),
                options,
            },
        )
    }

    /// Allows the service `principal` to invoke `function`.
    pub fn grant_invoke(&mut self, function: &Handle<Function>, principal: &str) -> Result<(), ConstructError> {
        if principal.trim().is_empty() {
            return Err(ConstructError::InvalidWiring {
                name: function.name().to_string(),
                reason: "principal must not be empty".to_string(),
            });
        }
        self.attach(
            function.untyped(),
            Wiring::InvokeGrant {
                principal: principal.to_string(),
            },
        )
    }

    fn attach(&mut self, owner: &ResourceHandle, wiring: Wiring) -> Result<(), ConstructError> {
        let scope = self.name().to_string();
        let spec = self.spec_mut(owner)?;
        if spec.wiring.iter().any(|existing| existing.collides_with(&wiring)) {
            warn!(scope = %scope, name = owner.name(), wiring = %wiring.describe(), "Duplicate wiring");
            return Err(ConstructError::DuplicateWiring {
                name: owner.name().to_string(),
                detail: wiring.describe(),
            });
        }
        info!(scope = %scope, name = owner.name(), wiring = %wiring.describe(), "Wired");
        spec.wiring.push(wiring);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructs::{FunctionOverrides, HttpGateway, RestGateway};
    use pretty_assertions::assert_eq;

    fn function(scope: &mut Scope, name: &str) -> Handle<Function> {
        scope
            .create::<Function>(name, FunctionOverrides::handler(format!("lambdas/{name}.ts"), "handler"))
            .unwrap()
    }

    #[test]
    fn http_method_parses_case_insensitively() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Any".parse::<HttpMethod>().unwrap(), HttpMethod::Any);
        assert!(matches!(
            "FETCH".parse::<HttpMethod>(),
            Err(ConstructError::UnsupportedMethod(m)) if m == "FETCH"
        ));
    }

    #[test]
    fn paths_are_normalized() {
        assert_eq!(normalize_path("/lambda-api/").as_deref(), Some("lambda-api"));
        assert_eq!(normalize_path("a/b").as_deref(), Some("a/b"));
        assert_eq!(normalize_path("/"), None);
        assert_eq!(normalize_path("a//b"), None);
    }

    #[test]
    fn subscriptions_keep_declaration_order() {
        let mut scope = Scope::new("Fanout");
        let topic = scope.create::<Topic>("T", Default::default()).unwrap();
        let q1 = scope.create::<Queue>("Q1", Default::default()).unwrap();
        let q2 = scope.create::<Queue>("Q2", Default::default()).unwrap();

        scope.subscribe(&topic, &q1).unwrap();
        scope.subscribe(&topic, &q2).unwrap();

        assert_eq!(scope.spec(&topic).unwrap().subscriptions(), ["Q1", "Q2"]);
    }

    #[test]
    fn subscribing_twice_is_a_duplicate() {
        let mut scope = Scope::new("Twice");
        let topic = scope.create::<Topic>("T", Default::default()).unwrap();
        let queue = scope.create::<Queue>("Q", Default::default()).unwrap();

        scope.subscribe(&topic, &queue).unwrap();
        let err = scope.subscribe(&topic, &queue).unwrap_err();
        assert!(matches!(err, ConstructError::DuplicateWiring { .. }));
        assert_eq!(scope.spec(&topic).unwrap().subscriptions().len(), 1);
    }

    #[test]
    fn api_methods_on_both_gateway_kinds() {
        let mut scope = Scope::new("Apis");
        let rest = scope.create::<RestGateway>("Rest", Default::default()).unwrap();
        let http = scope.create::<HttpGateway>("Http", Default::default()).unwrap();
        let f = function(&mut scope, "Fn");

        scope.add_api_method(&rest, "/items", HttpMethod::Get, &f).unwrap();
        scope.add_api_method(&rest, "items", HttpMethod::Post, &f).unwrap();
        scope.add_api_method(&http, "items", HttpMethod::Get, &f).unwrap();

        assert_eq!(scope.spec(&rest).unwrap().api_methods().len(), 2);
        let err = scope.add_api_method(&rest, "items/", HttpMethod::Get, &f).unwrap_err();
        assert!(matches!(err, ConstructError::DuplicateWiring { .. }));
        let err = scope.add_api_method(&rest, "//", HttpMethod::Get, &f).unwrap_err();
        assert!(matches!(err, ConstructError::InvalidWiring { .. }));
    }

    #[test]
    fn wiring_to_an_unregistered_handle_fails() {
        let mut scope = Scope::new("Mine");
        let mut other = Scope::new("Theirs");
        let topic = scope.create::<Topic>("T", Default::default()).unwrap();
        let stray = other.create::<Queue>("Q", Default::default()).unwrap();

        let err = scope.subscribe(&topic, &stray).unwrap_err();
        assert!(matches!(err, ConstructError::ForeignHandle { .. }));
        assert!(scope.spec(&topic).unwrap().wiring.is_empty());
    }

    #[test]
    fn event_source_options_are_checked() {
        let mut scope = Scope::new("Events");
        let queue = scope.create::<Queue>("Q", Default::default()).unwrap();
        let f = function(&mut scope, "Fn");

        let too_big = EventSourceOptions {
            batch_size: MAX_BATCH_SIZE + 1,
            ..EventSourceOptions::default()
        };
        assert!(matches!(
            scope.add_event_source(&f, &queue, too_big),
            Err(ConstructError::InvalidWiring { .. })
        ));

        let options = EventSourceOptions {
            batch_size: 10,
            max_batching_window: Some(Duration::seconds(5)),
            report_batch_item_failures: true,
        };
        scope.add_event_source(&f, &queue, options).unwrap();
        scope.grant_consume_messages(&queue, &f).unwrap();

        assert_eq!(
            scope.spec(&f).unwrap().wiring,
            vec![Wiring::EventSource {
                queue: "Q".into(),
                options
            }]
        );
        assert_eq!(
            scope.spec(&queue).unwrap().wiring,
            vec![Wiring::ConsumeGrant { grantee: "Fn".into() }]
        );
    }

    #[test]
    fn invoke_grant_needs_a_principal() {
        let mut scope = Scope::new("Invoke");
        let f = function(&mut scope, "Fn");
        assert!(scope.grant_invoke(&f, " ").is_err());
        scope.grant_invoke(&f, "apigateway.amazonaws.com").unwrap();
    }

    #[test]
    fn wiring_serializes_with_a_type_tag() {
        let wiring = Wiring::ApiMethod {
            path: "lambda-api".into(),
            method: HttpMethod::Get,
            function: "Fn".into(),
        };
        assert_eq!(
            serde_json::to_value(&wiring).unwrap(),
            serde_json::json!({ "type": "apiMethod", "path": "lambda-api", "method": "GET", "function": "Fn" })
        );
    }
}
