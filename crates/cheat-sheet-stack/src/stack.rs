//! # Stack Assembly
//!
//! This module declares the cheat-sheet stack: a topic fanning out to two
//! queues, a function per queue, and (with networking enabled) a network plus a
//! REST gateway fronting a third function.
//!
//! ## The Assembly Pattern
//!
//! Assembly is a plain function over an explicit [`Scope`]:
//!
//! 1. **Declare** - every resource goes through the factory with its overrides
//! 2. **Wire** - subscriptions, grants, event sources and API methods connect
//!    the handles returned by step 1
//! 3. **Return** - the caller gets every handle back in [`CheatSheetStack`]
//!
//! The scope is then synthesized by the caller; nothing is declared after
//! [`assemble`] returns.
//!
//! ```text
//! CdkTopic1 ──► CdkQueue1 ──► CdkLambda1Db        (event source, batch 10 / 5s)
//!           └─► CdkQueue2 ──► CdkLambda2Asset     (consume grant only)
//!
//! CDK_restapi  GET /lambda-api ──► CDK_restapi_lambda
//! CDK-vpc
//! ```

use crate::config::StackConfig;
use construct_framework::{
    ConstructError, Function, FunctionOverrides, Handle, HttpMethod, Network, Queue, RestGateway,
    Scope, Topic,
};
use tracing::{info, info_span};

pub const QUEUE_1: &str = "CdkQueue1";
pub const QUEUE_2: &str = "CdkQueue2";
pub const TOPIC_1: &str = "CdkTopic1";
pub const DB_FUNCTION: &str = "CdkLambda1Db";
pub const STATISTIC_FUNCTION: &str = "CdkLambda2Asset";
pub const NETWORK: &str = "CDK-vpc";
pub const REST_API: &str = "CDK_restapi";
pub const REST_FUNCTION: &str = "CDK_restapi_lambda";
pub const REST_PATH: &str = "lambda-api";

pub const HANDLER_EXPORT: &str = "handler";
pub const UPDATE_DB_ENTRY: &str = "updateDb.ts";
pub const STATISTIC_UPDATE_ENTRY: &str = "statisticUpdate.ts";
pub const REST_HANDLER_ENTRY: &str = "restHandler.ts";

pub const API_GATEWAY_PRINCIPAL: &str = "apigateway.amazonaws.com";

/// Handles produced by [`assemble`].
#[derive(Debug, Clone)]
pub struct CheatSheetStack {
    pub queue_1: Handle<Queue>,
    pub queue_2: Handle<Queue>,
    pub topic_1: Handle<Topic>,
    pub db_function: Handle<Function>,
    pub statistic_function: Handle<Function>,
    pub networking: Option<NetworkingStack>,
}

/// The part of the stack that only exists with networking enabled.
#[derive(Debug, Clone)]
pub struct NetworkingStack {
    pub network: Handle<Network>,
    pub rest_api: Handle<RestGateway>,
    pub rest_function: Handle<Function>,
}

/// Declares and wires the whole stack inside `scope`.
pub fn assemble(scope: &mut Scope, config: &StackConfig) -> Result<CheatSheetStack, ConstructError> {
    let _span = info_span!("assemble", stack = %scope.name()).entered();

    // Messaging
    let queue_1 = scope.create::<Queue>(QUEUE_1, Default::default())?;
    let queue_2 = scope.create::<Queue>(QUEUE_2, Default::default())?;
    let topic_1 = scope.create::<Topic>(TOPIC_1, Default::default())?;

    scope.subscribe(&topic_1, &queue_1)?;
    scope.subscribe(&topic_1, &queue_2)?;

    // Consumers
    let db_function = handler_function(scope, config, DB_FUNCTION, UPDATE_DB_ENTRY)?;
    scope.grant_consume_messages(&queue_1, &db_function)?;
    scope.add_event_source(&db_function, &queue_1, config.event_source.into())?;

    let statistic_function = handler_function(scope, config, STATISTIC_FUNCTION, STATISTIC_UPDATE_ENTRY)?;
    scope.grant_consume_messages(&queue_2, &statistic_function)?;

    let networking = if config.networking {
        Some(assemble_networking(scope, config)?)
    } else {
        info!("Networking disabled, skipping network and REST gateway");
        None
    };

    info!(size = scope.len(), "Stack assembled");

    Ok(CheatSheetStack {
        queue_1,
        queue_2,
        topic_1,
        db_function,
        statistic_function,
        networking,
    })
}

fn assemble_networking(scope: &mut Scope, config: &StackConfig) -> Result<NetworkingStack, ConstructError> {
    let network = scope.create::<Network>(NETWORK, Default::default())?;
    let rest_api = scope.create::<RestGateway>(REST_API, Default::default())?;

    let rest_function = handler_function(scope, config, REST_FUNCTION, REST_HANDLER_ENTRY)?;
    scope.grant_invoke(&rest_function, API_GATEWAY_PRINCIPAL)?;
    scope.add_api_method(&rest_api, REST_PATH, HttpMethod::Get, &rest_function)?;

    Ok(NetworkingStack {
        network,
        rest_api,
        rest_function,
    })
}

fn handler_function(
    scope: &mut Scope,
    config: &StackConfig,
    name: &str,
    entry_file: &str,
) -> Result<Handle<Function>, ConstructError> {
    let overrides = FunctionOverrides::handler(config.handler_entry(entry_file), HANDLER_EXPORT);
    scope.create::<Function>(name, overrides)
}
