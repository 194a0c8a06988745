use cheat_sheet_stack::stack::*;
use cheat_sheet_stack::{assemble, StackConfig};
use construct_framework::{
    ConstructError, Duration, EventSourceOptions, HttpMethod, Network, Queue, QueueOverrides,
    ResourceType, Runtime, Scope, SubnetType, Wiring,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn assembled(config: &StackConfig) -> (Scope, CheatSheetStack) {
    let mut scope = Scope::new(config.stack_name.clone());
    let stack = assemble(&mut scope, config).expect("Failed to assemble stack");
    (scope, stack)
}

/// Full assembly with the default config, checked resource by resource.
#[test]
fn test_default_stack_declares_every_resource() {
    let (scope, stack) = assembled(&StackConfig::default());

    let names: Vec<_> = scope.resources().map(|r| r.logical_name.as_str()).collect();
    assert_eq!(
        names,
        [
            QUEUE_1,
            QUEUE_2,
            TOPIC_1,
            DB_FUNCTION,
            STATISTIC_FUNCTION,
            NETWORK,
            REST_API,
            REST_FUNCTION
        ]
    );

    // Queue defaults come through untouched
    let queue_1 = scope.spec(&stack.queue_1).unwrap();
    assert_eq!(
        serde_json::Value::Object(queue_1.options.clone()),
        json!({ "queueName": "CdkQueue1", "visibilityTimeout": 300 })
    );

    // Topic fans out to both queues, in order
    assert_eq!(scope.spec(&stack.topic_1).unwrap().subscriptions(), [QUEUE_1, QUEUE_2]);

    // Database function: handler reference, consume grant, event source
    let db = scope.props(&stack.db_function).unwrap();
    assert_eq!(db.runtime, Runtime::Nodejs22X);
    assert_eq!(db.entry.as_deref(), Some("lambdas/updateDb.ts"));
    assert_eq!(db.handler.as_deref(), Some(HANDLER_EXPORT));
    assert_eq!(
        scope.spec(&stack.db_function).unwrap().wiring,
        vec![Wiring::EventSource {
            queue: QUEUE_1.into(),
            options: EventSourceOptions {
                batch_size: 10,
                max_batching_window: Some(Duration::seconds(5)),
                report_batch_item_failures: true,
            },
        }]
    );
    assert_eq!(
        scope.spec(&stack.queue_1).unwrap().wiring,
        vec![Wiring::ConsumeGrant {
            grantee: DB_FUNCTION.into()
        }]
    );

    // Statistic function only holds a grant on the second queue
    assert!(scope.spec(&stack.statistic_function).unwrap().wiring.is_empty());
    assert_eq!(
        scope.spec(&stack.queue_2).unwrap().wiring,
        vec![Wiring::ConsumeGrant {
            grantee: STATISTIC_FUNCTION.into()
        }]
    );
}

#[test]
fn test_networking_resources() {
    let (scope, stack) = assembled(&StackConfig::default());
    let networking = stack.networking.expect("networking enabled by default");

    let network: Network = scope.props(&networking.network).unwrap();
    assert_eq!(network.nat_gateways, 0);
    assert_eq!(network.max_azs, 1);
    assert_eq!(network.ip_addresses.to_string(), "10.0.0.0/16");
    let subnets: Vec<_> = network
        .subnet_configuration
        .iter()
        .map(|s| (s.name.as_str(), s.subnet_type, s.cidr_mask))
        .collect();
    assert_eq!(
        subnets,
        [
            ("Private subnet with egress", SubnetType::PrivateWithEgress, 24),
            ("Public subnet", SubnetType::Public, 24),
        ]
    );

    assert_eq!(
        scope.spec(&networking.rest_api).unwrap().wiring,
        vec![Wiring::ApiMethod {
            path: REST_PATH.into(),
            method: HttpMethod::Get,
            function: REST_FUNCTION.into(),
        }]
    );
    assert_eq!(
        scope.spec(&networking.rest_function).unwrap().wiring,
        vec![Wiring::InvokeGrant {
            principal: API_GATEWAY_PRINCIPAL.into()
        }]
    );
}

#[test]
fn test_stack_without_networking() {
    let config = StackConfig {
        networking: false,
        ..StackConfig::default()
    };
    let (scope, stack) = assembled(&config);

    assert!(stack.networking.is_none());
    assert_eq!(scope.len(), 5);
    assert!(scope.get(NETWORK).is_none());
    assert!(scope.get(REST_API).is_none());
}

#[test]
fn test_assembling_twice_into_one_scope_conflicts() {
    let config = StackConfig::default();
    let mut scope = Scope::new("Twice");
    assemble(&mut scope, &config).unwrap();

    let err = assemble(&mut scope, &config).unwrap_err();
    assert!(matches!(err, ConstructError::NameConflict { ref name, .. } if name == QUEUE_1));
}

#[test]
fn test_preexisting_name_blocks_assembly() {
    let mut scope = Scope::new("Taken");
    scope
        .create::<Queue>(
            TOPIC_1,
            QueueOverrides {
                visibility_timeout: Some(Duration::seconds(1)),
                ..Default::default()
            },
        )
        .unwrap();

    let err = assemble(&mut scope, &StackConfig::default()).unwrap_err();
    assert!(matches!(err, ConstructError::NameConflict { ref name, .. } if name == TOPIC_1));
}

#[test]
fn test_handlers_dir_and_event_source_come_from_config() {
    let raw = r#"
        handlers_dir = "src/handlers"

        [event_source]
        batch_size = 25
        max_batching_window_secs = 30
        report_batch_item_failures = false
    "#;
    let config = StackConfig::from_toml_str(raw, std::path::Path::new("stack.toml")).unwrap();
    let (scope, stack) = assembled(&config);

    let statistic = scope.props(&stack.statistic_function).unwrap();
    assert_eq!(statistic.entry.as_deref(), Some("src/handlers/statisticUpdate.ts"));

    match &scope.spec(&stack.db_function).unwrap().wiring[..] {
        [Wiring::EventSource { options, .. }] => {
            assert_eq!(options.batch_size, 25);
            assert_eq!(options.max_batching_window, Some(Duration::seconds(30)));
            assert!(!options.report_batch_item_failures);
        }
        other => panic!("unexpected wiring: {other:?}"),
    }
}

#[test]
fn test_invalid_event_source_config_fails_assembly() {
    let config = StackConfig::from_toml_str(
        "[event_source]\nbatch_size = 0\n",
        std::path::Path::new("zero.toml"),
    )
    .unwrap();
    let mut scope = Scope::new("Zero");

    let err = assemble(&mut scope, &config).unwrap_err();
    assert!(matches!(err, ConstructError::InvalidWiring { ref name, .. } if name == DB_FUNCTION));
}

#[test]
fn test_manifest_counts_by_kind() {
    let (scope, _) = assembled(&StackConfig::default());
    let manifest = scope.synthesize();

    assert_eq!(manifest.stack, "CdkAwsCheatSheetStack");
    assert_eq!(manifest.of_kind(ResourceType::Queue).count(), 2);
    assert_eq!(manifest.of_kind(ResourceType::Topic).count(), 1);
    assert_eq!(manifest.of_kind(ResourceType::Function).count(), 3);
    assert_eq!(manifest.of_kind(ResourceType::Network).count(), 1);
    assert_eq!(manifest.of_kind(ResourceType::RestGateway).count(), 1);
    assert_eq!(manifest.of_kind(ResourceType::HttpGateway).count(), 0);
}
