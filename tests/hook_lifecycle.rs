// Integration tests for the hook chains: ordering, before-hook gating, and
// the deliberate asymmetry that after-hooks can never change an outcome.
mod support;

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use apimap::{
    AfterHook, ApiConfig, ApiMap, BeforeHook, CallArgs, CallError, EndpointConfig, HookError,
    HookScope, HttpMethod, ResourceConfig, Transport, TransportError,
};
use support::RecordingTransport;

type Log = Arc<Mutex<Vec<&'static str>>>;

fn before(log: &Log, label: &'static str, pass: bool) -> BeforeHook {
    let log = Arc::clone(log);
    BeforeHook::sync(move |_| {
        log.lock().unwrap().push(label);
        pass
    })
}

fn after(log: &Log, label: &'static str) -> AfterHook {
    let log = Arc::clone(log);
    AfterHook::sync(move |_, _| {
        log.lock().unwrap().push(label);
    })
}

fn hooked_config(log: &Log, resource_passes: bool) -> ApiConfig {
    ApiConfig {
        host: "https://api.test".to_string(),
        before_request: Some(before(log, "before:global", true)),
        after_response: Some(after(log, "after:global")),
        resources: vec![ResourceConfig {
            name: "users".to_string(),
            host: "/v1".to_string(),
            before_request: Some(before(log, "before:resource", resource_passes)),
            after_response: Some(after(log, "after:resource")),
            endpoints: vec![EndpointConfig {
                before_request: Some(before(log, "before:endpoint", true)),
                after_response: Some(after(log, "after:endpoint")),
                ..EndpointConfig::new("get", "/users/{id}", HttpMethod::Get)
            }],
            ..ResourceConfig::default()
        }],
        ..ApiConfig::default()
    }
}

#[tokio::test]
async fn test_hooks_run_in_scope_order_around_dispatch() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let transport = RecordingTransport::echo();
    let api = ApiMap::new(
        hooked_config(&log, true),
        Arc::clone(&transport) as Arc<dyn Transport>,
    )
    .unwrap();

    api.resource("users")
        .unwrap()
        .call("get", CallArgs::new())
        .await
        .unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "before:global",
            "before:resource",
            "before:endpoint",
            "after:global",
            "after:resource",
            "after:endpoint",
        ]
    );
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_before_veto_aborts_without_dispatch() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let transport = RecordingTransport::echo();
    let api = ApiMap::new(
        hooked_config(&log, false),
        Arc::clone(&transport) as Arc<dyn Transport>,
    )
    .unwrap();

    let err = api
        .resource("users")
        .unwrap()
        .call("get", CallArgs::new())
        .await
        .unwrap_err();

    match err {
        CallError::Vetoed(veto) => {
            assert_eq!(veto.scope, HookScope::Resource);
            assert!(veto.reason.is_none());
        }
        other => panic!("expected veto, got {other:?}"),
    }

    // the chain stopped at the veto and nothing was dispatched
    assert_eq!(
        *log.lock().unwrap(),
        vec!["before:global", "before:resource"]
    );
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_before_hook_payload_reaches_the_caller() {
    let config = ApiConfig {
        host: "https://api.test".to_string(),
        before_request: Some(BeforeHook::fallible(|_| {
            Err(HookError::new("token expired"))
        })),
        resources: vec![ResourceConfig {
            name: "users".to_string(),
            endpoints: vec![EndpointConfig::new("list", "/users", HttpMethod::Get)],
            ..ResourceConfig::default()
        }],
        ..ApiConfig::default()
    };

    let transport = RecordingTransport::echo();
    let api = ApiMap::new(config, Arc::clone(&transport) as Arc<dyn Transport>).unwrap();

    let err = api
        .resource("users")
        .unwrap()
        .call("list", CallArgs::new())
        .await
        .unwrap_err();

    match err {
        CallError::Vetoed(veto) => {
            assert_eq!(veto.scope, HookScope::Global);
            assert_eq!(veto.reason.unwrap().message, "token expired");
        }
        other => panic!("expected veto, got {other:?}"),
    }
    assert_eq!(transport.call_count(), 0);
}

fn failing_after_config(attempts: &Arc<AtomicUsize>) -> ApiConfig {
    let failing_after = || {
        let attempts = Arc::clone(attempts);
        AfterHook::fallible(move |_, _| {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(HookError::new("audit sink down"))
        })
    };

    ApiConfig {
        host: "https://api.test".to_string(),
        after_response: Some(failing_after()),
        resources: vec![ResourceConfig {
            name: "users".to_string(),
            after_response: Some(failing_after()),
            endpoints: vec![EndpointConfig {
                after_response: Some(failing_after()),
                ..EndpointConfig::new("list", "/users", HttpMethod::Get)
            }],
            ..ResourceConfig::default()
        }],
        ..ApiConfig::default()
    }
}

#[tokio::test]
async fn test_after_hook_failures_cannot_change_a_success() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let transport = RecordingTransport::echo();
    let api = ApiMap::new(
        failing_after_config(&attempts),
        Arc::clone(&transport) as Arc<dyn Transport>,
    )
    .unwrap();

    let response = api
        .resource("users")
        .unwrap()
        .call("list", CallArgs::new())
        .await
        .unwrap();

    // the original response survives and every scope was attempted once
    assert_eq!(response.data, "https://api.test/users");
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_after_hooks_run_and_failure_survives_transport_error() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let transport = RecordingTransport::failing("connection refused");
    let api = ApiMap::new(
        failing_after_config(&attempts),
        Arc::clone(&transport) as Arc<dyn Transport>,
    )
    .unwrap();

    let err = api
        .resource("users")
        .unwrap()
        .call("list", CallArgs::new())
        .await
        .unwrap_err();

    match err {
        CallError::Transport(TransportError::Connection(message)) => {
            assert_eq!(message, "connection refused");
        }
        other => panic!("expected transport error, got {other:?}"),
    }
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_deferred_before_hook_gates_like_a_sync_one() {
    let config = ApiConfig {
        host: "https://api.test".to_string(),
        before_request: Some(BeforeHook::deferred(|request| {
            let authorized = request.headers.contains_key("authorization");
            Box::pin(async move { Ok(authorized) })
        })),
        resources: vec![ResourceConfig {
            name: "users".to_string(),
            endpoints: vec![EndpointConfig::new("list", "/users", HttpMethod::Get)],
            ..ResourceConfig::default()
        }],
        ..ApiConfig::default()
    };

    let transport = RecordingTransport::echo();
    let api = ApiMap::new(config, Arc::clone(&transport) as Arc<dyn Transport>).unwrap();
    let resource = api.resource("users").unwrap();

    let denied = resource.call("list", CallArgs::new()).await;
    assert!(denied.is_err());
    assert_eq!(transport.call_count(), 0);

    let allowed = resource
        .call("list", CallArgs::new().header("authorization", "Bearer t"))
        .await;
    assert!(allowed.is_ok());
    assert_eq!(transport.call_count(), 1);
}
