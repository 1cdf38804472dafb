//! Session lifecycle: login, services, keep-alive, subscription and close


use std::sync::Arc;
use std::time::Duration;

use o2g_sdk::routing::Destination;
use o2g_sdk::{
    AccessMode, EventName, EventPayload, HostDescriptor, HttpTransport, RestService, SdkError,
    ServiceId, Subscription,
};
use rest_client::HttpMethod;
use rstest::rstest;
use serde_json::{json, Value};
use test_helpers::*;

/// Stand-in for a domain service client
struct TelephonyClient {
    uri: String,
}

impl RestService for TelephonyClient {
    fn new(uri: String, _transport: Arc<dyn HttpTransport>) -> Self {
        Self { uri }
    }

    fn uri(&self) -> &str {
        &self.uri
    }
}

fn private_gateway(time_to_live: u64) -> Gateway {
    let gateway = Gateway::new();
    gateway.serve_descriptor(PRIVATE).serve_login(PRIVATE, time_to_live);
    gateway
}

#[tokio::test]
async fn test_login_registers_session_services() {
    let gateway = private_gateway(60_000);

    let session = gateway
        .application(HostDescriptor::new(PRIVATE, PUBLIC))
        .login("oxe1000", "secret")
        .await
        .unwrap();

    assert_eq!(session.login_name(), "oxe1000");
    assert_eq!(session.access_mode(), AccessMode::Private);
    assert_eq!(session.time_to_live(), Duration::from_secs(60));
    assert!(!session.is_admin());
    assert_eq!(gateway.mock.credential().as_deref(), Some("credential-1"));

    assert_eq!(
        session.service_uri(ServiceId::Sessions),
        Some(sessions_uri(PRIVATE))
    );
    assert_eq!(
        session.service_uri(ServiceId::Telephony),
        Some(format!("{}/telephony", base_url(PRIVATE)))
    );
    assert_eq!(
        session.service_uri(ServiceId::Routing),
        Some(format!("{}/routing", base_url(PRIVATE)))
    );
    assert_eq!(session.service_uri(ServiceId::Directory), None);

    let body: serde_json::Value = serde_json::from_str(
        gateway
            .mock
            .requests()
            .iter()
            .find(|r| r.method == HttpMethod::Post && r.uri == sessions_uri(PRIVATE))
            .and_then(|r| r.body.as_deref())
            .unwrap(),
    )
    .unwrap();
    assert_eq!(body["applicationName"], APPLICATION);
}

#[tokio::test]
async fn test_service_clients_are_shared() {
    let gateway = private_gateway(60_000);
    let session = gateway
        .application(HostDescriptor::private_only(PRIVATE))
        .login("oxe1000", "secret")
        .await
        .unwrap();

    let first = session.service::<TelephonyClient>(ServiceId::Telephony).unwrap();
    let second = session.service::<TelephonyClient>(ServiceId::Telephony).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.uri(), format!("{}/telephony", base_url(PRIVATE)));
    assert!(matches!(
        session.service::<TelephonyClient>(ServiceId::Directory),
        Err(SdkError::ServiceUnavailable(ServiceId::Directory))
    ));
}

#[tokio::test]
async fn test_authentication_rejected() {
    let gateway = Gateway::new();
    gateway.serve_descriptor(PRIVATE);
    gateway.mock.respond(HttpMethod::Get, &auth_uri(PRIVATE), 401, "");

    let result = gateway
        .application(HostDescriptor::private_only(PRIVATE))
        .login("oxe1000", "wrong")
        .await;

    assert!(matches!(result, Err(SdkError::AuthenticationFailed(login)) if login == "oxe1000"));
    assert_eq!(gateway.count(HttpMethod::Post, &sessions_uri(PRIVATE)), 0);
}

#[tokio::test]
async fn test_open_session_failure_closes_half_open_session() {
    let gateway = Gateway::new();
    gateway.serve_descriptor(PRIVATE).serve_authentication(PRIVATE);
    gateway.mock.respond(HttpMethod::Post, &sessions_uri(PRIVATE), 500, "");
    gateway.mock.respond(HttpMethod::Delete, &sessions_uri(PRIVATE), 204, "");

    let result = gateway
        .application(HostDescriptor::private_only(PRIVATE))
        .login("oxe1000", "secret")
        .await;

    assert!(matches!(result, Err(SdkError::OpenSessionFailed)));
    assert_eq!(gateway.count(HttpMethod::Delete, &sessions_uri(PRIVATE)), 1);
}

#[rstest]
#[case::missing_time_to_live(json!({ "admin": false }))]
#[case::zero_time_to_live(session_info(0))]
#[case::not_an_object(json!([]))]
#[tokio::test(start_paused = true)]
async fn test_unusable_session_payload_closes_half_open_session(#[case] payload: Value) {
    let gateway = Gateway::new();
    gateway.serve_descriptor(PRIVATE).serve_authentication(PRIVATE);
    gateway.mock.respond_json(HttpMethod::Post, &sessions_uri(PRIVATE), 200, &payload);
    gateway.mock.respond(HttpMethod::Post, &keepalive_uri(PRIVATE), 204, "");
    gateway.mock.respond(HttpMethod::Delete, &sessions_uri(PRIVATE), 204, "");

    let result = gateway
        .application(HostDescriptor::private_only(PRIVATE))
        .login("oxe1000", "secret")
        .await;

    assert!(matches!(result, Err(SdkError::OpenSessionFailed)));
    assert_eq!(gateway.count(HttpMethod::Delete, &sessions_uri(PRIVATE)), 1);

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(gateway.count(HttpMethod::Post, &keepalive_uri(PRIVATE)), 0);
}

#[tokio::test(start_paused = true)]
async fn test_keep_alive_every_time_to_live() {
    let gateway = private_gateway(5000);
    let session = gateway
        .application(HostDescriptor::private_only(PRIVATE))
        .login("oxe1000", "secret")
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(4990)).await;
    assert_eq!(gateway.count(HttpMethod::Post, &keepalive_uri(PRIVATE)), 0);

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(gateway.count(HttpMethod::Post, &keepalive_uri(PRIVATE)), 1);

    tokio::time::sleep(Duration::from_millis(5000)).await;
    assert_eq!(gateway.count(HttpMethod::Post, &keepalive_uri(PRIVATE)), 2);

    session.close().await.unwrap();
    tokio::time::sleep(Duration::from_millis(20_000)).await;
    assert_eq!(gateway.count(HttpMethod::Post, &keepalive_uri(PRIVATE)), 2);
}

#[tokio::test(start_paused = true)]
async fn test_close_before_first_keep_alive() {
    let gateway = private_gateway(5000);
    let session = gateway
        .application(HostDescriptor::private_only(PRIVATE))
        .login("oxe1000", "secret")
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(1000)).await;
    session.close().await.unwrap();

    tokio::time::sleep(Duration::from_millis(30_000)).await;
    assert_eq!(gateway.count(HttpMethod::Post, &keepalive_uri(PRIVATE)), 0);
    assert_eq!(gateway.count(HttpMethod::Delete, &sessions_uri(PRIVATE)), 1);
}

#[tokio::test]
async fn test_subscribe_and_receive_events() {
    let gateway = private_gateway(60_000);
    gateway.serve_subscription(PRIVATE, "ACCEPTED");
    gateway.mock.stream_open(
        &polling_uri(PRIVATE),
        &[
            "{\"eventName\":\"OnCallCreated\",\"loginName\":\"oxe1000\",\"callRef\":\"1\"}\n{\"eventName\":\"OnRouting",
            "StateChanged\",\"loginName\":\"oxe1000\",\"routingState\":{\"forwardRoutes\":[{\"destinations\":[{\"type\":\"VOICEMAIL\"}]}]}}\n",
            "{\"eventName\":\"OnCallRemoved\",\"loginName\":\"oxe1000\"}",
        ],
    );

    let mut session = gateway
        .application(HostDescriptor::private_only(PRIVATE))
        .login("oxe1000", "secret")
        .await
        .unwrap();

    let subscription = Subscription::builder()
        .add_telephony_events(&["oxe1000"])
        .add_telephony_events(&["oxe1001"])
        .add_routing_events(&[])
        .build();
    let mut events = session.subscribe(&subscription).await.unwrap();
    assert_eq!(session.subscription_id(), Some("sub-1"));

    let first = events.recv().await.unwrap();
    assert_eq!(first.event, EventName::OnCallCreated);
    assert_eq!(first.raw().unwrap()["callRef"], "1");

    let second = events.recv().await.unwrap();
    match second.payload {
        EventPayload::RoutingStateChanged(changed) => {
            assert_eq!(changed.routing_state.forward.destination, Destination::Voicemail);
        }
        other => panic!("unexpected payload {other:?}"),
    }

    // The last record has no newline yet.
    assert!(events.try_recv().is_none());

    let body: serde_json::Value = serde_json::from_str(
        gateway
            .mock
            .requests()
            .iter()
            .find(|r| r.uri == subscriptions_uri(PRIVATE))
            .and_then(|r| r.body.as_deref())
            .unwrap(),
    )
    .unwrap();
    let selectors = body["filter"]["selectors"].as_array().unwrap();
    assert_eq!(selectors.len(), 3);
    assert_eq!(selectors[0]["ids"], serde_json::json!(["oxe1000"]));
    assert_eq!(selectors[1]["ids"], serde_json::json!(["oxe1001"]));
    assert!(selectors[2].get("ids").is_none());

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_public_session_uses_public_urls() {
    let gateway = Gateway::new();
    gateway
        .unreachable(PRIVATE)
        .serve_descriptor(PUBLIC)
        .serve_login(PUBLIC, 60_000)
        .serve_subscription(PUBLIC, "ACCEPTED");
    gateway.mock.stream_open(&polling_uri(PUBLIC), &["{\"eventName\":\"OnCtiLinkUp\"}\n"]);

    let mut session = gateway
        .application(HostDescriptor::new(PRIVATE, PUBLIC))
        .login("oxe1000", "secret")
        .await
        .unwrap();
    assert_eq!(session.access_mode(), AccessMode::Public);
    assert_eq!(
        session.service_uri(ServiceId::Subscriptions),
        Some(subscriptions_uri(PUBLIC))
    );

    let subscription = Subscription::builder().add_maintenance_events().build();
    let mut events = session.subscribe(&subscription).await.unwrap();
    let mut extra = session.notifications().unwrap();

    assert_eq!(events.recv().await.unwrap().event, EventName::OnCtiLinkUp);
    assert_eq!(gateway.count(HttpMethod::Get, &polling_uri(PUBLIC)), 1);
    assert_eq!(gateway.count(HttpMethod::Get, &polling_uri(PRIVATE)), 0);

    session.close().await.unwrap();
    while extra.recv().await.is_some() {}
    assert_eq!(gateway.count(HttpMethod::Delete, &sessions_uri(PUBLIC)), 1);
}

#[tokio::test]
async fn test_subscription_refused() {
    let gateway = private_gateway(60_000);
    gateway.serve_subscription(PRIVATE, "REFUSED");

    let mut session = gateway
        .application(HostDescriptor::private_only(PRIVATE))
        .login("oxe1000", "secret")
        .await
        .unwrap();

    let subscription = Subscription::builder().add_telephony_events(&[]).build();
    let result = session.subscribe(&subscription).await;

    assert!(matches!(result, Err(SdkError::SubscriptionRefused(status)) if status == "REFUSED"));
    assert_eq!(session.subscription_id(), None);
    assert!(session.notifications().is_none());
    assert_eq!(gateway.count(HttpMethod::Get, &polling_uri(PRIVATE)), 0);
}

#[tokio::test]
async fn test_subscription_without_result() {
    let gateway = private_gateway(60_000);
    gateway
        .mock
        .respond(HttpMethod::Post, &subscriptions_uri(PRIVATE), 400, "");

    let mut session = gateway
        .application(HostDescriptor::private_only(PRIVATE))
        .login("oxe1000", "secret")
        .await
        .unwrap();

    let result = session.subscribe(&Subscription::builder().build()).await;
    assert!(matches!(result, Err(SdkError::SubscriptionRefused(_))));
}
