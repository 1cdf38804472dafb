//! Bootstrap, version negotiation and argument validation


use o2g_sdk::{AccessMode, HostDescriptor, SdkConfig, SdkError, ServiceId};
use rest_client::HttpMethod;
use test_helpers::*;

#[tokio::test]
async fn test_private_address_is_preferred() {
    let gateway = Gateway::new();
    gateway.serve_descriptor(PRIVATE).serve_descriptor(PUBLIC);

    let endpoint = gateway
        .application(HostDescriptor::new(PRIVATE, PUBLIC))
        .connect()
        .await
        .unwrap();

    assert_eq!(endpoint.access_mode(), AccessMode::Private);
    assert_eq!(endpoint.api_version().id, "1.0");
    assert_eq!(endpoint.server_info().product_name, "O2G Server");
    assert_eq!(gateway.count(HttpMethod::Get, &root(PUBLIC)), 0);
}

#[tokio::test]
async fn test_fallback_to_public_address() {
    let gateway = Gateway::new();
    gateway.unreachable(PRIVATE).serve_descriptor(PUBLIC);

    let endpoint = gateway
        .application(HostDescriptor::new(PRIVATE, PUBLIC))
        .connect()
        .await
        .unwrap();

    assert_eq!(endpoint.access_mode(), AccessMode::Public);
    assert_eq!(gateway.count(HttpMethod::Get, &root(PRIVATE)), 1);
    assert_eq!(gateway.count(HttpMethod::Get, &root(PUBLIC)), 1);
}

#[tokio::test]
async fn test_fallback_on_error_status() {
    let gateway = Gateway::new();
    gateway.mock.respond(HttpMethod::Get, &root(PRIVATE), 503, "");
    gateway.serve_descriptor(PUBLIC);

    let endpoint = gateway
        .application(HostDescriptor::new(PRIVATE, PUBLIC))
        .connect()
        .await
        .unwrap();

    assert_eq!(endpoint.access_mode(), AccessMode::Public);
}

#[tokio::test]
async fn test_private_only_failure_does_not_try_public() {
    let gateway = Gateway::new();
    gateway.unreachable(PRIVATE).serve_descriptor(PUBLIC);

    let result = gateway
        .application(HostDescriptor::private_only(PRIVATE))
        .connect()
        .await;

    assert!(matches!(result, Err(SdkError::Unreachable(hosts)) if hosts == "[10.1.1.1]"));
    assert_eq!(gateway.mock.requests().len(), 1);
    assert_eq!(gateway.count(HttpMethod::Get, &root(PUBLIC)), 0);
}

#[tokio::test]
async fn test_public_only_failure() {
    let gateway = Gateway::new();
    gateway.unreachable(PUBLIC);

    let result = gateway
        .application(HostDescriptor::public_only(PUBLIC))
        .connect()
        .await;

    assert!(matches!(result, Err(SdkError::Unreachable(_))));
    assert_eq!(gateway.mock.requests().len(), 1);
}

#[tokio::test]
async fn test_both_addresses_unreachable() {
    let gateway = Gateway::new();
    gateway.unreachable(PRIVATE).unreachable(PUBLIC);

    let result = gateway
        .application(HostDescriptor::new(PRIVATE, PUBLIC))
        .login("oxe1000", "secret")
        .await;

    assert!(
        matches!(result, Err(SdkError::Unreachable(hosts)) if hosts == "[10.1.1.1, o2g.example.com]")
    );
    assert_eq!(gateway.mock.requests().len(), 2);
}

#[tokio::test]
async fn test_pinned_version() {
    let gateway = Gateway::new();
    gateway.serve_descriptor(PRIVATE);

    let endpoint = gateway
        .application_with(
            HostDescriptor::private_only(PRIVATE),
            SdkConfig::new().with_api_version("0.9"),
        )
        .connect()
        .await
        .unwrap();

    assert_eq!(endpoint.api_version().id, "0.9");
}

#[tokio::test]
async fn test_unsupported_pinned_version() {
    let gateway = Gateway::new();
    gateway.serve_descriptor(PRIVATE).serve_login(PRIVATE, 60_000);

    let result = gateway
        .application_with(
            HostDescriptor::private_only(PRIVATE),
            SdkConfig::new().with_api_version("3.0"),
        )
        .login("oxe1000", "secret")
        .await;

    assert!(matches!(result, Err(SdkError::UnsupportedVersion(v)) if v == "3.0"));
    assert_eq!(gateway.count(HttpMethod::Get, &auth_uri(PRIVATE)), 0);
}

#[tokio::test]
async fn test_empty_host_is_rejected_before_any_request() {
    let gateway = Gateway::new();

    let result = gateway
        .application(HostDescriptor::new("", " "))
        .connect()
        .await;

    assert!(matches!(result, Err(SdkError::InvalidArgument(_))));
    assert!(gateway.mock.requests().is_empty());
}

#[tokio::test]
async fn test_empty_credentials_are_rejected_before_any_request() {
    let gateway = Gateway::new();
    gateway.serve_descriptor(PRIVATE).serve_login(PRIVATE, 60_000);
    let application = gateway.application(HostDescriptor::private_only(PRIVATE));

    assert!(matches!(
        application.login("", "secret").await,
        Err(SdkError::InvalidArgument(_))
    ));
    assert!(matches!(
        application.login("oxe1000", "").await,
        Err(SdkError::InvalidArgument(_))
    ));
    assert!(gateway.mock.requests().is_empty());

    let endpoint = application.connect().await.unwrap();
    let before = gateway.mock.requests().len();
    assert!(matches!(
        endpoint.open_session("oxe1000", "secret", "").await,
        Err(SdkError::InvalidArgument(_))
    ));
    assert_eq!(gateway.mock.requests().len(), before);
}

#[test]
fn test_empty_application_name_is_rejected() {
    let gateway = Gateway::new();
    let transport: std::sync::Arc<dyn rest_client::HttpTransport> = gateway.mock.clone();

    let result = o2g_sdk::Application::with_transport(
        "",
        HostDescriptor::private_only(PRIVATE),
        SdkConfig::default(),
        transport,
    );
    assert!(matches!(result, Err(SdkError::InvalidArgument(_))));
}

#[tokio::test]
async fn test_authentication_uri_follows_access_mode() {
    let gateway = Gateway::new();
    gateway
        .unreachable(PRIVATE)
        .serve_descriptor(PUBLIC)
        .serve_login(PUBLIC, 60_000);

    let session = gateway
        .application(HostDescriptor::new(PRIVATE, PUBLIC))
        .login("oxe1000", "secret")
        .await
        .unwrap();

    assert_eq!(gateway.count(HttpMethod::Get, &auth_uri(PUBLIC)), 1);
    assert_eq!(
        session.service_uri(ServiceId::Authentication).as_deref(),
        Some(auth_uri(PUBLIC).as_str())
    );
}
