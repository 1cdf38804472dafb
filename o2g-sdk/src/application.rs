//! Application - Main entry point for the SDK

use std::sync::Arc;

use o2g_api::ServiceId;
use rest_client::{uri, HttpTransport, ReqwestTransport};
use tracing::debug;

use crate::config::SdkConfig;
use crate::endpoint::{require, ServiceEndPoint};
use crate::error::{SdkError, SdkResult};
use crate::host::HostDescriptor;
use crate::registry::ServiceRegistry;
use crate::resolver;
use crate::session::Session;

/// An application connecting to one gateway
///
/// # Example
///
/// ```rust,no_run
/// use o2g_sdk::{Application, HostDescriptor, SdkConfig, Subscription};
///
/// #[tokio::main]
/// async fn main() -> Result<(), o2g_sdk::SdkError> {
///     let host = HostDescriptor::new("10.1.1.1", "o2g.example.com");
///     let application = Application::new("my-app", host, SdkConfig::default())?;
///
///     let mut session = application.login("oxe1000", "secret").await?;
///
///     let subscription = Subscription::builder()
///         .add_telephony_events(&["60001"])
///         .build();
///     let mut events = session.subscribe(&subscription).await?;
///
///     while let Some(notification) = events.recv().await {
///         println!("{}: {:?}", notification.name, notification.payload);
///     }
///
///     session.close().await
/// }
/// ```
pub struct Application {
    application_name: String,
    host: HostDescriptor,
    config: SdkConfig,
    transport: Arc<dyn HttpTransport>,
}

impl Application {
    /// Create an application using the default HTTP transport
    pub fn new(
        application_name: impl Into<String>,
        host: HostDescriptor,
        config: SdkConfig,
    ) -> SdkResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::with_timeouts(config.connect_timeout, config.request_timeout)
            .map_err(|e| SdkError::Configuration(e.to_string()))?;

        Self::with_transport(application_name, host, config, Arc::new(transport))
    }

    /// Create an application on a caller-provided transport
    pub fn with_transport(
        application_name: impl Into<String>,
        host: HostDescriptor,
        config: SdkConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> SdkResult<Self> {
        config.validate()?;
        let application_name = application_name.into();
        require("applicationName", &application_name)?;

        Ok(Self {
            application_name,
            host,
            config,
            transport,
        })
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    pub fn host(&self) -> &HostDescriptor {
        &self.host
    }

    /// Bootstrap on the gateway and negotiate the API version
    pub async fn connect(&self) -> SdkResult<ServiceEndPoint> {
        self.host.validate()?;

        let registry = Arc::new(ServiceRegistry::new(self.transport.clone()));
        let (descriptor, access_mode) = resolver::bootstrap(&registry, &self.host).await?;

        let version = resolver::negotiate_version(&descriptor, self.config.api_version.as_deref())?.clone();
        debug!("Using API version {}", version.id);

        registry.set_base_uri(
            ServiceId::Authentication,
            uri::ensure_https(version.url(access_mode)),
        );

        Ok(ServiceEndPoint::new(
            registry,
            access_mode,
            descriptor.server_info,
            version,
            self.config.clone(),
        ))
    }

    /// Connect and open a session in one step
    pub async fn login(&self, login: &str, password: &str) -> SdkResult<Session> {
        require("login", login)?;
        require("password", password)?;

        let endpoint = self.connect().await?;
        endpoint
            .open_session(login, password, &self.application_name)
            .await
    }
}
