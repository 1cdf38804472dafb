//! An open session on the gateway

use std::sync::Arc;
use std::time::Duration;

use o2g_api::{
    AccessMode, RestService, ServerInfo, ServiceId, SessionInfo, SessionsRest, Subscription,
    SubscriptionsRest,
};
use o2g_stream::{EventDispatcher, NotificationReceiver, StreamConfig};
use tracing::{debug, error, info, warn};

use crate::error::{SdkError, SdkResult};
use crate::keepalive::KeepAlive;
use crate::registry::ServiceRegistry;

/// Handle on an open session
///
/// The session is kept alive in the background until [`Session::close`] is
/// called or the handle is dropped. Dropping the handle stops the keep-alive
/// and the event stream but does not tell the gateway; the session then
/// expires on its own.
pub struct Session {
    registry: Arc<ServiceRegistry>,
    info: SessionInfo,
    login_name: String,
    access_mode: AccessMode,
    server_info: ServerInfo,
    stream_config: StreamConfig,
    keep_alive: KeepAlive,
    dispatcher: Option<EventDispatcher>,
    subscription_id: Option<String>,
}

impl Session {
    pub(crate) fn start(
        registry: Arc<ServiceRegistry>,
        sessions: Arc<SessionsRest>,
        info: SessionInfo,
        login_name: String,
        access_mode: AccessMode,
        server_info: ServerInfo,
        stream_config: StreamConfig,
    ) -> Self {
        let keep_alive = KeepAlive::start(sessions, info.time_to_live());

        Self {
            registry,
            info,
            login_name,
            access_mode,
            server_info,
            stream_config,
            keep_alive,
            dispatcher: None,
            subscription_id: None,
        }
    }

    pub fn login_name(&self) -> &str {
        &self.login_name
    }

    pub fn is_admin(&self) -> bool {
        self.info.admin
    }

    pub fn time_to_live(&self) -> Duration {
        self.info.time_to_live()
    }

    pub fn access_mode(&self) -> AccessMode {
        self.access_mode
    }

    pub fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    /// Identifier of the accepted subscription, once subscribed
    pub fn subscription_id(&self) -> Option<&str> {
        self.subscription_id.as_deref()
    }

    /// Base URI of a service, as registered for this session
    pub fn service_uri(&self, id: ServiceId) -> Option<String> {
        self.registry.base_uri(id)
    }

    /// Client of a domain service. The same instance is returned on every
    /// call for the life of the session.
    pub fn service<T: RestService>(&self, id: ServiceId) -> SdkResult<Arc<T>> {
        self.registry
            .get_or_create::<T>(id)
            .ok_or(SdkError::ServiceUnavailable(id))
    }

    /// Submit a subscription and start receiving its events.
    ///
    /// The returned receiver sees every notification of the new stream. Any
    /// previous event stream of this session is closed.
    pub async fn subscribe(&mut self, subscription: &Subscription) -> SdkResult<NotificationReceiver> {
        let subscriptions = self.service::<SubscriptionsRest>(ServiceId::Subscriptions)?;

        let result = match subscriptions.create(subscription).await? {
            Some(result) if result.is_accepted() => result,
            Some(result) => {
                error!("Subscription has been refused ({}). Fix the subscription request.", result.status);
                return Err(SdkError::SubscriptionRefused(match result.message {
                    Some(message) => format!("{}: {}", result.status, message),
                    None => result.status,
                }));
            }
            None => {
                error!("Subscription has been refused. Fix the subscription request.");
                return Err(SdkError::SubscriptionRefused("no result".to_string()));
            }
        };

        debug!("Subscription {} has been accepted", result.subscription_id);

        if let Some(previous) = self.dispatcher.take() {
            previous.close();
        }

        let dispatcher = EventDispatcher::new(self.registry.transport(), &self.stream_config)?;
        let receiver = dispatcher.subscribe();
        dispatcher.start(result.polling_url(self.access_mode)).await?;

        info!("Eventing is started");
        self.subscription_id = Some(result.subscription_id);
        self.dispatcher = Some(dispatcher);
        Ok(receiver)
    }

    /// Additional listener on the current event stream
    pub fn notifications(&self) -> Option<NotificationReceiver> {
        self.dispatcher.as_ref().map(EventDispatcher::subscribe)
    }

    /// Stop the keep-alive and the event stream, then close the session on
    /// the gateway.
    pub async fn close(mut self) -> SdkResult<()> {
        self.keep_alive.stop();

        if let Some(dispatcher) = self.dispatcher.take() {
            dispatcher.close();
        }

        let sessions = self.service::<SessionsRest>(ServiceId::Sessions)?;
        if !sessions.close().await? {
            warn!("Gateway refused to close the session of {}", self.login_name);
        }

        info!("Session is closed");
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("login_name", &self.login_name)
            .field("access_mode", &self.access_mode)
            .field("admin", &self.info.admin)
            .field("subscription_id", &self.subscription_id)
            .field("keep_alive", &self.keep_alive.is_running())
            .finish()
    }
}
