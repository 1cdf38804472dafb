use std::sync::Arc;

use o2g_api::{
    AccessMode, ApiError, AuthenticationRest, ServerInfo, ServiceId, SessionsRest, Version,
};
use rest_client::uri;
use tracing::{debug, info, warn};

use crate::config::SdkConfig;
use crate::error::{SdkError, SdkResult};
use crate::registry::ServiceRegistry;
use crate::session::Session;

/// A gateway that answered the bootstrap, ready to open sessions
pub struct ServiceEndPoint {
    registry: Arc<ServiceRegistry>,
    access_mode: AccessMode,
    server_info: ServerInfo,
    version: Version,
    config: SdkConfig,
}

impl ServiceEndPoint {
    pub(crate) fn new(
        registry: Arc<ServiceRegistry>,
        access_mode: AccessMode,
        server_info: ServerInfo,
        version: Version,
        config: SdkConfig,
    ) -> Self {
        Self {
            registry,
            access_mode,
            server_info,
            version,
            config,
        }
    }

    pub fn access_mode(&self) -> AccessMode {
        self.access_mode
    }

    pub fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    /// Negotiated API version
    pub fn api_version(&self) -> &Version {
        &self.version
    }

    /// Authenticate and open a session.
    ///
    /// If the gateway does not return a session, the half-open session is
    /// closed before failing.
    pub async fn open_session(
        &self,
        login: &str,
        password: &str,
        application_name: &str,
    ) -> SdkResult<Session> {
        require("login", login)?;
        require("password", password)?;
        require("applicationName", application_name)?;

        debug!("Authenticate user {}", login);
        let authentication = self
            .registry
            .get_or_create::<AuthenticationRest>(ServiceId::Authentication)
            .ok_or(SdkError::ServiceUnavailable(ServiceId::Authentication))?;

        let authenticated = authentication
            .authenticate(login, password)
            .await?
            .ok_or_else(|| SdkError::AuthenticationFailed(login.to_string()))?;
        info!("Authentication done");

        self.registry.set_base_uri(
            ServiceId::Sessions,
            uri::ensure_https(authenticated.url(self.access_mode)),
        );
        let sessions = self
            .registry
            .get_or_create::<SessionsRest>(ServiceId::Sessions)
            .ok_or(SdkError::ServiceUnavailable(ServiceId::Sessions))?;

        debug!("Open session for {}", application_name);
        let info = match sessions.open(application_name).await {
            Ok(Some(info)) if info.time_to_live > 0 => info,
            Ok(Some(info)) => {
                warn!("Session opened with an invalid time to live ({} ms)", info.time_to_live);
                return Err(Self::abort_session(&sessions).await);
            }
            Ok(None) => return Err(Self::abort_session(&sessions).await),
            Err(ApiError::ParseError(e)) => {
                warn!("Malformed session payload: {}", e);
                return Err(Self::abort_session(&sessions).await);
            }
            Err(e) => return Err(e.into()),
        };

        debug!("Session opened: time to live = {} ms", info.time_to_live);
        self.registry
            .register_from_session_services(&info, self.access_mode);

        Ok(Session::start(
            self.registry.clone(),
            sessions,
            info,
            login.to_string(),
            self.access_mode,
            self.server_info.clone(),
            self.config.stream_config(),
        ))
    }

    /// Close a half-open session before failing
    async fn abort_session(sessions: &SessionsRest) -> SdkError {
        if let Err(e) = sessions.close().await {
            warn!("Unable to close the half-open session: {}", e);
        }
        SdkError::OpenSessionFailed
    }
}

/// Fail with an invalid argument error if `value` is empty
pub(crate) fn require(name: &str, value: &str) -> SdkResult<()> {
    if value.trim().is_empty() {
        return Err(SdkError::InvalidArgument(format!("{name} must not be empty")));
    }
    Ok(())
}
