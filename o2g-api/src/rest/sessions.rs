use rest_client::{uri, HttpRequest, HttpTransport};
use serde::Serialize;
use std::sync::Arc;

use super::{get_result, RestService};
use crate::types::SessionInfo;
use crate::Result;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionRequest<'a> {
    application_name: &'a str,
}

/// Client of the session service
pub struct SessionsRest {
    uri: String,
    transport: Arc<dyn HttpTransport>,
}

impl SessionsRest {
    /// Open a session for `application_name`; `Ok(None)` when refused
    pub async fn open(&self, application_name: &str) -> Result<Option<SessionInfo>> {
        let request = HttpRequest::post(&self.uri).with_json(&SessionRequest { application_name })?;
        let response = self.transport.send(request).await?;
        get_result(&response)
    }

    /// Extend the session lease. Returns whether the gateway accepted it.
    pub async fn keep_alive(&self) -> Result<bool> {
        let request = HttpRequest::post(uri::append_path(&self.uri, &["keepalive"]));
        let response = self.transport.send(request).await?;
        Ok(response.is_success())
    }

    /// Close the session. Returns whether the gateway accepted it.
    pub async fn close(&self) -> Result<bool> {
        let response = self.transport.send(HttpRequest::delete(&self.uri)).await?;
        Ok(response.is_success())
    }
}

impl RestService for SessionsRest {
    fn new(uri: String, transport: Arc<dyn HttpTransport>) -> Self {
        Self { uri, transport }
    }

    fn uri(&self) -> &str {
        &self.uri
    }
}
