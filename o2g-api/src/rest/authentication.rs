use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rest_client::{HttpRequest, HttpTransport};
use std::sync::Arc;

use super::{get_result, RestService};
use crate::types::AuthenticateResult;
use crate::Result;

/// Client of the authentication service
pub struct AuthenticationRest {
    uri: String,
    transport: Arc<dyn HttpTransport>,
}

impl AuthenticationRest {
    /// Authenticate with basic credentials.
    ///
    /// On success the returned credential is attached to every later request
    /// of the shared transport. Rejected credentials yield `Ok(None)`.
    pub async fn authenticate(&self, login: &str, password: &str) -> Result<Option<AuthenticateResult>> {
        let token = STANDARD.encode(format!("{login}:{password}"));
        let request = HttpRequest::get(&self.uri).with_header("Authorization", format!("Basic {token}"));

        let response = self.transport.send(request).await?;
        let result: Option<AuthenticateResult> = get_result(&response)?;

        if let Some(result) = &result {
            self.transport.set_credential(Some(result.credential.clone()));
        }
        Ok(result)
    }
}

impl RestService for AuthenticationRest {
    fn new(uri: String, transport: Arc<dyn HttpTransport>) -> Self {
        Self { uri, transport }
    }

    fn uri(&self) -> &str {
        &self.uri
    }
}
