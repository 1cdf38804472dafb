use rest_client::{HttpRequest, HttpTransport};
use std::sync::Arc;

use super::RestService;
use crate::types::ApiDescriptor;
use crate::{ApiError, Result};

/// Client of the gateway root resource
pub struct GatewayRest {
    uri: String,
    transport: Arc<dyn HttpTransport>,
}

impl GatewayRest {
    /// Fetch the API descriptor
    ///
    /// Unlike the other wrappers, a non-success status is an error: without
    /// a descriptor nothing else can be reached.
    pub async fn get(&self) -> Result<ApiDescriptor> {
        let response = self.transport.send(HttpRequest::get(&self.uri)).await?;
        if !response.is_success() {
            return Err(ApiError::HttpStatus(response.status));
        }
        Ok(response.json()?)
    }
}

impl RestService for GatewayRest {
    fn new(uri: String, transport: Arc<dyn HttpTransport>) -> Self {
        Self { uri, transport }
    }

    fn uri(&self) -> &str {
        &self.uri
    }
}
