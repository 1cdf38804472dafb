//! Typed wrappers for the remote operations the session core relies on
//!
//! Each wrapper is bound to one service URI and shares the transport of the
//! session. Building a wrapper never performs I/O.

mod authentication;
mod gateway;
mod sessions;
mod subscriptions;

pub use authentication::AuthenticationRest;
pub use gateway::GatewayRest;
pub use sessions::SessionsRest;
pub use subscriptions::SubscriptionsRest;

use rest_client::{HttpResponse, HttpTransport};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::Result;

/// A client of one gateway service
///
/// Domain service wrappers (telephony, routing, users...) implement this trait
/// so the service registry can construct and cache them.
pub trait RestService: Send + Sync + 'static {
    /// Bind a client to `uri`. Must not perform I/O.
    fn new(uri: String, transport: Arc<dyn HttpTransport>) -> Self
    where
        Self: Sized;

    /// Base URI of the service
    fn uri(&self) -> &str;
}

/// Decode a response body, treating a non-success status as no result
pub(crate) fn get_result<T: DeserializeOwned>(response: &HttpResponse) -> Result<Option<T>> {
    if !response.is_success() {
        tracing::debug!("Gateway answered with status {}", response.status);
        return Ok(None);
    }
    Ok(Some(response.json()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiError;
    use serde_json::Value;

    #[test]
    fn test_get_result_success() {
        let response = HttpResponse::new(200, r#"{"a":1}"#);
        let value: Option<Value> = get_result(&response).unwrap();
        assert_eq!(value.unwrap()["a"], 1);
    }

    #[test]
    fn test_get_result_non_success_is_none() {
        let response = HttpResponse::new(403, "forbidden");
        let value: Option<Value> = get_result(&response).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_get_result_bad_body() {
        let response = HttpResponse::new(200, "not json");
        let result: Result<Option<Value>> = get_result(&response);
        assert!(matches!(result, Err(ApiError::ParseError(_))));
    }
}
