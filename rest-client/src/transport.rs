//! Transport abstraction and its reqwest-backed implementation.

use std::fmt;
use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{RestError, Result};

/// Name of the cookie carrying the session credential.
pub const CREDENTIAL_COOKIE: &str = "AlcUserId";

/// Body of a long-lived response, delivered chunk by chunk in arrival order.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// HTTP verbs used against the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Get the verb as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A request to perform against the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub uri: String,
    /// JSON text sent as the request body
    pub body: Option<String>,
    /// Extra headers, in addition to the ones the transport always sets
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(uri: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, uri)
    }

    pub fn post(uri: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, uri)
    }

    pub fn put(uri: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, uri)
    }

    pub fn delete(uri: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, uri)
    }

    /// Serialize `value` as the JSON body of this request
    pub fn with_json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.body = Some(serde_json::to_string(value)?);
        Ok(self)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Status and body returned by the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(RestError::from)
    }
}

/// The capability the SDK core needs from the network.
///
/// Implementations attach the session credential (once set) to every request.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform a request and return its status and full body.
    ///
    /// A non-success status is not an error at this level; only failing to
    /// obtain a response at all is.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Open a request whose body is delivered incrementally.
    ///
    /// Fails with [`RestError::Status`] when the gateway refuses the request.
    async fn open_stream(&self, request: HttpRequest) -> Result<ByteStream>;

    /// Set or reset the credential attached to later requests.
    fn set_credential(&self, credential: Option<String>);
}

/// HTTP transport backed by `reqwest`
pub struct ReqwestTransport {
    client: reqwest::Client,
    /// Same connection settings, without the overall request timeout:
    /// event streams stay open indefinitely.
    stream_client: reqwest::Client,
    credential: RwLock<Option<String>>,
}

impl ReqwestTransport {
    /// Create a transport with default timeouts (5s connect, 30s request)
    pub fn new() -> Result<Self> {
        Self::with_timeouts(Duration::from_secs(5), Duration::from_secs(30))
    }

    pub fn with_timeouts(connect_timeout: Duration, request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| RestError::Network(format!("Failed to create HTTP client: {e}")))?;

        let stream_client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| RestError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            stream_client,
            credential: RwLock::new(None),
        })
    }

    fn build(&self, client: &reqwest::Client, request: HttpRequest) -> Result<reqwest::RequestBuilder> {
        let url = url::Url::parse(&request.uri).map_err(|e| RestError::InvalidUri(format!("{}: {e}", request.uri)))?;

        let mut builder = client.request(request.method.into(), url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(credential) = self.credential.read().as_deref() {
            builder = builder.header(reqwest::header::COOKIE, format!("{CREDENTIAL_COOKIE}={credential}"));
        }

        builder = match request.body {
            Some(body) => builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body),
            None if request.method == HttpMethod::Post => {
                builder.header(reqwest::header::CONTENT_TYPE, "application/json")
            }
            None => builder,
        };

        Ok(builder)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = request.method;
        let uri = request.uri.clone();

        let response = self
            .build(&self.client, request)?
            .send()
            .await
            .map_err(|e| RestError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RestError::Network(e.to_string()))?;

        tracing::trace!("{} {} -> {}", method, uri, status);

        Ok(HttpResponse { status, body })
    }

    async fn open_stream(&self, request: HttpRequest) -> Result<ByteStream> {
        let response = self
            .build(&self.stream_client, request.with_header("Accept", "*/*"))?
            .send()
            .await
            .map_err(|e| RestError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RestError::Status(response.status().as_u16()));
        }

        Ok(Box::pin(response.bytes_stream().map(|chunk| chunk.map_err(RestError::from))))
    }

    fn set_credential(&self, credential: Option<String>) {
        *self.credential.write() = credential;
    }
}
