//! Scripted transport for tests.
//!
//! Responses are registered per (method, uri). When several responses are
//! queued for the same route they are served in order and the last one keeps
//! being served afterwards.

use std::collections::VecDeque;

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use parking_lot::Mutex;

use crate::{ByteStream, HttpMethod, HttpRequest, HttpResponse, HttpTransport, RestError, Result};

#[derive(Debug, Clone)]
enum Reply {
    Response(HttpResponse),
    Failure(String),
}

#[derive(Debug)]
struct Route {
    method: HttpMethod,
    uri: String,
    replies: VecDeque<Reply>,
}

#[derive(Debug, Clone)]
struct StreamScript {
    uri: String,
    chunks: Vec<Bytes>,
    keep_open: bool,
}

#[derive(Debug, Default)]
struct MockState {
    routes: Vec<Route>,
    streams: Vec<StreamScript>,
    requests: Vec<HttpRequest>,
    credential: Option<String>,
}

/// In-memory [`HttpTransport`] with scripted replies and request recording
#[derive(Debug, Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: HttpMethod, uri: &str, reply: Reply) {
        let mut state = self.state.lock();
        match state
            .routes
            .iter_mut()
            .find(|route| route.method == method && route.uri == uri)
        {
            Some(route) => route.replies.push_back(reply),
            None => state.routes.push(Route {
                method,
                uri: uri.to_string(),
                replies: VecDeque::from([reply]),
            }),
        }
    }

    /// Queue a response for a route
    pub fn respond(&self, method: HttpMethod, uri: &str, status: u16, body: impl Into<String>) -> &Self {
        self.push(method, uri, Reply::Response(HttpResponse::new(status, body)));
        self
    }

    /// Queue a JSON response for a route
    pub fn respond_json(&self, method: HttpMethod, uri: &str, status: u16, body: &serde_json::Value) -> &Self {
        self.respond(method, uri, status, body.to_string())
    }

    /// Queue a network failure for a route
    pub fn fail(&self, method: HttpMethod, uri: &str, message: &str) -> &Self {
        self.push(method, uri, Reply::Failure(message.to_string()));
        self
    }

    /// Script the body of a streaming request; the stream ends after the last chunk
    pub fn stream(&self, uri: &str, chunks: &[&str]) -> &Self {
        self.script_stream(uri, chunks, false)
    }

    /// Script the body of a streaming request that stays open after the last chunk
    pub fn stream_open(&self, uri: &str, chunks: &[&str]) -> &Self {
        self.script_stream(uri, chunks, true)
    }

    fn script_stream(&self, uri: &str, chunks: &[&str], keep_open: bool) -> &Self {
        self.state.lock().streams.push(StreamScript {
            uri: uri.to_string(),
            chunks: chunks.iter().map(|c| Bytes::copy_from_slice(c.as_bytes())).collect(),
            keep_open,
        });
        self
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().requests.clone()
    }

    /// Number of requests received for a route
    pub fn count(&self, method: HttpMethod, uri: &str) -> usize {
        self.state
            .lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.uri == uri)
            .count()
    }

    /// Credential currently attached to requests
    pub fn credential(&self) -> Option<String> {
        self.state.lock().credential.clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut state = self.state.lock();
        state.requests.push(request.clone());

        let route = state
            .routes
            .iter_mut()
            .find(|route| route.method == request.method && route.uri == request.uri)
            .ok_or_else(|| RestError::Network(format!("no route for {} {}", request.method, request.uri)))?;

        let reply = if route.replies.len() > 1 {
            route.replies.pop_front()
        } else {
            route.replies.front().cloned()
        };

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(message)) => Err(RestError::Network(message)),
            None => Err(RestError::Network(format!("no reply for {} {}", request.method, request.uri))),
        }
    }

    async fn open_stream(&self, request: HttpRequest) -> Result<ByteStream> {
        let mut state = self.state.lock();
        state.requests.push(request.clone());

        let script = state
            .streams
            .iter()
            .find(|s| s.uri == request.uri)
            .cloned()
            .ok_or(RestError::Status(404))?;

        let chunks = futures::stream::iter(script.chunks.into_iter().map(Ok));
        if script.keep_open {
            Ok(Box::pin(chunks.chain(futures::stream::pending())))
        } else {
            Ok(Box::pin(chunks))
        }
    }

    fn set_credential(&self, credential: Option<String>) {
        self.state.lock().credential = credential;
    }
}
