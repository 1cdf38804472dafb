//! Private HTTP transport for O2G gateway communication
//!
//! This crate provides the one capability the rest of the SDK needs from the
//! network: perform a verb on a URI with an optional JSON body and get back a
//! status and a body. It also opens long-lived requests whose body is
//! delivered incrementally, which is how the gateway pushes events.

mod error;
mod transport;
pub mod uri;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use error::RestError;
pub use transport::{
    ByteStream, HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport,
    CREDENTIAL_COOKIE,
};

/// Convenience type alias for transport results.
pub type Result<T> = std::result::Result<T, RestError>;
