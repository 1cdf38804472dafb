//! # O2G SDK - Async client for the O2G telephony gateway
//!
//! The SDK takes care of the session plumbing of the gateway:
//!
//! - **Bootstrap**: reach the gateway on its private address, or on its
//!   public address when the private one does not answer, and negotiate the
//!   API version
//! - **Sessions**: authenticate, open a session and keep it alive in the
//!   background until it is closed
//! - **Services**: resolve the URI of every service the session exposes and
//!   hand out one client per service
//! - **Events**: submit a [`Subscription`] and receive the gateway events as
//!   [`Notification`]s
//!
//! ## Architecture
//!
//! ```text
//! o2g-sdk (Application / ServiceEndPoint / Session)
//!     ↓
//! o2g-stream (event stream parsing and dispatch)
//!     ↓
//! o2g-api (wire types, subscriptions, REST operations)
//!     ↓
//! rest-client (HTTP transport)
//! ```
//!
//! All URLs of a session come from the same address family: once bootstrap
//! succeeded on the public address, every later URL is read from the public
//! fields of the gateway answers.

mod application;
mod config;
mod endpoint;
mod error;
mod host;
mod keepalive;
pub mod logging;
mod registry;
mod resolver;
mod session;

pub use application::Application;
pub use config::SdkConfig;
pub use endpoint::ServiceEndPoint;
pub use error::{SdkError, SdkResult};
pub use host::HostDescriptor;
pub use registry::ServiceRegistry;
pub use resolver::negotiate_version;
pub use session::Session;

pub use o2g_api::{
    AccessMode, ApiDescriptor, EventPackage, RestService, ServerInfo, ServiceId, Subscription,
    SubscriptionBuilder, Version,
};
pub use o2g_stream::events::routing;
pub use o2g_stream::{EventName, EventPayload, Notification, NotificationReceiver};
pub use rest_client::{HttpTransport, ReqwestTransport};
