//! Typed API for the O2G gateway
//!
//! This crate provides the wire types exchanged with the gateway, the
//! subscription description sent to its event service, and thin typed
//! wrappers for the remote operations the session core relies on. All network
//! access goes through the private `rest-client` crate.
//!
//! # Building a subscription
//!
//! ```rust
//! use o2g_api::{EventPackage, Subscription};
//!
//! let subscription = Subscription::builder()
//!     .add_telephony_events(&["60001", "60002"])
//!     .add_routing_events(&[])
//!     .set_timeout(10)
//!     .build();
//!
//! assert_eq!(subscription.filter().selectors().len(), 2);
//! assert_eq!(subscription.filter().selectors()[0].package(), EventPackage::Telephony);
//! ```

pub mod error;
pub mod rest;
pub mod service;
pub mod subscription;
pub mod types;

pub use error::{ApiError, Result};
pub use rest::{AuthenticationRest, GatewayRest, RestService, SessionsRest, SubscriptionsRest};
pub use service::ServiceId;
pub use subscription::{EventFilter, EventPackage, Selector, Subscription, SubscriptionBuilder};
pub use types::{
    AccessMode, ApiDescriptor, AuthenticateResult, ProductVersion, ServerInfo, ServiceDescriptor,
    SessionInfo, SubscriptionResult, Version,
};
