//! Wire types exchanged with the gateway.
//!
//! Every payload that carries URLs carries two of them: one for clients on the
//! gateway's private network and one for clients coming through its public
//! address. [`AccessMode`] selects which one is used.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which address family is used for every URL of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessMode {
    Private,
    Public,
}

impl AccessMode {
    /// Pick the URL matching this access mode
    pub fn select<'a>(&self, private: &'a str, public: &'a str) -> &'a str {
        match self {
            AccessMode::Private => private,
            AccessMode::Public => public,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVersion {
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub minor: String,
}

/// Information about the gateway product
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub product_version: ProductVersion,
    /// Whether the gateway runs in high-availability mode
    #[serde(default)]
    pub ha_mode: bool,
}

/// One API version advertised by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub internal_url: String,
    #[serde(default)]
    pub public_url: String,
}

impl Version {
    /// Status value marking the version the gateway recommends
    pub const CURRENT: &'static str = "CURRENT";

    pub fn is_current(&self) -> bool {
        self.status == Self::CURRENT
    }

    /// Authentication URL of this version for the given access mode
    pub fn url(&self, mode: AccessMode) -> &str {
        mode.select(&self.internal_url, &self.public_url)
    }
}

/// Gateway root resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDescriptor {
    #[serde(default)]
    pub server_info: ServerInfo,
    #[serde(default)]
    pub versions: Vec<Version>,
}

/// Result of a successful authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResult {
    pub credential: String,
    /// Session service URL on the private network
    pub internal_url: String,
    /// Session service URL on the public network
    pub public_url: String,
}

impl AuthenticateResult {
    pub fn url(&self, mode: AccessMode) -> &str {
        mode.select(&self.internal_url, &self.public_url)
    }
}

/// A service made available to the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    pub service_name: String,
    #[serde(default)]
    pub service_version: String,
    pub relative_url: String,
}

/// Session created by the gateway on login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    #[serde(default)]
    pub admin: bool,
    /// Session lease, in milliseconds
    pub time_to_live: u64,
    pub private_base_url: String,
    pub public_base_url: String,
    #[serde(default)]
    pub services: Vec<ServiceDescriptor>,
}

impl SessionInfo {
    pub fn base_url(&self, mode: AccessMode) -> &str {
        mode.select(&self.private_base_url, &self.public_base_url)
    }

    pub fn time_to_live(&self) -> Duration {
        Duration::from_millis(self.time_to_live)
    }
}

/// Answer of the subscription service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResult {
    #[serde(default)]
    pub subscription_id: String,
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub private_polling_url: String,
    #[serde(default)]
    pub public_polling_url: String,
}

impl SubscriptionResult {
    /// Status value of an accepted subscription
    pub const ACCEPTED: &'static str = "ACCEPTED";

    pub fn is_accepted(&self) -> bool {
        self.status == Self::ACCEPTED
    }

    pub fn polling_url(&self, mode: AccessMode) -> &str {
        mode.select(&self.private_polling_url, &self.public_polling_url)
    }
}
