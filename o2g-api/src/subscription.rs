//! Subscription description sent to the gateway event service
//!
//! A [`Subscription`] lists the event packages the caller wants, each
//! optionally scoped to a set of subject identifiers (login names, device
//! numbers, agent ids...). It is assembled with a [`SubscriptionBuilder`] and
//! is immutable once built.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// A named group of related events requested as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventPackage {
    #[serde(rename = "telephony")]
    Telephony,
    #[serde(rename = "routing")]
    Routing,
    #[serde(rename = "eventSummary")]
    EventSummary,
    /// User creation, deletion and modification
    #[serde(rename = "userManagement")]
    Users,
    /// CTI link and PBX state
    #[serde(rename = "maintenance")]
    Maintenance,
    #[serde(rename = "rsi")]
    Rsi,
    #[serde(rename = "pbxManagement")]
    PbxManagement,
    #[serde(rename = "unifiedComLog")]
    CommunicationLog,
    #[serde(rename = "agent")]
    CallCenterAgent,
    /// Changes on a user's own data
    #[serde(rename = "user")]
    User,
}

impl EventPackage {
    /// Name of the package as it appears in a subscription filter
    pub fn name(&self) -> &'static str {
        match self {
            EventPackage::Telephony => "telephony",
            EventPackage::Routing => "routing",
            EventPackage::EventSummary => "eventSummary",
            EventPackage::Users => "userManagement",
            EventPackage::Maintenance => "maintenance",
            EventPackage::Rsi => "rsi",
            EventPackage::PbxManagement => "pbxManagement",
            EventPackage::CommunicationLog => "unifiedComLog",
            EventPackage::CallCenterAgent => "agent",
            EventPackage::User => "user",
        }
    }
}

impl fmt::Display for EventPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One event package, optionally restricted to some subjects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    ids: Option<Vec<String>>,
    package: EventPackage,
}

impl Selector {
    /// Create a selector; an empty id list means every authorized subject.
    pub fn new(package: EventPackage, ids: &[&str]) -> Self {
        let ids = if ids.is_empty() {
            None
        } else {
            Some(ids.iter().map(|id| id.to_string()).collect())
        };
        Self { ids, package }
    }

    pub fn ids(&self) -> Option<&[String]> {
        self.ids.as_deref()
    }

    pub fn package(&self) -> EventPackage {
        self.package
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.ids.is_some() { 2 } else { 1 };
        let mut state = serializer.serialize_struct("Selector", fields)?;
        match &self.ids {
            Some(ids) => state.serialize_field("ids", ids)?,
            None => state.skip_field("ids")?,
        }
        state.serialize_field("names", &[self.package])?;
        state.end()
    }
}

/// Ordered list of selectors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventFilter {
    selectors: Vec<Selector>,
}

impl EventFilter {
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

/// Immutable description of the events a session wants to receive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    version: String,
    /// Channel lifetime in minutes, 0 for the gateway default
    timeout: u32,
    filter: EventFilter,
}

impl Subscription {
    /// Event version requested when none is set
    pub const DEFAULT_VERSION: &'static str = "1.0";

    pub fn builder() -> SubscriptionBuilder {
        SubscriptionBuilder::new()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn timeout(&self) -> u32 {
        self.timeout
    }

    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

/// Accumulates selectors until [`SubscriptionBuilder::build`] is called
///
/// Each `add_*` call appends a new selector, so adding the same package twice
/// yields two selectors.
#[derive(Debug, Clone)]
pub struct SubscriptionBuilder {
    version: String,
    timeout: u32,
    selectors: Vec<Selector>,
}

impl Default for SubscriptionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriptionBuilder {
    pub fn new() -> Self {
        Self {
            version: Subscription::DEFAULT_VERSION.to_string(),
            timeout: 0,
            selectors: Vec::new(),
        }
    }

    /// Add a selector for any package
    pub fn add_events(mut self, package: EventPackage, ids: &[&str]) -> Self {
        self.selectors.push(Selector::new(package, ids));
        self
    }

    /// Forward, overflow and do-not-disturb changes of the given users
    pub fn add_routing_events(self, ids: &[&str]) -> Self {
        self.add_events(EventPackage::Routing, ids)
    }

    /// Call and device state changes of the given users
    pub fn add_telephony_events(self, ids: &[&str]) -> Self {
        self.add_events(EventPackage::Telephony, ids)
    }

    /// Counter updates (missed calls, voice messages...) of the given users
    pub fn add_event_summary_events(self, ids: &[&str]) -> Self {
        self.add_events(EventPackage::EventSummary, ids)
    }

    pub fn add_users_management_events(self) -> Self {
        self.add_events(EventPackage::Users, &[])
    }

    pub fn add_maintenance_events(self) -> Self {
        self.add_events(EventPackage::Maintenance, &[])
    }

    pub fn add_rsi_events(self) -> Self {
        self.add_events(EventPackage::Rsi, &[])
    }

    pub fn add_pbx_management_events(self) -> Self {
        self.add_events(EventPackage::PbxManagement, &[])
    }

    pub fn add_communication_log_events(self, ids: &[&str]) -> Self {
        self.add_events(EventPackage::CommunicationLog, ids)
    }

    pub fn add_call_center_agent_events(self, ids: &[&str]) -> Self {
        self.add_events(EventPackage::CallCenterAgent, ids)
    }

    pub fn add_user_events(self, ids: &[&str]) -> Self {
        self.add_events(EventPackage::User, ids)
    }

    /// Channel lifetime in minutes
    pub fn set_timeout(mut self, minutes: u32) -> Self {
        self.timeout = minutes;
        self
    }

    pub fn set_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn build(self) -> Subscription {
        Subscription {
            version: self.version,
            timeout: self.timeout,
            filter: EventFilter {
                selectors: self.selectors,
            },
        }
    }
}
