use serde_json::Value;
use std::fmt;

use super::notification::EventPayload;
use super::routing;

/// Reshapes a raw record before it is delivered
pub type Adapter = fn(&Value) -> serde_json::Result<EventPayload>;

/// How a wire event is delivered to listeners
#[derive(Clone, Copy)]
pub struct Registration {
    /// Name of the notification listeners receive
    pub notification: &'static str,
    pub adapter: Option<Adapter>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("notification", &self.notification)
            .field("adapted", &self.adapter.is_some())
            .finish()
    }
}

macro_rules! event_names {
    ($($variant:ident),+ $(,)?) => {
        /// Every event the gateway can push on an event stream
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum EventName {
            $($variant,)+
        }

        impl EventName {
            /// All known events, in declaration order
            pub const ALL: &'static [EventName] = &[$(EventName::$variant,)+];

            /// Name carried in the `eventName` field of a record
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(EventName::$variant => stringify!($variant),)+
                }
            }

            /// Resolve a wire name; unknown names have no registration
            pub fn from_wire(name: &str) -> Option<EventName> {
                match name {
                    $(stringify!($variant) => Some(EventName::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

event_names! {
    OnChannelInformation,
    OnRoutingStateChanged,
    OnEventSummaryUpdated,
    // user management
    OnUserInfoChanged,
    OnUserCreated,
    OnUserDeleted,
    // telephony
    OnTelephonyState,
    OnCallCreated,
    OnCallModified,
    OnCallRemoved,
    OnUserStateModified,
    OnDeviceStateModified,
    OnDynamicStateModified,
    // communication log
    OnComRecordCreated,
    OnComRecordModified,
    OnComRecordsDeleted,
    OnComRecordsAck,
    OnComRecordsUnAck,
    // maintenance
    OnCtiLinkDown,
    OnCtiLinkUp,
    OnPbxLoaded,
    // call center agent
    OnAgentStateChanged,
    OnSupervisorHelpRequested,
    OnSupervisorHelpCancelled,
    // rsi
    OnDigitCollected,
    OnToneGeneratedStart,
    OnToneGeneratedStop,
    OnRouteEnd,
    OnRouteRequest,
    // pbx management
    OnPbxObjectInstanceCreated,
    OnPbxObjectInstanceDeleted,
    OnPbxObjectInstanceModified,
}

impl EventName {
    /// Delivery rule for this event
    pub fn registration(&self) -> Registration {
        match self {
            EventName::OnRoutingStateChanged => Registration {
                notification: self.as_str(),
                adapter: Some(routing::adapt_routing_state_changed as Adapter),
            },
            _ => Registration {
                notification: self.as_str(),
                adapter: None,
            },
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
