//! Routing state carried by `OnRoutingStateChanged`
//!
//! The gateway sends the full list of presentation, forward and overflow
//! routes. Listeners get the condensed [`RoutingState`]: the active forward,
//! the active overflow, the do-not-disturb flag and whether the remote
//! extension is active.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::notification::EventPayload;

/// Where a forward or overflow sends calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Destination {
    Voicemail,
    Number,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForwardCondition {
    Immediate,
    Busy,
    NoAnswer,
    #[serde(alias = "BUSY_NO_ANSWER")]
    BusyOrNoAnswer,
}

impl ForwardCondition {
    /// Map a wire `forwardType`. Absent or unrecognized types are immediate.
    fn from_wire(forward_type: Option<&str>) -> Self {
        match forward_type {
            Some("BUSY") => ForwardCondition::Busy,
            Some("NO_ANSWER") => ForwardCondition::NoAnswer,
            Some("BUSY_NO_ANSWER" | "BUSY_OR_NO_ANSWER") => ForwardCondition::BusyOrNoAnswer,
            _ => ForwardCondition::Immediate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverflowCondition {
    Busy,
    NoAnswer,
    #[serde(alias = "BUSY_NO_ANSWER")]
    BusyOrNoAnswer,
}

impl OverflowCondition {
    /// Map a wire `overflowType`. Absent or unrecognized types are busy or no answer.
    fn from_wire(overflow_type: Option<&str>) -> Self {
        match overflow_type {
            Some("BUSY") => OverflowCondition::Busy,
            Some("NO_ANSWER") => OverflowCondition::NoAnswer,
            _ => OverflowCondition::BusyOrNoAnswer,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DndState {
    #[serde(default)]
    pub activate: bool,
}

/// Active forward of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Forward {
    pub destination: Destination,
    /// Target number, only for [`Destination::Number`]
    pub number: Option<String>,
    /// `None` when no forward is set
    pub condition: Option<ForwardCondition>,
}

impl Forward {
    fn none() -> Self {
        Self {
            destination: Destination::None,
            number: None,
            condition: None,
        }
    }

    fn from_route(route: &ForwardRoute) -> Self {
        let (destination, number) = match route.destinations.as_slice() {
            [single] => {
                let destination = single.destination();
                let number = match destination {
                    Destination::Number => single.number.clone(),
                    _ => None,
                };
                (destination, number)
            }
            _ => (Destination::None, None),
        };

        Self {
            destination,
            number,
            condition: Some(ForwardCondition::from_wire(route.forward_type.as_deref())),
        }
    }
}

/// Active overflow of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overflow {
    pub destination: Destination,
    pub condition: Option<OverflowCondition>,
}

impl Overflow {
    fn none() -> Self {
        Self {
            destination: Destination::None,
            condition: None,
        }
    }

    fn from_route(route: &OverflowRoute) -> Self {
        let destination = match route.destinations.as_slice() {
            [single] => single.destination(),
            _ => Destination::None,
        };

        Self {
            destination,
            condition: Some(OverflowCondition::from_wire(route.overflow_type.as_deref())),
        }
    }
}

/// Condensed routing state of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingState {
    pub dnd_state: DndState,
    pub forward: Forward,
    pub overflow: Overflow,
    pub remote_extension_activated: bool,
}

impl RoutingState {
    /// Condense the routes sent by the gateway
    fn from_wire(wire: &WireRoutingState) -> Self {
        let forward = wire
            .forward_routes
            .first()
            .map(Forward::from_route)
            .unwrap_or_else(Forward::none);

        let overflow = wire
            .overflow_routes
            .first()
            .map(Overflow::from_route)
            .unwrap_or_else(Overflow::none);

        let remote_extension_activated = wire.presentation_routes.iter().any(|route| {
            route
                .destinations
                .iter()
                .find(|d| d.kind == "MOBILE")
                .is_some_and(|d| d.selected)
        });

        Self {
            dnd_state: wire.dnd_state,
            forward,
            overflow,
            remote_extension_activated,
        }
    }
}

/// Payload of an adapted `OnRoutingStateChanged` record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingStateChanged {
    pub login_name: String,
    pub routing_state: RoutingState,
}

#[derive(Debug, Deserialize)]
struct WireDestination {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    number: Option<String>,
    #[serde(default)]
    selected: bool,
}

impl WireDestination {
    fn destination(&self) -> Destination {
        match self.kind.as_str() {
            "VOICEMAIL" => Destination::Voicemail,
            "NUMBER" => Destination::Number,
            _ => Destination::None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PresentationRoute {
    #[serde(default)]
    destinations: Vec<WireDestination>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForwardRoute {
    #[serde(default)]
    forward_type: Option<String>,
    #[serde(default)]
    destinations: Vec<WireDestination>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OverflowRoute {
    #[serde(default)]
    overflow_type: Option<String>,
    #[serde(default)]
    destinations: Vec<WireDestination>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRoutingState {
    #[serde(default)]
    presentation_routes: Vec<PresentationRoute>,
    #[serde(default)]
    forward_routes: Vec<ForwardRoute>,
    #[serde(default)]
    overflow_routes: Vec<OverflowRoute>,
    #[serde(default)]
    dnd_state: DndState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRoutingStateChanged {
    login_name: String,
    routing_state: WireRoutingState,
}

/// Adapter registered for `OnRoutingStateChanged`
pub(crate) fn adapt_routing_state_changed(record: &Value) -> serde_json::Result<EventPayload> {
    let wire = WireRoutingStateChanged::deserialize(record)?;
    Ok(EventPayload::RoutingStateChanged(RoutingStateChanged {
        login_name: wire.login_name,
        routing_state: RoutingState::from_wire(&wire.routing_state),
    }))
}
