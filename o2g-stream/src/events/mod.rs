//! Known gateway events and the notifications they become
//!
//! Every wire event the gateway can push is listed in [`EventName`]. Each one
//! has a static [`Registration`] naming the notification it is delivered as
//! and, for a few events, an adapter that reshapes the payload first.

mod names;
mod notification;
pub mod routing;

pub use names::{Adapter, EventName, Registration};
pub use notification::{EventPayload, Notification, NotificationReceiver};
pub use routing::{
    Destination, DndState, Forward, ForwardCondition, Overflow, OverflowCondition, RoutingState,
    RoutingStateChanged,
};
