//! # o2g-stream
//!
//! Event streaming for the O2G gateway.
//!
//! Once a subscription is accepted, the gateway keeps a single HTTP response
//! open and appends one JSON record per line as events happen. This crate
//! splits that growing body into records, maps each known event to its
//! notification (reshaping a few payloads on the way) and broadcasts the
//! notifications to every listener.

mod config;
mod dispatcher;
mod error;
pub mod events;
mod parser;

pub use config::StreamConfig;
pub use dispatcher::{DispatcherState, EventDispatcher};
pub use error::{StreamError, StreamResult};
pub use events::{EventName, EventPayload, Notification, NotificationReceiver, Registration};
pub use parser::ChunkParser;
