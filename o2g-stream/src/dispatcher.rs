//! Streaming event dispatcher.
//!
//! The EventDispatcher owns the long-lived polling request of a session:
//! - Opening the request on the polling URL returned by the gateway
//! - Splitting the incrementally delivered body into records
//! - Mapping each known record to its notification
//! - Broadcasting notifications to every listener, in arrival order
//!
//! There is no reconnection. Once the body ends or fails, the dispatcher is
//! closed for good.

use std::sync::Arc;

use futures::StreamExt;
use parking_lot::Mutex;
use rest_client::{ByteStream, HttpRequest, HttpTransport};
use serde_json::Value;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::config::StreamConfig;
use crate::error::{StreamError, StreamResult};
use crate::events::{EventName, EventPayload, Notification, NotificationReceiver};
use crate::parser::ChunkParser;

/// Lifecycle of a dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    /// Created, not started
    Idle,
    /// Polling request open, records being consumed
    Streaming,
    /// Terminal: the request ended, failed or was aborted
    Closed,
}

/// Consumes an event stream and broadcasts its notifications
pub struct EventDispatcher {
    transport: Arc<dyn HttpTransport>,
    sender: broadcast::Sender<Notification>,
    state: Arc<watch::Sender<DispatcherState>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl EventDispatcher {
    pub fn new(transport: Arc<dyn HttpTransport>, config: &StreamConfig) -> StreamResult<Self> {
        config.validate()?;

        let (sender, _) = broadcast::channel(config.event_buffer_size);
        let (state, _) = watch::channel(DispatcherState::Idle);

        Ok(Self {
            transport,
            sender,
            state: Arc::new(state),
            task: Mutex::new(None),
        })
    }

    /// Add a listener. It receives notifications dispatched from now on.
    pub fn subscribe(&self) -> NotificationReceiver {
        NotificationReceiver::new(self.sender.subscribe())
    }

    pub fn state(&self) -> DispatcherState {
        *self.state.borrow()
    }

    /// Observe state changes
    pub fn watch_state(&self) -> watch::Receiver<DispatcherState> {
        self.state.subscribe()
    }

    /// Open the polling request and start dispatching in the background.
    ///
    /// Fails if the dispatcher was already started or if the gateway refuses
    /// the request; in the latter case the dispatcher is closed. If the
    /// dispatcher is closed while the request is being opened, the stream is
    /// dropped and nothing is dispatched.
    pub async fn start(&self, polling_url: &str) -> StreamResult<()> {
        let started = self.state.send_if_modified(|state| {
            if *state == DispatcherState::Idle {
                *state = DispatcherState::Streaming;
                true
            } else {
                false
            }
        });
        if !started {
            return Err(StreamError::AlreadyStarted);
        }

        let stream = match self.transport.open_stream(HttpRequest::get(polling_url)).await {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Failed to open event stream on {}: {}", polling_url, e);
                self.state.send_replace(DispatcherState::Closed);
                return Err(e.into());
            }
        };

        let mut task = self.task.lock();
        if *self.state.borrow() == DispatcherState::Closed {
            debug!("Event dispatcher closed while opening the stream");
            return Ok(());
        }

        info!("Event stream started");
        *task = Some(tokio::spawn(Self::consume(
            stream,
            self.sender.clone(),
            self.state.clone(),
        )));
        Ok(())
    }

    /// Abort the polling request. No notification is dispatched afterwards.
    pub fn close(&self) {
        let mut task = self.task.lock();
        if let Some(task) = task.take() {
            task.abort();
        }
        if self.state.send_replace(DispatcherState::Closed) != DispatcherState::Closed {
            info!("Event stream closed");
        }
    }

    /// Wait until the dispatcher reaches the closed state
    pub async fn closed(&self) {
        let mut state = self.state.subscribe();
        let _ = state.wait_for(|s| *s == DispatcherState::Closed).await;
    }

    async fn consume(
        mut stream: ByteStream,
        sender: broadcast::Sender<Notification>,
        state: Arc<watch::Sender<DispatcherState>>,
    ) {
        let mut parser = ChunkParser::new();

        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(bytes) => {
                    for record in parser.push(&bytes) {
                        dispatch(&sender, record);
                    }
                }
                Err(e) => {
                    warn!("Event stream failed: {}", e);
                    break;
                }
            }
        }

        debug!(
            "Event stream ended after {} bytes ({} pending)",
            parser.consumed(),
            parser.pending()
        );
        if state.send_replace(DispatcherState::Closed) != DispatcherState::Closed {
            info!("Event stream closed");
        }
    }
}

impl Drop for EventDispatcher {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}

/// Deliver one record according to its event registration
fn dispatch(sender: &broadcast::Sender<Notification>, record: Value) {
    let Some(name) = record.get("eventName").and_then(Value::as_str) else {
        debug!("Dropping record without eventName");
        return;
    };

    let Some(event) = EventName::from_wire(name) else {
        trace!("Dropping unregistered event {}", name);
        return;
    };

    let registration = event.registration();
    let payload = match registration.adapter {
        Some(adapter) => match adapter(&record) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Dropping {} record that could not be adapted: {}", event, e);
                return;
            }
        },
        None => EventPayload::Raw(record),
    };

    trace!("Dispatching {}", registration.notification);

    // No listener is not an error.
    let _ = sender.send(Notification {
        event,
        name: registration.notification,
        payload,
    });
}
