use serde_json::Value;
use tokio::sync::broadcast;
use tracing::warn;

use super::names::EventName;
use super::routing::RoutingStateChanged;

/// Content delivered with a notification
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// The record as received
    Raw(Value),
    RoutingStateChanged(RoutingStateChanged),
}

/// One event delivered to listeners
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Wire event that produced this notification
    pub event: EventName,
    /// Notification name from the event registration
    pub name: &'static str,
    pub payload: EventPayload,
}

impl Notification {
    /// Raw record, when the payload was not adapted
    pub fn raw(&self) -> Option<&Value> {
        match &self.payload {
            EventPayload::Raw(value) => Some(value),
            _ => None,
        }
    }
}

/// A listener on an event stream
///
/// Each receiver gets every notification broadcast after it was created. A
/// receiver that falls behind the channel capacity skips the oldest ones.
pub struct NotificationReceiver {
    receiver: broadcast::Receiver<Notification>,
    filter: Option<Vec<EventName>>,
}

impl NotificationReceiver {
    pub(crate) fn new(receiver: broadcast::Receiver<Notification>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Only deliver the given events
    pub fn only(mut self, events: &[EventName]) -> Self {
        self.filter = Some(events.to_vec());
        self
    }

    /// Wait for the next notification. Returns `None` once the stream is gone.
    pub async fn recv(&mut self) -> Option<Notification> {
        loop {
            match self.receiver.recv().await {
                Ok(notification) if self.accepts(&notification) => return Some(notification),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Listener lagging, skipped {} notifications", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next notification already delivered, without waiting
    pub fn try_recv(&mut self) -> Option<Notification> {
        loop {
            match self.receiver.try_recv() {
                Ok(notification) if self.accepts(&notification) => return Some(notification),
                Ok(_) => continue,
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!("Listener lagging, skipped {} notifications", skipped);
                }
                Err(_) => return None,
            }
        }
    }

    fn accepts(&self, notification: &Notification) -> bool {
        self.filter
            .as_ref()
            .map_or(true, |events| events.contains(&notification.event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn notification(event: EventName) -> Notification {
        Notification {
            event,
            name: event.as_str(),
            payload: EventPayload::Raw(json!({ "eventName": event.as_str() })),
        }
    }

    #[tokio::test]
    async fn test_filtered_receiver() {
        let (sender, _) = broadcast::channel(16);
        let mut all = NotificationReceiver::new(sender.subscribe());
        let mut calls = NotificationReceiver::new(sender.subscribe())
            .only(&[EventName::OnCallCreated, EventName::OnCallRemoved]);

        sender.send(notification(EventName::OnTelephonyState)).unwrap();
        sender.send(notification(EventName::OnCallCreated)).unwrap();
        drop(sender);

        assert_eq!(all.recv().await.unwrap().event, EventName::OnTelephonyState);
        assert_eq!(all.recv().await.unwrap().event, EventName::OnCallCreated);
        assert!(all.recv().await.is_none());

        assert_eq!(calls.recv().await.unwrap().event, EventName::OnCallCreated);
        assert!(calls.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_lagging_receiver_skips_oldest() {
        let (sender, _) = broadcast::channel(2);
        let mut receiver = NotificationReceiver::new(sender.subscribe());

        sender.send(notification(EventName::OnCtiLinkDown)).unwrap();
        sender.send(notification(EventName::OnCtiLinkUp)).unwrap();
        sender.send(notification(EventName::OnPbxLoaded)).unwrap();

        assert_eq!(receiver.recv().await.unwrap().event, EventName::OnCtiLinkUp);
        assert_eq!(receiver.try_recv().unwrap().event, EventName::OnPbxLoaded);
        assert!(receiver.try_recv().is_none());
    }
}
