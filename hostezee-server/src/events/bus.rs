//! In-process event bus
//!
//! Pub/sub over a tokio broadcast channel, constructed once at startup
//! and injected through `ServerState`. Keeps a small ring buffer of the
//! most recent events for the dashboard and audit readers.
//!
//! History is best-effort and in-memory only: it is NOT a durable audit
//! trail. A restart drops it, and slow subscribers can lag past the
//! channel capacity and miss messages.

use std::collections::VecDeque;
use std::sync::Mutex;

use shared::message::BusMessage;
use tokio::sync::broadcast;

/// Number of recent events retained for `recent()`
const HISTORY_CAPACITY: usize = 100;

/// Default broadcast channel capacity
const CHANNEL_CAPACITY: usize = 1024;

/// In-process event bus
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<BusMessage>,
    history: Mutex<VecDeque<BusMessage>>,
}

impl EventBus {
    /// Create a bus with the default channel capacity
    pub fn new() -> Self {
        Self::with_capacity(CHANNEL_CAPACITY)
    }

    /// Create a bus with an explicit channel capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            history: Mutex::new(VecDeque::with_capacity(HISTORY_CAPACITY)),
        }
    }

    /// Publish a message to all current subscribers.
    ///
    /// Never fails and never blocks: "no receivers" is a normal state
    /// (nobody is watching the dashboard), and history is recorded either
    /// way.
    pub fn publish(&self, msg: BusMessage) {
        {
            let mut history = self.history.lock().expect("event history lock poisoned");
            if history.len() == HISTORY_CAPACITY {
                history.pop_front();
            }
            history.push_back(msg.clone());
        }
        let _ = self.tx.send(msg);
    }

    /// Subscribe to messages published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<BusMessage> {
        self.tx.subscribe()
    }

    /// Snapshot of the most recent events, oldest first (max 100)
    pub fn recent(&self) -> Vec<BusMessage> {
        self.history
            .lock()
            .expect("event history lock poisoned")
            .iter()
            .cloned()
            .collect()
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::message::{EventType, NotificationPayload};

    fn notification(n: u32) -> BusMessage {
        BusMessage::notification(&NotificationPayload::info("test", format!("event {n}")))
    }

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish(notification(1));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.event_type, EventType::Notification);
    }

    #[test]
    fn test_publish_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(notification(1));
        assert_eq!(bus.recent().len(), 1);
    }

    #[test]
    fn test_history_caps_at_100() {
        let bus = EventBus::new();
        for n in 0..150 {
            bus.publish(notification(n));
        }

        let recent = bus.recent();
        assert_eq!(recent.len(), 100);

        // Oldest retained entry is event 50
        let first: NotificationPayload = recent[0].parse_payload().unwrap();
        assert_eq!(first.body, "event 50");
        let last: NotificationPayload = recent[99].parse_payload().unwrap();
        assert_eq!(last.body, "event 149");
    }

    #[tokio::test]
    async fn test_multiple_subscribers_each_receive() {
        let bus = EventBus::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(notification(7));

        assert!(a.recv().await.is_ok());
        assert!(b.recv().await.is_ok());
    }
}
