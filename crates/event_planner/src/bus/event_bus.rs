// Topic keyed publish/subscribe registry.
//
// Purpose
// - Fan store mutations out to live subscribers without coupling writers to
//   consumer progress.
//
// Responsibilities
// - publish hands the payload to every attachment registered at the moment of
//   the call, then returns; consumers drain their own queues.
// - subscribe registers a fresh attachment; payloads published before it are
//   never replayed.
// - Dropping a stream deregisters its attachment, so later publishes no
//   longer reference it.
//
// Payloads are `serde_json::Value`; callers serialize their own types.

use crate::core::ports::Notifier;
use async_trait::async_trait;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use tokio::sync::mpsc;

pub type Payload = serde_json::Value;

struct Attachment {
    id: u64,
    sender: mpsc::UnboundedSender<Payload>,
}

#[derive(Default)]
struct Registry {
    next_attachment_id: u64,
    topics: HashMap<String, Vec<Attachment>>,
}

#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<Mutex<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand `payload` to every attachment currently on `topic`. The sends are
    /// unbounded, so a slow consumer never blocks this call; with no
    /// attachments the payload is dropped.
    pub fn publish(&self, topic: &str, payload: Payload) {
        let registry = self.registry();
        let Some(attachments) = registry.topics.get(topic) else {
            return;
        };
        for attachment in attachments {
            // A receiver dropped mid-turn detaches on its own; ignore it here.
            let _ = attachment.sender.send(payload.clone());
        }
    }

    /// Attach to `topic`. The stream yields payloads published after this
    /// call, in publish order, until it is dropped.
    pub fn subscribe(&self, topic: &str) -> EventStream {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut registry = self.registry();
        let id = registry.next_attachment_id;
        registry.next_attachment_id += 1;
        registry
            .topics
            .entry(topic.to_string())
            .or_default()
            .push(Attachment { id, sender });
        EventStream {
            bus: self.clone(),
            topic: topic.to_string(),
            id,
            receiver,
        }
    }

    /// Live attachments on `topic`.
    pub fn attachment_count(&self, topic: &str) -> usize {
        self.registry().topics.get(topic).map_or(0, Vec::len)
    }

    fn detach(&self, topic: &str, id: u64) {
        let mut registry = self.registry();
        if let Some(attachments) = registry.topics.get_mut(topic) {
            attachments.retain(|attachment| attachment.id != id);
            if attachments.is_empty() {
                registry.topics.remove(topic);
            }
        }
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        // Never held across an await; poisoning would mean a panic mid-push.
        self.registry.lock().expect("event bus registry poisoned")
    }
}

#[async_trait]
impl Notifier for EventBus {
    async fn notify(&self, topic: &str, payload: Payload) {
        self.publish(topic, payload);
    }
}

/// One attachment's live feed. Dropping it deregisters the attachment.
pub struct EventStream {
    bus: EventBus,
    topic: String,
    id: u64,
    receiver: mpsc::UnboundedReceiver<Payload>,
}

impl Stream for EventStream {
    type Item = Payload;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Payload>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

impl Drop for EventStream {
    fn drop(&mut self) {
        self.bus.detach(&self.topic, self.id);
    }
}
