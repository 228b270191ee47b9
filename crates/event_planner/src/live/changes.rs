// Entity change channels over the event bus.
//
// A channel attaches to exactly one topic, lazily, at the moment a consumer
// starts pulling; dropping the stream detaches. Raw payloads are decoded back
// into the entity type the channel carries.

use crate::bus::event_bus::EventBus;
use futures::{Stream, StreamExt, future};
use serde::de::DeserializeOwned;

/// Attach to `topic` and yield every payload published after attachment,
/// decoded into `T`. Payloads that do not decode are skipped with a warning.
pub fn changes<T>(bus: &EventBus, topic: &'static str) -> impl Stream<Item = T>
where
    T: DeserializeOwned,
{
    bus.subscribe(topic).filter_map(move |payload| {
        let decoded = match serde_json::from_value(payload) {
            Ok(row) => Some(row),
            Err(error) => {
                tracing::warn!(topic, %error, "dropping undecodable change payload");
                None
            }
        };
        future::ready(decoded)
    })
}
