// Ports define what the core needs from the outside world, without implementing it.
//
// Purpose
// - Describe abstract output capabilities as traits.
//
// Boundaries
// - No concrete input or output here. The event bus implements these in the
//   bus layer; tests use recording doubles.

use async_trait::async_trait;

/// Outbound capability to hand a change payload to whoever listens on a topic.
/// Implementations must not block the caller on consumer progress.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, topic: &str, payload: serde_json::Value);
}
