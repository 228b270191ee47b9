// Mutation dispatcher: store mutation combined with change publication.
//
// Responsibilities
// - Mutate the collection, then publish the resulting row on the matching
//   topic with the full stored entity as payload.
// - A NotFound miss publishes nothing and leaves every other collection and
//   subscription untouched.
// - delete_all publishes one deleted event per removed row, in the order the
//   rows held before the call.
//
// Kinds without topics (locations, or any kind while the counter family is
// active) mutate the store and publish nothing.

use crate::bus::topics::ChangeTopics;
use crate::core::entities::Entity;
use crate::core::ports::Notifier;
use crate::store::{Collection, StoreError};
use std::sync::Arc;

pub struct MutationDispatcher<T: Entity, N: Notifier> {
    collection: Arc<Collection<T>>,
    notifier: Arc<N>,
    topics: Option<ChangeTopics>,
}

impl<T, N> MutationDispatcher<T, N>
where
    T: Entity,
    N: Notifier,
{
    pub fn new(
        collection: Arc<Collection<T>>,
        notifier: Arc<N>,
        topics: Option<ChangeTopics>,
    ) -> Self {
        Self {
            collection,
            notifier,
            topics,
        }
    }

    pub async fn create(&self, input: T::Input) -> T {
        let row = self.collection.insert(input).await;
        tracing::debug!(kind = T::KIND, id = row.id(), "created");
        self.notify(|topics| topics.created, &row).await;
        row
    }

    pub async fn update(&self, id: &str, patch: T::Patch) -> Result<T, StoreError> {
        let row = self.collection.patch(id, patch).await?;
        tracing::debug!(kind = T::KIND, id, "updated");
        self.notify(|topics| topics.updated, &row).await;
        Ok(row)
    }

    pub async fn delete(&self, id: &str) -> Result<T, StoreError> {
        let row = self.collection.remove(id).await?;
        tracing::debug!(kind = T::KIND, id, "deleted");
        self.notify(|topics| topics.deleted, &row).await;
        Ok(row)
    }

    /// Snapshot and empty the collection; never fails.
    pub async fn delete_all(&self) -> Vec<T> {
        let rows = self.collection.clear().await;
        tracing::debug!(kind = T::KIND, removed = rows.len(), "cleared");
        for row in &rows {
            self.notify(|topics| topics.deleted, row).await;
        }
        rows
    }

    async fn notify(&self, pick: fn(&ChangeTopics) -> &'static str, row: &T) {
        let Some(topics) = &self.topics else {
            return;
        };
        match serde_json::to_value(row) {
            Ok(payload) => self.notifier.notify(pick(topics), payload).await,
            Err(error) => {
                tracing::error!(kind = T::KIND, %error, "change payload did not serialize");
            }
        }
    }
}
