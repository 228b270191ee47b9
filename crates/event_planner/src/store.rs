// In memory entity collections.
//
// Purpose
// - Hold the four collections for the process lifetime. Nothing is persisted.
//
// Responsibilities
// - Keep rows in insertion order.
// - Assign each row its id exactly once, at insert.
// - Take the collection lock once per operation, so no partial state of an
//   in-progress write is ever observable.

use crate::core::entities::{Account, Entity, Location, Participation, ScheduledEvent};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("{kind} with id {id} not found")]
    NotFound { kind: &'static str, id: String },
}

impl StoreError {
    fn not_found<T: Entity>(id: &str) -> Self {
        Self::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        }
    }
}

pub struct Collection<T: Entity> {
    rows: RwLock<Vec<T>>,
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    /// All rows, in insertion order.
    pub async fn list(&self) -> Vec<T> {
        self.rows.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<T> {
        self.rows.read().await.iter().find(|row| row.id() == id).cloned()
    }

    /// Rows matching the predicate, in insertion order.
    pub async fn filter(&self, mut keep: impl FnMut(&T) -> bool) -> Vec<T> {
        self.rows
            .read()
            .await
            .iter()
            .filter(|row| keep(*row))
            .cloned()
            .collect()
    }

    /// Build a row from `input` under a fresh id and append it.
    pub async fn insert(&self, input: T::Input) -> T {
        let row = T::from_input(Uuid::now_v7().to_string(), input);
        self.rows.write().await.push(row.clone());
        row
    }

    /// Fold `patch` into the row with `id`. Fields absent from the patch keep
    /// their prior value.
    pub async fn patch(&self, id: &str, patch: T::Patch) -> Result<T, StoreError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or_else(|| StoreError::not_found::<T>(id))?;
        row.apply(patch);
        Ok(row.clone())
    }

    /// Remove the row with `id` and return it.
    pub async fn remove(&self, id: &str) -> Result<T, StoreError> {
        let mut rows = self.rows.write().await;
        let index = rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or_else(|| StoreError::not_found::<T>(id))?;
        Ok(rows.remove(index))
    }

    /// Empty the collection and return the rows it held, in their prior order.
    pub async fn clear(&self) -> Vec<T> {
        std::mem::take(&mut *self.rows.write().await)
    }

    /// Bulk load for the seed document. Replaces whatever is present.
    pub async fn replace_all(&self, rows: Vec<T>) {
        *self.rows.write().await = rows;
    }
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The four collections, shared between dispatchers and resolvers.
#[derive(Clone, Default)]
pub struct Store {
    pub accounts: Arc<Collection<Account>>,
    pub events: Arc<Collection<ScheduledEvent>>,
    pub locations: Arc<Collection<Location>>,
    pub participations: Arc<Collection<Participation>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }
}
