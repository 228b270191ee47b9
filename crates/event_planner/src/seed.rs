// Seed document loading.
//
// One JSON document with the four collections, read once at startup and
// loaded into the store. It is never written back.

use crate::core::entities::{Account, Location, Participation, ScheduledEvent};
use crate::store::Store;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub events: Vec<ScheduledEvent>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub participations: Vec<Participation>,
}

impl SeedDocument {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading seed document {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing seed document {}", path.display()))
    }
}

/// Replace the store contents with the document's collections.
pub async fn load(store: &Store, document: SeedDocument) {
    tracing::info!(
        accounts = document.accounts.len(),
        events = document.events.len(),
        locations = document.locations.len(),
        participations = document.participations.len(),
        "seed document loaded"
    );
    store.accounts.replace_all(document.accounts).await;
    store.events.replace_all(document.events).await;
    store.locations.replace_all(document.locations).await;
    store.participations.replace_all(document.participations).await;
}

#[cfg(test)]
mod seed_tests {
    use super::*;
    use rstest::rstest;

    const DOCUMENT: &str = r#"{
        "accounts": [
            {"id": "acc-1", "username": "ada", "email": "ada@example.com"}
        ],
        "events": [
            {
                "id": "ev-1",
                "title": "Standup",
                "description": "Daily sync",
                "date": "2026-09-12",
                "start_time": "09:00:00",
                "end_time": "09:15:00",
                "owner_id": "acc-1",
                "location_id": "loc-1"
            }
        ],
        "locations": [
            {
                "id": "loc-1",
                "name": "Office",
                "description": "Third floor",
                "latitude": 52.37,
                "longitude": 4.89
            }
        ],
        "participations": [
            {"id": "par-1", "account_id": "acc-1", "event_id": "ev-1"}
        ]
    }"#;

    #[rstest]
    #[tokio::test]
    async fn it_should_load_all_four_collections_into_the_store() {
        let document: SeedDocument = serde_json::from_str(DOCUMENT).expect("document parse failed");
        let store = Store::new();
        load(&store, document).await;

        assert_eq!(store.accounts.list().await.len(), 1);
        assert_eq!(store.events.list().await.len(), 1);
        assert_eq!(store.locations.list().await.len(), 1);
        assert_eq!(store.participations.list().await.len(), 1);

        let event = store.events.get("ev-1").await.expect("event missing");
        assert_eq!(event.owner_id, "acc-1");
    }

    #[rstest]
    fn it_should_default_missing_collections_to_empty() {
        let document: SeedDocument = serde_json::from_str("{}").expect("document parse failed");
        assert!(document.accounts.is_empty());
        assert!(document.events.is_empty());
        assert!(document.locations.is_empty());
        assert!(document.participations.is_empty());
    }
}
