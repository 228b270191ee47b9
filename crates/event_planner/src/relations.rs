// Read time association lookups.
//
// Purpose
// - Compute cross-collection associations by scanning the live sibling
//   collection at the moment the related field is requested.
//
// Boundaries
// - Nothing here is cached or materialized; every call reads current store
//   state, so associations always reflect the most recent completed write.
// - A dangling foreign key resolves to None or an empty list, never an error.

use crate::core::entities::{Account, Location, Participation, ScheduledEvent};
use crate::store::Store;

pub async fn event_owner(store: &Store, event: &ScheduledEvent) -> Option<Account> {
    store.accounts.get(&event.owner_id).await
}

pub async fn event_location(store: &Store, event: &ScheduledEvent) -> Option<Location> {
    store.locations.get(&event.location_id).await
}

pub async fn event_participations(store: &Store, event: &ScheduledEvent) -> Vec<Participation> {
    store
        .participations
        .filter(|participation| participation.event_id == event.id)
        .await
}

/// Events the account owns.
pub async fn account_events(store: &Store, account: &Account) -> Vec<ScheduledEvent> {
    store.events.filter(|event| event.owner_id == account.id).await
}

pub async fn account_participations(store: &Store, account: &Account) -> Vec<Participation> {
    store
        .participations
        .filter(|participation| participation.account_id == account.id)
        .await
}

pub async fn location_events(store: &Store, location: &Location) -> Vec<ScheduledEvent> {
    store
        .events
        .filter(|event| event.location_id == location.id)
        .await
}

pub async fn participation_account(
    store: &Store,
    participation: &Participation,
) -> Option<Account> {
    store.accounts.get(&participation.account_id).await
}

pub async fn participation_event(
    store: &Store,
    participation: &Participation,
) -> Option<ScheduledEvent> {
    store.events.get(&participation.event_id).await
}
