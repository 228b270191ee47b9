// The four entity kinds and their write payloads.
//
// Purpose
// - Plain domain rows as stored in the collections, plus the full payload
//   accepted by add and the partial payload accepted by update.
//
// Boundaries
// - This file must not perform input or output.
// - Keep it framework-free; the GraphQL layer wraps these types.
//
// Notes
// - Ids are opaque strings, assigned once at insert and compared verbatim.
// - Foreign-key fields (`owner_id`, `location_id`, `account_id`, `event_id`)
//   are copied from input as-is and are not checked against sibling
//   collections; resolvers tolerate dangling values.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// One entity kind: how rows are built from an add payload and how a partial
/// update payload is folded into an existing row. A `None` patch field keeps
/// the prior value; explicit field-clearing is not expressible.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Full payload accepted by add.
    type Input: Send;
    /// Partial payload accepted by update.
    type Patch: Send;

    /// Collection name used in errors and logs.
    const KIND: &'static str;

    fn from_input(id: String, input: Self::Input) -> Self;
    fn apply(&mut self, patch: Self::Patch);
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl Entity for Account {
    type Input = NewAccount;
    type Patch = AccountPatch;

    const KIND: &'static str = "account";

    fn from_input(id: String, input: NewAccount) -> Self {
        Self {
            id,
            username: input.username,
            email: input.email,
        }
    }

    fn apply(&mut self, patch: AccountPatch) {
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub owner_id: String,
    pub location_id: String,
}

#[derive(Debug, Clone)]
pub struct NewScheduledEvent {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub owner_id: String,
    pub location_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScheduledEventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub owner_id: Option<String>,
    pub location_id: Option<String>,
}

impl Entity for ScheduledEvent {
    type Input = NewScheduledEvent;
    type Patch = ScheduledEventPatch;

    const KIND: &'static str = "event";

    fn from_input(id: String, input: NewScheduledEvent) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            date: input.date,
            start_time: input.start_time,
            end_time: input.end_time,
            owner_id: input.owner_id,
            location_id: input.location_id,
        }
    }

    fn apply(&mut self, patch: ScheduledEventPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(start_time) = patch.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            self.end_time = end_time;
        }
        if let Some(owner_id) = patch.owner_id {
            self.owner_id = owner_id;
        }
        if let Some(location_id) = patch.location_id {
            self.location_id = location_id;
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone)]
pub struct NewLocation {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default)]
pub struct LocationPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Entity for Location {
    type Input = NewLocation;
    type Patch = LocationPatch;

    const KIND: &'static str = "location";

    fn from_input(id: String, input: NewLocation) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            latitude: input.latitude,
            longitude: input.longitude,
        }
    }

    fn apply(&mut self, patch: LocationPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(latitude) = patch.latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = patch.longitude {
            self.longitude = longitude;
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participation {
    pub id: String,
    pub account_id: String,
    pub event_id: String,
}

#[derive(Debug, Clone)]
pub struct NewParticipation {
    pub account_id: String,
    pub event_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct ParticipationPatch {
    pub account_id: Option<String>,
    pub event_id: Option<String>,
}

impl Entity for Participation {
    type Input = NewParticipation;
    type Patch = ParticipationPatch;

    const KIND: &'static str = "participation";

    fn from_input(id: String, input: NewParticipation) -> Self {
        Self {
            id,
            account_id: input.account_id,
            event_id: input.event_id,
        }
    }

    fn apply(&mut self, patch: ParticipationPatch) {
        if let Some(account_id) = patch.account_id {
            self.account_id = account_id;
        }
        if let Some(event_id) = patch.event_id {
            self.event_id = event_id;
        }
    }

    fn id(&self) -> &str {
        &self.id
    }
}
