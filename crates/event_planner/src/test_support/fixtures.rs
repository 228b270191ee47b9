// Builders for write payloads used across the unit tests.

use crate::core::entities::{NewAccount, NewLocation, NewParticipation, NewScheduledEvent};
use chrono::{NaiveDate, NaiveTime};

pub struct NewAccountBuilder {
    username: String,
    email: String,
}

impl NewAccountBuilder {
    pub fn new() -> Self {
        Self {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    pub fn username(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn build(self) -> NewAccount {
        NewAccount {
            username: self.username,
            email: self.email,
        }
    }
}

pub struct NewScheduledEventBuilder {
    title: String,
    description: String,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    owner_id: String,
    location_id: String,
}

impl NewScheduledEventBuilder {
    pub fn new() -> Self {
        Self {
            title: "Standup".to_string(),
            description: "Daily sync".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 15, 0).unwrap(),
            owner_id: "acc-fixed-0001".to_string(),
            location_id: "loc-fixed-0001".to_string(),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn owner_id(mut self, owner_id: &str) -> Self {
        self.owner_id = owner_id.to_string();
        self
    }

    pub fn location_id(mut self, location_id: &str) -> Self {
        self.location_id = location_id.to_string();
        self
    }

    pub fn build(self) -> NewScheduledEvent {
        NewScheduledEvent {
            title: self.title,
            description: self.description,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            owner_id: self.owner_id,
            location_id: self.location_id,
        }
    }
}

pub struct NewLocationBuilder {
    name: String,
    description: String,
    latitude: f64,
    longitude: f64,
}

impl NewLocationBuilder {
    pub fn new() -> Self {
        Self {
            name: "Office".to_string(),
            description: "Third floor".to_string(),
            latitude: 52.37,
            longitude: 4.89,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn build(self) -> NewLocation {
        NewLocation {
            name: self.name,
            description: self.description,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

pub struct NewParticipationBuilder {
    account_id: String,
    event_id: String,
}

impl NewParticipationBuilder {
    pub fn new() -> Self {
        Self {
            account_id: "acc-fixed-0001".to_string(),
            event_id: "ev-fixed-0001".to_string(),
        }
    }

    pub fn account_id(mut self, account_id: &str) -> Self {
        self.account_id = account_id.to_string();
        self
    }

    pub fn event_id(mut self, event_id: &str) -> Self {
        self.event_id = event_id.to_string();
        self
    }

    pub fn build(self) -> NewParticipation {
        NewParticipation {
            account_id: self.account_id,
            event_id: self.event_id,
        }
    }
}
