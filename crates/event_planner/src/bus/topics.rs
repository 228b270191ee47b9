// Topic names for the mutation observable entity kinds.
//
// Locations are not mutation observable and have no topic triple.

/// The created/updated/deleted topics of one mutation observable entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeTopics {
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
}

pub const ACCOUNTS: ChangeTopics = ChangeTopics {
    created: "accounts.created",
    updated: "accounts.updated",
    deleted: "accounts.deleted",
};

pub const EVENTS: ChangeTopics = ChangeTopics {
    created: "events.created",
    updated: "events.updated",
    deleted: "events.deleted",
};

pub const PARTICIPATIONS: ChangeTopics = ChangeTopics {
    created: "participations.created",
    updated: "participations.updated",
    deleted: "participations.deleted",
};
