//! Shared fixtures for the integration tests.
//!
//! One entity type (a support ticket) exercising every field kind: plain
//! scalars, a typed sub-object, and a JSON document column.

use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use listwise_query::schema::{Entity, EntityDescriptor, FieldDescriptor, FieldKind, Record};
use listwise_query::types::parse_datetime;

static OWNER: EntityDescriptor = EntityDescriptor {
    name: "TicketOwner",
    fields: &[
        FieldDescriptor {
            name: "name",
            kind: FieldKind::String,
        },
        FieldDescriptor {
            name: "team",
            kind: FieldKind::String,
        },
    ],
};

fn owner_descriptor() -> &'static EntityDescriptor {
    &OWNER
}

pub static TICKET: EntityDescriptor = EntityDescriptor {
    name: "Ticket",
    fields: &[
        FieldDescriptor {
            name: "title",
            kind: FieldKind::String,
        },
        FieldDescriptor {
            name: "priority",
            kind: FieldKind::Integer,
        },
        FieldDescriptor {
            name: "open",
            kind: FieldKind::Boolean,
        },
        FieldDescriptor {
            name: "created",
            kind: FieldKind::DateTime,
        },
        FieldDescriptor {
            name: "owner",
            kind: FieldKind::Nested(owner_descriptor),
        },
        FieldDescriptor {
            name: "metadata",
            kind: FieldKind::Document,
        },
    ],
};

#[derive(Debug, Clone)]
pub struct Ticket {
    pub title: String,
    pub priority: i32,
    pub open: bool,
    pub created: DateTime<Utc>,
    pub owner_name: String,
    pub owner_team: String,
    pub metadata: Value,
}

impl Ticket {
    pub fn new(title: &str, priority: i32) -> Self {
        Self {
            title: title.to_string(),
            priority,
            open: true,
            created: parse_datetime("2024-01-01T09:00:00Z").unwrap(),
            owner_name: "Avery".to_string(),
            owner_team: "support".to_string(),
            metadata: json!({}),
        }
    }

    pub fn created(mut self, value: &str) -> Self {
        self.created = parse_datetime(value).unwrap();
        self
    }

    pub fn open(mut self, value: bool) -> Self {
        self.open = value;
        self
    }

    pub fn owner(mut self, name: &str, team: &str) -> Self {
        self.owner_name = name.to_string();
        self.owner_team = team.to_string();
        self
    }

    pub fn metadata(mut self, value: Value) -> Self {
        self.metadata = value;
        self
    }
}

impl Entity for Ticket {
    fn descriptor() -> &'static EntityDescriptor {
        &TICKET
    }

    fn record(&self) -> Record {
        Record::new()
            .with_scalar("title", self.title.as_str())
            .with_scalar("priority", self.priority)
            .with_scalar("open", self.open)
            .with_scalar("created", self.created)
            .with_nested(
                "owner",
                Record::new()
                    .with_scalar("name", self.owner_name.as_str())
                    .with_scalar("team", self.owner_team.as_str()),
            )
            .with_document("metadata", self.metadata.clone())
    }
}

/// A small mixed dataset with document payloads of varying completeness.
pub fn sample_tickets() -> Vec<Ticket> {
    vec![
        Ticket::new("Printer on fire", 5)
            .created("2024-03-10T08:15:00Z")
            .owner("Avery", "hardware")
            .metadata(json!({"customer": {"name": "Acme"}, "score": "91.5", "region": "east"})),
        Ticket::new("Quarterly review prep", 3)
            .created("2024-03-10T17:40:00Z")
            .owner("Blake", "accounts")
            .metadata(json!({"customer": {"name": "Globex"}, "score": "47.0", "region": "west"})),
        Ticket::new("Password reset", 1)
            .created("2024-03-11T09:00:00Z")
            .owner("Avery", "support")
            .metadata(json!({"customer": {"name": "Initech"}, "score": "12.25"})),
        Ticket::new("Budget review follow-up", 3)
            .created("2024-02-28T12:00:00Z")
            .open(false)
            .owner("Casey", "accounts")
            .metadata(json!({"customer": {"name": "Acme"}, "score": "not a number"})),
        Ticket::new("VPN flapping", 4)
            .created("2024-03-09T23:59:00Z")
            .owner("Blake", "network")
            .metadata(json!({"region": "east"})),
    ]
}
