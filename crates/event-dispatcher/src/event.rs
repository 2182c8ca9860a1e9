use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random event ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an event ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait for domain event payloads.
///
/// Domain events represent facts that have happened in the domain.
/// They are named in past tense and routed by their kind.
pub trait DomainEvent: Send + Sync + 'static {
    /// Returns the event kind used as the dispatcher's registry key.
    ///
    /// Implementations derive it from the variant with a `match`, so the
    /// value is stable and never depends on type names.
    fn event_type(&self) -> &'static str;
}

/// An immutable occurrence: a payload stamped with the time it happened.
///
/// Fields are private; once built an event can only be read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event<E> {
    event_id: EventId,
    occurred_at: DateTime<Utc>,
    payload: E,
}

impl<E: DomainEvent> Event<E> {
    /// Creates an event that occurred now.
    pub fn new(payload: E) -> Self {
        Self::occurred_at(payload, Utc::now())
    }

    /// Creates an event with an explicit occurrence time.
    pub fn occurred_at(payload: E, occurred_at: DateTime<Utc>) -> Self {
        Self {
            event_id: EventId::new(),
            occurred_at,
            payload,
        }
    }

    /// Returns the event kind, as reported by the payload.
    pub fn kind(&self) -> &'static str {
        self.payload.event_type()
    }
}

impl<E> Event<E> {
    /// Returns the unique ID of this event.
    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Returns when the event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Returns the payload.
    pub fn payload(&self) -> &E {
        &self.payload
    }

    /// Consumes the event and returns its payload.
    pub fn into_payload(self) -> E {
        self.payload
    }
}
