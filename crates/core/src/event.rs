// Event domain types
//
// These types represent the Event entity, its lifecycle status and category.
// Used by both the API and storage layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Event publication status.
/// - `draft`: Event created but not visible in public listings
/// - `published`: Event visible to everyone
/// - `cancelled`: Event called off by its organizer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Event created but not yet published.
    #[default]
    Draft,
    /// Event is publicly listed.
    Published,
    /// Event was cancelled.
    Cancelled,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventStatus::Draft => write!(f, "draft"),
            EventStatus::Published => write!(f, "published"),
            EventStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl From<&str> for EventStatus {
    fn from(s: &str) -> Self {
        match s {
            "published" => EventStatus::Published,
            "cancelled" => EventStatus::Cancelled,
            _ => EventStatus::Draft,
        }
    }
}

/// Kind of gathering an event represents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Conference,
    Workshop,
    Social,
    Other,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Conference => write!(f, "conference"),
            EventCategory::Workshop => write!(f, "workshop"),
            EventCategory::Social => write!(f, "social"),
            EventCategory::Other => write!(f, "other"),
        }
    }
}

impl From<&str> for EventCategory {
    fn from(s: &str) -> Self {
        match s {
            "conference" => EventCategory::Conference,
            "workshop" => EventCategory::Workshop,
            "social" => EventCategory::Social,
            _ => EventCategory::Other,
        }
    }
}

/// Event - a scheduled gathering owned by its organizer.
/// Only the organizer may update or delete it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier for the event.
    pub id: Uuid,
    /// Short title shown in listings.
    pub title: String,
    /// Longer description of the event.
    pub description: String,
    /// When the event takes place.
    pub date: DateTime<Utc>,
    /// Where the event takes place.
    pub location: String,
    /// ID of the user who created the event.
    pub organizer: Uuid,
    /// Maximum number of attendees, unlimited when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<i32>,
    /// Kind of event.
    pub category: EventCategory,
    /// Publication status.
    pub status: EventStatus,
    /// Timestamp when the event was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the event was last updated.
    pub updated_at: DateTime<Utc>,
}
