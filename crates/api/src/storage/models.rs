// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use eventhub_core::{Event, EventCategory, EventStatus, User};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Users
// ============================================

/// Stored user record. Carries the password hash; convert to `User` before
/// anything leaves the service layer.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateUserRow {
    pub name: String,
    /// Already normalized (trimmed, lowercase)
    pub email: String,
    pub password_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// ============================================
// Events
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub organizer_id: Uuid,
    pub max_attendees: Option<i32>,
    pub category: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateEventRow {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub organizer_id: Uuid,
    pub max_attendees: Option<i32>,
    pub category: String,
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub max_attendees: Option<i32>,
    pub category: Option<String>,
    pub status: Option<String>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            title: row.title,
            description: row.description,
            date: row.date,
            location: row.location,
            organizer: row.organizer_id,
            max_attendees: row.max_attendees,
            category: EventCategory::from(row.category.as_str()),
            status: EventStatus::from(row.status.as_str()),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
