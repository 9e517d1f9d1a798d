// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: UUIDs generated via uuid v7 (time-ordered)
// Decision: Email uniqueness is checked and the row inserted under one write lock
//
// This implementation mirrors the PostgreSQL repository API backed by HashMaps,
// allowing the server to run (and tests to execute) without a database.

use chrono::{DateTime, Utc};
use eventhub_core::EventStatus;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::error::{Result, StorageError};
use super::models::*;

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    users: RwLock<HashMap<Uuid, UserRow>>,
    events: RwLock<HashMap<Uuid, EventRow>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        let mut users = self.users.write();
        if users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&input.email))
        {
            return Err(StorageError::DuplicateEmail);
        }

        let now = Self::now();
        let id = Uuid::now_v7();
        let row = UserRow {
            id,
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<UserRow>> {
        Ok(self.users.read().get(&id).cloned())
    }

    pub async fn count_users(&self) -> Result<i64> {
        Ok(self.users.read().len() as i64)
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: CreateEventRow) -> Result<EventRow> {
        let now = Self::now();
        let id = Uuid::now_v7();
        let row = EventRow {
            id,
            title: input.title,
            description: input.description,
            date: input.date,
            location: input.location,
            organizer_id: input.organizer_id,
            max_attendees: input.max_attendees,
            category: input.category,
            status: EventStatus::Draft.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.events.write().insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_event(&self, id: Uuid) -> Result<Option<EventRow>> {
        Ok(self.events.read().get(&id).cloned())
    }

    pub async fn list_published_events(&self) -> Result<Vec<EventRow>> {
        let published = EventStatus::Published.to_string();
        let mut events: Vec<EventRow> = self
            .events
            .read()
            .values()
            .filter(|e| e.status == published)
            .cloned()
            .collect();
        events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(events)
    }

    /// Update an event only if `organizer_id` owns it
    pub async fn update_event_owned(
        &self,
        id: Uuid,
        organizer_id: Uuid,
        input: UpdateEvent,
    ) -> Result<Option<EventRow>> {
        let mut events = self.events.write();
        let Some(event) = events
            .get_mut(&id)
            .filter(|e| e.organizer_id == organizer_id)
        else {
            return Ok(None);
        };

        if let Some(title) = input.title {
            event.title = title;
        }
        if let Some(description) = input.description {
            event.description = description;
        }
        if let Some(date) = input.date {
            event.date = date;
        }
        if let Some(location) = input.location {
            event.location = location;
        }
        if let Some(max_attendees) = input.max_attendees {
            event.max_attendees = Some(max_attendees);
        }
        if let Some(category) = input.category {
            event.category = category;
        }
        if let Some(status) = input.status {
            event.status = status;
        }
        event.updated_at = Self::now();
        Ok(Some(event.clone()))
    }

    /// Delete an event only if `organizer_id` owns it
    pub async fn delete_event_owned(&self, id: Uuid, organizer_id: Uuid) -> Result<bool> {
        let mut events = self.events.write();
        match events.get(&id) {
            Some(e) if e.organizer_id == organizer_id => {
                events.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
