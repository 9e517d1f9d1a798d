// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use std::sync::Arc;
use uuid::Uuid;

use super::error::Result;
use super::memory::InMemoryDatabase;
use super::models::*;
use super::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend from a database URL and apply migrations
    pub async fn postgres(database_url: &str) -> Result<Self> {
        let db = Database::from_url(database_url).await?;
        db.migrate().await?;
        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        match self {
            Self::Postgres(db) => db.create_user(input).await,
            Self::InMemory(db) => db.create_user(input).await,
        }
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        match self {
            Self::Postgres(db) => db.get_user_by_email(email).await,
            Self::InMemory(db) => db.get_user_by_email(email).await,
        }
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<UserRow>> {
        match self {
            Self::Postgres(db) => db.get_user(id).await,
            Self::InMemory(db) => db.get_user(id).await,
        }
    }

    pub async fn count_users(&self) -> Result<i64> {
        match self {
            Self::Postgres(db) => db.count_users().await,
            Self::InMemory(db) => db.count_users().await,
        }
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: CreateEventRow) -> Result<EventRow> {
        match self {
            Self::Postgres(db) => db.create_event(input).await,
            Self::InMemory(db) => db.create_event(input).await,
        }
    }

    pub async fn get_event(&self, id: Uuid) -> Result<Option<EventRow>> {
        match self {
            Self::Postgres(db) => db.get_event(id).await,
            Self::InMemory(db) => db.get_event(id).await,
        }
    }

    pub async fn list_published_events(&self) -> Result<Vec<EventRow>> {
        match self {
            Self::Postgres(db) => db.list_published_events().await,
            Self::InMemory(db) => db.list_published_events().await,
        }
    }

    pub async fn update_event_owned(
        &self,
        id: Uuid,
        organizer_id: Uuid,
        input: UpdateEvent,
    ) -> Result<Option<EventRow>> {
        match self {
            Self::Postgres(db) => db.update_event_owned(id, organizer_id, input).await,
            Self::InMemory(db) => db.update_event_owned(id, organizer_id, input).await,
        }
    }

    pub async fn delete_event_owned(&self, id: Uuid, organizer_id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_event_owned(id, organizer_id).await,
            Self::InMemory(db) => db.delete_event_owned(id, organizer_id).await,
        }
    }
}
