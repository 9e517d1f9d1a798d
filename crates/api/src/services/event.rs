// Event service for business logic
//
// Events are created as drafts by their organizer. Only the organizer may
// change or remove an event; for anyone else the event does not exist.

use crate::storage::{
    models::{CreateEventRow, UpdateEvent},
    StorageBackend,
};
use eventhub_core::{Error, Event, EventCategory};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::events::{CreateEventRequest, UpdateEventRequest};

pub struct EventService {
    db: Arc<StorageBackend>,
}

impl EventService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        organizer: Uuid,
        req: CreateEventRequest,
    ) -> Result<Event, Error> {
        let input = CreateEventRow {
            title: req.title.trim().to_string(),
            description: req.description.trim().to_string(),
            date: req.date,
            location: req.location.trim().to_string(),
            organizer_id: organizer,
            max_attendees: req.max_attendees,
            category: req.category.unwrap_or(EventCategory::Other).to_string(),
        };
        let row = self.db.create_event(input).await?;
        tracing::info!(event_id = %row.id, organizer = %organizer, "Event created");

        Ok(row.into())
    }

    pub async fn get(&self, id: Uuid) -> Result<Event, Error> {
        self.db
            .get_event(id)
            .await?
            .map(Event::from)
            .ok_or(Error::NotFound("Event"))
    }

    /// Published events, soonest first
    pub async fn list_published(&self) -> Result<Vec<Event>, Error> {
        let rows = self.db.list_published_events().await?;
        Ok(rows.into_iter().map(Event::from).collect())
    }

    /// Update an event owned by `organizer`.
    /// A missing event and someone else's event both yield `NotFound`.
    pub async fn update(
        &self,
        id: Uuid,
        organizer: Uuid,
        req: UpdateEventRequest,
    ) -> Result<Event, Error> {
        let input = UpdateEvent {
            title: req.title.map(|s| s.trim().to_string()),
            description: req.description.map(|s| s.trim().to_string()),
            date: req.date,
            location: req.location.map(|s| s.trim().to_string()),
            max_attendees: req.max_attendees,
            category: req.category.map(|c| c.to_string()),
            status: req.status.map(|s| s.to_string()),
        };

        match self.db.update_event_owned(id, organizer, input).await? {
            Some(row) => {
                tracing::info!(event_id = %id, "Event updated");
                Ok(row.into())
            }
            None => {
                tracing::warn!(
                    event_id = %id,
                    user_id = %organizer,
                    "Update rejected: event missing or not owned"
                );
                Err(Error::NotFound("Event"))
            }
        }
    }

    /// Delete an event owned by `organizer`
    pub async fn delete(&self, id: Uuid, organizer: Uuid) -> Result<(), Error> {
        if self.db.delete_event_owned(id, organizer).await? {
            tracing::info!(event_id = %id, "Event deleted");
            Ok(())
        } else {
            tracing::warn!(
                event_id = %id,
                user_id = %organizer,
                "Delete rejected: event missing or not owned"
            );
            Err(Error::NotFound("Event"))
        }
    }
}
