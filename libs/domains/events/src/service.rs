//! Event Service - request-level operations over an EventRepository

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{EventError, EventResult};
use crate::models::{CreateEvent, Event, UpdateEvent};
use crate::repository::EventRepository;

pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate, assign an id if none was given, and insert.
    ///
    /// The assigned id is one more than the largest numeric id currently
    /// stored, or `"1"` when there is none. Reading the maximum and inserting
    /// are separate steps: two concurrent creates can compute the same id, and
    /// the loser gets `EventError::Conflict` from the store.
    #[instrument(skip(self, input))]
    pub async fn create_event(&self, input: CreateEvent) -> EventResult<Event> {
        input.validate().map_err(|_| EventError::missing_fields())?;

        let id = match input.requested_id() {
            Some(id) => id.to_string(),
            None => self.next_id().await?,
        };

        let event = self.repository.insert(input.into_event(id)).await?;
        tracing::info!(event_id = %event.id, "Event created");
        Ok(event)
    }

    async fn next_id(&self) -> EventResult<String> {
        let base = self.repository.max_numeric_id().await?.unwrap_or(0);
        let next = base
            .checked_add(1)
            .ok_or_else(|| EventError::Internal("numeric id space exhausted".to_string()))?;
        Ok(next.to_string())
    }

    #[instrument(skip(self))]
    pub async fn list_events(&self) -> EventResult<Vec<Event>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_event(&self, id: &str) -> EventResult<Event> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(EventError::not_found)
    }

    /// Merge the present fields of `input` into the stored event and write it
    /// back whole.
    #[instrument(skip(self, input))]
    pub async fn update_event(&self, id: &str, input: UpdateEvent) -> EventResult<Event> {
        let mut event = self.get_event(id).await?;
        event.apply_update(input);

        let event = self.repository.replace(event).await?;
        tracing::info!(event_id = %event.id, "Event updated");
        Ok(event)
    }

    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: &str) -> EventResult<()> {
        if !self.repository.delete(id).await? {
            return Err(EventError::not_found());
        }
        tracing::info!(event_id = %id, "Event deleted");
        Ok(())
    }
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
