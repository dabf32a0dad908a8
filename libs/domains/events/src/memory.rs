//! In-memory implementation of EventRepository
//!
//! Same semantics as the MongoDB repository, without a server. Used by the
//! handler tests and by `EVENTS_STORE=memory` local runs.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{EventError, EventResult};
use crate::models::Event;
use crate::repository::EventRepository;

/// Events held in a map keyed by id.
///
/// ```
/// use domain_events::InMemoryEventRepository;
///
/// let repo = InMemoryEventRepository::new();
/// assert!(repo.is_empty());
/// ```
#[derive(Default)]
pub struct InMemoryEventRepository {
    events: RwLock<HashMap<String, Event>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn insert(&self, event: Event) -> EventResult<Event> {
        match self.events.write().entry(event.id.clone()) {
            Entry::Occupied(_) => Err(EventError::already_exists()),
            Entry::Vacant(slot) => Ok(slot.insert(event).clone()),
        }
    }

    async fn find_by_id(&self, id: &str) -> EventResult<Option<Event>> {
        Ok(self.events.read().get(id).cloned())
    }

    async fn list(&self) -> EventResult<Vec<Event>> {
        Ok(self.events.read().values().cloned().collect())
    }

    async fn replace(&self, event: Event) -> EventResult<Event> {
        match self.events.write().get_mut(&event.id) {
            Some(stored) => {
                *stored = event.clone();
                Ok(event)
            }
            None => Err(EventError::not_found()),
        }
    }

    async fn delete(&self, id: &str) -> EventResult<bool> {
        Ok(self.events.write().remove(id).is_some())
    }

    async fn max_numeric_id(&self) -> EventResult<Option<i64>> {
        Ok(self
            .events
            .read()
            .keys()
            .filter_map(|id| id.parse::<i64>().ok())
            .max())
    }
}
