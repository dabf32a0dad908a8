use async_trait::async_trait;

use crate::error::EventResult;
use crate::models::Event;

/// Persistence for events, keyed by `Event::id`.
///
/// Implementations: [`crate::mongodb::MongoEventRepository`] and
/// [`crate::memory::InMemoryEventRepository`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert a new event. A taken id is `EventError::Conflict`.
    async fn insert(&self, event: Event) -> EventResult<Event>;

    /// Point read by id.
    async fn find_by_id(&self, id: &str) -> EventResult<Option<Event>>;

    /// Every stored event, in store order.
    async fn list(&self) -> EventResult<Vec<Event>>;

    /// Overwrite the stored event with the same id. No match is
    /// `EventError::NotFound`.
    async fn replace(&self, event: Event) -> EventResult<Event>;

    /// Remove by id; `false` when nothing was stored under it.
    async fn delete(&self, id: &str) -> EventResult<bool>;

    /// Largest id that parses as a 64-bit integer, if any.
    async fn max_numeric_id(&self) -> EventResult<Option<i64>>;
}
