//! MongoDB implementation of EventRepository
//!
//! Also runs against Azure Cosmos DB's MongoDB API. The event id is stored in
//! `_id`, which doubles as the shard (partition) key.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc},
    error::ErrorKind,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{EventError, EventResult};
use crate::models::Event;
use crate::repository::EventRepository;

pub const DEFAULT_COLLECTION: &str = "Events";

/// Server code returned when creating a collection that already exists.
const NAMESPACE_EXISTS_CODE: i32 = 48;

/// Stored form of an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub date: String,
    pub description: String,
}

impl From<Event> for EventDocument {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            name: event.name,
            date: event.date,
            description: event.description,
        }
    }
}

impl From<EventDocument> for Event {
    fn from(doc: EventDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            date: doc.date,
            description: doc.description,
        }
    }
}

pub struct MongoEventRepository {
    db: Database,
    collection: Collection<EventDocument>,
}

impl MongoEventRepository {
    /// Repository over the `Events` collection of `db`.
    ///
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoEventRepository::new(client.database("EventManagement"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<EventDocument>(collection_name);
        Self { db, collection }
    }

    /// Create the collection if it does not exist yet.
    ///
    /// Run once at startup. Losing a creation race to another instance is
    /// not an error.
    #[instrument(skip(self), fields(collection = %self.collection.name()))]
    pub async fn ensure_collection(&self) -> EventResult<()> {
        let name = self.collection.name();
        let existing = self.db.list_collection_names().await?;
        if existing.iter().any(|c| c == name) {
            tracing::debug!("Collection already exists");
            return Ok(());
        }

        match self.db.create_collection(name).await {
            Ok(()) => {
                tracing::info!("Created collection");
                Ok(())
            }
            Err(e) if is_namespace_exists(&e) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Pipeline yielding `{ max: <long|null> }` over every numeric `_id`.
    fn max_id_pipeline() -> Vec<Document> {
        vec![
            doc! {
                "$project": {
                    "numeric_id": {
                        "$convert": {
                            "input": "$_id",
                            "to": "long",
                            "onError": null,
                            "onNull": null,
                        }
                    }
                }
            },
            doc! {
                "$group": {
                    "_id": null,
                    "max": { "$max": "$numeric_id" }
                }
            },
        ]
    }
}

fn is_namespace_exists(err: &mongodb::error::Error) -> bool {
    matches!(err.kind.as_ref(), ErrorKind::Command(e) if e.code == NAMESPACE_EXISTS_CODE)
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn insert(&self, event: Event) -> EventResult<Event> {
        let document = EventDocument::from(event);
        self.collection.insert_one(&document).await?;

        tracing::debug!("Event inserted");
        Ok(document.into())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> EventResult<Option<Event>> {
        let found = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(found.map(Event::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> EventResult<Vec<Event>> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<EventDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Event::from).collect())
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn replace(&self, event: Event) -> EventResult<Event> {
        let document = EventDocument::from(event);
        let result = self
            .collection
            .replace_one(doc! { "_id": document.id.as_str() }, &document)
            .await?;

        if result.matched_count == 0 {
            return Err(EventError::not_found());
        }

        tracing::debug!("Event replaced");
        Ok(document.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> EventResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn max_numeric_id(&self) -> EventResult<Option<i64>> {
        let mut cursor = self
            .collection
            .clone_with_type::<Document>()
            .aggregate(Self::max_id_pipeline())
            .await?;

        let Some(row) = cursor.try_next().await? else {
            return Ok(None);
        };

        Ok(row.get_i64("max").ok())
    }
}
