//! Events Domain
//!
//! CRUD over event records (`id`, `name`, `date`, `description`) kept in a
//! document store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, body extraction
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, id assignment, merge
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + MongoDB and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Event, CreateEvent, UpdateEvent
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_events::{handlers, EventService, MongoEventRepository};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoEventRepository::new(client.database("EventManagement"));
//! repository.ensure_collection().await?;
//!
//! let router = axum::Router::new().nest("/events", handlers::router(EventService::new(repository)));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{EventError, EventResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryEventRepository;
pub use models::{CreateEvent, Event, UpdateEvent};
pub use self::mongodb::{EventDocument, MongoEventRepository};
pub use repository::EventRepository;
pub use service::EventService;
