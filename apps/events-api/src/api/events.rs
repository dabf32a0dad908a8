//! Events API routes

use axum::Router;
use domain_events::{EventService, InMemoryEventRepository, MongoEventRepository, handlers};
use tracing::info;

use crate::state::{AppState, Store};

/// The events router over whichever store the app was started with.
pub fn router(state: &AppState) -> Router {
    match &state.store {
        Store::Mongo { db, .. } => {
            let repository =
                MongoEventRepository::with_collection(db.clone(), &state.config.events.collection);
            handlers::router(EventService::new(repository))
        }
        Store::Memory => handlers::router(EventService::new(InMemoryEventRepository::new())),
    }
}

/// Make sure the events collection exists before serving traffic.
pub async fn init_collection(state: &AppState) -> eyre::Result<()> {
    let Store::Mongo { db, .. } = &state.store else {
        return Ok(());
    };

    let collection = &state.config.events.collection;
    MongoEventRepository::with_collection(db.clone(), collection)
        .ensure_collection()
        .await
        .map_err(|e| eyre::eyre!("Failed to prepare collection '{}': {}", collection, e))?;

    info!(collection = %collection, "Events collection ready");
    Ok(())
}
