//! Shared application state.

use mongodb::{Client, Database};

/// The backing store chosen at startup.
#[derive(Clone)]
pub enum Store {
    /// Client shares one connection pool across clones
    Mongo { client: Client, db: Database },
    Memory,
}

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub store: Store,
}
