//! Application state management

use mongodb::{Client, Database};

use crate::config::Config;

/// Backing store opened at startup
#[derive(Clone)]
pub enum Store {
    MongoDb { client: Client, db: Database },
    Memory,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Store,
}

impl AppState {
    pub fn mongo_client(&self) -> Option<&Client> {
        match &self.store {
            Store::MongoDb { client, .. } => Some(client),
            Store::Memory => None,
        }
    }
}
