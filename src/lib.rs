pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod pages;
pub mod routes;
pub mod services;
pub mod utils;
pub mod views;

use std::sync::Arc;

use axum::Router;
use tokio::sync::Mutex;

use crate::database::store::Store;
use crate::pages::workspace::Workspace;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// One console shared by every request; operations run one at a time.
    pub workspace: Arc<Mutex<Workspace>>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        let workspace = Workspace::new(store.clone());
        Self {
            store,
            workspace: Arc::new(Mutex::new(workspace)),
        }
    }
}

/// The routed application, as served by the binary and driven by tests.
pub fn app(state: AppState) -> Router {
    routes::router(state)
}
