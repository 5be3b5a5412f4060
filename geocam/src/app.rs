//! Application state and initialization
//!
//! This module manages the central application state and lifecycle.
//! The local store and loaded settings are shared through AppState.

use crate::database::create_pool;
use crate::error::Result;
use crate::services::{MapSettings, PhotoService, SessionService, SettingsService};
use crate::storage::{LocalStore, SqliteStore};
use std::path::PathBuf;
use std::sync::Arc;

/// File name of the on-device store inside the app data directory
const STORE_FILE: &str = "geocam.db";

/// Central application state holding the shared store
#[derive(Clone)]
pub struct AppState {
    pub app_data_dir: PathBuf,
    pub store: Arc<dyn LocalStore>,
    pub map: MapSettings,
}

impl AppState {
    pub fn new(app_data_dir: PathBuf, store: Arc<dyn LocalStore>, map: MapSettings) -> Self {
        Self {
            app_data_dir,
            store,
            map,
        }
    }

    pub fn photos(&self) -> PhotoService {
        PhotoService::new(self.store.clone(), self.map.clone())
    }

    pub fn session(&self) -> SessionService {
        SessionService::new(self.store.clone())
    }
}

/// Application setup - called once on startup
pub async fn setup(app_data_dir: PathBuf) -> Result<AppState> {
    tracing::info!("Initializing application");
    tracing::info!("App data directory: {:?}", app_data_dir);

    tokio::fs::create_dir_all(&app_data_dir).await?;

    let pool = create_pool(&app_data_dir.join(STORE_FILE)).await?;
    let store: Arc<dyn LocalStore> = Arc::new(SqliteStore::new(pool));

    let map = SettingsService::new(app_data_dir.clone()).get_map().await?;
    if map.credential().is_none() {
        tracing::info!("No map credential configured; thumbnails disabled");
    }

    tracing::info!("Application initialized successfully");

    Ok(AppState::new(app_data_dir, store, map))
}
