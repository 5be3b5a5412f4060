//! Screen commands exposed to the presentation layer
//!
//! This module organizes commands into logical submodules:
//! - `collections`: Folder list and photo detail screens
//! - `auth`: Login, logout, home and form screens

pub mod auth;
pub mod collections;

pub use auth::*;
pub use collections::*;

use crate::app::AppState;

/// Navigation targets of the mobile app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    Dashboard,
    Form,
    Camera,
    Collection,
    CollectionDetail { id: String },
    FormStartSubmission,
    ViewPreviousEntries,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Home => "/home".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Form => "/form".to_string(),
            Route::Camera => "/camera".to_string(),
            Route::Collection => "/CollectionScreen".to_string(),
            Route::CollectionDetail { id } => format!(
                "/CollectionDetailScreen?id={}",
                urlencoding::encode(id)
            ),
            Route::FormStartSubmission => "/FormStartSubmission".to_string(),
            Route::ViewPreviousEntries => "/ViewPreviousEntries".to_string(),
        }
    }

    /// Links shown in the header of every signed-in screen
    pub fn header_links() -> Vec<Route> {
        vec![Route::Home, Route::Dashboard, Route::Form, Route::Login]
    }

    /// Tiles in the bottom navigation bar
    pub fn bottom_nav() -> Vec<Route> {
        vec![Route::FormStartSubmission, Route::Camera, Route::Collection]
    }
}

impl serde::Serialize for Route {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.path())
    }
}

/// Application information structure
#[derive(serde::Serialize)]
pub struct AppInfo {
    pub version: String,
    pub app_data_dir: String,
    pub maps_enabled: bool,
}

/// Get application information
pub fn get_app_info(state: &AppState) -> AppInfo {
    AppInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        app_data_dir: state.app_data_dir.to_string_lossy().to_string(),
        maps_enabled: state.map.credential().is_some(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::app::AppState;
    use crate::services::MapSettings;
    use crate::storage::MemoryStore;
    use std::path::PathBuf;
    use std::sync::Arc;

    pub fn memory_state(map: MapSettings) -> (AppState, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(PathBuf::from("/tmp/geocam-test"), store.clone(), map);
        (state, store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MapSettings;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Collection.path(), "/CollectionScreen");
        assert_eq!(
            Route::CollectionDetail {
                id: "field 1".to_string()
            }
            .path(),
            "/CollectionDetailScreen?id=field%201"
        );
        assert_eq!(serde_json::to_string(&Route::Home).unwrap(), r#""/home""#);
    }

    #[test]
    fn test_app_info_reports_maps() {
        let (state, _store) = test_support::memory_state(MapSettings::default());
        assert!(!get_app_info(&state).maps_enabled);

        let (state, _store) =
            test_support::memory_state(MapSettings::default().with_api_key("k"));
        let info = get_app_info(&state);
        assert!(info.maps_enabled);
        assert_eq!(info.app_data_dir, "/tmp/geocam-test");
    }
}
