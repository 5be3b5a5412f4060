//! Settings service
//!
//! Manages application settings persistence using JSON file storage.

use crate::config::{
    DEFAULT_MAP_HEIGHT, DEFAULT_MAP_SCALE, DEFAULT_MAP_TYPE, DEFAULT_MAP_WIDTH,
    DEFAULT_MAP_ZOOM, DEFAULT_MARKER_COLOR, MAX_MAP_DIMENSION, MAX_MAP_ZOOM,
    STATIC_MAPS_KEY_ENV, VALID_MAP_SCALES, VALID_MAP_TYPES,
};
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

/// Static map thumbnail configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    /// Map service credential; absent or blank disables thumbnails
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_map_width")]
    pub width: u32,
    #[serde(default = "default_map_height")]
    pub height: u32,
    #[serde(default = "default_map_zoom")]
    pub zoom: u8,
    #[serde(default = "default_map_scale")]
    pub scale: u8,
    #[serde(default = "default_map_type")]
    pub map_type: String,
    #[serde(default = "default_marker_color")]
    pub marker_color: String,
}

fn default_map_width() -> u32 {
    DEFAULT_MAP_WIDTH
}

fn default_map_height() -> u32 {
    DEFAULT_MAP_HEIGHT
}

fn default_map_zoom() -> u8 {
    DEFAULT_MAP_ZOOM
}

fn default_map_scale() -> u8 {
    DEFAULT_MAP_SCALE
}

fn default_map_type() -> String {
    DEFAULT_MAP_TYPE.to_string()
}

fn default_marker_color() -> String {
    DEFAULT_MARKER_COLOR.to_string()
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            width: default_map_width(),
            height: default_map_height(),
            zoom: default_map_zoom(),
            scale: default_map_scale(),
            map_type: default_map_type(),
            marker_color: default_marker_color(),
        }
    }
}

impl MapSettings {
    /// The configured credential, if any
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Check values against what the map service accepts
    pub fn validate(&self) -> Result<()> {
        if self.zoom > MAX_MAP_ZOOM {
            return Err(AppError::InvalidSettings(format!(
                "zoom {} exceeds {}",
                self.zoom, MAX_MAP_ZOOM
            )));
        }

        for (name, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_MAP_DIMENSION {
                return Err(AppError::InvalidSettings(format!(
                    "{} must be between 1 and {}, got {}",
                    name, MAX_MAP_DIMENSION, value
                )));
            }
        }

        if !VALID_MAP_SCALES.contains(&self.scale) {
            return Err(AppError::InvalidSettings(format!(
                "scale must be one of {:?}, got {}",
                VALID_MAP_SCALES, self.scale
            )));
        }

        if !VALID_MAP_TYPES.contains(&self.map_type.as_str()) {
            return Err(AppError::InvalidSettings(format!(
                "unknown map type '{}'",
                self.map_type
            )));
        }

        if self.marker_color.trim().is_empty() {
            return Err(AppError::InvalidSettings(
                "marker color must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Replace the stored credential with `value` when it is non-blank
    fn override_api_key(&mut self, value: Option<String>) {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppSettings {
    #[serde(default)]
    pub map: MapSettings,
}

/// Service for managing application settings
#[derive(Clone)]
pub struct SettingsService {
    settings_path: PathBuf,
}

impl SettingsService {
    pub fn new(app_data_dir: PathBuf) -> Self {
        Self {
            settings_path: app_data_dir.join("settings.json"),
        }
    }

    /// Load settings from disk or create default if not exists
    pub async fn load(&self) -> Result<AppSettings> {
        if !self.settings_path.exists() {
            tracing::info!("Settings file not found, creating default settings");
            let default = AppSettings::default();
            self.save(&default).await?;
            return Ok(default);
        }

        let content = fs::read_to_string(&self.settings_path).await?;
        let settings: AppSettings = serde_json::from_str(&content)
            .map_err(|e| AppError::InvalidSettings(format!("Failed to parse settings: {}", e)))?;

        settings.map.validate()?;

        Ok(settings)
    }

    /// Save settings to disk
    pub async fn save(&self, settings: &AppSettings) -> Result<()> {
        settings.map.validate()?;

        let content = serde_json::to_string_pretty(settings)?;

        fs::write(&self.settings_path, content).await?;
        tracing::info!("Settings saved to {:?}", self.settings_path);

        Ok(())
    }

    /// Get map settings with the environment credential applied
    pub async fn get_map(&self) -> Result<MapSettings> {
        let mut map = self.load().await?.map;
        map.override_api_key(std::env::var(STATIC_MAPS_KEY_ENV).ok());
        Ok(map)
    }

    /// Update map settings
    pub async fn update_map(&self, map: MapSettings) -> Result<()> {
        let mut settings = self.load().await?;
        settings.map = map;
        self.save(&settings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_service() -> (SettingsService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let service = SettingsService::new(temp_dir.path().to_path_buf());
        (service, temp_dir)
    }

    #[tokio::test]
    async fn test_default_settings_created_on_load() {
        let (service, temp) = create_test_service();

        let settings = service.load().await.unwrap();

        assert_eq!(settings.map.api_key, None);
        assert_eq!(settings.map.width, 220);
        assert_eq!(settings.map.height, 140);
        assert_eq!(settings.map.zoom, 16);
        assert_eq!(settings.map.scale, 2);
        assert_eq!(settings.map.map_type, "roadmap");
        assert!(temp.path().join("settings.json").exists());
    }

    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let (service, temp) = create_test_service();

        std::fs::write(
            temp.path().join("settings.json"),
            r#"{"map":{"api_key":"abc","zoom":12}}"#,
        )
        .unwrap();

        let settings = service.load().await.unwrap();
        assert_eq!(settings.map.credential(), Some("abc"));
        assert_eq!(settings.map.zoom, 12);
        assert_eq!(settings.map.width, 220);
        assert_eq!(settings.map.marker_color, "red");
    }

    #[tokio::test]
    async fn test_map_settings_persistence() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_path_buf();

        {
            let service = SettingsService::new(dir.clone());
            let map = MapSettings {
                zoom: 14,
                ..MapSettings::default()
            }
            .with_api_key("stored-key");
            service.update_map(map).await.unwrap();
        }

        {
            let service = SettingsService::new(dir);
            let loaded = service.load().await.unwrap();
            assert_eq!(loaded.map.zoom, 14);
            assert_eq!(loaded.map.credential(), Some("stored-key"));
        }
    }

    #[tokio::test]
    async fn test_invalid_settings_rejected() {
        let (service, temp) = create_test_service();

        let too_wide = MapSettings {
            width: 2000,
            ..MapSettings::default()
        };
        let result = service.update_map(too_wide).await;
        assert!(matches!(result, Err(AppError::InvalidSettings(_))));

        std::fs::write(temp.path().join("settings.json"), r#"{"map":{"scale":3}}"#).unwrap();
        assert!(matches!(
            service.load().await,
            Err(AppError::InvalidSettings(_))
        ));

        std::fs::write(temp.path().join("settings.json"), "not json").unwrap();
        assert!(matches!(
            service.load().await,
            Err(AppError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_blank_credential_is_absent() {
        let map = MapSettings::default().with_api_key("   ");
        assert_eq!(map.credential(), None);
    }

    #[test]
    fn test_override_api_key() {
        let mut map = MapSettings::default().with_api_key("stored");

        map.override_api_key(None);
        assert_eq!(map.credential(), Some("stored"));

        map.override_api_key(Some(" ".to_string()));
        assert_eq!(map.credential(), Some("stored"));

        map.override_api_key(Some("from-env".to_string()));
        assert_eq!(map.credential(), Some("from-env"));
    }
}
