//! Photo service
//!
//! Reconstructs capture sessions from the flat photo list in the local
//! store. Two groupings exist side by side:
//! - the folder list groups by stored session id (legacy records alone)
//! - the day detail view filters by the calendar day of capture
//!
//! A session that spans midnight shows as one folder but splits across two
//! days; `folder_detail` filters by the folder key instead.

use crate::config::PHOTOS_KEY;
use crate::database::{Folder, FolderKey, NewPhoto, PhotoDetail, PhotoRecord, StoredPhoto};
use crate::error::{AppError, Result};
use crate::services::settings::MapSettings;
use crate::services::static_map::static_map_url;
use crate::storage::LocalStore;
use chrono::{NaiveDate, SecondsFormat, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

/// Validated photos plus the number of stored entries that were skipped
#[derive(Debug, Clone, Default)]
pub struct PhotoSet {
    pub records: Vec<PhotoRecord>,
    pub rejected: usize,
}

/// Decode the raw `photos` value.
///
/// A missing or blank value is an empty collection. A value that is not a
/// JSON array fails; individual bad entries are skipped.
pub fn decode_photos(raw: Option<&str>) -> Result<PhotoSet> {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(PhotoSet::default()),
    };

    let values: Vec<serde_json::Value> =
        serde_json::from_str(raw).map_err(|e| AppError::decode(PHOTOS_KEY, e))?;

    let mut set = PhotoSet::default();
    let mut seen_ids = HashSet::new();

    for (index, value) in values.into_iter().enumerate() {
        let decoded = serde_json::from_value::<StoredPhoto>(value)
            .map_err(|e| e.to_string())
            .and_then(PhotoRecord::try_from);

        match decoded {
            Ok(record) if !seen_ids.insert(record.id) => {
                tracing::warn!("Skipping photo at index {}: duplicate id {}", index, record.id);
                set.rejected += 1;
            }
            Ok(record) => set.records.push(record),
            Err(reason) => {
                tracing::warn!("Skipping photo at index {}: {}", index, reason);
                set.rejected += 1;
            }
        }
    }

    Ok(set)
}

/// Group photos into folders, newest folder first.
///
/// Each folder's cover and timestamp come from its newest photo. Equal
/// timestamps keep their stored order.
pub fn group_into_folders(records: &[PhotoRecord]) -> Vec<Folder> {
    let mut newest_first: Vec<&PhotoRecord> = records.iter().collect();
    newest_first.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));

    let mut index: HashMap<FolderKey, usize> = HashMap::new();
    let mut folders: Vec<Folder> = Vec::new();

    for photo in newest_first {
        let key = photo.folder_key();
        match index.get(&key) {
            Some(&i) => folders[i].count += 1,
            None => {
                index.insert(key.clone(), folders.len());
                folders.push(Folder {
                    id: key.to_string(),
                    key,
                    cover: photo.uri.clone(),
                    when: photo.created_at.clone(),
                    latest: photo.captured_at,
                    count: 1,
                });
            }
        }
    }

    folders.sort_by(|a, b| b.latest.cmp(&a.latest));
    folders
}

/// Photos captured on `day` in `tz`, oldest first
pub fn photos_for_day<'a, Tz: TimeZone>(
    records: &'a [PhotoRecord],
    day: NaiveDate,
    tz: &Tz,
) -> Vec<&'a PhotoRecord> {
    let mut photos: Vec<&PhotoRecord> = records
        .iter()
        .filter(|p| p.captured_at.with_timezone(tz).date_naive() == day)
        .collect();

    photos.sort_by(|a, b| a.captured_at.cmp(&b.captured_at));
    photos
}

/// Photos in the folder with the given id, oldest first
pub fn photos_in_folder<'a>(records: &'a [PhotoRecord], folder_id: &str) -> Vec<&'a PhotoRecord> {
    let mut photos: Vec<&PhotoRecord> = records
        .iter()
        .filter(|p| p.folder_key().to_string() == folder_id)
        .collect();

    photos.sort_by(|a, b| a.captured_at.cmp(&b.captured_at));
    photos
}

/// Parse a `YYYY-MM-DD` day key
pub fn parse_day(day: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(day.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDay(day.to_string()))
}

/// Fresh grouping key for a capture session
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Service for reading and appending captured photos
#[derive(Clone)]
pub struct PhotoService {
    store: Arc<dyn LocalStore>,
    map: MapSettings,
}

impl PhotoService {
    pub fn new(store: Arc<dyn LocalStore>, map: MapSettings) -> Self {
        Self { store, map }
    }

    /// Load and validate every stored photo
    pub async fn load_photos(&self) -> Result<PhotoSet> {
        let raw = self.store.get(PHOTOS_KEY).await?;
        let set = decode_photos(raw.as_deref())?;

        tracing::debug!(
            "Loaded {} photos ({} rejected)",
            set.records.len(),
            set.rejected
        );

        Ok(set)
    }

    /// Folder summaries, newest first
    pub async fn list_folders(&self) -> Result<Vec<Folder>> {
        let set = self.load_photos().await?;
        Ok(group_into_folders(&set.records))
    }

    /// Photos captured on a calendar day in `tz`, oldest first
    pub async fn day_detail<Tz: TimeZone>(&self, day: &str, tz: &Tz) -> Result<Vec<PhotoDetail>> {
        let day = parse_day(day)?;
        let set = self.load_photos().await?;

        Ok(self.annotate(photos_for_day(&set.records, day, tz)))
    }

    /// Photos in a folder from the folder list, oldest first
    pub async fn folder_detail(&self, folder_id: &str) -> Result<Vec<PhotoDetail>> {
        let set = self.load_photos().await?;
        let photos = photos_in_folder(&set.records, folder_id);

        if photos.is_empty() {
            return Err(AppError::FolderNotFound(folder_id.to_string()));
        }

        Ok(self.annotate(photos))
    }

    /// Append a newly captured photo.
    ///
    /// Entries that fail validation are carried over untouched so a rewrite
    /// never loses data. `createdAt` defaults to now; an imported history
    /// keeps its own.
    pub async fn record_photo(&self, new: NewPhoto) -> Result<PhotoRecord> {
        let raw = self.store.get(PHOTOS_KEY).await?;
        let mut values: Vec<serde_json::Value> = match raw.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                serde_json::from_str(raw).map_err(|e| AppError::decode(PHOTOS_KEY, e))?
            }
            _ => Vec::new(),
        };

        let next_id = values
            .iter()
            .filter_map(|v| v.get("id").and_then(serde_json::Value::as_i64))
            .max()
            .map_or(Some(1), |max| max.checked_add(1))
            .ok_or_else(|| AppError::Generic("photo id space exhausted".to_string()))?;

        let stored = StoredPhoto {
            id: next_id,
            uri: new.uri,
            lat: new.lat,
            lon: new.lon,
            acc: new.acc,
            created_at: new
                .created_at
                .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            session_id: new.session_id,
        };
        let record = PhotoRecord::try_from(stored.clone()).map_err(AppError::Generic)?;

        values.push(serde_json::to_value(&stored)?);
        self.store
            .set(PHOTOS_KEY, &serde_json::to_string(&values)?)
            .await?;

        tracing::info!("Recorded photo {} ({:?})", record.id, record.session_id);

        Ok(record)
    }

    /// Remove every stored photo
    pub async fn clear_photos(&self) -> Result<()> {
        self.store.remove(PHOTOS_KEY).await?;
        tracing::info!("Cleared photo collection");
        Ok(())
    }

    fn annotate(&self, photos: Vec<&PhotoRecord>) -> Vec<PhotoDetail> {
        photos
            .into_iter()
            .map(|photo| PhotoDetail {
                map_url: static_map_url(photo.lat, photo.lon, &self.map),
                photo: photo.clone(),
            })
            .collect()
    }
}
