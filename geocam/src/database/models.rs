//! Database models
//!
//! Rust structs representing the values kept in the local store.
//! Wire shapes use serde with the camelCase field names the capture
//! screens write.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A photo record exactly as it is stored under the `photos` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPhoto {
    pub id: i64,
    pub uri: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub acc: Option<f64>,
    /// ISO-8601 capture timestamp
    pub created_at: String,
    /// Absent on records captured before session grouping existed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// A validated photo record with its capture time parsed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    pub id: i64,
    pub uri: String,
    pub lat: f64,
    pub lon: f64,
    pub acc: Option<f64>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip)]
    pub captured_at: DateTime<Utc>,
}

impl PhotoRecord {
    /// Grouping key for the folder list
    pub fn folder_key(&self) -> FolderKey {
        match &self.session_id {
            Some(session_id) => FolderKey::Session(session_id.clone()),
            None => FolderKey::Legacy(self.id),
        }
    }

    pub fn to_stored(&self) -> StoredPhoto {
        StoredPhoto {
            id: self.id,
            uri: self.uri.clone(),
            lat: self.lat,
            lon: self.lon,
            acc: self.acc,
            created_at: self.created_at.clone(),
            session_id: self.session_id.clone(),
        }
    }
}

impl TryFrom<StoredPhoto> for PhotoRecord {
    type Error = String;

    fn try_from(stored: StoredPhoto) -> Result<Self, Self::Error> {
        let captured_at = parse_timestamp(&stored.created_at)
            .ok_or_else(|| format!("unparseable createdAt '{}'", stored.created_at))?;

        if !stored.lat.is_finite() || !stored.lon.is_finite() {
            return Err("non-finite coordinates".to_string());
        }

        Ok(Self {
            id: stored.id,
            uri: stored.uri,
            lat: stored.lat,
            lon: stored.lon,
            acc: stored.acc,
            created_at: stored.created_at,
            session_id: stored.session_id,
            captured_at,
        })
    }
}

/// Parse a stored capture timestamp.
///
/// Accepts RFC 3339, or a date-time / date without offset which is read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    // No offset is read as UTC, not the device zone, so the same stored
    // value lands on the same day key on every device.
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Key that photos are grouped by in the folder list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FolderKey {
    Session(String),
    /// Records without a session id each get their own folder
    Legacy(i64),
}

impl fmt::Display for FolderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FolderKey::Session(session_id) => f.write_str(session_id),
            FolderKey::Legacy(id) => write!(f, "legacy-{}", id),
        }
    }
}

/// A derived folder summary; never persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Folder {
    pub id: String,
    #[serde(skip)]
    pub key: FolderKey,
    /// Image of the newest photo in the folder
    pub cover: String,
    /// Capture timestamp of the newest photo, as stored
    pub when: String,
    #[serde(skip)]
    pub latest: DateTime<Utc>,
    pub count: usize,
}

/// A photo annotated for the detail view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoDetail {
    #[serde(flatten)]
    pub photo: PhotoRecord,
    /// `None` when no map credential is configured
    pub map_url: Option<String>,
}

/// Data supplied by the capture screen for a new photo
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPhoto {
    pub uri: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub acc: Option<f64>,
    #[serde(default)]
    pub session_id: Option<String>,
    /// Capture time when replaying an existing history; now when absent
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Signed-in user profile stored under `denro:user`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenroUser {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub region: Option<String>,
    pub id_number: Option<String>,
}

impl DenroUser {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2024-01-01T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T18:00:00+08:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T10:00:00.000Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T10:00:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-01-01"),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_stored_photo_without_session_id() {
        let stored: StoredPhoto = serde_json::from_str(
            r#"{"id":3,"uri":"file:///3.jpg","lat":14.5,"lon":121.0,"createdAt":"2024-01-01T10:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(stored.acc, None);
        assert_eq!(stored.session_id, None);

        let record = PhotoRecord::try_from(stored).unwrap();
        assert_eq!(record.folder_key(), FolderKey::Legacy(3));
        assert_eq!(record.folder_key().to_string(), "legacy-3");
    }

    #[test]
    fn test_record_rejects_bad_timestamp() {
        let stored = StoredPhoto {
            id: 1,
            uri: "a".to_string(),
            lat: 0.0,
            lon: 0.0,
            acc: None,
            created_at: "not a date".to_string(),
            session_id: None,
        };

        let err = PhotoRecord::try_from(stored).unwrap_err();
        assert!(err.contains("createdAt"));
    }

    #[test]
    fn test_record_serializes_wire_names() {
        let stored = StoredPhoto {
            id: 7,
            uri: "file:///7.jpg".to_string(),
            lat: 1.5,
            lon: 2.5,
            acc: Some(4.0),
            created_at: "2024-03-02T08:00:00Z".to_string(),
            session_id: Some("S1".to_string()),
        };
        let record = PhotoRecord::try_from(stored.clone()).unwrap();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["createdAt"], "2024-03-02T08:00:00Z");
        assert_eq!(value["sessionId"], "S1");
        assert!(value.get("capturedAt").is_none());
        assert_eq!(record.to_stored(), stored);
    }

    #[test]
    fn test_new_photo_accepts_history_timestamp() {
        let replay: NewPhoto = serde_json::from_str(
            r#"{"uri":"a","lat":1.0,"lon":2.0,"createdAt":"2023-06-01T07:30:00Z","sessionId":"S"}"#,
        )
        .unwrap();
        assert_eq!(replay.created_at.as_deref(), Some("2023-06-01T07:30:00Z"));

        let capture: NewPhoto = serde_json::from_str(r#"{"uri":"a","lat":1.0,"lon":2.0}"#).unwrap();
        assert_eq!(capture.created_at, None);
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user = DenroUser {
            id: 1,
            username: "jdelacruz".to_string(),
            role: "Evaluator".to_string(),
            first_name: "Juan".to_string(),
            last_name: "Dela Cruz".to_string(),
            region: Some("IV-A".to_string()),
            id_number: None,
        };
        assert_eq!(user.display_name(), "Juan Dela Cruz");

        user.first_name.clear();
        user.last_name.clear();
        assert_eq!(user.display_name(), "jdelacruz");
    }
}
