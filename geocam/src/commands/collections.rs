//! Collection commands
//!
//! Folder list and photo detail screens. Timestamps are shown in the
//! viewer's local time zone.

use super::Route;
use crate::app::AppState;
use crate::config::{
    COORDINATE_PRECISION, DISPLAY_DATETIME_FORMAT, EMPTY_COLLECTION_MESSAGE,
    MAP_UNAVAILABLE_HINT, MAP_UNAVAILABLE_TITLE, PHOTO_CREDIT,
};
use crate::database::{Folder, PhotoDetail};
use crate::error::Result;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use std::fmt::Display;

/// One folder in the collection list
#[derive(Debug, Clone, Serialize)]
pub struct FolderCard {
    pub id: String,
    pub title: String,
    pub cover: String,
    pub count: usize,
    pub count_label: String,
    pub open: Route,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionView {
    pub folders: Vec<FolderCard>,
    /// Set when there is nothing to list
    pub empty_message: Option<&'static str>,
    pub header: Vec<Route>,
    pub bottom_nav: Vec<Route>,
}

/// Map beside each photo; a placeholder when maps are not configured
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapThumbnail {
    Image { url: String },
    Unavailable { title: &'static str, hint: &'static str },
}

impl From<Option<String>> for MapThumbnail {
    fn from(url: Option<String>) -> Self {
        match url {
            Some(url) => MapThumbnail::Image { url },
            None => MapThumbnail::Unavailable {
                title: MAP_UNAVAILABLE_TITLE,
                hint: MAP_UNAVAILABLE_HINT,
            },
        }
    }
}

/// One photo in a detail screen
#[derive(Debug, Clone, Serialize)]
pub struct PhotoCard {
    pub id: i64,
    pub uri: String,
    pub latitude_label: String,
    pub longitude_label: String,
    pub taken_label: String,
    pub credit: &'static str,
    pub map: MapThumbnail,
}

fn display_time<Tz>(at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.with_timezone(tz)
        .format(DISPLAY_DATETIME_FORMAT)
        .to_string()
}

fn count_label(count: usize) -> String {
    if count == 1 {
        "1 photo".to_string()
    } else {
        format!("{} photos", count)
    }
}

fn folder_card<Tz>(folder: Folder, tz: &Tz) -> FolderCard
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    FolderCard {
        title: display_time(&folder.latest, tz),
        count_label: count_label(folder.count),
        open: Route::CollectionDetail {
            id: folder.id.clone(),
        },
        id: folder.id,
        cover: folder.cover,
        count: folder.count,
    }
}

fn photo_card<Tz>(detail: PhotoDetail, tz: &Tz) -> PhotoCard
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let photo = detail.photo;
    PhotoCard {
        id: photo.id,
        latitude_label: format!("Latitude: {:.*}", COORDINATE_PRECISION, photo.lat),
        longitude_label: format!("Longitude: {:.*}", COORDINATE_PRECISION, photo.lon),
        taken_label: display_time(&photo.captured_at, tz),
        credit: PHOTO_CREDIT,
        map: detail.map_url.into(),
        uri: photo.uri,
    }
}

/// List folders, newest first
pub async fn list_collections(state: &AppState) -> Result<CollectionView> {
    list_collections_in(state, &Local).await
}

pub async fn list_collections_in<Tz>(state: &AppState, tz: &Tz) -> Result<CollectionView>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let folders = state.photos().list_folders().await?;
    tracing::debug!("Listing {} folders", folders.len());

    let empty_message = folders.is_empty().then_some(EMPTY_COLLECTION_MESSAGE);

    Ok(CollectionView {
        folders: folders.into_iter().map(|f| folder_card(f, tz)).collect(),
        empty_message,
        header: Route::header_links(),
        bottom_nav: Route::bottom_nav(),
    })
}

/// Photos captured on a calendar day (`YYYY-MM-DD`), oldest first
pub async fn collection_detail(state: &AppState, day: &str) -> Result<Vec<PhotoCard>> {
    collection_detail_in(state, day, &Local).await
}

pub async fn collection_detail_in<Tz>(
    state: &AppState,
    day: &str,
    tz: &Tz,
) -> Result<Vec<PhotoCard>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let details = state.photos().day_detail(day, tz).await?;
    Ok(details.into_iter().map(|d| photo_card(d, tz)).collect())
}

/// Photos in a folder from the collection list, oldest first
pub async fn folder_photos(state: &AppState, folder_id: &str) -> Result<Vec<PhotoCard>> {
    folder_photos_in(state, folder_id, &Local).await
}

pub async fn folder_photos_in<Tz>(
    state: &AppState,
    folder_id: &str,
    tz: &Tz,
) -> Result<Vec<PhotoCard>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let details = state.photos().folder_detail(folder_id).await?;
    Ok(details.into_iter().map(|d| photo_card(d, tz)).collect())
}
