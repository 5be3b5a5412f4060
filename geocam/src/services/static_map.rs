//! Static map thumbnails
//!
//! Builds the image URL shown next to each photo in the detail view.
//! Nothing here performs a request; the image surface fetches the URL
//! and renders its own fallback on failure.

use super::settings::MapSettings;
use crate::config::STATIC_MAP_ENDPOINT;

/// Build the thumbnail URL for a coordinate.
///
/// Returns `None` when no map credential is configured so the caller can
/// show a placeholder instead.
pub fn static_map_url(lat: f64, lon: f64, map: &MapSettings) -> Option<String> {
    let key = map.credential()?;

    let center = format!("{},{}", format_coordinate(lat), format_coordinate(lon));
    let markers = format!("color:{}|{}", map.marker_color, center);

    Some(format!(
        "{}?center={}&zoom={}&size={}x{}&scale={}&maptype={}&markers={}&key={}",
        STATIC_MAP_ENDPOINT,
        center,
        map.zoom,
        map.width,
        map.height,
        map.scale,
        map.map_type,
        urlencoding::encode(&markers),
        urlencoding::encode(key),
    ))
}

/// Shortest round-trip decimal, always with a fractional part (`121.0`).
fn format_coordinate(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_with_credential() {
        let map = MapSettings::default().with_api_key("test-key");

        let url = static_map_url(14.5, 121.0, &map).unwrap();

        assert!(url.starts_with("https://maps.googleapis.com/maps/api/staticmap?"));
        assert!(url.contains("center=14.5,121.0"));
        assert!(url.contains("&zoom=16"));
        assert!(url.contains("&size=220x140"));
        assert!(url.contains("&scale=2"));
        assert!(url.contains("&maptype=roadmap"));
        assert!(url.contains("&markers=color%3Ared%7C14.5%2C121.0"));
        assert!(url.ends_with("&key=test-key"));
    }

    #[test]
    fn test_no_credential_gives_none() {
        assert_eq!(static_map_url(14.5, 121.0, &MapSettings::default()), None);

        let blank = MapSettings::default().with_api_key("");
        assert_eq!(static_map_url(14.5, 121.0, &blank), None);
    }

    #[test]
    fn test_url_follows_settings() {
        let map = MapSettings {
            width: 300,
            height: 200,
            zoom: 12,
            scale: 1,
            map_type: "satellite".to_string(),
            marker_color: "blue".to_string(),
            ..MapSettings::default()
        }
        .with_api_key("k");

        let url = static_map_url(-9.25, 0.0, &map).unwrap();

        assert!(url.contains("center=-9.25,0.0"));
        assert!(url.contains("&zoom=12&size=300x200&scale=1&maptype=satellite"));
        assert!(url.contains("markers=color%3Ablue%7C-9.25%2C0.0"));
    }

    #[test]
    fn test_format_coordinate() {
        assert_eq!(format_coordinate(121.0), "121.0");
        assert_eq!(format_coordinate(14.5), "14.5");
        assert_eq!(format_coordinate(0.0000001), "0.0000001");
        assert_eq!(format_coordinate(-0.5), "-0.5");
    }
}
