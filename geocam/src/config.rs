//! Application configuration constants
//!
//! Central location for store keys, map thumbnail defaults, validation
//! boundaries and display strings used throughout the application.

// ===== Local Store Keys =====

/// JSON array of captured photo records
pub const PHOTOS_KEY: &str = "photos";
/// JSON-serialized signed-in user profile
pub const USER_KEY: &str = "denro:user";
/// Opaque session token
pub const TOKEN_KEY: &str = "denro:token";

// ===== Static Map Thumbnails =====

/// Static map image endpoint
pub const STATIC_MAP_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/staticmap";

/// Environment variable that overrides the stored map credential
pub const STATIC_MAPS_KEY_ENV: &str = "GEOCAM_STATIC_MAPS_KEY";

/// Default thumbnail width in logical pixels
pub const DEFAULT_MAP_WIDTH: u32 = 220;
/// Default thumbnail height in logical pixels
pub const DEFAULT_MAP_HEIGHT: u32 = 140;
/// Default zoom; street level reads clearly at thumbnail size
pub const DEFAULT_MAP_ZOOM: u8 = 16;
/// Default render scale (2 = retina)
pub const DEFAULT_MAP_SCALE: u8 = 2;
pub const DEFAULT_MAP_TYPE: &str = "roadmap";
pub const DEFAULT_MARKER_COLOR: &str = "red";

/// Highest zoom level the map service renders
pub const MAX_MAP_ZOOM: u8 = 21;

/// Largest edge the map service accepts, in pixels
pub const MAX_MAP_DIMENSION: u32 = 640;

/// Render scales the map service accepts
pub const VALID_MAP_SCALES: &[u8] = &[1, 2];

pub const VALID_MAP_TYPES: &[&str] = &["roadmap", "satellite", "terrain", "hybrid"];

// ===== Display =====

/// Decimal places shown for coordinates on photo cards
pub const COORDINATE_PRECISION: usize = 7;

/// `M/D/YYYY, h:mm:ss AM`
pub const DISPLAY_DATETIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

pub const EMPTY_COLLECTION_MESSAGE: &str = "No photos yet.";
pub const PHOTO_CREDIT: &str = "© DENR GeoCam app";
pub const MAP_UNAVAILABLE_TITLE: &str = "Map unavailable";
pub const MAP_UNAVAILABLE_HINT: &str = "Add API key";

/// Shown on the home screen when nobody is signed in locally
pub const GUEST_DISPLAY_NAME: &str = "Guest";
pub const GUEST_ROLE: &str = "Enumerator";
