//! Services module
//!
//! Business logic services that coordinate between commands and the local store.

pub mod photos;
pub mod session;
pub mod settings;
pub mod static_map;

pub use photos::{PhotoService, PhotoSet};
pub use session::SessionService;
pub use settings::{AppSettings, MapSettings, SettingsService};
pub use static_map::static_map_url;
