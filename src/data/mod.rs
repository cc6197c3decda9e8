pub mod app_settings;
pub mod holiday;
pub mod options;
pub mod persistence;

pub use app_settings::AppSettings;
pub use holiday::{HolidayRecord, PaginatedResponse};
