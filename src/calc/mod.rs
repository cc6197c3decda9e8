pub mod days;
pub mod pagination;

pub use days::{clamp_day, day_options, max_days_in_month};
pub use pagination::{PAGE_SIZE, page_from_cursor, page_label, shows_controls, showing_label};
