pub mod client;
pub mod request;

pub use client::{HolidayApi, HttpHolidayApi};
pub use request::HolidayRequest;

/// Every way a page fetch can fail. The TUI shows one generic message for
/// all of them; the variants exist for logs and the one-shot commands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("unexpected response payload: {0}")]
    Malformed(String),

    #[error("invalid request URL {0}")]
    InvalidUrl(String),
}
