use crate::api::{FetchError, HolidayRequest};
use crate::data::PaginatedResponse;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Source of holiday pages. The HTTP client is the real one; tests plug in
/// fakes.
pub trait HolidayApi: Send + Sync {
    fn fetch(&self, request: &HolidayRequest) -> Result<PaginatedResponse, FetchError>;
}

pub struct HttpHolidayApi {
    base_url: String,
    http_client: Client,
}

impl HttpHolidayApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self {
            base_url: base_url.to_string(),
            http_client,
        })
    }
}

impl HolidayApi for HttpHolidayApi {
    fn fetch(&self, request: &HolidayRequest) -> Result<PaginatedResponse, FetchError> {
        let url = request.url(&self.base_url)?;
        info!("GET {}", url);

        let response = self.http_client.get(url.clone()).send().map_err(|e| {
            let msg = if e.is_timeout() {
                format!("request timed out: {e}")
            } else if e.is_connect() {
                format!("connection failed: {e}")
            } else {
                format!("network error: {e}")
            };
            warn!("GET {} failed: {}", url, msg);
            FetchError::Transport(msg)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("GET {} returned status {}", url, status.as_u16());
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| FetchError::Transport(format!("failed to read body: {e}")))?;
        let page: PaginatedResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("GET {} returned an unexpected payload: {}", url, e);
            FetchError::Malformed(e.to_string())
        })?;
        debug!(
            "GET {} -> {} of {} results",
            url,
            page.results.len(),
            page.count
        );
        Ok(page)
    }
}
