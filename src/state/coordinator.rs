use crate::api::{FetchError, HolidayRequest};
use crate::calc::pagination::{self, page_from_cursor};
use crate::data::{HolidayRecord, PaginatedResponse};
use crate::state::QueryCriteria;
use tracing::{debug, info, warn};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch holidays. Please try again later.";

/// Pagination metadata of the last successful page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageState {
    pub current_page: u32,
    pub total_count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl PageState {
    pub fn total_pages(&self) -> u64 {
        pagination::total_pages(self.total_count)
    }

    pub fn shows_controls(&self) -> bool {
        self.total_pages() > 1
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn showing_label(&self) -> String {
        pagination::showing_label(self.current_page, self.total_count)
    }

    pub fn page_label(&self) -> String {
        pagination::page_label(self.current_page, self.total_count)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Loading,
    Success {
        records: Vec<HolidayRecord>,
        page: PageState,
    },
    Failure(String),
}

/// A request the coordinator wants performed. The token must be handed back
/// with the result to `FetchCoordinator::complete`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: u64,
    pub request: HolidayRequest,
}

/// Owns the committed criteria, the current page and the single visible
/// outcome. Only the completion carrying the latest token is applied.
#[derive(Debug)]
pub struct FetchCoordinator {
    criteria: QueryCriteria,
    page: u32,
    latest_token: u64,
    outcome: FetchOutcome,
}

impl FetchCoordinator {
    pub fn new(criteria: QueryCriteria) -> Self {
        FetchCoordinator {
            criteria,
            page: 1,
            latest_token: 0,
            outcome: FetchOutcome::Loading,
        }
    }

    pub fn criteria(&self) -> &QueryCriteria {
        &self.criteria
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    pub fn outcome(&self) -> &FetchOutcome {
        &self.outcome
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.outcome, FetchOutcome::Loading)
    }

    pub fn records(&self) -> &[HolidayRecord] {
        match &self.outcome {
            FetchOutcome::Success { records, .. } => records,
            _ => &[],
        }
    }

    pub fn page_state(&self) -> Option<&PageState> {
        match &self.outcome {
            FetchOutcome::Success { page, .. } => Some(page),
            _ => None,
        }
    }

    /// Issues the request for the current (criteria, page) pair. Any request
    /// issued earlier becomes stale.
    pub fn issue(&mut self) -> FetchTicket {
        self.latest_token += 1;
        self.outcome = FetchOutcome::Loading;
        let request = HolidayRequest::from_criteria(&self.criteria, self.page);
        info!(
            token = self.latest_token,
            page = self.page,
            search = self.criteria.is_search(),
            "issuing holiday fetch"
        );
        FetchTicket {
            token: self.latest_token,
            request,
        }
    }

    /// New committed criteria always restart at page 1.
    pub fn submit(&mut self, criteria: QueryCriteria) -> FetchTicket {
        self.criteria = criteria;
        self.page = 1;
        self.issue()
    }

    pub fn retry(&mut self) -> FetchTicket {
        self.issue()
    }

    pub fn go_to_next_page(&mut self) -> Option<FetchTicket> {
        let cursor = self.page_state()?.next.clone()?;
        self.page = page_from_cursor(&cursor);
        Some(self.issue())
    }

    pub fn go_to_previous_page(&mut self) -> Option<FetchTicket> {
        let cursor = self.page_state()?.previous.clone()?;
        self.page = page_from_cursor(&cursor);
        Some(self.issue())
    }

    /// Applies a finished fetch. Returns false when the token is stale and
    /// the result was dropped.
    pub fn complete(&mut self, token: u64, result: Result<PaginatedResponse, FetchError>) -> bool {
        if token != self.latest_token {
            debug!(token, latest = self.latest_token, "discarding stale fetch result");
            return false;
        }
        self.outcome = match result {
            Ok(resp) => {
                info!(
                    token,
                    count = resp.count,
                    returned = resp.results.len(),
                    "holiday fetch succeeded"
                );
                FetchOutcome::Success {
                    page: PageState {
                        current_page: self.page,
                        total_count: resp.count,
                        next: resp.next,
                        previous: resp.previous,
                    },
                    records: resp.results,
                }
            }
            Err(e) => {
                warn!(token, error = %e, "holiday fetch failed");
                FetchOutcome::Failure(FETCH_FAILED_MESSAGE.to_string())
            }
        };
        true
    }
}
