pub mod coordinator;
pub mod query;
pub mod search_form;
pub mod worker;

pub use coordinator::{FetchCoordinator, FetchOutcome, FetchTicket, PageState};
pub use query::QueryCriteria;
pub use search_form::SearchForm;
pub use worker::{FetchCompletion, FetchWorker};
