use crate::data::options::HolidayType;

/// Committed search/filter selection. Produced by `SearchForm::submit`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryCriteria {
    pub country: String,
    pub year: String,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub holiday_type: Option<HolidayType>,
    pub search_query: Option<String>,
}

impl QueryCriteria {
    pub fn new(country: &str, year: &str) -> Self {
        QueryCriteria {
            country: country.to_string(),
            year: year.to_string(),
            month: None,
            day: None,
            holiday_type: None,
            search_query: None,
        }
    }

    /// The free-text query when it would put the fetch in search mode.
    pub fn search_text(&self) -> Option<&str> {
        self.search_query.as_deref().filter(|q| !q.is_empty())
    }

    pub fn is_search(&self) -> bool {
        self.search_text().is_some()
    }
}
