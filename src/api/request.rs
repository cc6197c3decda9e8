use crate::api::FetchError;
use crate::data::options::HolidayType;
use crate::state::QueryCriteria;
use reqwest::Url;

/// One page request against the holiday API. Search mode supersedes the
/// month/day/type filters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HolidayRequest {
    List {
        country: String,
        year: String,
        month: Option<u32>,
        day: Option<u32>,
        holiday_type: Option<HolidayType>,
        page: u32,
    },
    Search {
        country: String,
        year: String,
        query: String,
        page: u32,
    },
}

impl HolidayRequest {
    pub fn from_criteria(criteria: &QueryCriteria, page: u32) -> Self {
        match criteria.search_text() {
            Some(query) => HolidayRequest::Search {
                country: criteria.country.clone(),
                year: criteria.year.clone(),
                query: query.to_string(),
                page,
            },
            None => HolidayRequest::List {
                country: criteria.country.clone(),
                year: criteria.year.clone(),
                month: criteria.month,
                day: criteria.day,
                holiday_type: criteria.holiday_type,
                page,
            },
        }
    }

    pub fn page(&self) -> u32 {
        match self {
            HolidayRequest::List { page, .. } | HolidayRequest::Search { page, .. } => *page,
        }
    }

    fn path(&self) -> &'static str {
        match self {
            HolidayRequest::List { .. } => "holidays/",
            HolidayRequest::Search { .. } => "holidays/search",
        }
    }

    /// Query pairs in wire order. Absent filters are left out entirely.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            HolidayRequest::List {
                country,
                year,
                month,
                day,
                holiday_type,
                page,
            } => {
                let mut pairs = vec![("country", country.clone()), ("year", year.clone())];
                if let Some(m) = month {
                    pairs.push(("month", m.to_string()));
                }
                if let Some(d) = day {
                    pairs.push(("day", d.to_string()));
                }
                if let Some(t) = holiday_type {
                    pairs.push(("type", t.as_str().to_string()));
                }
                pairs.push(("page", page.to_string()));
                pairs
            }
            HolidayRequest::Search {
                country,
                year,
                query,
                page,
            } => vec![
                ("country", country.clone()),
                ("year", year.clone()),
                ("query", query.clone()),
                ("page", page.to_string()),
            ],
        }
    }

    pub fn url(&self, base: &str) -> Result<Url, FetchError> {
        let raw = format!("{}/{}", base.trim_end_matches('/'), self.path());
        let mut url = Url::parse(&raw).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))?;
        {
            let mut q = url.query_pairs_mut();
            for (k, v) in self.query_pairs() {
                q.append_pair(k, &v);
            }
        }
        Ok(url)
    }
}
