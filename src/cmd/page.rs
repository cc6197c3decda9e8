use crate::api::{HolidayApi, HolidayRequest, HttpHolidayApi};
use crate::calc::{clamp_day, page_from_cursor, page_label, showing_label, shows_controls};
use crate::data::options::{HolidayType, country_by_code};
use crate::data::{AppSettings, PaginatedResponse};
use crate::state::QueryCriteria;
use anyhow::{Context, Result, bail};
use tracing::warn;
use std::time::Duration;

/// Builds the committed criteria for a one-shot `list`/`search` command.
/// An impossible day is dropped the same way the form drops it.
pub(crate) fn criteria_for(
    country: &str,
    year: &str,
    month: Option<u32>,
    day: Option<u32>,
    holiday_type: Option<HolidayType>,
    query: Option<&str>,
) -> Result<QueryCriteria> {
    let Some(c) = country_by_code(country) else {
        bail!("Unknown country code '{}'.", country);
    };
    let clamped = clamp_day(day, month, year);
    if let (Some(d), None) = (day, clamped) {
        warn!(day = d, "day does not exist in the selected month/year, ignoring it");
    }
    let mut criteria = QueryCriteria::new(c.code, year);
    criteria.month = month;
    criteria.day = clamped;
    criteria.holiday_type = holiday_type;
    criteria.search_query = query.map(str::to_string).filter(|q| !q.is_empty());
    Ok(criteria)
}

pub fn run(settings: &AppSettings, criteria: &QueryCriteria, page: u32) -> Result<()> {
    let api = HttpHolidayApi::new(&settings.base_url, Duration::from_secs(settings.timeout_secs))
        .context("failed to build HTTP client")?;
    let resp = fetch_page(&api, criteria, page)?;
    write_page(criteria, page, &resp, &mut std::io::stdout())
}

pub(crate) fn fetch_page(
    api: &dyn HolidayApi,
    criteria: &QueryCriteria,
    page: u32,
) -> Result<PaginatedResponse> {
    let request = HolidayRequest::from_criteria(criteria, page);
    api.fetch(&request)
        .with_context(|| format!("failed to fetch page {} of holidays", request.page()))
}

pub(crate) fn write_page<W: std::io::Write>(
    criteria: &QueryCriteria,
    page: u32,
    resp: &PaginatedResponse,
    out: &mut W,
) -> Result<()> {
    let country = country_by_code(&criteria.country)
        .map(|c| c.name)
        .unwrap_or(criteria.country.as_str());
    match criteria.search_text() {
        Some(q) => writeln!(out, "Holidays for {} {} matching \"{}\"", country, criteria.year, q)?,
        None => writeln!(out, "Holidays for {} {}", country, criteria.year)?,
    }
    writeln!(out, "---")?;
    if resp.results.is_empty() {
        writeln!(out, "  No holidays found")?;
    } else {
        writeln!(out, "  {:<20} {:<36} {}", "Date", "Name", "Type")?;
        for h in &resp.results {
            writeln!(out, "  {:<20} {:<36} {}", h.date.long(), h.name, h.types_label())?;
        }
    }
    writeln!(out, "---")?;
    if resp.count > 0 {
        writeln!(out, "{}", showing_label(page, resp.count))?;
    }
    if shows_controls(resp.count) {
        writeln!(out, "{}", page_label(page, resp.count))?;
    }
    if let Some(prev) = &resp.previous {
        writeln!(out, "Previous: --page {}", page_from_cursor(prev))?;
    }
    if let Some(next) = &resp.next {
        writeln!(out, "Next: --page {}", page_from_cursor(next))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::holiday::sample;
    use crate::state::worker::tests::FakeApi;

    fn render(criteria: &QueryCriteria, page: u32, resp: &PaginatedResponse) -> String {
        let mut buf = Vec::new();
        write_page(criteria, page, resp, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_criteria_for_rejects_unknown_country() {
        assert!(criteria_for("ZZ", "2025", None, None, None, None).is_err());
    }

    #[test]
    fn test_criteria_for_normalises_country_and_drops_bad_day() {
        let c = criteria_for("us", "2023", Some(2), Some(29), None, None).unwrap();
        assert_eq!(c.country, "US");
        assert_eq!(c.day, None);
        assert_eq!(c.month, Some(2));
    }

    #[test]
    fn test_criteria_for_empty_query_is_list_mode() {
        let c = criteria_for("US", "2025", None, None, None, Some("")).unwrap();
        assert!(!c.is_search());
    }

    #[test]
    fn test_write_page_first_of_five() {
        let c = QueryCriteria::new("US", "2025");
        let resp = PaginatedResponse {
            count: 45,
            next: Some("http://x/api/holidays/?country=US&page=2".to_string()),
            previous: None,
            results: vec![sample("New Year's Day", 2025, 1, 1)],
        };
        let out = render(&c, 1, &resp);
        assert!(out.contains("Holidays for United States 2025"));
        assert!(out.contains("January 1, 2025"));
        assert!(out.contains("New Year's Day"));
        assert!(out.contains("Showing 1 to 10 of 45 results"));
        assert!(out.contains("Page 1 of 5"));
        assert!(out.contains("Next: --page 2"));
        assert!(!out.contains("Previous:"));
    }

    #[test]
    fn test_write_page_empty() {
        let c = QueryCriteria::new("GB", "2025");
        let out = render(&c, 1, &PaginatedResponse::default());
        assert!(out.contains("No holidays found"));
        assert!(!out.contains("Showing"));
        assert!(!out.contains("Page "));
    }

    #[test]
    fn test_write_page_search_header() {
        let mut c = QueryCriteria::new("US", "2025");
        c.search_query = Some("Christmas".to_string());
        let out = render(&c, 1, &PaginatedResponse::default());
        assert!(out.contains("matching \"Christmas\""));
    }

    #[test]
    fn test_fetch_page_uses_search_request() {
        let api = FakeApi::ok();
        let mut c = QueryCriteria::new("US", "2025");
        c.search_query = Some("Christmas".to_string());
        let resp = fetch_page(&api, &c, 2).unwrap();
        assert_eq!(resp.results[0].name, "Page 2");
        let seen = api.seen.lock().unwrap();
        assert!(matches!(seen[0], HolidayRequest::Search { page: 2, .. }));
    }

    #[test]
    fn test_fetch_page_propagates_error() {
        let api = FakeApi::failing();
        let err = fetch_page(&api, &QueryCriteria::new("US", "2025"), 1).unwrap_err();
        assert!(err.to_string().contains("failed to fetch page 1"));
    }

    #[test]
    fn test_fetch_page_error_names_requested_page() {
        let api = FakeApi::failing();
        let mut c = QueryCriteria::new("US", "2025");
        c.search_query = Some("Easter".to_string());
        let err = fetch_page(&api, &c, 3).unwrap_err();
        assert!(err.to_string().contains("failed to fetch page 3"));
    }
}
