use crate::calc::{clamp_day, day_options, max_days_in_month};
use crate::data::options::{COUNTRIES, HolidayType, year_options};
use crate::state::QueryCriteria;

/// Draft values of the search form. Nothing here reaches the coordinator
/// until `submit` hands out a `QueryCriteria` snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchForm {
    country: String,
    year: String,
    month: Option<u32>,
    day: Option<u32>,
    holiday_type: Option<HolidayType>,
    search_query: String,
    /// Years the selector steps through, centred on the starting year.
    years: Vec<i32>,
}

impl SearchForm {
    pub fn new(country: &str, year: &str) -> Self {
        SearchForm {
            country: country.to_string(),
            year: year.to_string(),
            month: None,
            day: None,
            holiday_type: None,
            search_query: String::new(),
            years: year
                .trim()
                .parse::<i32>()
                .map(year_options)
                .unwrap_or_default(),
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn day(&self) -> Option<u32> {
        self.day
    }

    pub fn holiday_type(&self) -> Option<HolidayType> {
        self.holiday_type
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn max_days(&self) -> u32 {
        max_days_in_month(self.month, &self.year)
    }

    /// Day selector entries for the current month/year.
    pub fn day_options(&self) -> Vec<Option<u32>> {
        day_options(self.month, &self.year)
    }

    // ── Field setters ────────────────────────────────────────────────────────

    pub fn set_year(&mut self, year: &str) {
        self.year = year.to_string();
        self.revalidate_day();
    }

    pub fn set_month(&mut self, month: Option<u32>) {
        self.month = month.filter(|m| (1..=12).contains(m));
        self.revalidate_day();
    }

    /// Sets the day; a day the current month/year cannot hold is stored as
    /// unset.
    pub fn set_day(&mut self, day: Option<u32>) {
        self.day = day.filter(|d| (1..=self.max_days()).contains(d));
    }

    fn revalidate_day(&mut self) {
        self.day = clamp_day(self.day, self.month, &self.year);
    }

    // ── Selector cycling (Left/Right in the TUI) ─────────────────────────────

    pub fn cycle_country(&mut self, forward: bool) {
        let idx = COUNTRIES.iter().position(|c| c.code == self.country);
        let next = step_index(idx, COUNTRIES.len(), forward);
        self.country = COUNTRIES[next].code.to_string();
    }

    pub fn cycle_month(&mut self, forward: bool) {
        let options: Vec<Option<u32>> = std::iter::once(None).chain((1..=12).map(Some)).collect();
        let idx = options.iter().position(|m| *m == self.month);
        self.set_month(options[step_index(idx, options.len(), forward)]);
    }

    pub fn cycle_day(&mut self, forward: bool) {
        let options = self.day_options();
        let idx = options.iter().position(|d| *d == self.day);
        self.set_day(options[step_index(idx, options.len(), forward)]);
    }

    pub fn cycle_holiday_type(&mut self, forward: bool) {
        let options: Vec<Option<HolidayType>> = std::iter::once(None)
            .chain(HolidayType::ALL.into_iter().map(Some))
            .collect();
        let idx = options.iter().position(|t| *t == self.holiday_type);
        self.holiday_type = options[step_index(idx, options.len(), forward)];
    }

    /// Steps through the offered years, wrapping at either end. A typed year
    /// outside that range moves by one; a year that is not a number, or one
    /// already at the edge of `i32`, is left alone.
    pub fn step_year(&mut self, forward: bool) {
        let Ok(y) = self.year.trim().parse::<i32>() else {
            return;
        };
        let next = match self.years.iter().position(|v| *v == y) {
            Some(i) => Some(self.years[step_index(Some(i), self.years.len(), forward)]),
            None if forward => y.checked_add(1),
            None => y.checked_sub(1),
        };
        if let Some(next) = next {
            self.set_year(&next.to_string());
        }
    }

    // ── Text entry ───────────────────────────────────────────────────────────

    pub fn push_year_char(&mut self, c: char) {
        if c.is_ascii_digit() {
            let mut year = self.year.clone();
            year.push(c);
            self.set_year(&year);
        }
    }

    pub fn pop_year_char(&mut self) {
        let mut year = self.year.clone();
        year.pop();
        self.set_year(&year);
    }

    pub fn push_query_char(&mut self, c: char) {
        self.search_query.push(c);
    }

    pub fn pop_query_char(&mut self) {
        self.search_query.pop();
    }

    pub fn submit(&self) -> QueryCriteria {
        QueryCriteria {
            country: self.country.clone(),
            year: self.year.clone(),
            month: self.month,
            day: self.day,
            holiday_type: self.holiday_type,
            search_query: if self.search_query.is_empty() {
                None
            } else {
                Some(self.search_query.clone())
            },
        }
    }
}

/// Wrapping step through a list of `len` options. An unknown current value
/// starts from the first entry.
fn step_index(current: Option<usize>, len: usize, forward: bool) -> usize {
    match current {
        None => 0,
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
    }
}
