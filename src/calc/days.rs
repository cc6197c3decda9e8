/// Gregorian rule: divisible by 4 and not by 100, unless also divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of selectable days for a month of a year. With no month selected
/// every day up to 31 is allowed. The year is the form's raw text; one that
/// does not parse is treated as a common year.
pub fn max_days_in_month(month: Option<u32>, year: &str) -> u32 {
    let Some(month) = month else {
        return 31;
    };
    match month {
        2 => {
            let leap = year.trim().parse::<i32>().map(is_leap_year).unwrap_or(false);
            if leap { 29 } else { 28 }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Day selector entries: `None` ("All Days") first, then 1..=max.
pub fn day_options(month: Option<u32>, year: &str) -> Vec<Option<u32>> {
    let max = max_days_in_month(month, year);
    std::iter::once(None)
        .chain((1..=31).filter(|d| *d <= max).map(Some))
        .collect()
}

/// Drops a day that no longer exists in the selected month/year.
pub fn clamp_day(day: Option<u32>, month: Option<u32>, year: &str) -> Option<u32> {
    day.filter(|d| *d <= max_days_in_month(month, year))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_leap_year_rules() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
    }

    #[test]
    fn test_thirty_day_months() {
        for m in [4, 6, 9, 11] {
            assert_eq!(max_days_in_month(Some(m), "2025"), 30, "month {m}");
            assert_eq!(max_days_in_month(Some(m), "2024"), 30, "month {m}");
        }
    }

    #[test]
    fn test_thirty_one_day_months() {
        for m in [1, 3, 5, 7, 8, 10, 12] {
            assert_eq!(max_days_in_month(Some(m), "2025"), 31, "month {m}");
        }
    }

    #[test]
    fn test_february() {
        assert_eq!(max_days_in_month(Some(2), "2024"), 29);
        assert_eq!(max_days_in_month(Some(2), "2023"), 28);
        assert_eq!(max_days_in_month(Some(2), "1900"), 28);
        assert_eq!(max_days_in_month(Some(2), "2000"), 29);
    }

    #[test]
    fn test_february_unparsable_year_is_common() {
        assert_eq!(max_days_in_month(Some(2), ""), 28);
        assert_eq!(max_days_in_month(Some(2), "20x4"), 28);
    }

    #[test]
    fn test_no_month_allows_31() {
        assert_eq!(max_days_in_month(None, "2023"), 31);
    }

    #[test]
    fn test_day_options_leap_february() {
        let opts = day_options(Some(2), "2024");
        assert_eq!(opts.first(), Some(&None));
        assert_eq!(opts.last(), Some(&Some(29)));
        assert_eq!(opts.len(), 30);
    }

    #[test]
    fn test_day_options_all_months() {
        let opts = day_options(None, "2024");
        assert_eq!(opts.len(), 32);
        assert_eq!(opts.last(), Some(&Some(31)));
    }

    #[test]
    fn test_clamp_day() {
        assert_eq!(clamp_day(Some(29), Some(2), "2023"), None);
        assert_eq!(clamp_day(Some(29), Some(2), "2024"), Some(29));
        assert_eq!(clamp_day(Some(31), Some(4), "2024"), None);
        assert_eq!(clamp_day(None, Some(4), "2024"), None);
        assert_eq!(clamp_day(Some(31), None, "2024"), Some(31));
    }
}
