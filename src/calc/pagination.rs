pub const PAGE_SIZE: u64 = 10;

/// ceil(count / PAGE_SIZE).
pub fn total_pages(count: u64) -> u64 {
    count.div_ceil(PAGE_SIZE)
}

/// Pagination controls are only worth showing with more than one page.
pub fn shows_controls(count: u64) -> bool {
    total_pages(count) > 1
}

/// Recovers the page number from a next/previous cursor URL.
///
/// The API links the first page without a `page` parameter, so a cursor
/// that has none (or one that does not parse) points at page 1.
pub fn page_from_cursor(cursor: &str) -> u32 {
    let query = match cursor.split_once('?') {
        Some((_, q)) => q,
        None => cursor,
    };
    let query = query.split('#').next().unwrap_or(query);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == "page")
        .and_then(|(_, v)| v.parse::<u32>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

/// 1-based (first, last) item positions shown on `page`.
pub fn showing_range(page: u32, count: u64) -> (u64, u64) {
    let page = u64::from(page.max(1));
    let first = (page - 1) * PAGE_SIZE + 1;
    let last = (page * PAGE_SIZE).min(count);
    (first, last)
}

pub fn showing_label(page: u32, count: u64) -> String {
    let (first, last) = showing_range(page, count);
    format!("Showing {first} to {last} of {count} results")
}

pub fn page_label(page: u32, count: u64) -> String {
    format!("Page {} of {}", page, total_pages(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(11), 2);
        assert_eq!(total_pages(45), 5);
    }

    #[test]
    fn test_controls_shown_only_past_one_page() {
        assert!(!shows_controls(0));
        assert!(!shows_controls(10));
        assert!(shows_controls(11));
    }

    #[test]
    fn test_page_from_cursor_reads_page_param() {
        assert_eq!(
            page_from_cursor("http://localhost:8000/api/holidays/?country=US&page=3&year=2025"),
            3
        );
        assert_eq!(page_from_cursor("/api/holidays/search?query=x&page=12"), 12);
    }

    #[test]
    fn test_page_from_cursor_ignores_similar_keys() {
        assert_eq!(page_from_cursor("http://x/api/holidays/?per_page=50&page=2"), 2);
        assert_eq!(page_from_cursor("http://x/api/holidays/?per_page=50"), 1);
    }

    #[test]
    fn test_page_from_cursor_without_page_is_first() {
        assert_eq!(page_from_cursor("http://x/api/holidays/?country=US&year=2025"), 1);
        assert_eq!(page_from_cursor("http://x/api/holidays/"), 1);
        assert_eq!(page_from_cursor("http://x/api/holidays/?page=abc"), 1);
    }

    #[test]
    fn test_showing_label_first_page() {
        assert_eq!(showing_label(1, 45), "Showing 1 to 10 of 45 results");
    }

    #[test]
    fn test_showing_label_last_partial_page() {
        assert_eq!(showing_label(5, 45), "Showing 41 to 45 of 45 results");
    }

    #[test]
    fn test_page_label() {
        assert_eq!(page_label(2, 45), "Page 2 of 5");
    }
}
