//! Fixed option lists offered by the search form.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
}

pub const COUNTRIES: [Country; 10] = [
    Country { code: "US", name: "United States" },
    Country { code: "GB", name: "United Kingdom" },
    Country { code: "CA", name: "Canada" },
    Country { code: "AU", name: "Australia" },
    Country { code: "DE", name: "Germany" },
    Country { code: "FR", name: "France" },
    Country { code: "JP", name: "Japan" },
    Country { code: "CN", name: "China" },
    Country { code: "IN", name: "India" },
    Country { code: "BR", name: "Brazil" },
];

pub fn country_by_code(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HolidayType {
    National,
    Local,
    Religious,
    Observance,
}

impl HolidayType {
    pub const ALL: [HolidayType; 4] = [
        HolidayType::National,
        HolidayType::Local,
        HolidayType::Religious,
        HolidayType::Observance,
    ];

    /// Value sent as the `type` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            HolidayType::National => "national",
            HolidayType::Local => "local",
            HolidayType::Religious => "religious",
            HolidayType::Observance => "observance",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

pub(crate) fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

pub fn month_label(month: Option<u32>) -> &'static str {
    month.map(month_name).unwrap_or("All Months")
}

pub fn type_label(t: Option<HolidayType>) -> &'static str {
    t.map(HolidayType::as_str).unwrap_or("All Types")
}

/// Years offered by the selector: five back, four ahead.
pub fn year_options(current_year: i32) -> Vec<i32> {
    (current_year - 5..current_year + 5).collect()
}
