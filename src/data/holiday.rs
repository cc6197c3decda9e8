use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HolidayDate {
    pub datetime: DateParts,
    pub iso: String,
}

impl HolidayDate {
    fn naive(&self) -> Option<NaiveDate> {
        let DateParts { year, month, day } = self.datetime;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Long form, e.g. "January 1, 2025". Falls back to the raw ISO string
    /// when the parts are not a real calendar date.
    pub fn long(&self) -> String {
        match self.naive() {
            Some(d) => d.format("%B %-d, %Y").to_string(),
            None => self.iso.clone(),
        }
    }

    /// The part of the long form before the comma, e.g. "January 1".
    pub fn short(&self) -> String {
        let long = self.long();
        match long.split_once(',') {
            Some((head, _)) => head.to_string(),
            None => long,
        }
    }
}

/// One entry of the structured `states` form.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StateEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub abbrev: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<String>,
}

/// The API sends `states` either as a plain string (e.g. "All") or as a
/// list of state objects.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum States {
    Freeform(String),
    Structured(Vec<StateEntry>),
}

impl States {
    pub fn display(&self) -> String {
        match self {
            States::Freeform(s) => s.clone(),
            States::Structured(entries) => entries
                .iter()
                .map(|e| format!("{} - {}", e.abbrev, e.name))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HolidayRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: HolidayDate,
    #[serde(rename = "type", default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub locations: Option<String>,
    #[serde(default)]
    pub states: Option<States>,
}

impl HolidayRecord {
    /// Description with blank strings treated as absent.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn locations(&self) -> Option<&str> {
        self.locations.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn types_label(&self) -> String {
        self.types.join(", ")
    }
}

/// Envelope returned by both the list and the search endpoints.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PaginatedResponse {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<HolidayRecord>,
}

#[cfg(test)]
pub(crate) fn sample(name: &str, year: i32, month: u32, day: u32) -> HolidayRecord {
    HolidayRecord {
        name: name.to_string(),
        description: None,
        date: HolidayDate {
            datetime: DateParts { year, month, day },
            iso: format!("{year:04}-{month:02}-{day:02}"),
        },
        types: vec!["National holiday".to_string()],
        locations: None,
        states: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD_JSON: &str = r#"{
        "name": "Christmas Day",
        "description": "Christmas Day is one of the biggest Christian celebrations.",
        "date": {"iso": "2025-12-25", "datetime": {"year": 2025, "month": 12, "day": 25}},
        "type": ["National holiday", "Christian"],
        "locations": "All",
        "states": "All"
    }"#;

    #[test]
    fn test_record_parses_freeform_states() {
        let r: HolidayRecord = serde_json::from_str(RECORD_JSON).unwrap();
        assert_eq!(r.name, "Christmas Day");
        assert_eq!(r.types, vec!["National holiday", "Christian"]);
        assert_eq!(r.states, Some(States::Freeform("All".to_string())));
        assert_eq!(r.locations(), Some("All"));
    }

    #[test]
    fn test_record_parses_structured_states() {
        let json = r#"{
            "name": "Lincoln's Birthday",
            "description": null,
            "date": {"iso": "2025-02-12", "datetime": {"year": 2025, "month": 2, "day": 12}},
            "type": ["Local holiday"],
            "locations": "US-CT, US-IL",
            "states": [
                {"id": 7, "abbrev": "CT", "name": "Connecticut", "exception": null, "iso": "us-ct"},
                {"id": 14, "abbrev": "IL", "name": "Illinois", "exception": null, "iso": "us-il"}
            ]
        }"#;
        let r: HolidayRecord = serde_json::from_str(json).unwrap();
        let states = r.states.clone().unwrap();
        assert!(matches!(states, States::Structured(ref v) if v.len() == 2));
        assert_eq!(states.display(), "CT - Connecticut, IL - Illinois");
        assert_eq!(r.description(), None);
    }

    #[test]
    fn test_record_rejects_numeric_states() {
        let json = r#"{
            "name": "X",
            "date": {"iso": "2025-01-01", "datetime": {"year": 2025, "month": 1, "day": 1}},
            "type": [],
            "states": 42
        }"#;
        assert!(serde_json::from_str::<HolidayRecord>(json).is_err());
    }

    #[test]
    fn test_optional_fields_may_be_missing() {
        let json = r#"{
            "name": "New Year's Day",
            "date": {"iso": "2025-01-01", "datetime": {"year": 2025, "month": 1, "day": 1}},
            "type": ["National holiday"]
        }"#;
        let r: HolidayRecord = serde_json::from_str(json).unwrap();
        assert!(r.description.is_none());
        assert!(r.locations.is_none());
        assert!(r.states.is_none());
    }

    #[test]
    fn test_blank_description_is_absent() {
        let mut r = sample("Test", 2025, 1, 1);
        r.description = Some("   ".to_string());
        assert_eq!(r.description(), None);
    }

    #[test]
    fn test_long_and_short_date() {
        let r = sample("New Year's Day", 2025, 1, 1);
        assert_eq!(r.date.long(), "January 1, 2025");
        assert_eq!(r.date.short(), "January 1");
    }

    #[test]
    fn test_invalid_date_parts_fall_back_to_iso() {
        let date = HolidayDate {
            datetime: DateParts { year: 2025, month: 2, day: 30 },
            iso: "2025-02-30".to_string(),
        };
        assert_eq!(date.long(), "2025-02-30");
        assert_eq!(date.short(), "2025-02-30");
    }

    #[test]
    fn test_paginated_response_parses_nulls() {
        let json = r#"{"count": 45, "next": "http://x/api/holidays/?page=2", "previous": null, "results": []}"#;
        let resp: PaginatedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.count, 45);
        assert!(resp.next.is_some());
        assert!(resp.previous.is_none());
        assert!(resp.results.is_empty());
    }
}
