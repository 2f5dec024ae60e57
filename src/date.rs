//! Timestamp parsing and display in Indian Standard Time.
//!
//! Every timestamp shown to the user goes through [`format_date`] or
//! [`format_timestamp`] so the rendering is independent of the local timezone
//! of the machine running the client.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Timezone every timestamp is rendered in.
pub const DISPLAY_TZ: Tz = chrono_tz::Asia::Kolkata;

/// Placeholder rendered for absent timestamps and empty text fields.
pub const EMPTY_PLACEHOLDER: &str = "—";

/// Short `en-IN` style date and time, e.g. `1/1/24, 5:30 am`.
const DISPLAY_FORMAT: &str = "%-d/%-m/%y, %-I:%M %P";

/// Parses an ISO-8601 timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Renders an already parsed timestamp in the display timezone.
pub fn format_timestamp(value: Option<&DateTime<Utc>>) -> String {
    match value {
        Some(ts) => ts.with_timezone(&DISPLAY_TZ).format(DISPLAY_FORMAT).to_string(),
        None => EMPTY_PLACEHOLDER.to_string(),
    }
}

/// Renders an ISO-8601 string in the display timezone.
///
/// Absent or blank input yields [`EMPTY_PLACEHOLDER`]; input that is not a
/// timestamp is echoed back unchanged.
pub fn format_date(iso: Option<&str>) -> String {
    match iso.map(str::trim).filter(|s| !s.is_empty()) {
        None => EMPTY_PLACEHOLDER.to_string(),
        Some(raw) => match parse_timestamp(raw) {
            Some(ts) => format_timestamp(Some(&ts)),
            None => raw.to_string(),
        },
    }
}

/// Renders optional free text, substituting the placeholder for blanks.
pub fn or_placeholder(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(EMPTY_PLACEHOLDER)
        .to_string()
}

/// Serde adapters for backend timestamps that may lack an explicit offset.
pub mod serde_utc {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, de::Error};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, de::Error};

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => super::super::parse_timestamp(&raw)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}"))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_render_placeholder() {
        assert_eq!(format_date(None), "—");
        assert_eq!(format_date(Some("  ")), "—");
        assert_eq!(format_timestamp(None), "—");
    }

    #[test]
    fn utc_midnight_renders_in_ist() {
        assert_eq!(format_date(Some("2024-01-01T00:00:00Z")), "1/1/24, 5:30 am");
    }

    #[test]
    fn explicit_offsets_are_normalized() {
        assert_eq!(
            format_date(Some("2024-03-15T12:45:00+02:00")),
            "15/3/24, 4:15 pm"
        );
    }

    #[test]
    fn offsetless_values_are_treated_as_utc() {
        assert_eq!(
            format_date(Some("2024-01-01T18:30:00.123456")),
            "2/1/24, 12:00 am"
        );
    }

    #[test]
    fn unparseable_values_are_echoed() {
        assert_eq!(format_date(Some("yesterday")), "yesterday");
    }

    #[test]
    fn placeholder_for_blank_text() {
        assert_eq!(or_placeholder(Some("DubaiCamp")), "DubaiCamp");
        assert_eq!(or_placeholder(Some("")), "—");
        assert_eq!(or_placeholder(None), "—");
    }
}
