//! Filter inputs of the leads list.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::api::LeadListQuery;
use crate::forms::FormError;

/// Text inputs as typed by the user; blank means "no filter".
#[derive(Clone, Debug, Default, Deserialize, Validate, PartialEq, Eq)]
#[serde(default)]
pub struct LeadFilterForm {
    #[validate(length(max = 320))]
    pub email: String,
    #[validate(length(max = 128))]
    pub tracking_id: String,
    /// Inclusive lower bound on `created_at`, `YYYY-MM-DD`.
    pub from_date: String,
    /// Inclusive upper bound on `created_at`, `YYYY-MM-DD`.
    pub to_date: String,
}

fn parse_date(raw: &str, field: &'static str) -> Result<Option<NaiveDate>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| FormError::InvalidDate(field))
}

impl TryFrom<&LeadFilterForm> for LeadListQuery {
    type Error = FormError;

    fn try_from(form: &LeadFilterForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let mut query = LeadListQuery::new()
            .email(form.email.as_str())
            .tracking_id(form.tracking_id.as_str());
        if let Some(from) = parse_date(&form.from_date, "From date")? {
            query = query.from_date(from);
        }
        if let Some(to) = parse_date(&form.to_date, "To date")? {
            query = query.to_date(to);
        }
        if query.has_inverted_range() {
            return Err(FormError::DateRangeOrder);
        }

        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_form_yields_unfiltered_query() {
        let query = LeadListQuery::try_from(&LeadFilterForm::default()).unwrap();
        assert_eq!(query, LeadListQuery::new());
    }

    #[test]
    fn fields_are_trimmed_and_dates_parsed() {
        let form = LeadFilterForm {
            email: " a@example.com ".to_string(),
            tracking_id: String::new(),
            from_date: "2024-01-01".to_string(),
            to_date: "2024-01-31".to_string(),
        };
        let query = LeadListQuery::try_from(&form).unwrap();
        assert_eq!(query.email.as_deref(), Some("a@example.com"));
        assert_eq!(query.tracking_id, None);
        assert_eq!(
            query.to_query_string(),
            "email=a%40example.com&from_date=2024-01-01&to_date=2024-01-31"
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        let form = LeadFilterForm {
            from_date: "2024-02-01".to_string(),
            to_date: "2024-01-01".to_string(),
            ..LeadFilterForm::default()
        };
        assert!(matches!(
            LeadListQuery::try_from(&form),
            Err(FormError::DateRangeOrder)
        ));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let form = LeadFilterForm {
            to_date: "31/01/2024".to_string(),
            ..LeadFilterForm::default()
        };
        let err = LeadListQuery::try_from(&form).unwrap_err();
        assert_eq!(err.to_string(), "To date must be a date in YYYY-MM-DD format.");
    }

    #[test]
    fn deserializes_partial_input() {
        let form: LeadFilterForm =
            serde_json::from_value(serde_json::json!({"tracking_id": "t1"})).unwrap();
        assert_eq!(form.tracking_id, "t1");
        assert!(form.email.is_empty());
    }
}
