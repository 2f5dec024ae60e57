//! Transport layer talking to the lead tracking backend.

use chrono::NaiveDate;

use crate::api::errors::ApiResult;
use crate::domain::event::{Event, NewEvent};
use crate::domain::lead::{Lead, NewLead};
use crate::domain::types::LeadId;

pub mod errors;
pub mod http;
#[cfg(test)]
pub mod test;

/// Campaign segment used in tracking URLs when a lead has no campaign.
pub const DEFAULT_CAMPAIGN: &str = "default";

/// Normalized filter for `GET /leads`. Absent fields are not sent at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadListQuery {
    pub email: Option<String>,
    pub tracking_id: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

fn non_blank(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl LeadListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = non_blank(email);
        self
    }

    pub fn tracking_id(mut self, tracking_id: impl Into<String>) -> Self {
        self.tracking_id = non_blank(tracking_id);
        self
    }

    pub fn from_date(mut self, date: NaiveDate) -> Self {
        self.from_date = Some(date);
        self
    }

    pub fn to_date(mut self, date: NaiveDate) -> Self {
        self.to_date = Some(date);
        self
    }

    /// Whether both bounds are present and out of order.
    pub fn has_inverted_range(&self) -> bool {
        matches!((self.from_date, self.to_date), (Some(from), Some(to)) if from > to)
    }

    /// Query parameters in wire order, skipping every absent field.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(email) = &self.email {
            pairs.push(("email", email.clone()));
        }
        if let Some(tracking_id) = &self.tracking_id {
            pairs.push(("tracking_id", tracking_id.clone()));
        }
        if let Some(from) = self.from_date {
            pairs.push(("from_date", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to_date {
            pairs.push(("to_date", to.format("%Y-%m-%d").to_string()));
        }
        pairs
    }

    /// Percent-encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Builds the public click-tracking redirect `GET /go/{campaign}/{tracking_id}`.
///
/// Pure URL construction: both segments are encoded independently and an
/// empty campaign falls back to [`DEFAULT_CAMPAIGN`].
pub fn build_tracking_url(base_url: &str, campaign_name: &str, tracking_id: &str) -> String {
    let campaign = match campaign_name.trim() {
        "" => DEFAULT_CAMPAIGN,
        name => name,
    };
    format!(
        "{}/go/{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(campaign),
        urlencoding::encode(tracking_id)
    )
}

/// One operation per backend capability.
#[allow(async_fn_in_trait)]
pub trait LeadApi {
    async fn health(&self) -> ApiResult<serde_json::Value>;
    async fn list_leads(&self, query: &LeadListQuery) -> ApiResult<Vec<Lead>>;
    async fn get_lead(&self, id: LeadId) -> ApiResult<Lead>;
    async fn create_lead(&self, new_lead: &NewLead) -> ApiResult<Lead>;
    async fn delete_lead(&self, id: LeadId) -> ApiResult<()>;
    async fn create_event(&self, event: &NewEvent) -> ApiResult<Event>;
    fn tracking_url(&self, campaign_name: &str, tracking_id: &str) -> String;
}
