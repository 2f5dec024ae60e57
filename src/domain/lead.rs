use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date::serde_utc;
use crate::domain::types::{CampaignName, LeadEmail, LeadId, TrackingId};

/// A tracked prospect as returned by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: LeadId,
    pub tracking_id: String,
    #[serde(default)]
    pub campaign_name: Option<String>,
    /// Empty when the lead was created from a tracking id only.
    #[serde(default)]
    pub email: String,
    #[serde(deserialize_with = "serde_utc::deserialize")]
    pub created_at: DateTime<Utc>,
    /// Set once by the first `open` event.
    #[serde(default, deserialize_with = "serde_utc::option::deserialize")]
    pub opened_at: Option<DateTime<Utc>>,
    /// Set once by the first `click` event.
    #[serde(default, deserialize_with = "serde_utc::option::deserialize")]
    pub first_click_at: Option<DateTime<Utc>>,
}

/// Furthest engagement stage a lead has reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Engagement {
    New,
    Opened,
    Clicked,
}

impl Engagement {
    pub fn label(self) -> &'static str {
        match self {
            Engagement::New => "New",
            Engagement::Opened => "Opened",
            Engagement::Clicked => "Clicked",
        }
    }
}

impl Lead {
    pub fn engagement(&self) -> Engagement {
        if self.first_click_at.is_some() {
            Engagement::Clicked
        } else if self.opened_at.is_some() {
            Engagement::Opened
        } else {
            Engagement::New
        }
    }
}

/// The single identifier a new lead is created from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LeadIdentifier {
    TrackingId(TrackingId),
    Email(LeadEmail),
}

/// Validated payload for creating a lead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewLead {
    pub identifier: LeadIdentifier,
    pub campaign_name: Option<CampaignName>,
}

impl NewLead {
    #[must_use]
    pub fn new(identifier: LeadIdentifier, campaign_name: Option<CampaignName>) -> Self {
        Self {
            identifier,
            campaign_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn lead_json() -> serde_json::Value {
        json!({
            "id": "7f1d3c9e-2b64-4c1e-9a55-0c2f7c1d8e90",
            "tracking_id": "t1",
            "campaign_name": null,
            "email": "",
            "created_at": "2024-01-01T00:00:00Z",
            "opened_at": null,
            "first_click_at": null
        })
    }

    #[test]
    fn decodes_backend_payload() {
        let lead: Lead = serde_json::from_value(lead_json()).unwrap();
        assert_eq!(lead.tracking_id, "t1");
        assert_eq!(lead.campaign_name, None);
        assert_eq!(lead.engagement(), Engagement::New);
    }

    #[test]
    fn engagement_prefers_click_over_open() {
        let mut payload = lead_json();
        payload["opened_at"] = json!("2024-01-02T10:00:00+00:00");
        let opened: Lead = serde_json::from_value(payload.clone()).unwrap();
        assert_eq!(opened.engagement(), Engagement::Opened);

        payload["first_click_at"] = json!("2024-01-02T11:00:00");
        let clicked: Lead = serde_json::from_value(payload).unwrap();
        assert_eq!(clicked.engagement(), Engagement::Clicked);
        assert_eq!(clicked.engagement().label(), "Clicked");
    }
}
