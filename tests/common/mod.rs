//! In-memory stand-in for the lead tracking backend used by the
//! integration tests. Filtering, ordering and conflict rules follow the
//! real service.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use lead_tracker::api::errors::{ApiError, ApiResult};
use lead_tracker::api::{LeadApi, LeadListQuery, build_tracking_url};
use lead_tracker::domain::event::{Event, NewEvent};
use lead_tracker::domain::lead::{Lead, LeadIdentifier, NewLead};
use lead_tracker::domain::types::{EventId, LeadId};
use lead_tracker::routes::Route;
use lead_tracker::views::{Confirm, Navigator};
use uuid::Uuid;

pub const BASE_URL: &str = "https://leads.test";

#[derive(Default)]
pub struct InMemoryBackend {
    leads: RefCell<Vec<Lead>>,
    pub requests: Cell<usize>,
    /// Served instead of the next regular response.
    outage: RefCell<Option<ApiError>>,
}

pub fn lead_at(tracking_id: &str, created_at: DateTime<Utc>) -> Lead {
    Lead {
        id: LeadId::from_uuid(Uuid::new_v4()),
        tracking_id: tracking_id.to_string(),
        campaign_name: None,
        email: String::new(),
        created_at,
        opened_at: None,
        first_click_at: None,
    }
}

pub fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

impl InMemoryBackend {
    pub fn seeded(leads: Vec<Lead>) -> Self {
        let backend = Self::default();
        backend.leads.replace(leads);
        backend
    }

    pub fn leads(&self) -> Vec<Lead> {
        self.leads.borrow().clone()
    }

    pub fn fail_next(&self, err: ApiError) {
        self.outage.replace(Some(err));
    }

    fn serve(&self) -> ApiResult<()> {
        self.requests.set(self.requests.get() + 1);
        match self.outage.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn not_found() -> ApiError {
        ApiError::NotFound("Lead not found".to_string())
    }

    fn conflict(detail: &str) -> ApiError {
        ApiError::Rejected {
            status: 409,
            message: detail.to_string(),
        }
    }
}

impl LeadApi for InMemoryBackend {
    async fn health(&self) -> ApiResult<serde_json::Value> {
        self.serve()?;
        Ok(serde_json::json!({"status": "ok"}))
    }

    async fn list_leads(&self, query: &LeadListQuery) -> ApiResult<Vec<Lead>> {
        self.serve()?;
        if query.has_inverted_range() {
            return Err(ApiError::Rejected {
                status: 400,
                message: "from_date must be on or before to_date".to_string(),
            });
        }
        let from = query.from_date.map(|d| d.and_time(NaiveTime::MIN).and_utc());
        let to = query
            .to_date
            .and_then(|d| d.and_hms_micro_opt(23, 59, 59, 999_999))
            .map(|d| d.and_utc());
        let mut leads: Vec<Lead> = self
            .leads
            .borrow()
            .iter()
            .filter(|lead| query.email.as_deref().is_none_or(|e| lead.email == e))
            .filter(|lead| {
                query
                    .tracking_id
                    .as_deref()
                    .is_none_or(|t| lead.tracking_id == t)
            })
            .filter(|lead| from.is_none_or(|from| lead.created_at >= from))
            .filter(|lead| to.is_none_or(|to| lead.created_at <= to))
            .cloned()
            .collect();
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leads)
    }

    async fn get_lead(&self, id: LeadId) -> ApiResult<Lead> {
        self.serve()?;
        self.leads
            .borrow()
            .iter()
            .find(|lead| lead.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn create_lead(&self, new_lead: &NewLead) -> ApiResult<Lead> {
        self.serve()?;
        let (tracking_id, email) = match &new_lead.identifier {
            LeadIdentifier::TrackingId(tracking_id) => (tracking_id.to_string(), String::new()),
            LeadIdentifier::Email(email) => (Uuid::new_v4().simple().to_string(), email.to_string()),
        };
        let mut leads = self.leads.borrow_mut();
        if leads.iter().any(|lead| lead.tracking_id == tracking_id) {
            return Err(Self::conflict("Lead with this tracking_id already exists"));
        }
        if !email.is_empty() && leads.iter().any(|lead| lead.email == email) {
            return Err(Self::conflict("Lead with this email already exists"));
        }
        let mut lead = lead_at(&tracking_id, Utc::now());
        lead.email = email;
        lead.campaign_name = new_lead.campaign_name.as_ref().map(|c| c.to_string());
        leads.push(lead.clone());
        Ok(lead)
    }

    async fn delete_lead(&self, id: LeadId) -> ApiResult<()> {
        self.serve()?;
        let mut leads = self.leads.borrow_mut();
        let before = leads.len();
        leads.retain(|lead| lead.id != id);
        if leads.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }

    async fn create_event(&self, event: &NewEvent) -> ApiResult<Event> {
        self.serve()?;
        if !self
            .leads
            .borrow()
            .iter()
            .any(|lead| lead.tracking_id == event.tracking_id.as_str())
        {
            return Err(Self::not_found());
        }
        Ok(Event {
            id: EventId::from_uuid(Uuid::new_v4()),
            tracking_id: event.tracking_id.to_string(),
            event_type: event.event_type,
            created_at: Utc::now(),
        })
    }

    fn tracking_url(&self, campaign_name: &str, tracking_id: &str) -> String {
        build_tracking_url(BASE_URL, campaign_name, tracking_id)
    }
}

/// Navigator that remembers every route it was sent to.
#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: RefCell<Vec<Route>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.borrow_mut().push(route);
    }
}

/// Confirmation prompt with a fixed answer.
pub struct AlwaysAnswer(pub bool);

impl Confirm for AlwaysAnswer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
