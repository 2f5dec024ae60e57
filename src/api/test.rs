//! Call-recording `LeadApi` used by the controller unit tests.

use std::cell::{Cell, RefCell};

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use crate::api::errors::{ApiError, ApiResult};
use crate::api::{LeadApi, LeadListQuery, build_tracking_url};
use crate::domain::event::{Event, NewEvent};
use crate::domain::lead::{Lead, LeadIdentifier, NewLead};
use crate::domain::types::{EventId, LeadId};

pub const TEST_BASE_URL: &str = "https://api.test";

#[derive(Default)]
pub struct TestLeadApi {
    pub leads: RefCell<Vec<Lead>>,
    pub list_calls: RefCell<Vec<LeadListQuery>>,
    pub get_calls: Cell<usize>,
    pub deleted: RefCell<Vec<LeadId>>,
    pub created: RefCell<Vec<NewLead>>,
    pub events: RefCell<Vec<NewEvent>>,
    /// Returned by the next call instead of its regular result.
    pub fail_next: RefCell<Option<ApiError>>,
}

pub fn lead(tracking_id: &str) -> Lead {
    Lead {
        id: LeadId::from_uuid(Uuid::new_v4()),
        tracking_id: tracking_id.to_string(),
        campaign_name: None,
        email: String::new(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        opened_at: None,
        first_click_at: None,
    }
}

impl TestLeadApi {
    pub fn with_leads(leads: Vec<Lead>) -> Self {
        let api = Self::default();
        api.leads.replace(leads);
        api
    }

    pub fn fail_next(&self, err: ApiError) {
        self.fail_next.replace(Some(err));
    }

    fn take_failure(&self) -> ApiResult<()> {
        match self.fail_next.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn not_found() -> ApiError {
        ApiError::NotFound("Lead not found".to_string())
    }
}

impl LeadApi for TestLeadApi {
    async fn health(&self) -> ApiResult<serde_json::Value> {
        self.take_failure()?;
        Ok(serde_json::json!({"status": "ok"}))
    }

    async fn list_leads(&self, query: &LeadListQuery) -> ApiResult<Vec<Lead>> {
        self.list_calls.borrow_mut().push(query.clone());
        self.take_failure()?;
        Ok(self
            .leads
            .borrow()
            .iter()
            .filter(|lead| {
                query
                    .tracking_id
                    .as_deref()
                    .is_none_or(|t| lead.tracking_id == t)
                    && query.email.as_deref().is_none_or(|e| lead.email == e)
            })
            .cloned()
            .collect())
    }

    async fn get_lead(&self, id: LeadId) -> ApiResult<Lead> {
        self.get_calls.set(self.get_calls.get() + 1);
        self.take_failure()?;
        self.leads
            .borrow()
            .iter()
            .find(|lead| lead.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn create_lead(&self, new_lead: &NewLead) -> ApiResult<Lead> {
        self.created.borrow_mut().push(new_lead.clone());
        self.take_failure()?;
        let mut created = match &new_lead.identifier {
            LeadIdentifier::TrackingId(tracking_id) => lead(tracking_id.as_str()),
            LeadIdentifier::Email(email) => {
                let mut created = lead(&Uuid::new_v4().simple().to_string());
                created.email = email.to_string();
                created
            }
        };
        created.campaign_name = new_lead.campaign_name.as_ref().map(|c| c.to_string());
        self.leads.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn delete_lead(&self, id: LeadId) -> ApiResult<()> {
        self.deleted.borrow_mut().push(id);
        self.take_failure()?;
        let mut leads = self.leads.borrow_mut();
        let before = leads.len();
        leads.retain(|lead| lead.id != id);
        if leads.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }

    async fn create_event(&self, event: &NewEvent) -> ApiResult<Event> {
        self.events.borrow_mut().push(event.clone());
        self.take_failure()?;
        Ok(Event {
            id: EventId::from_uuid(Uuid::new_v4()),
            tracking_id: event.tracking_id.to_string(),
            event_type: event.event_type,
            created_at: Utc::now(),
        })
    }

    fn tracking_url(&self, campaign_name: &str, tracking_id: &str) -> String {
        build_tracking_url(TEST_BASE_URL, campaign_name, tracking_id)
    }
}
