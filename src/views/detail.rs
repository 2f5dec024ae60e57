//! Single lead screen.

use crate::api::LeadApi;
use crate::api::errors::ApiResult;
use crate::domain::event::{Event, EventType, NewEvent};
use crate::domain::lead::Lead;
use crate::domain::types::{LeadId, TrackingId};
use crate::dto::lead::LeadDetailData;
use crate::routes::Route;
use crate::views::{Confirm, DELETE_PROMPT, Navigator, RequestToken, RequestTracker, ViewStatus};

#[derive(Debug)]
pub struct LeadDetailView {
    id: LeadId,
    status: ViewStatus,
    lead: Option<Lead>,
    error_message: Option<String>,
    deleting: bool,
    last_event: Option<Event>,
    requests: RequestTracker,
}

impl LeadDetailView {
    pub fn new(id: LeadId) -> Self {
        Self {
            id,
            status: ViewStatus::Loading,
            lead: None,
            error_message: None,
            deleting: false,
            last_event: None,
            requests: RequestTracker::default(),
        }
    }

    pub fn id(&self) -> LeadId {
        self.id
    }

    pub fn status(&self) -> ViewStatus {
        self.status
    }

    pub fn lead(&self) -> Option<&Lead> {
        self.lead.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn last_event(&self) -> Option<&Event> {
        self.last_event.as_ref()
    }

    /// Display data, once the lead is loaded.
    pub fn page<A>(&self, api: &A) -> Option<LeadDetailData>
    where
        A: LeadApi + ?Sized,
    {
        self.lead.as_ref().map(|lead| {
            let campaign = lead.campaign_name.as_deref().unwrap_or_default();
            LeadDetailData::new(lead, api.tracking_url(campaign, &lead.tracking_id))
        })
    }

    pub fn begin_load(&mut self) -> RequestToken {
        self.status = ViewStatus::Loading;
        self.error_message = None;
        self.requests.issue()
    }

    /// Applies the load result; a no-op once torn down or superseded.
    pub fn finish_load(&mut self, token: RequestToken, result: ApiResult<Lead>) -> bool {
        if !self.requests.is_live(token) {
            log::debug!("Discarding stale load of lead {}", self.id);
            return false;
        }
        match result {
            Ok(lead) => {
                self.lead = Some(lead);
                self.status = ViewStatus::Success;
            }
            Err(err) => {
                log::error!("Failed to load lead {}: {err}", self.id);
                self.error_message = Some(err.to_string());
                self.status = ViewStatus::Error;
            }
        }
        true
    }

    pub async fn mount<A>(&mut self, api: &A)
    where
        A: LeadApi + ?Sized,
    {
        let token = self.begin_load();
        let result = api.get_lead(self.id).await;
        self.finish_load(token, result);
    }

    pub fn begin_delete(&mut self) -> bool {
        if self.deleting || self.requests.is_torn_down() {
            return false;
        }
        self.deleting = true;
        self.error_message = None;
        true
    }

    /// Returns to the list on success or when the lead is already gone;
    /// otherwise stays here with the error shown.
    pub fn finish_delete<N>(&mut self, result: ApiResult<()>, navigator: &N) -> bool
    where
        N: Navigator + ?Sized,
    {
        if self.requests.is_torn_down() {
            log::debug!("Discarding delete result of lead {} after teardown", self.id);
            return false;
        }
        self.deleting = false;
        match result {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                log::info!("Lead {} was already deleted", self.id);
            }
            Err(err) => {
                log::error!("Failed to delete lead {}: {err}", self.id);
                self.error_message = Some(err.to_string());
                return false;
            }
        }
        navigator.navigate(Route::LeadList);
        true
    }

    pub async fn delete<A, C, N>(&mut self, api: &A, confirm: &C, navigator: &N) -> bool
    where
        A: LeadApi + ?Sized,
        C: Confirm + ?Sized,
        N: Navigator + ?Sized,
    {
        if !confirm.confirm(DELETE_PROMPT) || !self.begin_delete() {
            return false;
        }
        let result = api.delete_lead(self.id).await;
        self.finish_delete(result, navigator)
    }

    /// Records an `open` or `click` event against the loaded lead.
    pub async fn record_event<A>(&mut self, api: &A, event_type: EventType) -> bool
    where
        A: LeadApi + ?Sized,
    {
        let Some(lead) = &self.lead else {
            return false;
        };
        let tracking_id = match TrackingId::new(lead.tracking_id.as_str()) {
            Ok(tracking_id) => tracking_id,
            Err(err) => {
                self.error_message = Some(err.to_string());
                return false;
            }
        };
        self.error_message = None;
        let result = api
            .create_event(&NewEvent::new(tracking_id, event_type))
            .await;
        if self.requests.is_torn_down() {
            return false;
        }
        match result {
            Ok(event) => {
                log::info!("Recorded {} event for lead {}", event.event_type, self.id);
                self.last_event = Some(event);
                true
            }
            Err(err) => {
                log::error!("Failed to record {event_type} event: {err}");
                self.error_message = Some(err.to_string());
                false
            }
        }
    }

    pub fn teardown(&mut self) {
        self.requests.teardown();
    }
}
