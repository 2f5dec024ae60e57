//! Leads list screen: filters, results and per-row delete.

use crate::api::errors::ApiResult;
use crate::api::{LeadApi, LeadListQuery};
use crate::domain::lead::Lead;
use crate::domain::types::LeadId;
use crate::dto::lead::LeadRow;
use crate::forms::filters::LeadFilterForm;
use crate::views::{Confirm, DELETE_PROMPT, RequestToken, RequestTracker, ViewStatus};

/// A list load that has been dispatched and awaits its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    pub token: RequestToken,
    pub query: LeadListQuery,
}

#[derive(Debug, Default)]
pub struct LeadListView {
    /// Filter inputs as currently typed; only read on apply.
    pub form: LeadFilterForm,
    status: ViewStatus,
    leads: Vec<Lead>,
    error_message: Option<String>,
    deleting_id: Option<LeadId>,
    requests: RequestTracker,
}

impl LeadListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ViewStatus {
        self.status
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn deleting_id(&self) -> Option<LeadId> {
        self.deleting_id
    }

    pub fn rows(&self) -> Vec<LeadRow> {
        self.leads
            .iter()
            .map(|lead| LeadRow::new(lead, self.deleting_id == Some(lead.id)))
            .collect()
    }

    fn dispatch(&mut self, query: LeadListQuery) -> PendingLoad {
        self.status = ViewStatus::Loading;
        self.error_message = None;
        PendingLoad {
            token: self.requests.issue(),
            query,
        }
    }

    /// Starts the unfiltered load issued when the screen is shown.
    pub fn begin_mount(&mut self) -> PendingLoad {
        self.dispatch(LeadListQuery::new())
    }

    /// Validates the filter form and starts a load with it.
    ///
    /// Returns `None` without touching the network when the form is invalid;
    /// the view is then in the error state and keeps the previous results.
    pub fn begin_load(&mut self) -> Option<PendingLoad> {
        match LeadListQuery::try_from(&self.form) {
            Ok(query) => Some(self.dispatch(query)),
            Err(err) => {
                log::debug!("Rejected lead filters locally: {err}");
                self.status = ViewStatus::Error;
                self.error_message = Some(err.to_string());
                None
            }
        }
    }

    /// Applies a load result unless a newer load or teardown superseded it.
    pub fn finish_load(&mut self, token: RequestToken, result: ApiResult<Vec<Lead>>) -> bool {
        if !self.requests.is_live(token) {
            log::debug!("Discarding superseded leads load");
            return false;
        }
        match result {
            Ok(leads) => {
                self.leads = leads;
                self.status = ViewStatus::Success;
            }
            Err(err) => {
                log::error!("Failed to load leads: {err}");
                self.leads.clear();
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
        let pending = self.begin_mount();
        let result = api.list_leads(&pending.query).await;
        self.finish_load(pending.token, result);
    }

    pub async fn apply_filters<A>(&mut self, api: &A)
    where
        A: LeadApi + ?Sized,
    {
        if let Some(pending) = self.begin_load() {
            let result = api.list_leads(&pending.query).await;
            self.finish_load(pending.token, result);
        }
    }

    /// Marks the row busy. Only one delete runs at a time.
    pub fn begin_delete(&mut self, id: LeadId) -> bool {
        if self.deleting_id.is_some() || self.requests.is_torn_down() {
            return false;
        }
        self.deleting_id = Some(id);
        self.error_message = None;
        true
    }

    /// Removes the row on success (or when the lead is already gone) without
    /// reloading; on failure keeps the list and surfaces the error.
    pub fn finish_delete(&mut self, id: LeadId, result: ApiResult<()>) -> bool {
        if self.requests.is_torn_down() {
            log::debug!("Discarding delete result of lead {id} after teardown");
            return false;
        }
        if self.deleting_id == Some(id) {
            self.deleting_id = None;
        }
        match result {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                log::info!("Lead {id} was already deleted");
            }
            Err(err) => {
                log::error!("Failed to delete lead {id}: {err}");
                self.error_message = Some(err.to_string());
                return false;
            }
        }
        self.leads.retain(|lead| lead.id != id);
        true
    }

    /// Asks for confirmation, then deletes the lead. Returns whether the row
    /// was removed.
    pub async fn delete<A, C>(&mut self, api: &A, confirm: &C, id: LeadId) -> bool
    where
        A: LeadApi + ?Sized,
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(DELETE_PROMPT) || !self.begin_delete(id) {
            return false;
        }
        let result = api.delete_lead(id).await;
        self.finish_delete(id, result)
    }

    pub fn teardown(&mut self) {
        self.requests.teardown();
    }
}
