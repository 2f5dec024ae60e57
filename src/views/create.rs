//! Create-lead screen.

use crate::api::LeadApi;
use crate::api::errors::ApiResult;
use crate::domain::lead::{Lead, NewLead};
use crate::forms::create::{CreateLeadForm, IdentifierMode};
use crate::routes::Route;
use crate::views::{Navigator, RequestTracker, ViewStatus};

#[derive(Debug, Default)]
pub struct CreateLeadView {
    pub form: CreateLeadForm,
    status: ViewStatus,
    error_message: Option<String>,
    requests: RequestTracker,
}

impl CreateLeadView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ViewStatus {
        self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.status == ViewStatus::Loading
    }

    /// Switches the identifier the lead is created from. The inactive field
    /// keeps its text but is never sent.
    pub fn set_mode(&mut self, mode: IdentifierMode) {
        self.form.mode = mode;
        self.error_message = None;
    }

    /// Validates the form and marks the view as submitting.
    ///
    /// Returns `None` while a submit is already running, or when the form is
    /// invalid; in the latter case the view shows the error and no request
    /// must be sent.
    pub fn begin_submit(&mut self) -> Option<NewLead> {
        if self.is_submitting() || self.requests.is_torn_down() {
            return None;
        }
        match NewLead::try_from(&self.form) {
            Ok(new_lead) => {
                self.status = ViewStatus::Loading;
                self.error_message = None;
                Some(new_lead)
            }
            Err(err) => {
                log::debug!("Rejected new lead locally: {err}");
                self.status = ViewStatus::Error;
                self.error_message = Some(err.to_string());
                None
            }
        }
    }

    /// Opens the created lead on success. On failure the form keeps its
    /// values so the user can correct and resubmit.
    pub fn finish_submit<N>(&mut self, result: ApiResult<Lead>, navigator: &N) -> bool
    where
        N: Navigator + ?Sized,
    {
        if self.requests.is_torn_down() {
            log::debug!("Discarding create result after teardown");
            return false;
        }
        match result {
            Ok(lead) => {
                log::info!("Created lead {} ({})", lead.id, lead.tracking_id);
                self.status = ViewStatus::Success;
                navigator.navigate(Route::LeadDetail(lead.id));
                true
            }
            Err(err) => {
                log::error!("Failed to create lead: {err}");
                self.status = ViewStatus::Error;
                self.error_message = Some(err.to_string());
                false
            }
        }
    }

    pub async fn submit<A, N>(&mut self, api: &A, navigator: &N) -> bool
    where
        A: LeadApi + ?Sized,
        N: Navigator + ?Sized,
    {
        let Some(new_lead) = self.begin_submit() else {
            return false;
        };
        let result = api.create_lead(&new_lead).await;
        self.finish_submit(result, navigator)
    }

    pub fn teardown(&mut self) {
        self.requests.teardown();
    }
}
