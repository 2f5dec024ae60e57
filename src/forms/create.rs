//! Inputs of the create-lead screen.

use serde::Deserialize;
use validator::Validate;

use crate::domain::lead::{LeadIdentifier, NewLead};
use crate::domain::types::{CampaignName, LeadEmail, TrackingId};
use crate::forms::FormError;

/// Which identifier the user is creating the lead from.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierMode {
    #[default]
    LeadId,
    Email,
}

#[derive(Clone, Debug, Default, Deserialize, Validate, PartialEq, Eq)]
#[serde(default)]
/// Form data for creating a lead. Only the field of the active mode is sent.
pub struct CreateLeadForm {
    pub mode: IdentifierMode,
    /// Tracking id the lead is created with.
    #[validate(length(max = 128))]
    pub lead_id: String,
    #[validate(length(max = 320))]
    pub email: String,
    /// Optional; blank is omitted from the request.
    #[validate(length(max = 256))]
    pub campaign_name: String,
}

fn campaign_from(raw: &str) -> Result<Option<CampaignName>, FormError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    CampaignName::new(raw)
        .map(Some)
        .map_err(|_| FormError::InvalidCampaignName)
}

impl TryFrom<&CreateLeadForm> for NewLead {
    type Error = FormError;

    fn try_from(form: &CreateLeadForm) -> Result<Self, Self::Error> {
        form.validate()?;

        // Only the active mode's field is read; the other may hold stale text.
        let identifier = match form.mode {
            IdentifierMode::LeadId => {
                let lead_id = form.lead_id.trim();
                if lead_id.is_empty() {
                    return Err(FormError::MissingTrackingId);
                }
                TrackingId::new(lead_id)
                    .map(LeadIdentifier::TrackingId)
                    .map_err(|_| FormError::InvalidTrackingId)?
            }
            IdentifierMode::Email => {
                let email = form.email.trim();
                if email.is_empty() {
                    return Err(FormError::MissingEmail);
                }
                LeadEmail::new(email)
                    .map(LeadIdentifier::Email)
                    .map_err(|_| FormError::InvalidEmail)?
            }
        };

        Ok(NewLead::new(identifier, campaign_from(&form.campaign_name)?))
    }
}
