//! Lead DTOs with every timestamp already rendered in IST.

use serde::Serialize;

use crate::date::{format_timestamp, or_placeholder};
use crate::domain::lead::Lead;
use crate::domain::types::LeadId;

/// One row of the leads table.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LeadRow {
    pub id: LeadId,
    pub tracking_id: String,
    pub campaign_name: String,
    pub engagement: &'static str,
    pub opened_at: String,
    pub first_click_at: String,
    /// Delete of this row is in flight.
    pub busy: bool,
}

impl LeadRow {
    pub fn new(lead: &Lead, busy: bool) -> Self {
        Self {
            id: lead.id,
            tracking_id: lead.tracking_id.clone(),
            campaign_name: or_placeholder(lead.campaign_name.as_deref()),
            engagement: lead.engagement().label(),
            opened_at: format_timestamp(lead.opened_at.as_ref()),
            first_click_at: format_timestamp(lead.first_click_at.as_ref()),
            busy,
        }
    }
}

/// Aggregated data required to render the lead details screen.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LeadDetailData {
    pub id: LeadId,
    pub tracking_id: String,
    pub campaign_name: String,
    pub email: String,
    pub engagement: &'static str,
    pub created_at: String,
    pub opened_at: String,
    pub first_click_at: String,
    pub tracking_url: String,
}

impl LeadDetailData {
    pub fn new(lead: &Lead, tracking_url: String) -> Self {
        Self {
            id: lead.id,
            tracking_id: lead.tracking_id.clone(),
            campaign_name: or_placeholder(lead.campaign_name.as_deref()),
            email: or_placeholder(Some(lead.email.as_str())),
            engagement: lead.engagement().label(),
            created_at: format_timestamp(Some(&lead.created_at)),
            opened_at: format_timestamp(lead.opened_at.as_ref()),
            first_click_at: format_timestamp(lead.first_click_at.as_ref()),
            tracking_url,
        }
    }
}
