//! Raw user input backing the views, and its conversion into domain values.

use thiserror::Error;
use validator::ValidationErrors;

pub mod create;
pub mod filters;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Enter a tracking ID (lead_id).")]
    MissingTrackingId,

    #[error("Enter an email.")]
    MissingEmail,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid tracking id")]
    InvalidTrackingId,

    #[error("invalid campaign name")]
    InvalidCampaignName,

    #[error("{0} must be a date in YYYY-MM-DD format.")]
    InvalidDate(&'static str),

    #[error("From date must be on or before to date.")]
    DateRangeOrder,
}
