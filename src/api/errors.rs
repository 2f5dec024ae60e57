use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Failures surfaced by the transport layer. `Display` yields the message
/// shown to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Payload rejected before dispatch, or by the backend with 422.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Any other 4xx carrying a structured detail.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Network failure, server failure or undecodable response.
    #[error("{0}")]
    Transport(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

/// `detail` of a backend error body: a single message or a list of
/// field-level validation entries.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Fields(Vec<Value>),
    Other(Value),
}

impl ErrorDetail {
    /// Collapses the detail into one display string.
    pub fn into_message(self) -> String {
        match self {
            ErrorDetail::Message(message) => message,
            ErrorDetail::Fields(fields) => fields
                .iter()
                .map(|field| match field.get("msg").and_then(Value::as_str) {
                    Some(msg) if !msg.is_empty() => msg.to_string(),
                    _ => field.to_string(),
                })
                .collect::<Vec<_>>()
                .join("; "),
            ErrorDetail::Other(Value::Null) => String::new(),
            ErrorDetail::Other(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<ErrorDetail>,
}

/// Maps a non-success response into the error taxonomy, preferring the
/// structured detail and falling back to the status text.
pub fn error_from_response(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.detail)
        .map(ErrorDetail::into_message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_u16().to_string())
        });

    match status {
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation(message),
        s if s.is_client_error() => ApiError::Rejected {
            status: s.as_u16(),
            message,
        },
        _ => ApiError::Transport(message),
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(format!("Request failed: {err}"))
    }
}
