//! Paths understood by the navigation shell.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

use crate::domain::types::LeadId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("unknown path: {0}")]
    UnknownPath(String),
    #[error("invalid lead id: {0}")]
    InvalidLeadId(String),
}

/// Screens of the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    LeadList,
    CreateLead,
    LeadDetail(LeadId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::LeadList => "/".to_string(),
            Route::CreateLead => "/create".to_string(),
            Route::LeadDetail(id) => format!("/leads/{id}"),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Ok(Route::LeadList),
            "/create" => Ok(Route::CreateLead),
            _ => match trimmed.strip_prefix("/leads/") {
                Some(raw_id) if !raw_id.contains('/') => raw_id
                    .parse::<LeadId>()
                    .map(Route::LeadDetail)
                    .map_err(|_| RouteError::InvalidLeadId(raw_id.to_string())),
                _ => Err(RouteError::UnknownPath(path.to_string())),
            },
        }
    }
}
