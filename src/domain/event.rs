use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date::serde_utc;
use crate::domain::types::{EventId, TrackingId, TypeConstraintError};

/// An engagement occurrence recorded against a lead's tracking id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub tracking_id: String,
    pub event_type: EventType,
    #[serde(deserialize_with = "serde_utc::deserialize")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Open,
    Click,
}

/// Payload for `POST /events`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NewEvent {
    pub tracking_id: TrackingId,
    pub event_type: EventType,
}

impl NewEvent {
    #[must_use]
    pub fn new(tracking_id: TrackingId, event_type: EventType) -> Self {
        Self {
            tracking_id,
            event_type,
        }
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::Open => write!(f, "open"),
            EventType::Click => write!(f, "click"),
        }
    }
}

impl FromStr for EventType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(EventType::Open),
            "click" => Ok(EventType::Click),
            _ => Err(TypeConstraintError::InvalidEventType),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn new_event_serializes_wire_shape() {
        let event = NewEvent::new(TrackingId::new("t1").unwrap(), EventType::Click);
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"tracking_id": "t1", "event_type": "click"})
        );
    }

    #[test]
    fn event_type_parsing() {
        assert_eq!("Open".parse::<EventType>(), Ok(EventType::Open));
        assert_eq!(
            "bounce".parse::<EventType>(),
            Err(TypeConstraintError::InvalidEventType)
        );
    }
}
