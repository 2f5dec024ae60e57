//! `reqwest` implementation of [`LeadApi`].

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::errors::{ApiError, ApiResult, error_from_response};
use crate::api::{LeadApi, LeadListQuery, build_tracking_url};
use crate::domain::event::{Event, NewEvent};
use crate::domain::lead::{Lead, LeadIdentifier, NewLead};
use crate::domain::types::LeadId;
use crate::models::config::ClientConfig;

/// Wire body for `POST /leads`; exactly one identifier is ever set.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct CreateLeadBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    lead_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    campaign_name: Option<&'a str>,
}

impl<'a> From<&'a NewLead> for CreateLeadBody<'a> {
    fn from(new_lead: &'a NewLead) -> Self {
        let (lead_id, email) = match &new_lead.identifier {
            LeadIdentifier::TrackingId(tracking_id) => (Some(tracking_id.as_str()), None),
            LeadIdentifier::Email(email) => (None, Some(email.as_str())),
        };
        Self {
            lead_id,
            email,
            campaign_name: new_lead.campaign_name.as_ref().map(|c| c.as_str()),
        }
    }
}

/// HTTP client bound to one backend base URL.
#[derive(Clone, Debug)]
pub struct HttpLeadApi {
    client: Client,
    base_url: String,
}

impl HttpLeadApi {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        log::debug!("{method} {path}");
        self.client.request(method, self.url(path))
    }

    /// Sends the request; `Ok(None)` means the backend answered 204.
    async fn send<T>(&self, builder: RequestBuilder) -> ApiResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await.map_err(|err| {
            log::error!("Request to backend failed: {err}");
            ApiError::from(err)
        })?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let body = response.bytes().await?;
        if !status.is_success() {
            let err = error_from_response(status, &body);
            log::error!("Backend answered {status}: {err}");
            return Err(err);
        }
        if body.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice(&body).map(Some).map_err(|err| {
            log::error!("Failed to decode backend response: {err}");
            ApiError::Transport(format!("Invalid response payload: {err}"))
        })
    }

    async fn send_expecting<T>(&self, builder: RequestBuilder) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        self.send(builder)
            .await?
            .ok_or_else(|| ApiError::Transport("Empty response from backend".to_string()))
    }
}

impl LeadApi for HttpLeadApi {
    async fn health(&self) -> ApiResult<serde_json::Value> {
        let body = self.send(self.request(Method::GET, "/health")).await?;
        Ok(body.unwrap_or(serde_json::Value::Null))
    }

    async fn list_leads(&self, query: &LeadListQuery) -> ApiResult<Vec<Lead>> {
        let query_string = query.to_query_string();
        let path = if query_string.is_empty() {
            "/leads".to_string()
        } else {
            format!("/leads?{query_string}")
        };
        let leads: Option<Vec<Lead>> = self.send(self.request(Method::GET, &path)).await?;
        Ok(leads.unwrap_or_default())
    }

    async fn get_lead(&self, id: LeadId) -> ApiResult<Lead> {
        self.send_expecting(self.request(Method::GET, &format!("/leads/{id}")))
            .await
    }

    async fn create_lead(&self, new_lead: &NewLead) -> ApiResult<Lead> {
        let body = CreateLeadBody::from(new_lead);
        self.send_expecting(self.request(Method::POST, "/leads").json(&body))
            .await
    }

    async fn delete_lead(&self, id: LeadId) -> ApiResult<()> {
        let _: Option<serde_json::Value> = self
            .send(self.request(Method::DELETE, &format!("/leads/{id}")))
            .await?;
        Ok(())
    }

    async fn create_event(&self, event: &NewEvent) -> ApiResult<Event> {
        self.send_expecting(self.request(Method::POST, "/events").json(event))
            .await
    }

    fn tracking_url(&self, campaign_name: &str, tracking_id: &str) -> String {
        build_tracking_url(&self.base_url, campaign_name, tracking_id)
    }
}
