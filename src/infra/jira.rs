use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::Deserialize;

use crate::domain::release::ReleaseTicket;
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

pub struct JiraClient {
    http: Client,
    base_url: String,
    email: Option<String>,
    token: Option<String>,
}

impl JiraClient {
    pub fn new(base_url: String, email: Option<String>, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            email,
            token,
        }
    }

    /// With an email configured the token is treated as an API token and the
    /// pair is encoded; without one the token is taken as already encoded.
    /// No credentials at all means no header; the request then fails with an
    /// authorization error from Jira rather than locally.
    fn auth_header(&self) -> Option<String> {
        match (&self.email, &self.token) {
            (Some(email), Some(token)) => {
                let encoded = BASE64_STANDARD.encode(format!("{email}:{token}"));
                Some(format!("Basic {encoded}"))
            }
            (None, Some(token)) => Some(format!("Basic {token}")),
            _ => None,
        }
    }

    fn issue_endpoint(&self, key: &str) -> String {
        format!(
            "{}/rest/api/latest/issue/{key}",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    async fn fetch_release_ticket(&self, key: &str) -> AppResult<ReleaseTicket> {
        let mut request = self
            .http
            .get(self.issue_endpoint(key))
            .header(CONTENT_TYPE, "application/json");
        if let Some(header) = self.auth_header() {
            request = request.header(AUTHORIZATION, header);
        }

        let response = request
            .send()
            .await
            .map_err(|err| AppError::IssueTracker(format!("failed to call Jira: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::IssueTracker(format!(
                "Jira responded with {status} for issue {key}"
            )));
        }

        let payload: JiraIssueResponse = response.json().await.map_err(|err| {
            AppError::IssueTracker(format!("failed to parse Jira response: {err}"))
        })?;

        Ok(payload.into_release_ticket(key))
    }
}

#[derive(Deserialize)]
struct JiraIssueResponse {
    #[serde(default)]
    fields: JiraIssueFields,
}

/// `customfield_15702` is the custom field holding the list of product
/// releases on a ticket.
#[derive(Default, Deserialize)]
struct JiraIssueFields {
    #[serde(rename = "customfield_15702", default)]
    releases: Option<Vec<JiraReleaseEntry>>,
}

#[derive(Deserialize)]
struct JiraReleaseEntry {
    name: String,
}

impl JiraIssueResponse {
    fn into_release_ticket(self, key: &str) -> ReleaseTicket {
        let release_names = self
            .fields
            .releases
            .unwrap_or_default()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        ReleaseTicket {
            key: key.to_string(),
            release_names,
        }
    }
}
