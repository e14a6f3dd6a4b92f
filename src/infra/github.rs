use async_trait::async_trait;
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, AUTHORIZATION},
};
use serde::Serialize;

use crate::domain::dispatch::DispatchRequest;
use crate::error::{AppError, AppResult};
use crate::services::WorkflowDispatchService;

pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_url: String, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_url,
            token,
        }
    }

    fn dispatch_endpoint(&self, request: &DispatchRequest) -> String {
        format!(
            "{}/repos/{}/{}/actions/workflows/{}/dispatches",
            self.api_url.trim_end_matches('/'),
            request.owner,
            request.workflow_repo,
            request.workflow_id
        )
    }
}

#[async_trait]
impl WorkflowDispatchService for GitHubClient {
    async fn dispatch_workflow(&self, request: &DispatchRequest) -> AppResult<()> {
        let body = WorkflowDispatchBody::new(request);
        let mut http_request = self
            .http
            .post(self.dispatch_endpoint(request))
            .header(ACCEPT, "application/vnd.github.v3+json")
            .json(&body);
        if let Some(token) = &self.token {
            http_request = http_request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = http_request
            .send()
            .await
            .map_err(|err| AppError::WorkflowDispatch(format!("failed to call GitHub: {err}")))?;

        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::WorkflowDispatch(format!(
                "GitHub responded with {status}: {body}"
            )));
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct WorkflowDispatchBody {
    #[serde(rename = "ref")]
    git_ref: String,
    inputs: WorkflowDispatchInputs,
}

#[derive(Serialize)]
struct WorkflowDispatchInputs {
    owner: String,
    repo: String,
    base_branch: String,
    release_branch: String,
}

impl WorkflowDispatchBody {
    fn new(request: &DispatchRequest) -> Self {
        Self {
            git_ref: request.base_branch.clone(),
            inputs: WorkflowDispatchInputs {
                owner: request.owner.clone(),
                repo: request.repo.clone(),
                base_branch: request.base_branch.clone(),
                release_branch: request.release_branch.clone(),
            },
        }
    }
}
