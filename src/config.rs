use std::env;
use std::path::PathBuf;

/// Workflow id for 'Create Release Branch and RC Tag'.
const DEFAULT_WORKFLOW_ID: &str = "66795811";
/// Repository hosting the release workflow for all products.
const DEFAULT_WORKFLOW_REPO: &str = "pdk-devops";
const DEFAULT_JIRA_BASE_URL: &str = "https://jira.mdsol.com";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_MAPPING_FILE: &str = "product_repo_mappings.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github_token: Option<String>,
    pub jira_token: Option<String>,
    pub jira_email: Option<String>,
    pub jira_base_url: String,
    pub github_api_url: String,
    pub workflow_id: String,
    pub workflow_repo: String,
    pub mapping_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            github_token: non_empty_var("GH_TOKEN"),
            jira_token: non_empty_var("JIRA_TOKEN"),
            jira_email: non_empty_var("JIRA_EMAIL"),
            jira_base_url: non_empty_var("JIRA_BASE_URL")
                .unwrap_or_else(|| DEFAULT_JIRA_BASE_URL.to_string()),
            github_api_url: non_empty_var("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            workflow_id: non_empty_var("RELEASE_WORKFLOW_ID")
                .unwrap_or_else(|| DEFAULT_WORKFLOW_ID.to_string()),
            workflow_repo: non_empty_var("RELEASE_WORKFLOW_REPO")
                .unwrap_or_else(|| DEFAULT_WORKFLOW_REPO.to_string()),
            mapping_path: non_empty_var("PRODUCT_MAPPINGS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MAPPING_FILE)),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
