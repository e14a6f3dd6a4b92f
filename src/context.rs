use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{IssueTrackerService, WorkflowDispatchService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub issue_tracker: Arc<dyn IssueTrackerService>,
    pub workflow_dispatch: Arc<dyn WorkflowDispatchService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        issue_tracker: Arc<dyn IssueTrackerService>,
        workflow_dispatch: Arc<dyn WorkflowDispatchService>,
    ) -> Self {
        Self {
            config,
            issue_tracker,
            workflow_dispatch,
        }
    }
}
