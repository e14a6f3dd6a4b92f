use async_trait::async_trait;

use crate::domain::dispatch::DispatchRequest;
use crate::error::AppResult;

#[async_trait]
pub trait WorkflowDispatchService: Send + Sync {
    async fn dispatch_workflow(&self, request: &DispatchRequest) -> AppResult<()>;
}
