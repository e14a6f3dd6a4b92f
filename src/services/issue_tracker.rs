use async_trait::async_trait;

use crate::domain::release::ReleaseTicket;
use crate::error::AppResult;

#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    async fn fetch_release_ticket(&self, key: &str) -> AppResult<ReleaseTicket>;
}
