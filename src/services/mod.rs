pub mod issue_tracker;
pub mod workflow_dispatch;

pub use issue_tracker::IssueTrackerService;
pub use workflow_dispatch::WorkflowDispatchService;
