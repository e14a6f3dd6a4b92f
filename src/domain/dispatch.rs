/// Parameters for one workflow-dispatch call. Built per release entry and
/// consumed immediately; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    pub owner: String,
    pub workflow_repo: String,
    pub workflow_id: String,
    pub base_branch: String,
    pub repo: String,
    pub release_branch: String,
}
