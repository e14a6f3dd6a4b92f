use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("mapping file error: {0}")]
    Mapping(String),
    #[error("issue tracker error: {0}")]
    IssueTracker(String),
    #[error("workflow dispatch error: {0}")]
    WorkflowDispatch(String),
    #[error("validation error: {0}")]
    Validation(String),
}

pub type AppResult<T> = Result<T, AppError>;
