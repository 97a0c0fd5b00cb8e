use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum IdeError {
    #[error("catalogue build task failed: {0}")]
    CatalogueBuild(#[source] JoinError),

    #[error("completion task failed: {0}")]
    Evaluation(#[source] JoinError),
}
