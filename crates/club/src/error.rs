use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("storage error: {0}")]
    Store(#[from] infra::StoreError),

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    /// Fold an error coming out of a domain workflow back into the app error
    /// space. Storage failures keep their variant; everything else a workflow
    /// raises is a human-readable validation message.
    pub fn from_workflow(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        match err.downcast::<infra::StoreError>() {
            Ok(store) => AppError::Store(*store),
            Err(other) => AppError::Validation(other.to_string()),
        }
    }
}
