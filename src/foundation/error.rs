/// Convenience result type used across Kindred.
pub type KindredResult<T> = Result<T, KindredError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum KindredError {
    /// Invalid user-provided or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while projecting data-space coordinates into drawable space.
    #[error("projection error: {0}")]
    Projection(String),

    /// Errors while decoding or applying a collaborator state snapshot.
    #[error("snapshot error: {0}")]
    Snapshot(String),

    /// Errors while compiling or executing a paint plan.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KindredError {
    /// Build a [`KindredError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KindredError::Projection`] value.
    pub fn projection(msg: impl Into<String>) -> Self {
        Self::Projection(msg.into())
    }

    /// Build a [`KindredError::Snapshot`] value.
    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot(msg.into())
    }

    /// Build a [`KindredError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
