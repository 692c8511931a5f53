use crate::types::DbId;

/// Domain-level failures shared by every crate in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A row looked up by primary key does not exist.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A lookup by something other than the primary key came back empty.
    ///
    /// The message is returned to the client verbatim.
    #[error("Not found: {0}")]
    Missing(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
