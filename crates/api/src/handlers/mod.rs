pub mod assignment;
pub mod auth;
pub mod invoice;
pub mod phase;
pub mod project;
pub mod report;
pub mod staffing;
pub mod task;
pub mod time_entry;
pub mod user;

use staffledger_core::error::CoreError;
use staffledger_core::types::DbId;
use staffledger_db::repositories::ProjectRepo;
use staffledger_db::DbPool;

use crate::error::{AppError, AppResult};

/// Fail with 404 unless the project exists.
pub(crate) async fn ensure_project_exists(pool: &DbPool, project_id: DbId) -> AppResult<()> {
    if ProjectRepo::exists(pool, project_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))
    }
}
