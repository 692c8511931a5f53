//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` input DTOs for inserts, updates and list merges

pub mod invoice;
pub mod phase;
pub mod project;
pub mod report;
pub mod staffing;
pub mod task;
pub mod task_assignment;
pub mod time_entry;
pub mod user;
