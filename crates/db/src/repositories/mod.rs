//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-statement writes open
//! their own transaction.

pub mod invoice_repo;
pub mod phase_repo;
pub mod project_repo;
pub mod report_repo;
pub mod staffing_repo;
pub mod task_assignment_repo;
pub mod task_repo;
pub mod time_entry_repo;
pub mod user_repo;

pub use invoice_repo::InvoiceRepo;
pub use phase_repo::PhaseRepo;
pub use project_repo::ProjectRepo;
pub use report_repo::ReportRepo;
pub use staffing_repo::StaffingRepo;
pub use task_assignment_repo::TaskAssignmentRepo;
pub use task_repo::TaskRepo;
pub use time_entry_repo::TimeEntryRepo;
pub use user_repo::UserRepo;
