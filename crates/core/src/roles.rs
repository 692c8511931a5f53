//! User role names.
//!
//! These must match the `ck_users_role` check constraint in the users migration.

use crate::error::CoreError;

pub const ROLE_CONTRIBUTOR: &str = "contributor";
pub const ROLE_MANAGER: &str = "manager";

/// Role assigned when a user is created without one.
pub const DEFAULT_ROLE: &str = ROLE_CONTRIBUTOR;

pub const VALID_ROLES: &[&str] = &[ROLE_CONTRIBUTOR, ROLE_MANAGER];

/// Reject anything that is not a known role name.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "role must be one of {}, got '{role}'",
            VALID_ROLES.join(", ")
        )))
    }
}
