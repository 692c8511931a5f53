//! User and credential models.

use serde::Serialize;
use sqlx::FromRow;
use staffledger_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    /// `contributor` or `manager`.
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a user. The role is already validated and defaulted.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub role: String,
}

/// A row from the `user_creds` table.
///
/// Contains the password hash -- never serialize this to API responses.
#[derive(Debug, Clone, FromRow)]
pub struct UserCreds {
    pub user_id: DbId,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
