//! Repository for the `users` and `user_creds` tables.

use sqlx::PgPool;
use staffledger_core::types::DbId;

use crate::models::user::{CreateUser, User, UserCreds};

const COLUMNS: &str = "id, email, name, role, created_at, updated_at";

const CREDS_COLUMNS: &str = "user_id, password_hash, created_at, updated_at";

/// Provides CRUD operations for users and their credentials.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user and, when a hash is given, its credential row.
    ///
    /// Both rows are written in one transaction. A duplicate email fails
    /// with the `uq_users_email` unique violation.
    pub async fn create(
        pool: &PgPool,
        input: &CreateUser,
        password_hash: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO users (email, name, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.role)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(hash) = password_hash {
            sqlx::query("INSERT INTO user_creds (user_id, password_hash) VALUES ($1, $2)")
                .bind(user.id)
                .bind(hash)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(user)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List users ordered by name, optionally restricted to one role.
    pub async fn list(pool: &PgPool, role: Option<&str>) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE ($1::TEXT IS NULL OR role = $1)
             ORDER BY name, id"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(role)
            .fetch_all(pool)
            .await
    }

    /// Fetch the users with the given ids. Unknown ids are ignored.
    pub async fn list_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, User>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// The credential row for a user, if one was ever set.
    pub async fn find_credentials(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserCreds>, sqlx::Error> {
        let query = format!("SELECT {CREDS_COLUMNS} FROM user_creds WHERE user_id = $1");
        sqlx::query_as::<_, UserCreds>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
