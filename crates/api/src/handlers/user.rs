//! Handlers for the `/users` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use staffledger_core::roles::{validate_role, DEFAULT_ROLE};
use staffledger_core::validation::{validate_email, validate_non_blank};
use staffledger_db::models::user::{CreateUser, User};
use staffledger_db::repositories::UserRepo;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::query::RoleFilter;
use crate::state::AppState;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub role: Option<String>,
    /// When present, stored as an argon2 hash so the user can log in.
    pub password: Option<String>,
}

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<RoleFilter>,
) -> AppResult<Json<Vec<User>>> {
    let users = UserRepo::list(&state.pool, params.role.as_deref()).await?;
    Ok(Json(users))
}

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let email = input.email.trim().to_string();
    validate_email(&email)?;
    validate_non_blank(&input.name, "name")?;

    let role = input.role.unwrap_or_else(|| DEFAULT_ROLE.to_string());
    validate_role(&role)?;

    let password_hash = match input.password.as_deref() {
        Some(password) => {
            validate_password_strength(password, state.config.min_password_length)?;
            Some(
                hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?,
            )
        }
        None => None,
    };

    let create = CreateUser {
        email,
        name: input.name,
        role,
    };
    let user = UserRepo::create(&state.pool, &create, password_hash.as_deref()).await?;

    tracing::info!(user_id = user.id, role = %user.role, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}
