//! Handler for `POST /login`.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use staffledger_core::error::CoreError;
use staffledger_core::types::DbId;
use staffledger_db::repositories::UserRepo;

use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: DbId,
    pub role: String,
}

/// POST /api/v1/login
///
/// Unknown email is 404; a user without credentials or a wrong password is 401.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Missing("User not found".into())))?;

    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid credentials".into()));

    let creds = UserRepo::find_credentials(&state.pool, user.id)
        .await?
        .ok_or_else(invalid)?;

    let matches = verify_password(&input.password, &creds.password_hash)
        .map_err(|e| AppError::InternalError(format!("Stored password hash is unusable: {e}")))?;
    if !matches {
        tracing::info!(user_id = user.id, "Rejected login with wrong password");
        return Err(invalid());
    }

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");
    Ok(Json(LoginResponse {
        user_id: user.id,
        role: user.role,
    }))
}
