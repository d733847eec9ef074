//! Authentication handlers

use axum::{Json, extract::State};

use crate::auth::{self, Role};
use crate::core::ServerState;
use crate::db::repository::user as user_repo;
use shared::models::{LoginRequest, LoginResponse};
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

/// Log in with username and password, returning a bearer token
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let user = user_repo::find_by_username(&state.pool, &payload.username)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::InvalidCredentials))?;

    if !auth::verify_password(&payload.password, &user.password_hash) {
        tracing::warn!(username = %payload.username, "Failed login attempt");
        return Err(AppError::new(ErrorCode::InvalidCredentials));
    }

    let role: Role = user
        .role
        .parse()
        .map_err(|e: String| AppError::internal(format!("Corrupt role for user {}: {e}", user.id)))?;
    let token = state
        .jwt
        .generate_token(user.id, &user.username, role, user.shop_id)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, username = %user.username, role = %role, "User logged in");

    Ok(Json(ApiResponse::ok(LoginResponse {
        token,
        user_id: user.id,
        username: user.username,
        role: user.role,
        shop_id: user.shop_id,
    })))
}
