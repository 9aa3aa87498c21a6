use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::domain::types::User;
use crate::error::AccountsServiceError;
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, GetUserByEmailUseCase, GetUserInfoUseCase,
    IsAdminUseCase, VerifyUserInput, VerifyUserUseCase,
};

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub quota_limit: Option<i64>,
    pub is_admin: Option<bool>,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
    };
    usecase
        .execute(CreateUserInput {
            username: body.username,
            password: body.password,
            email: body.email,
            quota_limit: body.quota_limit,
            is_admin: body.is_admin.unwrap_or(false),
        })
        .await?;
    Ok(StatusCode::CREATED)
}

// ── POST /users/credentials ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyCredentialsRequest {
    pub username: String,
    pub password: String,
}

pub async fn verify_credentials(
    State(state): State<AppState>,
    Json(body): Json<VerifyCredentialsRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = VerifyUserUseCase {
        repo: state.user_repo(),
    };
    usecase
        .execute(VerifyUserInput {
            username: body.username,
            password: body.password,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users/{username} ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub quota_limit: i64,
    pub quota_used: i64,
    pub last_reset_date: chrono::NaiveDate,
    pub is_admin: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
            quota_limit: user.quota_limit,
            quota_used: user.quota_used,
            last_reset_date: user.last_reset_date,
            is_admin: user.is_admin,
        }
    }
}

pub async fn get_user_info(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, AccountsServiceError> {
    let usecase = GetUserInfoUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(&username).await?;
    Ok(Json(user.into()))
}

// ── GET /users/{username}/admin ──────────────────────────────────────────────

#[derive(Serialize)]
pub struct IsAdminResponse {
    pub is_admin: bool,
}

pub async fn is_admin(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<IsAdminResponse>, AccountsServiceError> {
    let usecase = IsAdminUseCase {
        repo: state.user_repo(),
    };
    let is_admin = usecase.execute(&username).await?;
    Ok(Json(IsAdminResponse { is_admin }))
}

// ── GET /users/by-email/{email} ──────────────────────────────────────────────

pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserResponse>, AccountsServiceError> {
    let usecase = GetUserByEmailUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(&email).await?;
    Ok(Json(user.into()))
}
