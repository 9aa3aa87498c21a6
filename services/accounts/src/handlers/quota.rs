use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::error::AccountsServiceError;
use crate::state::AppState;
use crate::usecase::quota::{
    CheckQuotaUseCase, DeductConversationInput, DeductConversationUseCase, RecordUsageInput,
    RecordUsageUseCase, ResetQuotaUseCase,
};

// ── GET /users/{username}/quota ──────────────────────────────────────────────

#[derive(Serialize)]
pub struct QuotaResponse {
    pub has_quota: bool,
}

pub async fn check_quota(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<QuotaResponse>, AccountsServiceError> {
    let usecase = CheckQuotaUseCase {
        repo: state.user_repo(),
    };
    let has_quota = usecase.execute(&username).await?;
    Ok(Json(QuotaResponse { has_quota }))
}

// ── POST /users/{username}/quota/deductions ──────────────────────────────────

#[derive(Deserialize)]
pub struct DeductRequest {
    /// Number of conversations to charge; defaults to one.
    pub count: Option<u32>,
}

pub async fn deduct_conversation(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(body): Json<DeductRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = DeductConversationUseCase {
        repo: state.user_repo(),
    };
    usecase
        .execute(DeductConversationInput {
            username,
            count: i64::from(body.count.unwrap_or(1)),
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /users/{username}/quota/reset ───────────────────────────────────────

pub async fn reset_quota(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = ResetQuotaUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(&username).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /users/{username}/usage ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RecordUsageRequest {
    pub tokens_used: u64,
    pub model: String,
}

pub async fn record_usage(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(body): Json<RecordUsageRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = RecordUsageUseCase {
        repo: state.user_repo(),
    };
    usecase
        .execute(RecordUsageInput {
            username,
            tokens_used: body.tokens_used as i64,
            model: body.model,
        })
        .await?;
    Ok(StatusCode::CREATED)
}
