use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::AccountsServiceError;
use crate::state::AppState;
use crate::usecase::verification::{
    SendCodeInput, SendCodeUseCase, VerifyCodeInput, VerifyCodeUseCase,
};

// ── POST /verification/email/code ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendEmailCodeRequest {
    pub email: String,
}

pub async fn send_email_code(
    State(state): State<AppState>,
    Json(body): Json<SendEmailCodeRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = SendCodeUseCase {
        codes: state.code_repo(),
        channel: state.email.clone(),
    };
    usecase
        .execute(SendCodeInput {
            identity: body.email,
        })
        .await?;
    Ok(StatusCode::ACCEPTED)
}

// ── PATCH /verification/email/code ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyEmailCodeRequest {
    pub email: String,
    pub code: String,
}

pub async fn verify_email_code(
    State(state): State<AppState>,
    Json(body): Json<VerifyEmailCodeRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = VerifyCodeUseCase {
        codes: state.code_repo(),
    };
    usecase
        .execute(VerifyCodeInput {
            identity: body.email,
            code: body.code,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /verification/sms/code ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendSmsCodeRequest {
    pub phone: String,
}

pub async fn send_sms_code(
    State(state): State<AppState>,
    Json(body): Json<SendSmsCodeRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = SendCodeUseCase {
        codes: state.code_repo(),
        channel: state.sms.clone(),
    };
    usecase
        .execute(SendCodeInput {
            identity: body.phone,
        })
        .await?;
    Ok(StatusCode::ACCEPTED)
}

// ── PATCH /verification/sms/code ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifySmsCodeRequest {
    pub phone: String,
    pub code: String,
}

pub async fn verify_sms_code(
    State(state): State<AppState>,
    Json(body): Json<VerifySmsCodeRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = VerifyCodeUseCase {
        codes: state.code_repo(),
    };
    usecase
        .execute(VerifyCodeInput {
            identity: body.phone,
            code: body.code,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
