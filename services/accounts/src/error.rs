use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Accounts service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AccountsServiceError {
    #[error("invalid email address or phone number")]
    InvalidIdentity,
    #[error("please wait 60 seconds before requesting another code")]
    CooldownActive,
    #[error("verification code request limit reached, try again in 24 hours")]
    SendLimitReached,
    #[error("failed to deliver verification code")]
    DeliveryFailed,
    #[error("verification code not found")]
    CodeNotFound,
    #[error("verification code expired")]
    CodeExpired,
    #[error("verification code incorrect")]
    CodeMismatch,
    #[error("user not found")]
    UserNotFound,
    #[error("username or email already registered")]
    UserAlreadyExists,
    #[error("invalid username or password")]
    InvalidCredential,
    #[error("conversation quota exhausted")]
    QuotaExceeded,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AccountsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidIdentity => "INVALID_IDENTITY",
            Self::CooldownActive => "COOLDOWN_ACTIVE",
            Self::SendLimitReached => "SEND_LIMIT_REACHED",
            Self::DeliveryFailed => "DELIVERY_FAILED",
            Self::CodeNotFound => "CODE_NOT_FOUND",
            Self::CodeExpired => "CODE_EXPIRED",
            Self::CodeMismatch => "CODE_MISMATCH",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::QuotaExceeded => "QUOTA_EXCEEDED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AccountsServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidIdentity => StatusCode::BAD_REQUEST,
            Self::CooldownActive | Self::SendLimitReached | Self::QuotaExceeded => {
                StatusCode::TOO_MANY_REQUESTS
            }
            Self::DeliveryFailed => StatusCode::BAD_GATEWAY,
            Self::CodeNotFound | Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::CodeExpired | Self::CodeMismatch | Self::InvalidCredential => {
                StatusCode::UNAUTHORIZED
            }
            Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — the trace layer already records method/uri/status for
        // all requests, and 4xx are expected client errors. Internal errors need
        // the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
