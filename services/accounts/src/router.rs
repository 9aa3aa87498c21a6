use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use gatehouse_core::health::{healthz, readyz};
use gatehouse_core::middleware::request_id_layer;

use crate::handlers::{
    quota::{check_quota, deduct_conversation, record_usage, reset_quota},
    user::{create_user, get_user_by_email, get_user_info, is_admin, verify_credentials},
    verification::{send_email_code, send_sms_code, verify_email_code, verify_sms_code},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Verification codes
        .route("/verification/email/code", post(send_email_code))
        .route("/verification/email/code", patch(verify_email_code))
        .route("/verification/sms/code", post(send_sms_code))
        .route("/verification/sms/code", patch(verify_sms_code))
        // Users
        .route("/users", post(create_user))
        .route("/users/credentials", post(verify_credentials))
        .route("/users/by-email/{email}", get(get_user_by_email))
        .route("/users/{username}", get(get_user_info))
        .route("/users/{username}/admin", get(is_admin))
        // Quota
        .route("/users/{username}/quota", get(check_quota))
        .route("/users/{username}/quota/deductions", post(deduct_conversation))
        .route("/users/{username}/quota/reset", post(reset_quota))
        .route("/users/{username}/usage", post(record_usage))
        .layer(request_id_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
