use sea_orm::Database;
use tracing::info;

use gatehouse_accounts::config::AccountsConfig;
use gatehouse_accounts::infra::email::SmtpEmailChannel;
use gatehouse_accounts::infra::sms::HttpSmsChannel;
use gatehouse_accounts::router::build_router;
use gatehouse_accounts::state::AppState;

#[tokio::main]
async fn main() {
    gatehouse_core::tracing::init_tracing();

    let config = AccountsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let email = SmtpEmailChannel::new(
        &config.smtp_host,
        config.smtp_port,
        config.smtp_user.clone(),
        config.smtp_password.clone(),
        config.smtp_from.clone(),
    )
    .expect("invalid SMTP configuration");

    let sms = HttpSmsChannel::new(
        config.sms_api_url.clone(),
        config.sms_access_key_id.clone(),
        config.sms_access_key_secret.clone(),
        config.sms_sign_name.clone(),
        config.sms_template_code.clone(),
    );

    let state = AppState { db, email, sms };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.accounts_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("accounts service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
