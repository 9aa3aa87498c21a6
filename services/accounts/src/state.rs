use sea_orm::DatabaseConnection;

use crate::infra::db::{DbUserRepository, DbVerificationCodeRepository};
use crate::infra::email::SmtpEmailChannel;
use crate::infra::sms::HttpSmsChannel;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub email: SmtpEmailChannel,
    pub sms: HttpSmsChannel,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn code_repo(&self) -> DbVerificationCodeRepository {
        DbVerificationCodeRepository {
            db: self.db.clone(),
        }
    }
}
