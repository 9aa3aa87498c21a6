use anyhow::Context as _;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, SqlErr, TransactionTrait,
    sea_query::{Expr, OnConflict},
};

use gatehouse_accounts_schema::{api_usage, users, verification_codes};

use crate::domain::repository::{UserRepository, VerificationCodeRepository};
use crate::domain::types::{ApiUsage, User, VerificationCode};
use crate::error::AccountsServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, AccountsServiceError> {
        let model = users::Entity::find_by_id(username.to_owned())
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountsServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), AccountsServiceError> {
        let result = users::ActiveModel {
            username: Set(user.username.clone()),
            password_hash: Set(user.password_hash.clone()),
            email: Set(user.email.clone()),
            quota_limit: Set(user.quota_limit),
            quota_used: Set(user.quota_used),
            last_reset_date: Set(user.last_reset_date),
            is_admin: Set(user.is_admin),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(AccountsServiceError::UserAlreadyExists)
                }
                _ => Err(anyhow::Error::new(e).context("create user").into()),
            },
        }
    }

    async fn update_password_hash(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<(), AccountsServiceError> {
        users::ActiveModel {
            username: Set(username.to_owned()),
            password_hash: Set(password_hash.to_owned()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update password hash")?;
        Ok(())
    }

    async fn try_deduct(&self, username: &str, count: i64) -> Result<bool, AccountsServiceError> {
        let result = users::Entity::update_many()
            .col_expr(
                users::Column::QuotaUsed,
                Expr::col(users::Column::QuotaUsed).add(count),
            )
            .filter(users::Column::Username.eq(username))
            .filter(
                Expr::col(users::Column::QuotaLimit)
                    .gte(Expr::col(users::Column::QuotaUsed).add(count)),
            )
            .exec(&self.db)
            .await
            .context("deduct conversation quota")?;
        Ok(result.rows_affected > 0)
    }

    async fn add_usage(&self, usage: &ApiUsage) -> Result<bool, AccountsServiceError> {
        let usage = usage.clone();
        let applied = self
            .db
            .transaction::<_, bool, sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    let updated = users::Entity::update_many()
                        .col_expr(
                            users::Column::QuotaUsed,
                            Expr::col(users::Column::QuotaUsed).add(usage.tokens_used),
                        )
                        .filter(users::Column::Username.eq(usage.username.as_str()))
                        .exec(txn)
                        .await?;
                    if updated.rows_affected == 0 {
                        return Ok(false);
                    }
                    api_usage::ActiveModel {
                        username: Set(usage.username.clone()),
                        recorded_at: Set(usage.recorded_at),
                        model: Set(usage.model.clone()),
                        tokens_used: Set(usage.tokens_used),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    Ok(true)
                })
            })
            .await
            .context("record api usage")?;
        Ok(applied)
    }

    async fn reset_quota(
        &self,
        username: &str,
        today: NaiveDate,
    ) -> Result<bool, AccountsServiceError> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::QuotaUsed, Expr::value(0i64))
            .col_expr(users::Column::LastResetDate, Expr::value(today))
            .filter(users::Column::Username.eq(username))
            .exec(&self.db)
            .await
            .context("reset quota")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        username: model.username,
        password_hash: model.password_hash,
        email: model.email,
        quota_limit: model.quota_limit,
        quota_used: model.quota_used,
        last_reset_date: model.last_reset_date,
        is_admin: model.is_admin,
    }
}

// ── VerificationCode repository ──────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVerificationCodeRepository {
    pub db: DatabaseConnection,
}

impl VerificationCodeRepository for DbVerificationCodeRepository {
    async fn find(
        &self,
        identity: &str,
    ) -> Result<Option<VerificationCode>, AccountsServiceError> {
        let model = verification_codes::Entity::find_by_id(identity.to_owned())
            .one(&self.db)
            .await
            .context("find verification code")?;
        Ok(model.map(code_from_model))
    }

    async fn upsert(&self, code: &VerificationCode) -> Result<(), AccountsServiceError> {
        verification_codes::Entity::insert(verification_codes::ActiveModel {
            identity: Set(code.identity.clone()),
            code: Set(code.code.clone()),
            created_at: Set(code.created_at),
            attempts: Set(code.attempts),
            last_attempt_at: Set(code.last_attempt_at),
        })
        .on_conflict(
            OnConflict::column(verification_codes::Column::Identity)
                .update_columns([
                    verification_codes::Column::Code,
                    verification_codes::Column::CreatedAt,
                    verification_codes::Column::Attempts,
                    verification_codes::Column::LastAttemptAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("upsert verification code")?;
        Ok(())
    }

    async fn delete(&self, identity: &str) -> Result<bool, AccountsServiceError> {
        let result = verification_codes::Entity::delete_many()
            .filter(verification_codes::Column::Identity.eq(identity))
            .exec(&self.db)
            .await
            .context("delete verification code")?;
        Ok(result.rows_affected > 0)
    }
}

fn code_from_model(model: verification_codes::Model) -> VerificationCode {
    VerificationCode {
        identity: model.identity,
        code: model.code,
        created_at: model.created_at,
        attempts: model.attempts,
        last_attempt_at: model.last_attempt_at,
    }
}
