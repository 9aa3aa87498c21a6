use chrono::Utc;
use tracing::info;

use crate::domain::repository::UserRepository;
use crate::domain::types::{DEFAULT_QUOTA_LIMIT, User};
use crate::error::AccountsServiceError;
use crate::usecase::password::{SchemeMatch, hash_password, verify_password};

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub username: String,
    pub password: String,
    pub email: String,
    pub quota_limit: Option<i64>,
    pub is_admin: bool,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<(), AccountsServiceError> {
        let user = User {
            username: input.username,
            password_hash: hash_password(&input.password)?,
            email: input.email,
            quota_limit: input.quota_limit.unwrap_or(DEFAULT_QUOTA_LIMIT),
            quota_used: 0,
            last_reset_date: Utc::now().date_naive(),
            is_admin: input.is_admin,
        };
        self.repo.create(&user).await
    }
}

// ── VerifyUser ───────────────────────────────────────────────────────────────

pub struct VerifyUserInput {
    pub username: String,
    pub password: String,
}

pub struct VerifyUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> VerifyUserUseCase<R> {
    pub async fn execute(&self, input: VerifyUserInput) -> Result<(), AccountsServiceError> {
        let user = self
            .repo
            .find_by_username(&input.username)
            .await?
            .ok_or(AccountsServiceError::InvalidCredential)?;

        match verify_password(&input.password, &user.password_hash) {
            None => Err(AccountsServiceError::InvalidCredential),
            Some(SchemeMatch::Current) => Ok(()),
            Some(SchemeMatch::Legacy) => {
                // Silent upgrade: re-hash under the current scheme while we
                // still hold the plaintext.
                let upgraded = hash_password(&input.password)?;
                self.repo
                    .update_password_hash(&user.username, &upgraded)
                    .await?;
                info!(username = %user.username, "upgraded legacy password hash");
                Ok(())
            }
        }
    }
}

// ── GetUserInfo ──────────────────────────────────────────────────────────────

pub struct GetUserInfoUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserInfoUseCase<R> {
    pub async fn execute(&self, username: &str) -> Result<User, AccountsServiceError> {
        self.repo
            .find_by_username(username)
            .await?
            .ok_or(AccountsServiceError::UserNotFound)
    }
}

// ── IsAdmin ──────────────────────────────────────────────────────────────────

pub struct IsAdminUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> IsAdminUseCase<R> {
    /// Unknown users are not admins.
    pub async fn execute(&self, username: &str) -> Result<bool, AccountsServiceError> {
        Ok(self
            .repo
            .find_by_username(username)
            .await?
            .map(|u| u.is_admin)
            .unwrap_or(false))
    }
}

// ── GetUserByEmail ───────────────────────────────────────────────────────────

pub struct GetUserByEmailUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserByEmailUseCase<R> {
    pub async fn execute(&self, email: &str) -> Result<User, AccountsServiceError> {
        self.repo
            .find_by_email(email)
            .await?
            .ok_or(AccountsServiceError::UserNotFound)
    }
}
