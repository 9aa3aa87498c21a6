#![allow(async_fn_in_trait)]

use chrono::NaiveDate;

use crate::domain::types::{ApiUsage, User, VerificationCode};
use crate::error::AccountsServiceError;

/// Repository for user accounts and quota bookkeeping.
pub trait UserRepository: Send + Sync {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, AccountsServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountsServiceError>;

    /// Insert a new account. A unique violation on username or email maps to
    /// `UserAlreadyExists`.
    async fn create(&self, user: &User) -> Result<(), AccountsServiceError>;

    /// Replace the stored password hash (scheme upgrade on login).
    async fn update_password_hash(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<(), AccountsServiceError>;

    /// Add `count` to `quota_used` iff the result stays within `quota_limit`.
    /// The single conditional UPDATE is the atomic check-and-set boundary.
    /// Returns `false` when no row matched (unknown user or over limit).
    async fn try_deduct(&self, username: &str, count: i64) -> Result<bool, AccountsServiceError>;

    /// Increment `quota_used` by the token count and append a usage row, in
    /// one transaction. Returns `false` when the user does not exist.
    async fn add_usage(&self, usage: &ApiUsage) -> Result<bool, AccountsServiceError>;

    /// Zero `quota_used` and stamp `last_reset_date`. Returns `false` when
    /// the user does not exist.
    async fn reset_quota(
        &self,
        username: &str,
        today: NaiveDate,
    ) -> Result<bool, AccountsServiceError>;
}

/// Repository for one-time verification codes.
pub trait VerificationCodeRepository: Send + Sync {
    async fn find(&self, identity: &str) -> Result<Option<VerificationCode>, AccountsServiceError>;

    /// Insert or overwrite the row for this identity.
    async fn upsert(&self, code: &VerificationCode) -> Result<(), AccountsServiceError>;

    /// Delete the row for this identity. Returns `true` if a row was deleted.
    async fn delete(&self, identity: &str) -> Result<bool, AccountsServiceError>;
}

/// Outbound delivery channel for verification codes (email or SMS variant).
/// Implementations are black boxes that may fail; delivery failures map to
/// `DeliveryFailed`.
pub trait CodeChannel: Send + Sync {
    /// Format check for identities this channel can deliver to.
    fn validate(&self, identity: &str) -> bool;

    async fn deliver(&self, identity: &str, code: &str) -> Result<(), AccountsServiceError>;
}
