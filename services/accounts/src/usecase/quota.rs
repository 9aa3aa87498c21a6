use chrono::Utc;
use tracing::{info, warn};

use crate::domain::repository::UserRepository;
use crate::domain::types::ApiUsage;
use crate::error::AccountsServiceError;

// ── CheckQuota ───────────────────────────────────────────────────────────────

pub struct CheckQuotaUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CheckQuotaUseCase<R> {
    /// True iff the account exists and has unspent quota.
    pub async fn execute(&self, username: &str) -> Result<bool, AccountsServiceError> {
        Ok(self
            .repo
            .find_by_username(username)
            .await?
            .map(|u| u.has_quota())
            .unwrap_or(false))
    }
}

// ── DeductConversation ───────────────────────────────────────────────────────

pub struct DeductConversationInput {
    pub username: String,
    pub count: i64,
}

pub struct DeductConversationUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeductConversationUseCase<R> {
    pub async fn execute(
        &self,
        input: DeductConversationInput,
    ) -> Result<(), AccountsServiceError> {
        if self.repo.try_deduct(&input.username, input.count).await? {
            info!(
                username = %input.username,
                count = input.count,
                "deducted conversation quota"
            );
            return Ok(());
        }

        // The conditional UPDATE matched nothing; find out why for the caller.
        match self.repo.find_by_username(&input.username).await? {
            None => {
                warn!(username = %input.username, "deduction for unknown user");
                Err(AccountsServiceError::UserNotFound)
            }
            Some(user) => {
                warn!(
                    username = %input.username,
                    used = user.quota_used,
                    limit = user.quota_limit,
                    count = input.count,
                    "insufficient quota for deduction"
                );
                Err(AccountsServiceError::QuotaExceeded)
            }
        }
    }
}

// ── RecordUsage ──────────────────────────────────────────────────────────────

pub struct RecordUsageInput {
    pub username: String,
    pub tokens_used: i64,
    pub model: String,
}

pub struct RecordUsageUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RecordUsageUseCase<R> {
    /// Unconditional accounting: increments `quota_used` past the limit if
    /// need be and appends a usage row. Cap enforcement belongs to
    /// `DeductConversationUseCase` alone.
    pub async fn execute(&self, input: RecordUsageInput) -> Result<(), AccountsServiceError> {
        let usage = ApiUsage {
            username: input.username,
            recorded_at: Utc::now(),
            model: input.model,
            tokens_used: input.tokens_used,
        };
        if !self.repo.add_usage(&usage).await? {
            return Err(AccountsServiceError::UserNotFound);
        }
        info!(
            username = %usage.username,
            model = %usage.model,
            tokens_used = usage.tokens_used,
            "recorded api usage"
        );
        Ok(())
    }
}

// ── ResetQuota ───────────────────────────────────────────────────────────────

pub struct ResetQuotaUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ResetQuotaUseCase<R> {
    /// Zero the counter and stamp the reset date. Deciding *when* a reset is
    /// due is the caller's job (e.g. an external daily scheduler).
    pub async fn execute(&self, username: &str) -> Result<(), AccountsServiceError> {
        if !self
            .repo
            .reset_quota(username, Utc::now().date_naive())
            .await?
        {
            return Err(AccountsServiceError::UserNotFound);
        }
        Ok(())
    }
}
