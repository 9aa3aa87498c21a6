use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

/// Verification code length (numeric digits).
pub const CODE_LEN: usize = 6;

/// Code validity window in seconds (15 minutes from issuance).
pub const CODE_TTL_SECS: i64 = 15 * 60;

/// Minimum interval between two issuances for the same identity.
pub const RESEND_COOLDOWN_SECS: i64 = 60;

/// Issuance cap per rolling 24-hour window.
pub const MAX_SENDS_PER_WINDOW: i32 = 5;

/// Length of the issuance window in seconds.
pub const SEND_WINDOW_SECS: i64 = 24 * 3600;

/// Quota granted to new accounts unless the caller overrides it.
pub const DEFAULT_QUOTA_LIMIT: i64 = 1000;

/// Account record for the gated service.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub quota_limit: i64,
    pub quota_used: i64,
    pub last_reset_date: NaiveDate,
    pub is_admin: bool,
}

impl User {
    /// True while the account has unspent quota.
    pub fn has_quota(&self) -> bool {
        self.quota_used < self.quota_limit
    }
}

/// One-time verification code bound to an email address or phone number.
/// One row per identity; reissues overwrite it.
#[derive(Debug, Clone)]
pub struct VerificationCode {
    pub identity: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub attempts: i32,
    pub last_attempt_at: DateTime<Utc>,
}

impl VerificationCode {
    /// A reissue within 60 seconds of the last one is rejected.
    pub fn in_cooldown(&self, now: DateTime<Utc>) -> bool {
        (now - self.last_attempt_at).num_seconds() < RESEND_COOLDOWN_SECS
    }

    /// The 24-hour issuance window, anchored at the latest issuance.
    pub fn window_active(&self, now: DateTime<Utc>) -> bool {
        (now - self.created_at).num_seconds() < SEND_WINDOW_SECS
    }

    /// Codes are valid for 15 minutes from issuance.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        (now - self.created_at).num_seconds() > CODE_TTL_SECS
    }
}

/// One entry in the append-only token usage log.
#[derive(Debug, Clone)]
pub struct ApiUsage {
    pub username: String,
    pub recorded_at: DateTime<Utc>,
    pub model: String,
    pub tokens_used: i64,
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^1[3-9]\d{9}$").unwrap());

pub fn is_valid_email(identity: &str) -> bool {
    EMAIL_RE.is_match(identity)
}

/// Mobile numbers only (the SMS gateway rejects anything else).
pub fn is_valid_phone(identity: &str) -> bool {
    PHONE_RE.is_match(identity)
}
