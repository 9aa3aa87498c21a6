use chrono::Utc;
use rand::RngExt;

use crate::domain::repository::{CodeChannel, VerificationCodeRepository};
use crate::domain::types::{CODE_LEN, MAX_SENDS_PER_WINDOW, VerificationCode};
use crate::error::AccountsServiceError;

const DIGITS: &[u8] = b"0123456789";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| DIGITS[rng.random_range(0..DIGITS.len())] as char)
        .collect()
}

// ── SendCode ─────────────────────────────────────────────────────────────────

pub struct SendCodeInput {
    pub identity: String,
}

pub struct SendCodeUseCase<R, C>
where
    R: VerificationCodeRepository,
    C: CodeChannel,
{
    pub codes: R,
    pub channel: C,
}

impl<R, C> SendCodeUseCase<R, C>
where
    R: VerificationCodeRepository,
    C: CodeChannel,
{
    pub async fn execute(&self, input: SendCodeInput) -> Result<(), AccountsServiceError> {
        if !self.channel.validate(&input.identity) {
            return Err(AccountsServiceError::InvalidIdentity);
        }

        let existing = self.codes.find(&input.identity).await?;
        let now = Utc::now();

        let mut attempts = 0;
        if let Some(ref row) = existing {
            if row.in_cooldown(now) {
                return Err(AccountsServiceError::CooldownActive);
            }
            attempts = row.attempts;
            if attempts >= MAX_SENDS_PER_WINDOW {
                if row.window_active(now) {
                    return Err(AccountsServiceError::SendLimitReached);
                }
                // Window elapsed, counter restarts.
                attempts = 0;
            }
        }

        let code = generate_code();

        // Deliver before persisting: a failed send must leave the previous
        // row untouched.
        self.channel.deliver(&input.identity, &code).await?;

        self.codes
            .upsert(&VerificationCode {
                identity: input.identity,
                code,
                created_at: now,
                attempts: attempts + 1,
                last_attempt_at: now,
            })
            .await?;
        Ok(())
    }
}

// ── VerifyCode ───────────────────────────────────────────────────────────────

pub struct VerifyCodeInput {
    pub identity: String,
    pub code: String,
}

pub struct VerifyCodeUseCase<R: VerificationCodeRepository> {
    pub codes: R,
}

impl<R: VerificationCodeRepository> VerifyCodeUseCase<R> {
    pub async fn execute(&self, input: VerifyCodeInput) -> Result<(), AccountsServiceError> {
        let row = self
            .codes
            .find(&input.identity)
            .await?
            .ok_or(AccountsServiceError::CodeNotFound)?;

        if row.is_expired(Utc::now()) {
            return Err(AccountsServiceError::CodeExpired);
        }
        if row.code != input.code {
            return Err(AccountsServiceError::CodeMismatch);
        }

        // Single-use: consume the row on success.
        self.codes.delete(&input.identity).await?;
        Ok(())
    }
}
