use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};

use gatehouse_accounts::domain::repository::{
    CodeChannel, UserRepository, VerificationCodeRepository,
};
use gatehouse_accounts::domain::types::{ApiUsage, User, VerificationCode};
use gatehouse_accounts::error::AccountsServiceError;

// ── MockCodeRepo ─────────────────────────────────────────────────────────────

pub struct MockCodeRepo {
    rows: Arc<Mutex<Vec<VerificationCode>>>,
}

impl MockCodeRepo {
    pub fn new(rows: Vec<VerificationCode>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the stored rows for post-execution inspection.
    pub fn rows_handle(&self) -> Arc<Mutex<Vec<VerificationCode>>> {
        Arc::clone(&self.rows)
    }
}

impl VerificationCodeRepository for MockCodeRepo {
    async fn find(
        &self,
        identity: &str,
    ) -> Result<Option<VerificationCode>, AccountsServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.identity == identity)
            .cloned())
    }

    async fn upsert(&self, code: &VerificationCode) -> Result<(), AccountsServiceError> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|c| c.identity != code.identity);
        rows.push(code.clone());
        Ok(())
    }

    async fn delete(&self, identity: &str) -> Result<bool, AccountsServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.identity != identity);
        Ok(rows.len() < before)
    }
}

// ── MockChannel ──────────────────────────────────────────────────────────────

pub struct MockChannel {
    deliverable: bool,
    fail: bool,
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockChannel {
    /// Accepts any identity and delivers successfully.
    pub fn working() -> Self {
        Self {
            deliverable: true,
            fail: false,
            sent: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Accepts any identity but fails every delivery.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::working()
        }
    }

    /// Rejects every identity at format validation.
    pub fn rejecting() -> Self {
        Self {
            deliverable: false,
            ..Self::working()
        }
    }

    /// Shared handle to (identity, code) pairs that went out.
    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.sent)
    }
}

impl CodeChannel for MockChannel {
    fn validate(&self, _identity: &str) -> bool {
        self.deliverable
    }

    async fn deliver(&self, identity: &str, code: &str) -> Result<(), AccountsServiceError> {
        if self.fail {
            return Err(AccountsServiceError::DeliveryFailed);
        }
        self.sent
            .lock()
            .unwrap()
            .push((identity.to_owned(), code.to_owned()));
        Ok(())
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    users: Arc<Mutex<Vec<User>>>,
    usage: Arc<Mutex<Vec<ApiUsage>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            usage: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }

    pub fn usage_handle(&self) -> Arc<Mutex<Vec<ApiUsage>>> {
        Arc::clone(&self.usage)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, AccountsServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountsServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), AccountsServiceError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(AccountsServiceError::UserAlreadyExists);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update_password_hash(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<(), AccountsServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.username == username) {
            u.password_hash = password_hash.to_owned();
        }
        Ok(())
    }

    async fn try_deduct(
        &self,
        username: &str,
        count: i64,
    ) -> Result<bool, AccountsServiceError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.username == username) {
            Some(u) if u.quota_used + count <= u.quota_limit => {
                u.quota_used += count;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn add_usage(&self, usage: &ApiUsage) -> Result<bool, AccountsServiceError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.username == usage.username) {
            Some(u) => {
                u.quota_used += usage.tokens_used;
                self.usage.lock().unwrap().push(usage.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn reset_quota(
        &self,
        username: &str,
        today: NaiveDate,
    ) -> Result<bool, AccountsServiceError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.username == username) {
            Some(u) => {
                u.quota_used = 0;
                u.last_reset_date = today;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn test_user(username: &str) -> User {
    User {
        username: username.to_owned(),
        password_hash: String::new(),
        email: format!("{username}@example.com"),
        quota_limit: 1000,
        quota_used: 0,
        last_reset_date: Utc::now().date_naive(),
        is_admin: false,
    }
}

pub fn test_code(identity: &str) -> VerificationCode {
    let now = Utc::now();
    VerificationCode {
        identity: identity.to_owned(),
        code: "123456".to_owned(),
        created_at: now,
        attempts: 1,
        last_attempt_at: now,
    }
}
