/// Accounts service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AccountsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port to listen on (default 3114). Env var: `ACCOUNTS_PORT`.
    pub accounts_port: u16,
    /// SMTP relay hostname for verification emails.
    pub smtp_host: String,
    /// SMTP relay port (default 587, STARTTLS).
    pub smtp_port: u16,
    /// SMTP login user.
    pub smtp_user: String,
    /// SMTP login password.
    pub smtp_password: String,
    /// From address for verification emails.
    pub smtp_from: String,
    /// SMS gateway endpoint URL.
    pub sms_api_url: String,
    /// SMS gateway access key id.
    pub sms_access_key_id: String,
    /// SMS gateway access key secret.
    pub sms_access_key_secret: String,
    /// Sender signature registered with the SMS gateway.
    pub sms_sign_name: String,
    /// Template id for the verification-code SMS.
    pub sms_template_code: String,
}

impl AccountsConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            accounts_port: std::env::var("ACCOUNTS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
            smtp_host: std::env::var("SMTP_HOST").expect("SMTP_HOST"),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            smtp_user: std::env::var("SMTP_USER").expect("SMTP_USER"),
            smtp_password: std::env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD"),
            smtp_from: std::env::var("SMTP_FROM").expect("SMTP_FROM"),
            sms_api_url: std::env::var("SMS_API_URL").expect("SMS_API_URL"),
            sms_access_key_id: std::env::var("SMS_ACCESS_KEY_ID").expect("SMS_ACCESS_KEY_ID"),
            sms_access_key_secret: std::env::var("SMS_ACCESS_KEY_SECRET")
                .expect("SMS_ACCESS_KEY_SECRET"),
            sms_sign_name: std::env::var("SMS_SIGN_NAME").expect("SMS_SIGN_NAME"),
            sms_template_code: std::env::var("SMS_TEMPLATE_CODE").expect("SMS_TEMPLATE_CODE"),
        }
    }
}
