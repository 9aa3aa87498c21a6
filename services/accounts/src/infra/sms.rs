use serde::Deserialize;

use crate::domain::repository::CodeChannel;
use crate::domain::types::is_valid_phone;
use crate::error::AccountsServiceError;

/// Delivers verification codes through a template-based HTTP SMS gateway.
#[derive(Clone)]
pub struct HttpSmsChannel {
    client: reqwest::Client,
    api_url: String,
    access_key_id: String,
    access_key_secret: String,
    sign_name: String,
    template_code: String,
}

/// Gateway response envelope; `code` is "OK" on accepted sends.
#[derive(Debug, Deserialize)]
struct SmsGatewayResponse {
    code: String,
    message: Option<String>,
}

impl HttpSmsChannel {
    pub fn new(
        api_url: String,
        access_key_id: String,
        access_key_secret: String,
        sign_name: String,
        template_code: String,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            access_key_id,
            access_key_secret,
            sign_name,
            template_code,
        }
    }
}

impl CodeChannel for HttpSmsChannel {
    fn validate(&self, identity: &str) -> bool {
        is_valid_phone(identity)
    }

    async fn deliver(&self, identity: &str, code: &str) -> Result<(), AccountsServiceError> {
        let payload = serde_json::json!({
            "phone_numbers": identity,
            "sign_name": self.sign_name,
            "template_code": self.template_code,
            "template_param": { "code": code },
        });

        let response = self
            .client
            .post(&self.api_url)
            .basic_auth(&self.access_key_id, Some(&self.access_key_secret))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "sms gateway unreachable");
                AccountsServiceError::DeliveryFailed
            })?;

        let body: SmsGatewayResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "sms gateway returned malformed response");
            AccountsServiceError::DeliveryFailed
        })?;

        if body.code != "OK" {
            tracing::warn!(
                code = %body.code,
                message = body.message.as_deref().unwrap_or_default(),
                "sms gateway rejected send"
            );
            return Err(AccountsServiceError::DeliveryFailed);
        }
        Ok(())
    }
}
