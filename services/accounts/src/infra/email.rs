use anyhow::Context as _;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::repository::CodeChannel;
use crate::domain::types::is_valid_email;
use crate::error::AccountsServiceError;

const CODE_EMAIL_SUBJECT: &str = "Your Gatehouse verification code";

fn code_email_body(code: &str) -> String {
    format!(
        "<html>\n<body>\n\
         <p>Hello,</p>\n\
         <p>Your verification code is: \
         <strong style=\"font-size: 18px; color: #1a73e8;\">{code}</strong></p>\n\
         <p>The code is valid for 15 minutes. Do not share it with anyone.</p>\n\
         <p>If you did not request this, you can ignore this message.</p>\n\
         </body>\n</html>"
    )
}

/// Delivers verification codes over an authenticated STARTTLS SMTP relay.
#[derive(Clone)]
pub struct SmtpEmailChannel {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpEmailChannel {
    pub fn new(
        host: &str,
        port: u16,
        user: String,
        password: String,
        from: String,
    ) -> Result<Self, anyhow::Error> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .context("smtp relay configuration")?
            .port(port)
            .credentials(Credentials::new(user, password))
            .build();
        Ok(Self { transport, from })
    }
}

impl CodeChannel for SmtpEmailChannel {
    fn validate(&self, identity: &str) -> bool {
        is_valid_email(identity)
    }

    async fn deliver(&self, identity: &str, code: &str) -> Result<(), AccountsServiceError> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|_| AccountsServiceError::DeliveryFailed)?,
            )
            .to(identity
                .parse()
                .map_err(|_| AccountsServiceError::DeliveryFailed)?)
            .subject(CODE_EMAIL_SUBJECT)
            .header(ContentType::TEXT_HTML)
            .body(code_email_body(code))
            .map_err(|_| AccountsServiceError::DeliveryFailed)?;

        if let Err(e) = self.transport.send(message).await {
            tracing::warn!(error = %e, "smtp delivery failed");
            return Err(AccountsServiceError::DeliveryFailed);
        }
        Ok(())
    }
}
