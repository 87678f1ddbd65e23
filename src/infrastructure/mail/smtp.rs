use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::{
    entities::email::OutgoingEmail,
    errors::AppError,
    repositories::mailer::Mailer,
    settings::MailSettings,
};

const SEND_FAILED: &str = "Failed to send email.";

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// STARTTLS relay; credentials are attached only when both halves are configured.
    pub fn new(settings: &MailSettings) -> Result<Self, AppError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|e| AppError::InternalError(format!("Invalid SMTP relay: {}", e)))?
            .port(settings.port);

        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(
                username.clone(),
                password.as_str().to_string(),
            ));
        }

        Ok(Self { transport: builder.build() })
    }
}

fn parse_address(raw: &str) -> Result<Address, AppError> {
    raw.parse::<Address>()
        .map_err(|_| AppError::InvalidArgument(format!("Invalid email address: {}", raw)))
}

/// Builds the MIME message: the student is the visible sender and the reply target.
pub fn build_message(email: &OutgoingEmail) -> Result<Message, AppError> {
    let from = Mailbox::new(Some(email.from_name.clone()), parse_address(&email.from_address)?);
    let reply_to = Mailbox::new(None, parse_address(&email.reply_to)?);
    let to = Mailbox::new(None, parse_address(&email.to)?);

    Message::builder()
        .from(from)
        .reply_to(reply_to)
        .to(to)
        .subject(email.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())
        .map_err(|e| AppError::InternalError(format!("Failed to build email: {}", e)))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), AppError> {
        let message = build_message(email)?;

        self.transport.send(message).await.map_err(|e| {
            tracing::error!("SMTP relay failed: {}", e);
            AppError::UpstreamUnavailable(SEND_FAILED.to_string())
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outgoing() -> OutgoingEmail {
        OutgoingEmail {
            from_name: "Priya Student".into(),
            from_address: "priya@college.edu".into(),
            reply_to: "priya@college.edu".into(),
            to: "mentors@mentorbridge.io".into(),
            subject: "Career advice".into(),
            body: "Hello Mentor".into(),
        }
    }

    #[test]
    fn message_carries_student_as_sender_and_reply_target() {
        let message = build_message(&outgoing()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Priya Student"));
        assert!(raw.contains("<priya@college.edu>"));
        assert!(raw.contains("Reply-To: priya@college.edu"));
        assert!(raw.contains("To: mentors@mentorbridge.io"));
    }

    #[test]
    fn invalid_student_address_is_rejected() {
        let mut email = outgoing();
        email.from_address = "not an address".into();

        assert!(matches!(build_message(&email), Err(AppError::InvalidArgument(_))));
    }
}
