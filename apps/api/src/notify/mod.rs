//! Email notifications to shortlisted candidates.
//!
//! Every send opens a fresh authenticated STARTTLS session. There is no retry,
//! batching or rate limiting; the outcome of each attempt is reported back as
//! a human-readable string.

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Display name used in the `From` header.
pub const SENDER_DISPLAY_NAME: &str = "HR Team";
pub const INVITATION_SUBJECT: &str = "Interview Invitation: You're Shortlisted";
pub const SENT_OK: &str = "✅ Email sent";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Sender account used to authenticate the SMTP session.
#[derive(Debug, Clone, Deserialize)]
pub struct SenderCredentials {
    pub email: String,
    pub password: String,
}

/// A fully composed plaintext message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(
        &self,
        email: &OutgoingEmail,
        sender: &SenderCredentials,
    ) -> Result<(), NotifyError>;
}

/// SMTP submission over STARTTLS (host/port from config, smtp.gmail.com:587 by default).
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    host: String,
    port: u16,
}

impl SmtpMailer {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
        }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(
        &self,
        email: &OutgoingEmail,
        sender: &SenderCredentials,
    ) -> Result<(), NotifyError> {
        let message = build_message(email, &sender.email)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)?
            .port(self.port)
            .credentials(Credentials::new(
                sender.email.clone(),
                sender.password.clone(),
            ))
            .build();

        transport.send(message).await?;
        Ok(())
    }
}

/// Builds the MIME message: `From: HR Team <sender>`, `Reply-To: sender`, plaintext body.
pub fn build_message(email: &OutgoingEmail, sender: &str) -> Result<Message, NotifyError> {
    let sender_address: Address = sender.parse()?;
    let message = Message::builder()
        .from(Mailbox::new(
            Some(SENDER_DISPLAY_NAME.to_string()),
            sender_address.clone(),
        ))
        .reply_to(Mailbox::new(None, sender_address))
        .to(email.to.parse::<Mailbox>()?)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())?;
    Ok(message)
}

/// Sends one email and reports the outcome as text instead of an error.
pub async fn send_email(
    mailer: &dyn Mailer,
    email: &OutgoingEmail,
    sender: &SenderCredentials,
) -> String {
    match mailer.send(email, sender).await {
        Ok(()) => {
            info!("Email sent to {}", email.to);
            SENT_OK.to_string()
        }
        Err(e) => {
            warn!("Email to {} failed: {e}", email.to);
            format!("❌ Error: {e}")
        }
    }
}

/// Composes the shortlist invitation for one candidate.
pub fn invitation(name: &str, to: &str) -> OutgoingEmail {
    let body = format!(
        "Hi {name},\n\
         \n\
         We're pleased to inform you that you've been shortlisted based on your profile match.\n\
         \n\
         Please reply to this email to confirm your availability for the next steps.\n\
         \n\
         Best regards,\n\
         HR Team"
    );
    OutgoingEmail {
        to: to.to_string(),
        subject: INVITATION_SUBJECT.to_string(),
        body,
    }
}
