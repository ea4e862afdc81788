//! Outbound delivery of relayed submissions.
//!
//! One [`Mailer`] is built at startup from [`MailConfig`] and shared by every
//! request. Each call to [`Mailer::send`] is a single attempt; nothing is
//! queued or retried.

mod error;
mod http_api;
mod sendmail;
mod smtp;

pub use error::{MailError, MailErrorExt};
pub use http_api::HttpApiMailer;
pub use sendmail::SendmailMailer;
pub use smtp::SmtpMailer;

use crate::submission::ContactSubmission;
use async_trait::async_trait;
use folio_domain::config::{ContactConfig, MailConfig, TransportKind};
use lettre::message::{Mailbox, MultiPart};
use lettre::{Address, Message};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// A delivery channel for composed messages.
#[async_trait]
pub trait Mailer: Send + Sync + Debug {
    /// Channel name for logs and the health report.
    fn transport(&self) -> TransportKind;

    /// Delivers `mail` once.
    async fn send(&self, mail: &OutboundMail) -> Result<(), MailError>;
}

/// A submission addressed according to the relay settings.
#[derive(Debug, Clone)]
pub struct OutboundMail {
    recipient: String,
    sender: String,
    sender_name: String,
    subject: String,
    submission: ContactSubmission,
}

impl OutboundMail {
    /// Recipient, sender and subject come from `config` only.
    #[must_use]
    pub fn compose(config: &ContactConfig, submission: ContactSubmission) -> Self {
        Self {
            recipient: config.recipient.clone(),
            sender: config.sender_address().to_owned(),
            sender_name: config.sender_name.clone(),
            subject: config.subject.clone(),
            submission,
        }
    }

    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub const fn submission(&self) -> &ContactSubmission {
        &self.submission
    }

    /// Plain-text body.
    #[must_use]
    pub fn text_body(&self) -> String {
        let s = &self.submission;
        format!("Nom : {}\nEmail : {}\n\n{}\n", s.name(), s.email(), s.message())
    }

    /// HTML body: escaped text, one `<br />` per line break.
    #[must_use]
    pub fn html_body(&self) -> String {
        let s = &self.submission;
        format!(
            "<p><strong>Nom :</strong> {}<br />\n<strong>Email :</strong> {}</p>\n<p>{}</p>\n",
            ammonia::clean_text(s.name()),
            ammonia::clean_text(s.email().as_str()),
            s.message().lines().map(ammonia::clean_text).collect::<Vec<_>>().join("<br />\n"),
        )
    }

    /// RFC 5322 rendering with `Reply-To` set to the submitter.
    ///
    /// # Errors
    /// [`MailError::Address`] when a configured address does not parse,
    /// [`MailError::Build`] when the message cannot be assembled.
    pub fn to_message(&self) -> Result<Message, MailError> {
        let from = Mailbox::new(Some(self.sender_name.clone()), self.sender.parse::<Address>()?);
        let reply_to = Mailbox::new(
            Some(header_safe(self.submission.name())),
            self.submission.email().as_str().parse::<Address>()?,
        );
        let to = Mailbox::new(None, self.recipient.parse::<Address>()?);

        let message = Message::builder()
            .from(from)
            .reply_to(reply_to)
            .to(to)
            .subject(self.subject.clone())
            .multipart(MultiPart::alternative_plain_html(self.text_body(), self.html_body()))?;

        Ok(message)
    }
}

/// Display names end up in a header; line breaks and other controls become spaces.
fn header_safe(value: &str) -> String {
    value.chars().map(|c| if c.is_control() { ' ' } else { c }).collect()
}

/// Builds the deployment's transport.
///
/// `smtp` without a host hands messages to the local sendmail binary.
///
/// # Errors
/// Returns an error when the transport cannot be constructed (bad relay host,
/// HTTP client setup failure).
pub fn from_config(config: &MailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    let timeout = config.timeout_secs.map(Duration::from_secs);

    let mailer: Arc<dyn Mailer> = match config.transport {
        TransportKind::Smtp if config.smtp.host.as_deref().is_none_or(|h| h.trim().is_empty()) => {
            warn!("No SMTP host configured, falling back to sendmail");
            Arc::new(SendmailMailer::new(&config.sendmail))
        },
        TransportKind::Smtp => Arc::new(SmtpMailer::new(&config.smtp, timeout)?),
        TransportKind::Sendmail => Arc::new(SendmailMailer::new(&config.sendmail)),
        TransportKind::HttpApi => Arc::new(HttpApiMailer::new(&config.http_api, timeout)?),
    };

    info!(transport = %mailer.transport(), "Mailer ready");
    Ok(mailer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::ContactForm;

    fn mail(name: &str, message: &str) -> OutboundMail {
        let submission = ContactSubmission::parse(ContactForm {
            name: Some(name.to_owned()),
            email: Some("jane@example.com".to_owned()),
            message: Some(message.to_owned()),
        })
        .unwrap();

        let config = ContactConfig {
            recipient: "owner@folio.dev".to_owned(),
            sender: Some("relay@folio.dev".to_owned()),
            ..ContactConfig::default()
        };
        OutboundMail::compose(&config, submission)
    }

    #[test]
    fn recipient_and_subject_come_from_config() {
        let mail = mail("Jane Doe", "Hello");
        assert_eq!(mail.recipient(), "owner@folio.dev");
        assert_eq!(mail.subject(), "Nouveau message du portfolio");
    }

    #[test]
    fn text_body_names_the_submitter() {
        let body = mail("Jane Doe", "Hello\nthere").text_body();
        assert_eq!(body, "Nom : Jane Doe\nEmail : jane@example.com\n\nHello\nthere\n");
    }

    #[test]
    fn html_body_is_escaped_with_line_breaks() {
        let body = mail("Jane", "<script>alert(1)</script>\r\nbye").html_body();
        assert!(body.contains("&lt;script&gt;"));
        assert!(!body.contains("<script>"));
        assert!(body.contains("<br />\nbye"));
    }

    #[test]
    fn message_replies_to_the_submitter() {
        let formatted = String::from_utf8(mail("Jane Doe", "Hello").to_message().unwrap().formatted()).unwrap();

        assert!(formatted.contains("To: owner@folio.dev"));
        assert!(formatted.contains("Subject: Nouveau message du portfolio"));
        assert!(formatted.contains("relay@folio.dev"));
        let reply_to = formatted.lines().find(|l| l.starts_with("Reply-To:")).unwrap();
        assert!(reply_to.contains("<jane@example.com>"));
        assert!(formatted.contains("multipart/alternative"));
    }

    #[test]
    fn header_names_cannot_break_lines() {
        assert_eq!(header_safe("Jane\r\nBcc: x@y.z"), "Jane  Bcc: x@y.z");
        let formatted =
            String::from_utf8(mail("Jane\nBcc: spam@evil.test", "Hi").to_message().unwrap().formatted()).unwrap();
        assert!(!formatted.lines().any(|l| l.starts_with("Bcc:")));
    }

    #[test]
    fn bad_configured_recipient_is_an_address_error() {
        let mut mail = mail("Jane", "Hi");
        mail.recipient = "not an address".to_owned();
        assert!(matches!(mail.to_message(), Err(MailError::Address { .. })));
    }
}
