use super::{MailError, MailErrorExt, Mailer, OutboundMail};
use async_trait::async_trait;
use folio_domain::config::{SmtpConfig, SmtpEncryption, TransportKind};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::time::Duration;
use tracing::debug;

/// SMTP relay through lettre's pooled async transport.
#[derive(Debug)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
}

impl SmtpMailer {
    /// # Errors
    /// [`MailError::Internal`] without a host, [`MailError::Smtp`] when the TLS
    /// parameters for `host` cannot be built.
    pub fn new(config: &SmtpConfig, timeout: Option<Duration>) -> Result<Self, MailError> {
        let host = config
            .host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or("SMTP host not configured")?;

        let mut builder = match config.encryption {
            SmtpEncryption::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?,
            SmtpEncryption::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(host)?,
            SmtpEncryption::Plain => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host),
        }
        .port(config.port);

        if let Some(username) = config.username.as_deref().filter(|u| !u.is_empty()) {
            let password = config.password.clone().unwrap_or_default();
            builder = builder.credentials(Credentials::new(username.to_owned(), password));
        }
        if timeout.is_some() {
            builder = builder.timeout(timeout);
        }

        debug!(host, port = config.port, encryption = ?config.encryption, "SMTP transport configured");
        Ok(Self { transport: builder.build(), host: host.to_owned() })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    fn transport(&self) -> TransportKind {
        TransportKind::Smtp
    }

    async fn send(&self, mail: &OutboundMail) -> Result<(), MailError> {
        let message = mail.to_message()?;
        let response = self
            .transport
            .send(message)
            .await
            .context(format!("relaying through {}", self.host))?;

        debug!(code = %response.code(), "SMTP server accepted message");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::{ContactForm, ContactSubmission};
    use folio_domain::config::ContactConfig;

    fn config(host: Option<&str>) -> SmtpConfig {
        SmtpConfig {
            host: host.map(str::to_owned),
            port: 1,
            encryption: SmtpEncryption::Plain,
            ..SmtpConfig::default()
        }
    }

    #[test]
    fn host_is_required() {
        let err = SmtpMailer::new(&config(Some("  ")), None).unwrap_err();
        assert!(matches!(err, MailError::Internal { .. }));
    }

    #[test]
    fn every_encryption_mode_builds() {
        for encryption in [SmtpEncryption::StartTls, SmtpEncryption::Implicit, SmtpEncryption::Plain] {
            let cfg = SmtpConfig {
                encryption,
                username: Some("relay".to_owned()),
                password: Some("secret".to_owned()),
                ..config(Some("smtp.example.com"))
            };
            assert!(SmtpMailer::new(&cfg, Some(Duration::from_secs(5))).is_ok());
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_an_smtp_error() {
        let mailer = SmtpMailer::new(&config(Some("127.0.0.1")), Some(Duration::from_secs(2))).unwrap();
        let submission = ContactSubmission::parse(ContactForm {
            name: Some("Jane".to_owned()),
            email: Some("jane@example.com".to_owned()),
            message: Some("Hi".to_owned()),
        })
        .unwrap();
        let mail = OutboundMail::compose(&ContactConfig::default(), submission);

        let err = mailer.send(&mail).await.unwrap_err();
        assert!(matches!(err, MailError::Smtp { context: Some(_), .. }));
    }
}
