use super::{MailError, MailErrorExt, Mailer, OutboundMail};
use async_trait::async_trait;
use folio_domain::config::{SendmailConfig, TransportKind};
use lettre::{AsyncSendmailTransport, AsyncTransport, Tokio1Executor};
use std::fmt;

const DEFAULT_COMMAND: &str = "sendmail";

/// Pipes messages to a local `sendmail`-compatible binary.
pub struct SendmailMailer {
    transport: AsyncSendmailTransport<Tokio1Executor>,
    command: String,
}

impl SendmailMailer {
    #[must_use]
    pub fn new(config: &SendmailConfig) -> Self {
        let command = config
            .command
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COMMAND)
            .to_owned();

        Self { transport: AsyncSendmailTransport::new_with_command(&command), command }
    }
}

impl fmt::Debug for SendmailMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendmailMailer").field("command", &self.command).finish_non_exhaustive()
    }
}

#[async_trait]
impl Mailer for SendmailMailer {
    fn transport(&self) -> TransportKind {
        TransportKind::Sendmail
    }

    async fn send(&self, mail: &OutboundMail) -> Result<(), MailError> {
        let message = mail.to_message()?;
        self.transport.send(message).await.context("piping to sendmail")
    }
}
