use std::borrow::Cow;

/// Failures while composing or delivering a relayed message.
#[folio_derive::folio_error]
pub enum MailError {
    #[error("SMTP error{}: {source}", format_context(.context))]
    Smtp { source: lettre::transport::smtp::Error, context: Option<Cow<'static, str>> },
    #[error("Sendmail error{}: {source}", format_context(.context))]
    Sendmail { source: lettre::transport::sendmail::Error, context: Option<Cow<'static, str>> },
    #[error("HTTP API error{}: {source}", format_context(.context))]
    Http { source: reqwest::Error, context: Option<Cow<'static, str>> },
    #[error("Invalid mailbox{}: {source}", format_context(.context))]
    Address { source: lettre::address::AddressError, context: Option<Cow<'static, str>> },
    #[error("Message build error{}: {source}", format_context(.context))]
    Build { source: lettre::error::Error, context: Option<Cow<'static, str>> },
    /// The provider answered but refused the message.
    #[error("Provider rejected message{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Internal mail error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
