use crate::mailer::MailError;
use std::borrow::Cow;
use std::fmt;

/// Generic answer for every failure past validation. Transport detail stays in the logs.
pub const DISPATCH_FAILED: &str = "Envoi impossible.";

/// Why a submission was refused before any delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    MissingFields,
    InvalidEmail,
}

impl ValidationKind {
    /// Message shown to the visitor.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::MissingFields => "Champs requis manquants.",
            Self::InvalidEmail => "Email invalide.",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingFields => "missing_fields",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A specialized [`ContactError`] enum of this crate.
#[folio_derive::folio_error]
pub enum ContactError {
    /// The submission is incomplete or malformed.
    #[error("Contact validation error{}: {kind}", format_context(.context))]
    Validation { kind: ValidationKind, context: Option<Cow<'static, str>> },
    /// The mail transport failed or refused the message.
    #[error("Contact dispatch error{}: {source}", format_context(.context))]
    Dispatch { source: MailError, context: Option<Cow<'static, str>> },
    /// The relay cannot start with the given settings.
    #[error("Contact config error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Internal contact error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ContactError {
    pub(crate) const fn validation(kind: ValidationKind) -> Self {
        Self::Validation { kind, context: None }
    }
}

#[cfg(feature = "server")]
mod response {
    use super::{ContactError, DISPATCH_FAILED};
    use crate::submission::RelayResponse;
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};

    impl IntoResponse for ContactError {
        fn into_response(self) -> Response {
            let (status, message) = match &self {
                Self::Validation { kind, .. } => (StatusCode::BAD_REQUEST, kind.user_message()),
                Self::Dispatch { .. } | Self::Config { .. } | Self::Internal { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, DISPATCH_FAILED)
                },
            };

            (status, Json(RelayResponse::failure(message))).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_are_stable() {
        assert_eq!(ValidationKind::MissingFields.user_message(), "Champs requis manquants.");
        assert_eq!(ValidationKind::InvalidEmail.user_message(), "Email invalide.");
    }

    #[test]
    fn dispatch_errors_wrap_mail_errors() {
        let err = ContactError::from(MailError::from("socket closed"));
        assert!(matches!(err, ContactError::Dispatch { .. }));
        assert_eq!(err.to_string(), "Contact dispatch error: Internal mail error: socket closed");
    }

    #[cfg(feature = "server")]
    #[test]
    fn dispatch_errors_hide_their_cause() {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let response = ContactError::from(MailError::from("535 auth failed")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ContactError::validation(ValidationKind::InvalidEmail).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
