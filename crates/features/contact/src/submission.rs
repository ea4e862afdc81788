use crate::error::{ContactError, ValidationKind};
use email_address::EmailAddress;
use folio_derive::api_model;

/// Raw contact form as posted by the page. Every field may be absent.
#[api_model(deny_unknown_fields = false)]
#[derive(Default, Clone)]
#[serde(default)]
pub struct ContactForm {
    /// Visitor name
    pub name: Option<String>,
    /// Visitor address, used as `Reply-To`
    pub email: Option<String>,
    /// Free text
    pub message: Option<String>,
}

/// Relay answer. `error` is present only when `ok` is false.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResponse {
    #[must_use]
    pub const fn accepted() -> Self {
        Self { ok: true, error: None }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self { ok: false, error: Some(message.into()) }
    }
}

/// A validated submission. Only obtainable through [`ContactSubmission::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    name: String,
    email: EmailAddress,
    message: String,
}

impl ContactSubmission {
    /// Trims every field, then checks presence before the address syntax.
    ///
    /// # Errors
    /// [`ContactError::Validation`] with [`ValidationKind::MissingFields`] when a
    /// field is absent or blank, [`ValidationKind::InvalidEmail`] when the
    /// address does not parse.
    pub fn parse(form: ContactForm) -> Result<Self, ContactError> {
        let ContactForm { name, email, message } = form;
        let (Some(name), Some(email), Some(message)) =
            (non_blank(name), non_blank(email), non_blank(message))
        else {
            return Err(ContactError::validation(ValidationKind::MissingFields));
        };

        let email = parse_address(&email)
            .ok_or_else(|| ContactError::validation(ValidationKind::InvalidEmail))?;

        Ok(Self { name, email, message })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

/// Bare `local@domain.tld` only: display names and dotless domains are refused.
fn parse_address(raw: &str) -> Option<EmailAddress> {
    EmailAddress::parse_with_options(raw, Default::default())
        .ok()
        .filter(|address| address.email() == raw && address.domain().contains('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: Some(name.to_owned()),
            email: Some(email.to_owned()),
            message: Some(message.to_owned()),
        }
    }

    fn kind(result: Result<ContactSubmission, ContactError>) -> ValidationKind {
        match result {
            Err(ContactError::Validation { kind, .. }) => kind,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn fields_are_trimmed() {
        let submission =
            ContactSubmission::parse(form("  Jane Doe ", " jane@example.com\n", "\tHello  ")).unwrap();

        assert_eq!(submission.name(), "Jane Doe");
        assert_eq!(submission.email().as_str(), "jane@example.com");
        assert_eq!(submission.message(), "Hello");
    }

    #[test]
    fn blank_or_absent_fields_are_missing() {
        assert_eq!(kind(ContactSubmission::parse(form("   ", "jane@example.com", "Hi"))), ValidationKind::MissingFields);
        assert_eq!(kind(ContactSubmission::parse(form("Jane", "", "Hi"))), ValidationKind::MissingFields);
        assert_eq!(kind(ContactSubmission::parse(form("Jane", "jane@example.com", " \n "))), ValidationKind::MissingFields);
        assert_eq!(kind(ContactSubmission::parse(ContactForm::default())), ValidationKind::MissingFields);
    }

    #[test]
    fn missing_fields_win_over_a_bad_address() {
        assert_eq!(kind(ContactSubmission::parse(form("", "not-an-email", "Hi"))), ValidationKind::MissingFields);
    }

    #[test]
    fn malformed_addresses_are_rejected() {
        for email in ["not-an-email", "jane@", "@example.com", "jane@localhost", "Jane <jane@example.com>"] {
            assert_eq!(
                kind(ContactSubmission::parse(form("Jane", email, "Hi"))),
                ValidationKind::InvalidEmail,
                "{email} should be refused"
            );
        }
    }

    #[test]
    fn unknown_and_mistyped_fields_do_not_break_decoding() {
        let form: ContactForm =
            serde_json::from_str(r#"{"name":"Jane","email":"jane@example.com","message":"Hi","website":"x"}"#).unwrap();
        assert!(ContactSubmission::parse(form).is_ok());

        let partial: ContactForm = serde_json::from_str(r#"{"name":"Jane"}"#).unwrap();
        assert_eq!(partial.email, None);
    }

    #[test]
    fn failure_answers_carry_the_message() {
        let json = serde_json::to_value(RelayResponse::failure("Email invalide.")).unwrap();
        assert_eq!(json, serde_json::json!({ "ok": false, "error": "Email invalide." }));

        let json = serde_json::to_value(RelayResponse::accepted()).unwrap();
        assert_eq!(json, serde_json::json!({ "ok": true }));
    }
}
