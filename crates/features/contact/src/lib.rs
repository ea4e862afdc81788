//! Contact relay feature slice.
//!
//! Turns a posted contact form into exactly one email to the site owner:
//! [`ContactSubmission::parse`] validates, [`OutboundMail::compose`] addresses
//! the message from configuration and the deployment's [`Mailer`] delivers it.
//! Nothing is stored or retried, and field contents never reach the logs.

mod error;
#[cfg(feature = "server")]
mod handler;
pub mod mailer;
mod submission;

pub use crate::error::{ContactError, ContactErrorExt, DISPATCH_FAILED, ValidationKind};
pub use crate::mailer::{MailError, Mailer, OutboundMail};
pub use crate::submission::{ContactForm, ContactSubmission, RelayResponse};

use email_address::EmailAddress;
use folio_domain::config::{ApiConfig, ContactConfig, TransportKind};
use folio_kernel::domain::registry::InitializedSlice;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Path the page posts to.
pub const CONTACT_PATH: &str = "/contact";
/// Former script location, kept so deployed pages keep working.
pub const LEGACY_CONTACT_PATH: &str = "/contact.php";

/// Contact feature state
#[folio_derive::folio_slice]
pub struct Contact {
    settings: ContactConfig,
    mailer: Arc<dyn Mailer>,
}

impl Contact {
    /// Validates `form` and dispatches it once.
    ///
    /// # Errors
    /// [`ContactError::Validation`] before any delivery attempt,
    /// [`ContactError::Dispatch`] when the transport fails.
    pub async fn relay(&self, form: ContactForm) -> Result<(), ContactError> {
        let submission = ContactSubmission::parse(form).inspect_err(|err| {
            if let ContactError::Validation { kind, .. } = err {
                warn!(reason = %kind, "Submission rejected");
            }
        })?;

        let mail = OutboundMail::compose(&self.settings, submission);
        let transport = self.mailer.transport();

        self.mailer.send(&mail).await.inspect_err(|err| {
            error!(%transport, error = %err, "Dispatch failed");
        })?;

        info!(%transport, "Submission relayed");
        Ok(())
    }

    #[must_use]
    pub fn transport(&self) -> TransportKind {
        self.mailer.transport()
    }
}

/// Initialize the contact feature with the configured transport.
///
/// # Errors
/// [`ContactError::Config`] when the recipient or sender is not a valid
/// address, or the selected transport cannot be built.
pub fn init(config: &ApiConfig) -> Result<InitializedSlice, ContactError> {
    validate(&config.contact)?;

    let mailer = mailer::from_config(&config.mail).map_err(|e| ContactError::Config {
        message: e.to_string().into(),
        context: Some(format!("building {} transport", config.mail.transport).into()),
    })?;

    Ok(init_with_mailer(&config.contact, mailer))
}

/// Initialize the contact feature around an existing mailer.
#[must_use]
pub fn init_with_mailer(settings: &ContactConfig, mailer: Arc<dyn Mailer>) -> InitializedSlice {
    info!(transport = %mailer.transport(), "Contact server slice initialized");
    InitializedSlice::new(Contact::new(ContactInner { settings: settings.clone(), mailer }))
}

fn validate(settings: &ContactConfig) -> Result<(), ContactError> {
    if !EmailAddress::is_valid(&settings.recipient) {
        return Err(ContactError::Config {
            message: format!("'{}' is not a valid recipient address", settings.recipient).into(),
            context: Some("contact.recipient".into()),
        });
    }

    if !EmailAddress::is_valid(settings.sender_address()) {
        return Err(ContactError::Config {
            message: format!("'{}' is not a valid sender address", settings.sender_address()).into(),
            context: Some("contact.sender".into()),
        });
    }

    Ok(())
}

/// Relay routes: `POST /contact` and its `/contact.php` alias.
#[cfg(feature = "server")]
pub fn router() -> utoipa_axum::router::OpenApiRouter<folio_kernel::server::ApiState> {
    use utoipa_axum::routes;

    utoipa_axum::router::OpenApiRouter::new()
        .routes(routes!(handler::submit_handler))
        .route(LEGACY_CONTACT_PATH, axum::routing::post(handler::submit_handler))
}
