use super::{MailError, MailErrorExt, Mailer, OutboundMail};
use async_trait::async_trait;
use folio_domain::config::{HttpApiConfig, TransportKind};
use reqwest::Client;
use reqwest::multipart::Form;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Provider answer, e.g. `{"success": true, "message": "Email sent successfully!"}`.
#[derive(Debug, Deserialize)]
struct ProviderAnswer {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Hands submissions to a Web3Forms-compatible form-to-email service.
///
/// The service owns the final recipient (bound to the access key), so only the
/// submission, subject and sender label are posted.
pub struct HttpApiMailer {
    client: Client,
    endpoint: String,
    access_key: String,
    from_name: String,
}

impl HttpApiMailer {
    /// # Errors
    /// [`MailError::Internal`] without an access key, [`MailError::Http`] when
    /// the HTTP client cannot be built.
    pub fn new(config: &HttpApiConfig, timeout: Option<Duration>) -> Result<Self, MailError> {
        if config.access_key.trim().is_empty() {
            return Err("HTTP API access key not configured".into());
        }

        let mut builder = Client::builder().user_agent(concat!("folio-relay/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build().context("building HTTP client")?,
            endpoint: config.endpoint.clone(),
            access_key: config.access_key.clone(),
            from_name: config.from_name.clone(),
        })
    }

    fn form(&self, mail: &OutboundMail) -> Form {
        let submission = mail.submission();
        Form::new()
            .text("access_key", self.access_key.clone())
            .text("subject", mail.subject().to_owned())
            .text("from_name", self.from_name.clone())
            .text("name", submission.name().to_owned())
            .text("email", submission.email().to_string())
            .text("replyto", submission.email().to_string())
            .text("message", submission.message().to_owned())
    }
}

impl fmt::Debug for HttpApiMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpApiMailer")
            .field("endpoint", &self.endpoint)
            .field("from_name", &self.from_name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Mailer for HttpApiMailer {
    fn transport(&self) -> TransportKind {
        TransportKind::HttpApi
    }

    async fn send(&self, mail: &OutboundMail) -> Result<(), MailError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(self.form(mail))
            .send()
            .await
            .context(format!("posting to {}", self.endpoint))?;

        let status = response.status();
        let answer: ProviderAnswer =
            response.json().await.context(format!("decoding answer (status {status})"))?;

        if !status.is_success() || !answer.success {
            return Err(MailError::Rejected {
                message: answer.message.unwrap_or_else(|| status.to_string()).into(),
                context: Some(format!("status {status}").into()),
            });
        }

        debug!(%status, "Provider accepted message");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::{ContactForm, ContactSubmission};
    use folio_domain::config::ContactConfig;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn mailer(server: &MockServer) -> HttpApiMailer {
        let config = HttpApiConfig {
            endpoint: format!("{}/submit", server.uri()),
            access_key: "test-key".to_owned(),
            from_name: "Portfolio".to_owned(),
        };
        HttpApiMailer::new(&config, Some(Duration::from_secs(5))).unwrap()
    }

    fn mail() -> OutboundMail {
        let submission = ContactSubmission::parse(ContactForm {
            name: Some("Jane Doe".to_owned()),
            email: Some("jane@example.com".to_owned()),
            message: Some("Hello".to_owned()),
        })
        .unwrap();
        OutboundMail::compose(&ContactConfig::default(), submission)
    }

    #[test]
    fn access_key_is_required() {
        let err = HttpApiMailer::new(&HttpApiConfig::default(), None).unwrap_err();
        assert!(matches!(err, MailError::Internal { .. }));
    }

    #[tokio::test]
    async fn posts_the_submission_as_multipart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .and(body_string_contains("name=\"access_key\""))
            .and(body_string_contains("test-key"))
            .and(body_string_contains("name=\"replyto\""))
            .and(body_string_contains("jane@example.com"))
            .and(body_string_contains("Nouveau message du portfolio"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "message": "Email sent successfully!" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        mailer(&server).send(&mail()).await.unwrap();
    }

    #[tokio::test]
    async fn refusal_is_a_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": false, "message": "Invalid access key" })),
            )
            .mount(&server)
            .await;

        let err = mailer(&server).send(&mail()).await.unwrap_err();
        assert!(matches!(&err, MailError::Rejected { message, .. } if message == "Invalid access key"));
    }

    #[tokio::test]
    async fn error_status_is_a_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({ "success": false })))
            .mount(&server)
            .await;

        let err = mailer(&server).send(&mail()).await.unwrap_err();
        assert!(matches!(err, MailError::Rejected { .. }));
    }

    #[tokio::test]
    async fn unparsable_answer_is_an_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
            .mount(&server)
            .await;

        let err = mailer(&server).send(&mail()).await.unwrap_err();
        assert!(matches!(err, MailError::Http { .. }));
    }
}
