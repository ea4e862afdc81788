use folio_domain::config::{
    ApiConfig, ContactConfig, CorsConfig, LogConfig, ServerConfig, SmtpEncryption, TransportKind,
};
use serde_json::json;

#[test]
fn defaults_match_legacy_deployment() {
    let cfg = ApiConfig::default();

    assert_eq!(cfg.server.port, 8080);
    assert!(cfg.server.ssl.is_none());
    assert_eq!(cfg.contact.recipient, "contact@example.com");
    assert_eq!(cfg.contact.subject, "Nouveau message du portfolio");
    assert_eq!(cfg.mail.transport, TransportKind::Smtp);
    assert_eq!(cfg.mail.smtp.port, 587);
    assert_eq!(cfg.mail.smtp.encryption, SmtpEncryption::StartTls);
    assert!(cfg.mail.smtp.host.is_none());
    assert!(cfg.mail.timeout_secs.is_none());
    assert_eq!(cfg.storage.static_dir, std::path::PathBuf::from("public"));
    assert_eq!(LogConfig::default().level, "info");
    assert!(ServerConfig::default().address.is_unspecified());
}

#[test]
fn partial_documents_keep_defaults() {
    let raw = json!({
        "server": { "port": 9000 },
        "contact": { "recipient": "me@folio.dev" },
        "mail": {
            "transport": "http_api",
            "http_api": { "access_key": "key-123" }
        }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.contact.recipient, "me@folio.dev");
    assert_eq!(cfg.contact.subject, "Nouveau message du portfolio");
    assert_eq!(cfg.mail.transport, TransportKind::HttpApi);
    assert_eq!(cfg.mail.http_api.access_key, "key-123");
    assert_eq!(cfg.mail.http_api.endpoint, "https://api.web3forms.com/submit");
}

#[test]
fn encryption_accepts_legacy_spellings() {
    let parse = |value: &str| -> SmtpEncryption {
        serde_json::from_value(json!(value)).expect("encryption deserialize")
    };

    assert_eq!(parse("tls"), SmtpEncryption::StartTls);
    assert_eq!(parse("starttls"), SmtpEncryption::StartTls);
    assert_eq!(parse("ssl"), SmtpEncryption::Implicit);
    assert_eq!(parse("smtps"), SmtpEncryption::Implicit);
    assert_eq!(parse("none"), SmtpEncryption::Plain);
    assert_eq!(parse(""), SmtpEncryption::Plain);
}

#[test]
fn encryption_ignores_case() {
    let parse = |value: &str| -> SmtpEncryption {
        serde_json::from_value(json!(value)).expect("encryption deserialize")
    };

    assert_eq!(parse("STARTTLS"), SmtpEncryption::StartTls);
    assert_eq!(parse("TLS"), SmtpEncryption::StartTls);
    assert_eq!(parse("SSL"), SmtpEncryption::Implicit);
    assert_eq!(parse(" Smtps "), SmtpEncryption::Implicit);
    assert_eq!(parse("None"), SmtpEncryption::Plain);
    assert!(serde_json::from_value::<SmtpEncryption>(json!("ssl3")).is_err());
}

#[test]
fn allowed_origins_accept_list_or_joined_string() {
    let list: CorsConfig =
        serde_json::from_value(json!({ "allowed_origins": ["https://folio.dev"] })).unwrap();
    assert_eq!(list.allowed_origins, vec!["https://folio.dev"]);

    let joined: CorsConfig = serde_json::from_value(
        json!({ "allowed_origins": "https://folio.dev, https://www.folio.dev," }),
    )
    .unwrap();
    assert_eq!(joined.allowed_origins, vec!["https://folio.dev", "https://www.folio.dev"]);
}

#[test]
fn secrets_are_redacted_in_debug_output() {
    let raw = json!({
        "mail": {
            "smtp": { "host": "smtp.folio.dev", "password": "hunter2" },
            "http_api": { "access_key": "super-secret" }
        }
    });
    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");

    let rendered = format!("{cfg:?}");
    assert!(rendered.contains("smtp.folio.dev"));
    assert!(!rendered.contains("hunter2"));
    assert!(!rendered.contains("super-secret"));
}

#[test]
fn sender_falls_back_to_recipient() {
    let mut contact = ContactConfig::default();
    assert_eq!(contact.sender_address(), "contact@example.com");

    contact.sender = Some("  ".to_owned());
    assert_eq!(contact.sender_address(), "contact@example.com");

    contact.sender = Some("relay@folio.dev".to_owned());
    assert_eq!(contact.sender_address(), "relay@folio.dev");
}

#[test]
fn cors_echoes_origins() {
    let open = CorsConfig::default();
    assert_eq!(open.allow_origin(Some("https://folio.dev")), Some("https://folio.dev"));
    assert_eq!(open.allow_origin(None), Some("*"));

    let restricted = CorsConfig { allowed_origins: vec!["https://folio.dev".to_owned()] };
    assert_eq!(restricted.allow_origin(Some("https://folio.dev")), Some("https://folio.dev"));
    assert_eq!(restricted.allow_origin(Some("https://evil.example")), None);
}

#[test]
fn config_is_copy_on_write() {
    let shared = ApiConfig::default();
    let mut edited = shared.clone();
    edited.server.port = 1234;

    assert_eq!(shared.server.port, 8080);
    assert_eq!(edited.server.port, 1234);
}
