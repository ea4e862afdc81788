/// `OpenAPI` tag for operational endpoints.
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for the contact relay.
pub const CONTACT_TAG: &str = "Contact";

/// Prefix of the structured environment overrides (`FOLIO__SERVER__PORT`).
pub const ENV_PREFIX: &str = "FOLIO";
/// Default configuration file stem, resolved by the `config` crate
/// (`relay.toml`, `relay.yaml`, ...).
pub const DEFAULT_CONFIG_FILE: &str = "relay";

pub const DEFAULT_RECIPIENT: &str = "contact@example.com";
pub const DEFAULT_SUBJECT: &str = "Nouveau message du portfolio";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_HTTP_API_ENDPOINT: &str = "https://api.web3forms.com/submit";
