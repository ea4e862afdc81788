use crate::constants::{
    DEFAULT_HTTP_API_ENDPOINT, DEFAULT_RECIPIENT, DEFAULT_SMTP_PORT, DEFAULT_SUBJECT,
};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Relay configuration, grouped by concern.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub contact: ContactConfig,
    pub mail: MailConfig,
    pub storage: StorageConfig,
    pub log: LogConfig,
}

/// Arc-wrapped config, cheap to clone into handlers.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP listener.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths (PEM).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Cross-origin policy. An empty list echoes any requesting origin.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// A list, or one comma separated string as environment variables carry it.
    #[serde(deserialize_with = "origin_list")]
    pub allowed_origins: Vec<String>,
}

fn origin_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Origins {
        Joined(String),
        List(Vec<String>),
    }

    let origins = match Origins::deserialize(deserializer)? {
        Origins::Joined(joined) => joined.split(',').map(str::to_owned).collect(),
        Origins::List(list) => list,
    };
    Ok(origins
        .into_iter()
        .map(|origin| origin.trim().to_owned())
        .filter(|origin| !origin.is_empty())
        .collect())
}

impl CorsConfig {
    /// Returns the value for `Access-Control-Allow-Origin`, if any.
    ///
    /// Requests without an `Origin` header get `*`.
    #[must_use]
    pub fn allow_origin<'a>(&self, origin: Option<&'a str>) -> Option<&'a str> {
        match origin {
            None => Some("*"),
            Some(origin) if self.allowed_origins.is_empty() => Some(origin),
            Some(origin) => self
                .allowed_origins
                .iter()
                .any(|allowed| allowed == "*" || allowed.eq_ignore_ascii_case(origin))
                .then_some(origin),
        }
    }
}

/// Where relayed messages go and how they are labelled.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Fixed recipient; never taken from the request.
    pub recipient: String,
    pub subject: String,
    /// `From` address of relayed mail. Falls back to `recipient`.
    pub sender: Option<String>,
    pub sender_name: String,
}

impl ContactConfig {
    #[must_use]
    pub fn sender_address(&self) -> &str {
        self.sender.as_deref().filter(|s| !s.trim().is_empty()).unwrap_or(&self.recipient)
    }
}

/// Outbound channel selection. One per deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    #[default]
    Smtp,
    Sendmail,
    HttpApi,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Smtp => "smtp",
            Self::Sendmail => "sendmail",
            Self::HttpApi => "http_api",
        })
    }
}

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub transport: TransportKind,
    /// Upper bound for one dispatch. Unset keeps the transport's own default.
    pub timeout_secs: Option<u64>,
    pub smtp: SmtpConfig,
    pub sendmail: SendmailConfig,
    pub http_api: HttpApiConfig,
}

/// SMTP session security. Accepts the `tls`/`ssl` spellings used by
/// `SMTP_SECURE` in older deployments, in any case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum SmtpEncryption {
    #[default]
    StartTls,
    Implicit,
    Plain,
}

impl FromStr for SmtpEncryption {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "starttls" | "tls" => Ok(Self::StartTls),
            "ssl" | "smtps" | "implicit" => Ok(Self::Implicit),
            "none" | "" => Ok(Self::Plain),
            other => Err(format!("unknown SMTP encryption `{other}`, expected starttls, ssl or none")),
        }
    }
}

impl TryFrom<String> for SmtpEncryption {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    /// Without a host the relay hands messages to the local sendmail binary.
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub encryption: SmtpEncryption,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("encryption", &self.encryption)
            .finish()
    }
}

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SendmailConfig {
    /// Binary to invoke; unset uses the system default (`sendmail` on `PATH`).
    pub command: Option<String>,
}

/// Third-party form-to-email API (Web3Forms-compatible).
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct HttpApiConfig {
    pub endpoint: String,
    pub access_key: String,
    pub from_name: String,
}

impl fmt::Debug for HttpApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpApiConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key", &"<redacted>")
            .field("from_name", &self.from_name)
            .finish()
    }
}

/// Static site served next to the relay.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    /// Filter directives, e.g. `folio_contact=debug,tower_http=info`.
    pub filter: Option<String>,
    /// Enables rolling file output in this directory.
    pub dir: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 8080, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            recipient: DEFAULT_RECIPIENT.to_owned(),
            subject: DEFAULT_SUBJECT.to_owned(),
            sender: None,
            sender_name: "Portfolio".to_owned(),
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_SMTP_PORT,
            username: None,
            password: None,
            encryption: SmtpEncryption::default(),
        }
    }
}

impl Default for HttpApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_HTTP_API_ENDPOINT.to_owned(),
            access_key: String::new(),
            from_name: "Portfolio".to_owned(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { static_dir: PathBuf::from("public") }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, dir: None, json: false }
    }
}
