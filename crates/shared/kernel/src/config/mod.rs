use crate::domain::constants::{DEFAULT_CONFIG_FILE, ENV_PREFIX};
use config::{Case, Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;

#[folio_derive::folio_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Environment variables understood by the original PHP relay, mapped onto
/// config keys (double underscore = nesting).
const LEGACY_ENV: &[(&str, &str)] = &[
    ("CONTACT_TO", "CONTACT__RECIPIENT"),
    ("SMTP_HOST", "MAIL__SMTP__HOST"),
    ("SMTP_USER", "MAIL__SMTP__USERNAME"),
    ("SMTP_PASS", "MAIL__SMTP__PASSWORD"),
    ("SMTP_PORT", "MAIL__SMTP__PORT"),
    ("SMTP_SECURE", "MAIL__SMTP__ENCRYPTION"),
];

/// Loads configuration from the process environment.
///
/// See [`load_config_with_env`] for the layering rules.
///
/// # Errors
/// Returns an error when an explicit file is missing, a source cannot be parsed
/// or the merged document does not match `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_with_env(path, std::env::vars())
}

/// Loads configuration from layered sources, later ones winning:
///
/// 1. **File**: `path` when given (must exist), otherwise an optional
///    `relay.{toml,yaml,json}` in the working directory.
/// 2. **Legacy variables**: `CONTACT_TO`, `SMTP_HOST`, `SMTP_USER`,
///    `SMTP_PASS`, `SMTP_PORT`, `SMTP_SECURE`. Empty values are ignored.
/// 3. **Structured overrides**: `FOLIO__` prefixed variables with `__` as
///    the nesting separator (`FOLIO__MAIL__TRANSPORT=http_api`).
///    `FOLIO__CORS__ALLOWED_ORIGINS` takes a comma separated list.
///
/// Environment values stay strings until deserialization, so numeric
/// secrets keep their digits and typed fields (`SMTP_PORT`) still parse.
///
/// # Errors
/// Same as [`load_config`].
pub fn load_config_with_env<T, I>(path: Option<impl AsRef<Path>>, env: I) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = (String, String)>,
{
    let env: Map<String, String> = env.into_iter().collect();

    let file = match &path {
        Some(path) => File::from(path.as_ref()).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let config = Config::builder()
        .add_source(file)
        .add_source(
            Environment::default()
                .separator("__")
                .source(Some(legacy_overrides(&env))),
        )
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .convert_case(Case::Snake)
                .source(Some(env)),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

fn legacy_overrides(env: &Map<String, String>) -> Map<String, String> {
    LEGACY_ENV
        .iter()
        .filter_map(|(legacy, key)| {
            let value = env.get(*legacy)?.trim();
            (!value.is_empty()).then(|| ((*key).to_owned(), value.to_owned()))
        })
        .collect()
}
