//! Kernel utilities shared by the relay crates.
//!
//! * [`config`]: layered configuration loading (file, legacy environment,
//!   `FOLIO__` overrides).
//! * `server` (feature `server`): the shared [`server::ApiState`], system
//!   routes, CORS middleware and static site fallback.
//!
//! ```rust,no_run
//! use folio_kernel::config::load_config;
//! use folio_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(None::<&str>).unwrap_or_default();
//! assert!(!cfg.contact.recipient.is_empty());
//! ```

pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use folio_domain as domain;
