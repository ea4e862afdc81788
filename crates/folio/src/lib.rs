//! Facade crate for the relay features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `folio` with the `server` feature.
//! - Call [`init`] to build every feature slice, then mount
//!   [`server::router::api_router`].

pub use folio_domain as domain;
use folio_domain::config::ApiConfig;
use folio_domain::registry::InitializedSlice;
pub use folio_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        use folio_kernel::server::ApiState;
        pub use folio_kernel::server::router::system_router;
        use utoipa_axum::router::OpenApiRouter;

        /// System routes plus every feature's routes.
        #[must_use]
        pub fn api_router() -> OpenApiRouter<ApiState> {
            system_router().merge(crate::features::contact::router())
        }
    }
}

/// Feature crates.
pub mod features {
    pub use folio_contact as contact;
}

/// Initialize all enabled features for server mode.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(config: &ApiConfig) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let slices = vec![
        // Contact relay
        features::contact::init(config)?,
    ];

    Ok(slices)
}
