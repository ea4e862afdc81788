//! Axum plumbing shared by every slice.

pub mod assets;
pub mod cors;
mod health;
pub mod router;
mod state;

pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};
