//! # Domain Models
//!
//! Plain data for the relay: configuration, constants and the slice registry
//! container. Depends on `serde` only; validation and I/O live in the kernel
//! and feature crates.

pub mod config;
pub mod constants;
pub mod registry;
