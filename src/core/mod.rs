//! Core functionality for the gateway
//!
//! The fallback dispatcher, the provider capability and its vendor
//! adapters, and the voice resolution tables.

pub mod dispatcher;
pub mod providers;
pub mod types;
pub mod voices;
