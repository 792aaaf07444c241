//! Hazardous goods policy evaluation service.
//!
//! Given a list of airport codes, decides whether the hazardous goods
//! policy of a jurisdiction applies and returns it in the best locale the
//! client accepts.

pub mod config;
pub mod evaluate;
pub mod locale;
pub mod location;
pub mod policy;
pub mod server;
pub mod telemetry;

/// Service version reported by the health endpoint.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
