//! Location subsystem: resolves airport codes to country codes through the
//! external location service.

pub mod client;
pub mod resolver;
pub mod types;

pub use client::LocationClient;
pub use resolver::{HttpLocationResolver, LocationResolver};
pub use types::{LocationError, RequestContext};
