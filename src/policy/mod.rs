//! Localized policy content.

pub mod cache;
pub mod document;
pub mod store;

pub use cache::CachedPolicyStore;
pub use document::PolicyDocument;
pub use store::{FsPolicyStore, PolicyError, PolicyStore, POLICY_FILE_NAME};
