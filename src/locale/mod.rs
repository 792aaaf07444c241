//! Locale negotiation for policy content.
//!
//! Provides the fixed catalog of supported locales, Accept-Language
//! parsing, and best-fit matching of client preferences against the catalog.

pub mod accept;
pub mod catalog;
pub mod negotiator;

pub use accept::{parse_accept_language, LanguageRange};
pub use catalog::{LocaleTag, SUPPORTED_LOCALES};
pub use negotiator::{LanguageNegotiator, Negotiation};
