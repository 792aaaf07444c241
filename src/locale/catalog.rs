//! The supported-locale catalog.
//!
//! Every entry has a policy document under the content root, keyed by its
//! canonical string form.

use std::fmt;

/// A canonical locale identifier drawn from the supported catalog
/// (or one of the two designated sentinels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocaleTag(&'static str);

impl LocaleTag {
    /// Sentinel for a preference list that matched nothing.
    pub const UNDETERMINED: LocaleTag = LocaleTag("und");

    /// Used when the client sends no Accept-Language header.
    pub const DEFAULT: LocaleTag = LocaleTag("en-US");

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn is_undetermined(&self) -> bool {
        *self == Self::UNDETERMINED
    }

    /// Compare against a tag string, ignoring case and accepting `_` as separator.
    pub fn matches(&self, tag: &str) -> bool {
        self.0.len() == tag.len()
            && self
                .0
                .bytes()
                .zip(tag.bytes())
                .all(|(a, b)| a.eq_ignore_ascii_case(&b) || (a == b'-' && b == b'_'))
    }

    /// Find the catalog entry for `tag`, if one exists.
    pub fn lookup(tag: &str) -> Option<LocaleTag> {
        SUPPORTED_LOCALES.iter().copied().find(|t| t.matches(tag))
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Supported locales, in matching order.
pub const SUPPORTED_LOCALES: &[LocaleTag] = &[
    LocaleTag("bg"),      // Bulgarian
    LocaleTag("cs"),      // Czech
    LocaleTag("da"),      // Danish
    LocaleTag("de"),      // German
    LocaleTag("el"),      // Greek
    LocaleTag("en"),      // English
    LocaleTag("en-US"),   // American English
    LocaleTag("en-GB"),   // British English
    LocaleTag("es"),      // Spanish
    LocaleTag("es-ES"),   // European Spanish
    LocaleTag("es-419"),  // Latin American Spanish
    LocaleTag("fi"),      // Finnish
    LocaleTag("fr-CA"),   // Canadian French
    LocaleTag("fr"),      // French
    LocaleTag("hr"),      // Croatian
    LocaleTag("hu"),      // Hungarian
    LocaleTag("it"),      // Italian
    LocaleTag("ja"),      // Japanese
    LocaleTag("ko"),      // Korean
    LocaleTag("lt"),      // Lithuanian
    LocaleTag("lv"),      // Latvian
    LocaleTag("nl"),      // Dutch
    LocaleTag("no"),      // Norwegian
    LocaleTag("pl"),      // Polish
    LocaleTag("pt"),      // Portuguese
    LocaleTag("pt-BR"),   // Brazilian Portuguese
    LocaleTag("pt-PT"),   // European Portuguese
    LocaleTag("ro"),      // Romanian
    LocaleTag("ru"),      // Russian
    LocaleTag("sk"),      // Slovak
    LocaleTag("sv"),      // Swedish
    LocaleTag("tr"),      // Turkish
    LocaleTag("zh-Hant"), // Traditional Chinese
    LocaleTag("zh-Hans"), // Simplified Chinese
];
