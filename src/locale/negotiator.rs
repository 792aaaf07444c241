//! Best-fit matching of client language preferences against the catalog.

use super::accept::{parse_accept_language, LanguageRange};
use super::catalog::{LocaleTag, SUPPORTED_LOCALES};

/// Regions whose English falls back to American rather than British English.
const US_ENGLISH_REGIONS: &[&str] = &["US", "AS", "GU", "MP", "PR", "UM", "VI"];

/// Regions whose Spanish falls back to Latin American Spanish.
const LATIN_AMERICAN_REGIONS: &[&str] = &[
    "419", "AR", "BO", "BR", "BZ", "CL", "CO", "CR", "CU", "DO", "EC", "GT", "HN", "MX", "NI",
    "PA", "PE", "PR", "PY", "SV", "US", "UY", "VE",
];

/// Regions written in Traditional Chinese.
const TRADITIONAL_CHINESE_REGIONS: &[&str] = &["TW", "HK", "MO"];

/// Result of negotiating one Accept-Language header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Negotiation {
    pub locale: LocaleTag,
    /// False when a non-empty header matched nothing in the catalog.
    pub matched: bool,
}

/// Resolves Accept-Language headers against a fixed catalog.
#[derive(Debug, Clone, Copy)]
pub struct LanguageNegotiator {
    catalog: &'static [LocaleTag],
}

impl Default for LanguageNegotiator {
    fn default() -> Self {
        Self::new(SUPPORTED_LOCALES)
    }
}

impl LanguageNegotiator {
    pub fn new(catalog: &'static [LocaleTag]) -> Self {
        Self { catalog }
    }

    /// Negotiate a locale from an optional header value.
    ///
    /// An absent or blank header yields the default locale. Otherwise the
    /// highest-weighted preference with any catalog match decides; if none
    /// matches the result is the undetermined sentinel with `matched = false`.
    pub fn negotiate(&self, header: Option<&str>) -> Negotiation {
        let header = match header.map(str::trim) {
            None | Some("") => {
                return Negotiation {
                    locale: LocaleTag::DEFAULT,
                    matched: true,
                }
            }
            Some(h) => h,
        };

        let locale = parse_accept_language(header)
            .iter()
            .find_map(|range| self.best_fit(range))
            .unwrap_or(LocaleTag::UNDETERMINED);

        Negotiation {
            locale,
            matched: !locale.is_undetermined(),
        }
    }

    fn best_fit(&self, range: &LanguageRange) -> Option<LocaleTag> {
        let language = canonical_language(&range.language);

        if let Some(region) = &range.region {
            if let Some(tag) = self.find(&format!("{}-{}", language, region)) {
                return Some(tag);
            }
        }
        if let Some(script) = &range.script {
            if let Some(tag) = self.find(&format!("{}-{}", language, script)) {
                return Some(tag);
            }
        }

        if language == "zh" {
            let script = range
                .script
                .as_deref()
                .unwrap_or_else(|| chinese_script(range.region.as_deref()));
            if let Some(tag) = self.find(&format!("zh-{}", script)) {
                return Some(tag);
            }
        }

        if let Some(parent) = range
            .region
            .as_deref()
            .and_then(|region| regional_parent(language, region))
        {
            if let Some(tag) = self.find(parent) {
                return Some(tag);
            }
        }

        self.find(language)
    }

    fn find(&self, tag: &str) -> Option<LocaleTag> {
        self.catalog.iter().copied().find(|t| t.matches(tag))
    }
}

fn canonical_language(language: &str) -> &str {
    match language {
        "nb" | "nn" => "no",
        other => other,
    }
}

fn chinese_script(region: Option<&str>) -> &'static str {
    match region {
        Some(r) if TRADITIONAL_CHINESE_REGIONS.contains(&r) => "Hant",
        _ => "Hans",
    }
}

fn regional_parent(language: &str, region: &str) -> Option<&'static str> {
    match language {
        "en" if !US_ENGLISH_REGIONS.contains(&region) => Some("en-GB"),
        "es" if LATIN_AMERICAN_REGIONS.contains(&region) => Some("es-419"),
        "pt" if region != "BR" => Some("pt-PT"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn negotiate(header: &str) -> (&'static str, bool) {
        let n = LanguageNegotiator::default().negotiate(Some(header));
        (n.locale.as_str(), n.matched)
    }

    #[test]
    fn test_absent_header_defaults() {
        let n = LanguageNegotiator::default().negotiate(None);
        assert_eq!(n.locale, LocaleTag::DEFAULT);
        assert!(n.matched);
    }

    #[test]
    fn test_blank_header_defaults() {
        assert_eq!(negotiate("   "), ("en-US", true));
    }

    #[test]
    fn test_exact_matches() {
        for tag in SUPPORTED_LOCALES {
            assert_eq!(negotiate(tag.as_str()), (tag.as_str(), true), "tag {}", tag);
        }
    }

    #[test]
    fn test_regional_fallbacks() {
        let cases = [
            ("zh-TW", "zh-Hant"),
            ("zh-HK", "zh-Hant"),
            ("zh-CN", "zh-Hans"),
            ("zh", "zh-Hans"),
            ("es-LA", "es"),
            ("es-MX", "es-419"),
            ("en-AU", "en-GB"),
            ("en-PR", "en"),
            ("pt-AO", "pt-PT"),
            ("fr-BE", "fr"),
            ("de-AT", "de"),
            ("nb", "no"),
        ];
        for (header, expected) in cases {
            assert_eq!(negotiate(header), (expected, true), "header {}", header);
        }
    }

    #[test]
    fn test_weighted_preference_wins() {
        assert_eq!(negotiate("xx, ja;q=0.4, ko;q=0.9"), ("ko", true));
    }

    #[test]
    fn test_first_matching_preference_decides() {
        assert_eq!(negotiate("de-AT, en-US"), ("de", true));
    }

    #[test]
    fn test_unmatched_is_undetermined() {
        assert_eq!(negotiate("und"), ("und", false));
        assert_eq!(negotiate("xx-YY"), ("und", false));
        assert_eq!(negotiate("foobar"), ("und", false));
    }

    #[test]
    fn test_custom_catalog() {
        let only_french = &SUPPORTED_LOCALES[13..14];
        assert_eq!(only_french[0].as_str(), "fr");
        let negotiator = LanguageNegotiator::new(only_french);
        assert!(!negotiator.negotiate(Some("de")).matched);
        assert_eq!(negotiator.negotiate(Some("fr-CA")).locale.as_str(), "fr");
    }
}
