//! Accept-Language header parsing.
//!
//! Malformed entries are skipped rather than rejecting the whole header.

use std::cmp::Ordering;

/// One language range from an Accept-Language header, split into subtags.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRange {
    /// Primary language, lowercase (e.g. "en").
    pub language: String,
    /// Script subtag, titlecase (e.g. "Hant").
    pub script: Option<String>,
    /// Region subtag, uppercase (e.g. "US", "419").
    pub region: Option<String>,
    pub weight: f32,
}

/// Parse a weighted preference list into ranges ordered by descending weight.
///
/// Ties keep header order. Entries with `q=0`, the `*` wildcard and
/// unparseable entries are dropped.
pub fn parse_accept_language(header: &str) -> Vec<LanguageRange> {
    let mut ranges: Vec<LanguageRange> = header
        .split(',')
        .filter_map(parse_entry)
        .filter(|r| r.weight > 0.0)
        .collect();

    // sort_by is stable
    ranges.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));
    ranges
}

fn parse_entry(entry: &str) -> Option<LanguageRange> {
    let mut parts = entry.split(';');
    let tag = parts.next()?.trim();

    let mut weight = 1.0;
    for param in parts {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("q") {
            weight = parse_weight(value.trim())?;
        }
    }

    let mut range = parse_tag(tag)?;
    range.weight = weight;
    Some(range)
}

fn parse_weight(value: &str) -> Option<f32> {
    let q: f32 = value.parse().ok()?;
    (0.0..=1.0).contains(&q).then_some(q)
}

/// Split a BCP 47-style tag into language, script and region.
///
/// Variants are ignored; parsing stops at the first extension singleton.
pub fn parse_tag(tag: &str) -> Option<LanguageRange> {
    let mut subtags = tag.split(['-', '_']);

    let language = subtags.next()?;
    if !(2..=3).contains(&language.len()) || !language.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }

    let mut script = None;
    let mut region = None;
    for sub in subtags {
        if sub.is_empty() || sub.len() > 8 || !sub.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }
        if sub.len() == 1 {
            break;
        }
        let alpha = sub.bytes().all(|b| b.is_ascii_alphabetic());
        let digits = sub.bytes().all(|b| b.is_ascii_digit());

        if script.is_none() && region.is_none() && sub.len() == 4 && alpha {
            script = Some(titlecase(sub));
        } else if region.is_none() && ((sub.len() == 2 && alpha) || (sub.len() == 3 && digits)) {
            region = Some(sub.to_ascii_uppercase());
        }
    }

    Some(LanguageRange {
        language: language.to_ascii_lowercase(),
        script,
        region,
        weight: 1.0,
    })
}

fn titlecase(s: &str) -> String {
    let lower = s.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn languages(header: &str) -> Vec<String> {
        parse_accept_language(header)
            .into_iter()
            .map(|r| match (r.script, r.region) {
                (Some(s), Some(g)) => format!("{}-{}-{}", r.language, s, g),
                (Some(s), None) => format!("{}-{}", r.language, s),
                (None, Some(g)) => format!("{}-{}", r.language, g),
                (None, None) => r.language,
            })
            .collect()
    }

    #[test]
    fn test_single_tag() {
        assert_eq!(languages("fr-CA"), vec!["fr-CA"]);
    }

    #[test]
    fn test_weighted_ordering() {
        assert_eq!(
            languages("da, en-GB;q=0.8, en;q=0.7, de;q=0.9"),
            vec!["da", "de", "en-GB", "en"]
        );
    }

    #[test]
    fn test_ties_keep_header_order() {
        assert_eq!(languages("sv;q=0.5, nl;q=0.5"), vec!["sv", "nl"]);
    }

    #[test]
    fn test_case_and_separator_normalized() {
        assert_eq!(languages("ZH_hant_tw"), vec!["zh-Hant-TW"]);
        assert_eq!(languages("es-419"), vec!["es-419"]);
    }

    #[test]
    fn test_malformed_entries_skipped() {
        assert_eq!(languages("!!, en;q=abc, 12, de;q=2, it"), vec!["it"]);
    }

    #[test]
    fn test_zero_weight_and_wildcard_dropped() {
        assert_eq!(languages("*, ja;q=0, ko"), vec!["ko"]);
    }

    #[test]
    fn test_extension_stops_parsing() {
        assert_eq!(languages("de-DE-u-co-phonebk"), vec!["de-DE"]);
    }

    #[test]
    fn test_garbage_yields_nothing() {
        assert!(parse_accept_language("foobar {jack} \"be\" \"nimble\"").is_empty());
        assert!(parse_accept_language(";;;").is_empty());
    }
}
