//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-request context forwarded to the location service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Value of the inbound `correlationid` header, if any.
    pub correlation_id: Option<String>,
}

// ─── Outbound query ─────────────────────────────────────────────

/// Query sent to the location service.
#[derive(Debug, Serialize)]
pub struct LocationQuery<'a> {
    pub request: SearchRequest<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub language: &'a str,
    pub location_types: [&'a str; 1],
    pub max_result_count: u32,
    pub search_text: &'a str,
    pub include_minor_locations: bool,
    pub sources: [&'a str; 1],
}

impl<'a> LocationQuery<'a> {
    /// Ask for exactly one IATA airport matching `code`.
    pub fn airport(code: &'a str) -> Self {
        Self {
            request: SearchRequest {
                language: "en-US",
                location_types: ["airport"],
                max_result_count: 1,
                search_text: code,
                include_minor_locations: true,
                sources: ["IATA"],
            },
        }
    }
}

// ─── Response ───────────────────────────────────────────────────

/// The parts of a location service response the resolver relies on.
/// Everything else in the document is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationResponse {
    pub airports: Vec<Airport>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airport {
    #[serde(default)]
    pub alternate_ids: Vec<AlternateId>,
    pub country: Country,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlternateId {
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Country {
    pub code: String,
}

impl LocationResponse {
    /// Extract the country of the first airport, provided its first
    /// alternate code matches the (uppercased) `requested` code.
    pub fn country_for(self, requested: &str) -> Result<String, LocationError> {
        let airport = self
            .airports
            .into_iter()
            .next()
            .ok_or_else(|| LocationError::InvalidResponse("no airports returned".into()))?;

        let returned = airport
            .alternate_ids
            .into_iter()
            .next()
            .ok_or_else(|| LocationError::InvalidResponse("airport has no alternate ids".into()))?
            .code;

        if returned.to_uppercase() != requested {
            return Err(LocationError::Mismatch {
                requested: requested.to_string(),
                returned,
            });
        }

        if airport.country.code.is_empty() {
            return Err(LocationError::InvalidResponse("empty country code".into()));
        }
        Ok(airport.country.code)
    }
}

// ─── Errors ─────────────────────────────────────────────────────

/// Location resolution errors.
///
/// Callers surface every variant the same way; the variants exist so the
/// failure can be logged accurately.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location service unreachable: {0}")]
    Transport(String),
    #[error("invalid location service response: {0}")]
    InvalidResponse(String),
    #[error("location service returned '{returned}' for airport '{requested}'")]
    Mismatch { requested: String, returned: String },
}

impl LocationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::InvalidResponse(_) => "invalid response",
            Self::Mismatch { .. } => "mismatch",
        }
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> LocationResponse {
        serde_json::from_str(json).unwrap()
    }

    const SEA: &str = r#"{
        "airports": [{
            "isMajor": true,
            "name": "Seattle-Tacoma",
            "country": { "code": "US", "regionId": 2, "name": "United States", "alternateIds": [] },
            "alternateIds": [{ "source": "IATA", "code": "SEA" }],
            "language": "en-us"
        }],
        "hubs": [],
        "summary": { "hasError": false, "hasWarning": false, "messages": [] }
    }"#;

    #[test]
    fn test_query_shape() {
        let json = serde_json::to_value(LocationQuery::airport("SEA")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "request": {
                    "language": "en-US",
                    "locationTypes": ["airport"],
                    "maxResultCount": 1,
                    "searchText": "SEA",
                    "includeMinorLocations": true,
                    "sources": ["IATA"]
                }
            })
        );
    }

    #[test]
    fn test_country_for_match() {
        assert_eq!(response(SEA).country_for("SEA").unwrap(), "US");
    }

    #[test]
    fn test_country_for_lowercase_returned_code() {
        let json = SEA.replace("\"SEA\"", "\"sea\"");
        assert_eq!(response(&json).country_for("SEA").unwrap(), "US");
    }

    #[test]
    fn test_country_for_mismatch() {
        let err = response(SEA).country_for("LCY").unwrap_err();
        assert!(err.is_mismatch());
        assert_eq!(err.kind(), "mismatch");
    }

    #[test]
    fn test_country_for_no_airports() {
        let err = response(r#"{"airports": []}"#).country_for("SEA").unwrap_err();
        assert!(matches!(err, LocationError::InvalidResponse(_)));
    }

    #[test]
    fn test_country_for_no_alternate_ids() {
        let json = r#"{"airports": [{"country": {"code": "US"}, "alternateIds": []}]}"#;
        let err = response(json).country_for("SEA").unwrap_err();
        assert!(matches!(err, LocationError::InvalidResponse(_)));
    }

    #[test]
    fn test_missing_airports_field_fails_decoding() {
        assert!(serde_json::from_str::<LocationResponse>(r#"{"hubs": []}"#).is_err());
    }
}
