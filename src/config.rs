//! Process configuration, parsed once at startup and shared read-only.

use std::path::PathBuf;

use clap::Args;
use thiserror::Error;

pub const DEFAULT_JURISDICTION: &str = "US";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("location service endpoint not configured (set TRAVEL_LOCATIONS_URI or --locations-uri)")]
    MissingLocationsUri,
    #[error("invalid location service proxy '{value}': {reason}")]
    InvalidProxy { value: String, reason: String },
    #[error("invalid jurisdiction code '{0}': expected two ASCII letters")]
    InvalidJurisdiction(String),
}

/// Service options, settable by flag or environment.
#[derive(Debug, Clone, Args)]
pub struct ServiceArgs {
    /// Address to listen on.
    #[arg(long, env = "HAZMAT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "HAZMAT_PORT", default_value_t = 4001)]
    pub port: u16,

    /// Location service endpoint (required).
    #[arg(long, env = "TRAVEL_LOCATIONS_URI")]
    pub locations_uri: Option<String>,

    /// Proxy for location service requests, e.g. http://proxy:3128.
    #[arg(long, env = "TRAVEL_LOCATIONS_PROXY")]
    pub locations_proxy: Option<String>,

    /// Directory holding one policy document per locale.
    #[arg(long, env = "HAZMAT_CONTENT_ROOT", default_value = "data")]
    pub content_root: PathBuf,

    /// Country code whose airports make the policy apply.
    #[arg(long, env = "HAZMAT_JURISDICTION", default_value = DEFAULT_JURISDICTION)]
    pub jurisdiction: String,
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub locations_uri: String,
    pub locations_proxy: Option<ureq::Proxy>,
    pub content_root: PathBuf,
    pub jurisdiction: String,
}

impl ServiceArgs {
    pub fn into_config(self) -> Result<ServiceConfig, ConfigError> {
        let locations_uri = non_blank(self.locations_uri).ok_or(ConfigError::MissingLocationsUri)?;

        let locations_proxy = match non_blank(self.locations_proxy) {
            Some(value) => Some(ureq::Proxy::new(&value).map_err(|e| ConfigError::InvalidProxy {
                reason: e.to_string(),
                value,
            })?),
            None => None,
        };

        let jurisdiction = self.jurisdiction.trim().to_ascii_uppercase();
        if jurisdiction.len() != 2 || !jurisdiction.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidJurisdiction(self.jurisdiction));
        }

        Ok(ServiceConfig {
            host: self.host,
            port: self.port,
            locations_uri,
            locations_proxy,
            content_root: self.content_root,
            jurisdiction,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ServiceArgs {
        ServiceArgs {
            host: "127.0.0.1".into(),
            port: 4001,
            locations_uri: Some("http://locations.internal/search".into()),
            locations_proxy: None,
            content_root: PathBuf::from("data"),
            jurisdiction: DEFAULT_JURISDICTION.into(),
        }
    }

    #[derive(clap::Parser)]
    struct TestCli {
        #[command(flatten)]
        service: ServiceArgs,
    }

    #[test]
    fn test_flag_defaults() {
        use clap::Parser;

        let cli = TestCli::try_parse_from(["hazmat-policy", "--locations-uri", "http://loc/search"])
            .unwrap();
        assert_eq!(cli.service.jurisdiction, DEFAULT_JURISDICTION);
        assert_eq!(cli.service.port, 4001);
        assert_eq!(cli.service.content_root, PathBuf::from("data"));

        let config = cli.service.into_config().unwrap();
        assert_eq!(config.jurisdiction, DEFAULT_JURISDICTION);
    }

    #[test]
    fn test_valid_config() {
        let config = args().into_config().unwrap();
        assert_eq!(config.locations_uri, "http://locations.internal/search");
        assert!(config.locations_proxy.is_none());
        assert_eq!(config.jurisdiction, "US");
    }

    #[test]
    fn test_missing_locations_uri() {
        let err = ServiceArgs { locations_uri: None, ..args() }.into_config().unwrap_err();
        assert!(matches!(err, ConfigError::MissingLocationsUri));
    }

    #[test]
    fn test_blank_locations_uri() {
        let err = ServiceArgs { locations_uri: Some("  ".into()), ..args() }
            .into_config()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingLocationsUri));
    }

    #[test]
    fn test_proxy_parsed() {
        let config = ServiceArgs {
            locations_proxy: Some("http://proxy.internal:3128".into()),
            ..args()
        }
        .into_config()
        .unwrap();
        assert!(config.locations_proxy.is_some());
    }

    #[test]
    fn test_blank_proxy_ignored() {
        let config = ServiceArgs { locations_proxy: Some("".into()), ..args() }
            .into_config()
            .unwrap();
        assert!(config.locations_proxy.is_none());
    }

    #[test]
    fn test_jurisdiction_normalized() {
        let config = ServiceArgs { jurisdiction: " ca ".into(), ..args() }.into_config().unwrap();
        assert_eq!(config.jurisdiction, "CA");
    }

    #[test]
    fn test_invalid_jurisdiction() {
        let err = ServiceArgs { jurisdiction: "USA".into(), ..args() }
            .into_config()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidJurisdiction(_)));
    }
}
