//! Airport code → country code resolution.

use tracing::debug;

use super::client::LocationClient;
use super::types::{LocationError, LocationQuery, RequestContext};

/// Resolves one airport code to the country it lies in.
///
/// Implementations block the calling thread for the duration of the lookup.
pub trait LocationResolver: Send + Sync {
    fn resolve(&self, airport_code: &str, ctx: &RequestContext) -> Result<String, LocationError>;
}

/// Resolver backed by the external location service.
#[derive(Debug, Clone)]
pub struct HttpLocationResolver {
    client: LocationClient,
}

impl HttpLocationResolver {
    pub fn new(client: LocationClient) -> Self {
        Self { client }
    }
}

impl LocationResolver for HttpLocationResolver {
    fn resolve(&self, airport_code: &str, ctx: &RequestContext) -> Result<String, LocationError> {
        let code = airport_code.to_uppercase();
        let response = self.client.search(&LocationQuery::airport(&code), ctx)?;
        let country = response.country_for(&code)?;
        debug!(airport = %code, country = %country, "resolved airport");
        Ok(country)
    }
}
