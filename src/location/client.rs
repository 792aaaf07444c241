//! Blocking HTTP client for the external location service.

use super::types::{LocationError, LocationQuery, LocationResponse, RequestContext};

const USER_AGENT: &str = concat!("hazmat-policy/", env!("CARGO_PKG_VERSION"));

/// Header used to carry the caller's correlation id upstream.
pub const CORRELATION_HEADER: &str = "correlationid";

/// Issues search queries against one configured endpoint.
#[derive(Debug, Clone)]
pub struct LocationClient {
    agent: ureq::Agent,
    endpoint: String,
}

impl LocationClient {
    pub fn new(endpoint: impl Into<String>, proxy: Option<ureq::Proxy>) -> Self {
        let mut builder = ureq::AgentBuilder::new().user_agent(USER_AGENT);
        if let Some(proxy) = proxy {
            builder = builder.proxy(proxy);
        }
        Self {
            agent: builder.build(),
            endpoint: endpoint.into(),
        }
    }

    /// POST `query` and decode the response.
    ///
    /// Connection failures map to `Transport`; error statuses and bodies that
    /// do not decode map to `InvalidResponse`.
    pub fn search(
        &self,
        query: &LocationQuery<'_>,
        ctx: &RequestContext,
    ) -> Result<LocationResponse, LocationError> {
        let mut request = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json");
        if let Some(id) = ctx.correlation_id.as_deref() {
            request = request.set(CORRELATION_HEADER, id);
        }

        let response = request.send_json(query).map_err(|e| match e {
            ureq::Error::Status(code, _) => {
                LocationError::InvalidResponse(format!("unexpected status {}", code))
            }
            ureq::Error::Transport(t) => LocationError::Transport(t.to_string()),
        })?;

        response
            .into_json::<LocationResponse>()
            .map_err(|e| LocationError::InvalidResponse(e.to_string()))
    }
}
