//! Hazardous goods policy evaluation.
//!
//! One request flows through a fixed sequence of checks:
//!
//! ```text
//! method → language → body → parse → resolve loop → decide → respond
//! ```
//!
//! Every failure is terminal and maps to exactly one HTTP status. Airport
//! codes are resolved sequentially in submission order and resolution stops
//! at the first code inside the jurisdiction.

use std::sync::Arc;

use axum::body::Bytes;
use axum::http::{Method, StatusCode};
use thiserror::Error;
use tracing::{debug, error, warn, Level};

use crate::locale::{LanguageNegotiator, LocaleTag};
use crate::location::{LocationError, LocationResolver, RequestContext};
use crate::policy::{PolicyDocument, PolicyError, PolicyStore};

/// Body that short-circuits to an empty response without parsing.
const EMPTY_LIST: &[u8] = b"[]";

// ─── Request / Outcome ──────────────────────────────────────────

/// Everything the pipeline needs from one inbound request.
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub method: Method,
    pub accept_language: Option<String>,
    pub body: Bytes,
    pub context: RequestContext,
}

/// Successful evaluation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing applies: empty input or no airport in the jurisdiction.
    Empty { locale: LocaleTag },
    /// The policy applies and was loaded in the negotiated locale.
    Policy {
        locale: LocaleTag,
        document: PolicyDocument,
    },
}

impl Outcome {
    pub fn locale(&self) -> LocaleTag {
        match self {
            Self::Empty { locale } | Self::Policy { locale, .. } => *locale,
        }
    }
}

// ─── Errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),
    #[error("no supported locale matches '{0}'")]
    LocaleNotAcceptable(String),
    #[error("malformed airport code list: {0}")]
    BadInput(#[source] serde_json::Error),
    #[error("location lookup failed: {0}")]
    UpstreamUnavailable(#[source] LocationError),
    #[error("policy content unavailable: {0}")]
    ContentMissing(#[source] PolicyError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl EvaluationError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::LocaleNotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            Self::BadInput(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::ContentMissing(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// ─── Pipeline ───────────────────────────────────────────────────

/// Evaluates requests against one jurisdiction. Cheap to share behind an
/// `Arc`; holds no per-request state.
pub struct EvaluationPipeline {
    negotiator: LanguageNegotiator,
    resolver: Arc<dyn LocationResolver>,
    store: Arc<dyn PolicyStore>,
    jurisdiction: String,
}

impl EvaluationPipeline {
    pub fn new(
        negotiator: LanguageNegotiator,
        resolver: Arc<dyn LocationResolver>,
        store: Arc<dyn PolicyStore>,
        jurisdiction: impl Into<String>,
    ) -> Self {
        Self {
            negotiator,
            resolver,
            store,
            jurisdiction: jurisdiction.into(),
        }
    }

    /// Run one evaluation. Blocks while the location service is queried.
    pub fn evaluate(&self, request: &EvaluationRequest) -> Result<Outcome, EvaluationError> {
        if request.method != Method::POST {
            return Err(EvaluationError::MethodNotAllowed(request.method.clone()));
        }

        let negotiation = self.negotiator.negotiate(request.accept_language.as_deref());
        if !negotiation.matched {
            return Err(EvaluationError::LocaleNotAcceptable(
                request.accept_language.clone().unwrap_or_default(),
            ));
        }
        let locale = negotiation.locale;

        if request.body.is_empty() || request.body.as_ref() == EMPTY_LIST {
            return Ok(Outcome::Empty { locale });
        }

        let codes: Vec<String> = serde_json::from_slice::<Option<Vec<String>>>(&request.body)
            .map_err(EvaluationError::BadInput)?
            .unwrap_or_default();

        if !self.any_in_jurisdiction(&codes, &request.context)? {
            return Ok(Outcome::Empty { locale });
        }

        let document = self
            .store
            .load(locale)
            .map_err(EvaluationError::ContentMissing)?;
        Ok(Outcome::Policy { locale, document })
    }

    /// Resolve codes in order, stopping at the first one in the jurisdiction.
    /// The first resolution failure aborts the loop.
    fn any_in_jurisdiction(
        &self,
        codes: &[String],
        ctx: &RequestContext,
    ) -> Result<bool, EvaluationError> {
        for code in codes {
            let country = self.resolver.resolve(code, ctx).map_err(|e| {
                log_location_failure(code, ctx, &e);
                EvaluationError::UpstreamUnavailable(e)
            })?;
            if country == self.jurisdiction {
                debug!(airport = %code, country = %country, "jurisdiction match");
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Mismatches are semantic errors; transport and decoding failures are
/// operational.
fn failure_level(err: &LocationError) -> Level {
    if err.is_mismatch() {
        Level::ERROR
    } else {
        Level::WARN
    }
}

fn log_location_failure(code: &str, ctx: &RequestContext, err: &LocationError) {
    let correlation_id = ctx.correlation_id.as_deref().unwrap_or("-");
    if failure_level(err) == Level::ERROR {
        error!(airport = %code, correlation_id, kind = err.kind(), "{}", err);
    } else {
        warn!(airport = %code, correlation_id, kind = err.kind(), "{}", err);
    }
}
