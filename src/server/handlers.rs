use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use std::borrow::Cow;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{error, info_span};

use crate::evaluate::{EvaluationError, EvaluationRequest, Outcome};
use crate::location::client::CORRELATION_HEADER;
use crate::location::RequestContext;

use super::state::AppState;

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

// ─── Error response ──────────────────────────────────────────────

/// Plain-text error: the reason phrase and a newline, nothing else.
pub(super) struct ApiError(StatusCode);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let reason = self.0.canonical_reason().unwrap_or("Error");
        (
            self.0,
            [
                (header::CONTENT_TYPE, TEXT_CONTENT_TYPE),
                (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            ],
            format!("{}\n", reason),
        )
            .into_response()
    }
}

/// Diagnostic line for an error response: status, reason, then every
/// request header. The authorization value is redacted.
fn diagnostic_line(status: StatusCode, headers: &HeaderMap) -> String {
    let mut line = format!(
        "{} : {} |",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    for (name, value) in headers {
        let value = if *name == header::AUTHORIZATION {
            Cow::Borrowed("<redacted>")
        } else {
            String::from_utf8_lossy(value.as_bytes())
        };
        let _ = write!(line, " Request Header - key: {} value: {} |", name, value);
    }
    line
}

fn log_error(err: &EvaluationError, headers: &HeaderMap) {
    error!(error = %err, "{}", diagnostic_line(err.status(), headers));
}

// ─── GET /health ─────────────────────────────────────────────────

pub async fn health(State(state): State<Arc<AppState>>) -> String {
    format!("Service Version: {}", state.version)
}

// ─── /policy/hazardousgoods/evaluate ─────────────────────────────

pub async fn evaluate(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let correlation_id = headers
        .get(CORRELATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let request = EvaluationRequest {
        method,
        accept_language: headers
            .get(header::ACCEPT_LANGUAGE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned()),
        body,
        context: RequestContext {
            correlation_id: correlation_id.clone(),
        },
    };

    let span = info_span!(
        "evaluate",
        correlation_id = correlation_id.as_deref().unwrap_or("-")
    );
    let pipeline = Arc::clone(&state.pipeline);
    let result = tokio::task::spawn_blocking(move || span.in_scope(|| pipeline.evaluate(&request)))
        .await
        .unwrap_or_else(|e| Err(EvaluationError::Internal(e.to_string())));

    match result.and_then(respond) {
        Ok(response) => response,
        Err(err) => {
            log_error(&err, &headers);
            ApiError(err.status()).into_response()
        }
    }
}

fn respond(outcome: Outcome) -> Result<Response, EvaluationError> {
    let language = HeaderValue::from_static(outcome.locale().as_str());
    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE)),
        (header::CONTENT_LANGUAGE, language),
    ];

    match outcome {
        Outcome::Empty { .. } => Ok((StatusCode::NO_CONTENT, headers).into_response()),
        Outcome::Policy { document, .. } => {
            let body = serde_json::to_vec(&[document])
                .map_err(|e| EvaluationError::Internal(e.to_string()))?;
            Ok((StatusCode::OK, headers, body).into_response())
        }
    }
}
