use axum::{
    Json,
    extract::{MatchedPath, Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, Span, info, info_span};
use uuid::Uuid;

use crate::api::{ApiError, ApiResponse, AppState, HealthStatus};
use crate::domain::UserId;

/// GET /health
/// Unauthenticated liveness check. Reports 503 when the database is unreachable.
pub async fn get_health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HealthStatus>>, ApiError> {
    state
        .store()
        .ping()
        .await
        .map_err(|e| ApiError::ServiceUnavailable(format!("Database unreachable: {e:#}")))?;

    Ok(Json(ApiResponse::success(HealthStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.start_time.elapsed().as_secs(),
        database: true,
    })))
}

/// GET /metrics
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Caller resolved by the auth layer, handed back out on the response so the
/// request logger can attribute the request after the inner stack has run.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedUser(pub UserId);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    ClientError,
    ServerError,
}

impl Outcome {
    const fn from_status(status: u16) -> Self {
        match status {
            500.. => Self::ServerError,
            400..500 => Self::ClientError,
            _ => Self::Success,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ClientError => "client_error",
            Self::ServerError => "error",
        }
    }
}

/// Request fields captured before the request is handed down the stack.
struct RequestLine {
    method: String,
    path: String,
    route: Option<String>,
    user_agent: String,
}

impl RequestLine {
    fn capture(req: &Request) -> Self {
        Self {
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            route: req
                .extensions()
                .get::<MatchedPath>()
                .map(|mp| mp.as_str().to_string()),
            user_agent: req
                .headers()
                .get(header::USER_AGENT)
                .and_then(|h| h.to_str().ok())
                .unwrap_or("unknown")
                .to_string(),
        }
    }

    fn span(&self) -> Span {
        info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %self.method,
            path = %self.path,
            route = self.route.as_deref(),
            user_id = tracing::field::Empty,
        )
    }

    /// Metrics label for the path. The route template keeps cardinality bounded.
    fn metrics_path(&self) -> &str {
        self.route.as_deref().unwrap_or(&self.path)
    }
}

/// Wraps each request in a span and emits one wide event when it finishes.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let line = RequestLine::capture(&req);
    let span = line.span();

    let response = next.run(req).instrument(span.clone()).await;

    if let Some(ResolvedUser(user_id)) = response.extensions().get::<ResolvedUser>() {
        span.record("user_id", user_id.value());
    }

    let elapsed = start.elapsed();
    let status = response.status().as_u16();
    let outcome = Outcome::from_status(status);

    let labels = [
        ("method", line.method.clone()),
        ("path", line.metrics_path().to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("http_requests_total", &labels).increment(1);
    metrics::histogram!("http_request_duration_seconds", &labels).record(elapsed.as_secs_f64());

    span.in_scope(|| {
        info!(
            event = "http_request_finished",
            duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            status_code = status,
            user_agent = %line.user_agent,
            outcome = outcome.as_str(),
            "Request finished"
        );
    });

    response
}

const SECURITY_HEADERS: [(&str, &str); 4] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("cache-control", "no-store"),
];

pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    for (name, value) in SECURITY_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }

    response
}
