//! Per-request span, request id propagation and access logging.

use std::{sync::OnceLock, time::Instant};

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::{
    Request, handler,
    http::{HeaderMap, HeaderName, StatusCode, header::HeaderValue},
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;
use uuid::Uuid;

use crate::config::observability::ObservabilityConfig;

use super::metrics;

pub(crate) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Paths served without a request span.
const UNTRACED_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

/// Settings the middleware reads on every request.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestLogSettings {
    slow_request_threshold_ms: u64,
    parent_propagation: bool,
}

static SETTINGS: OnceLock<RequestLogSettings> = OnceLock::new();

impl Default for RequestLogSettings {
    fn default() -> Self {
        Self {
            slow_request_threshold_ms: 1_000,
            parent_propagation: false,
        }
    }
}

impl RequestLogSettings {
    pub(crate) fn from_config(config: &ObservabilityConfig) -> Self {
        Self {
            slow_request_threshold_ms: config.slow_request_threshold_ms,
            parent_propagation: config.otel_enabled && config.otel_parent_propagation_enabled,
        }
    }

    /// First install wins; later calls are ignored.
    pub(crate) fn install(self) {
        _ = SETTINGS.set(self);
    }

    fn current() -> Self {
        SETTINGS.get().copied().unwrap_or_default()
    }
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if UNTRACED_PATHS.contains(&req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let settings = RequestLogSettings::current();
    let started = Instant::now();
    let _in_flight = metrics::InFlight::start();

    let request_id = resolve_request_id(req.header::<String>(REQUEST_ID_HEADER));

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    depot.insert("request_id", request_id.clone());

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let route = route_template(&path);

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %format!("{method} {route}"),
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        path = %path,
        remote_addr = %req.remote_addr(),
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings.parent_propagation
        && let Some(parent) = parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to attach parent trace context: {source}");
    }

    ctrl.call_next(req, depot, res).instrument(span.clone()).await;

    let elapsed = started.elapsed();
    let status = res.status_code.unwrap_or(StatusCode::OK);
    let duration_ms = elapsed.as_millis();

    metrics::observe_request(&method, &route, status, elapsed.as_secs_f64());

    span.record("status", status.as_u16());
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        info!(status = status.as_u16(), duration_ms, "request.completed");

        if status.is_server_error() {
            error!(status = status.as_u16(), %method, %path, "server error response");
        } else if status.is_client_error() {
            warn!(status = status.as_u16(), %method, %path, "client error response");
        }

        if duration_ms > u128::from(settings.slow_request_threshold_ms) {
            warn!(
                %method,
                %path,
                duration_ms,
                threshold_ms = settings.slow_request_threshold_ms,
                "slow request"
            );
        }
    });
}

/// Reuse a caller-supplied id, or mint a new one.
fn resolve_request_id(header: Option<String>) -> String {
    header
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

/// Replace UUID path segments so metrics and span names stay low-cardinality.
fn route_template(path: &str) -> String {
    let segments = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::try_parse(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>();

    format!("/{}", segments.join("/"))
}

fn parent_context(headers: &HeaderMap) -> Option<Context> {
    let extractor = HeaderExtractor(headers);

    global::get_text_map_propagator(|propagator| {
        // Start from an empty context so requests without trace headers become roots.
        let context = propagator.extract_with_context(&Context::new(), &extractor);
        let valid = context.span().span_context().is_valid();

        valid.then_some(context)
    })
}

struct HeaderExtractor<'a>(&'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.to_str().ok()
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[salvo::handler]
    async fn ok(res: &mut Response) {
        res.render("ok");
    }

    fn service() -> Service {
        Service::new(
            Router::new()
                .hoop(request_logging)
                .push(Router::with_path("orders/{order}").get(ok)),
        )
    }

    #[test]
    fn uuid_segments_are_templated() {
        assert_eq!(
            route_template("/orders/0195f3f2-7c1e-7b4e-9a53-3c2d1e0f9a10/payment"),
            "/orders/{uuid}/payment"
        );
        assert_eq!(route_template("/products"), "/products");
        assert_eq!(route_template("/"), "/");
    }

    #[test]
    fn blank_request_ids_are_replaced() {
        assert_eq!(resolve_request_id(Some(" abc ".to_string())), "abc");
        assert!(Uuid::try_parse(&resolve_request_id(Some("  ".to_string()))).is_ok());
        assert!(Uuid::try_parse(&resolve_request_id(None)).is_ok());
    }

    #[tokio::test]
    async fn caller_request_id_is_echoed() -> TestResult {
        let mut res = TestClient::get(format!("http://example.com/orders/{}", Uuid::nil()))
            .add_header(REQUEST_ID_HEADER, "req-42", true)
            .send(&service())
            .await;

        assert_eq!(
            res.headers().get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()),
            Some("req-42")
        );
        assert_eq!(res.take_string().await?, "ok");

        Ok(())
    }

    #[tokio::test]
    async fn missing_request_id_is_generated() -> TestResult {
        let res = TestClient::get(format!("http://example.com/orders/{}", Uuid::nil()))
            .send(&service())
            .await;

        let generated = res
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or("missing request id header")?;

        assert!(Uuid::try_parse(generated).is_ok(), "expected a uuid, got {generated}");

        Ok(())
    }
}
