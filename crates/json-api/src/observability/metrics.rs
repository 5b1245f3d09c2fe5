//! Prometheus metrics collection and exposition endpoint.

use std::sync::OnceLock;

use larder_app::domain::lots::report::SweepReport;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder, core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

use super::settings;

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    sweep_runs_total: IntCounterVec,
    sweep_lots_total: IntCounterVec,
    sweep_failures_total: IntCounter,
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        if let Some(metrics) = metrics() {
            metrics.requests_in_flight.inc();
            return Self { tracked: true };
        }

        Self { tracked: false }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_class = status_class(status_code);
    let status_code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class, status_code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Record the outcome of one lot sweep run; `None` when the run itself failed.
pub(crate) fn observe_sweep(report: Option<&SweepReport>) {
    let Some(metrics) = metrics() else {
        return;
    };

    let Some(report) = report else {
        metrics.sweep_runs_total.with_label_values(&["error"]).inc();
        return;
    };

    let outcome = if report.is_complete() {
        "complete"
    } else {
        "partial"
    };

    metrics.sweep_runs_total.with_label_values(&[outcome]).inc();

    metrics
        .sweep_lots_total
        .with_label_values(&["activated"])
        .inc_by(report.activated as u64);

    metrics
        .sweep_lots_total
        .with_label_values(&["decayed"])
        .inc_by(report.decayed as u64);

    metrics
        .sweep_failures_total
        .inc_by(report.failures.len() as u64);
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    if !settings::metrics_enabled() {
        res.status_code(StatusCode::NOT_FOUND);
        return;
    }

    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let metric_families = metrics.registry.gather();

    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metric_families, &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    let content_type = match HeaderValue::from_str(encoder.format_type()) {
        Ok(value) => value,
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            return;
        }
    };

    res.headers_mut().insert(CONTENT_TYPE, content_type);
    res.render(String::from_utf8_lossy(&encoded).into_owned());
}

fn metrics() -> Option<&'static Metrics> {
    if !settings::metrics_enabled() {
        return None;
    }

    METRICS.get_or_init(build_metrics).as_ref()
}

fn register<M>(registry: &Registry, metric: Result<M, prometheus::Error>, name: &str) -> Option<M>
where
    M: Collector + Clone + 'static,
{
    let metric = match metric {
        Ok(metric) => metric,
        Err(source) => {
            error!("failed to create {name} metric: {source}");
            return None;
        }
    };

    if let Err(source) = registry.register(Box::new(metric.clone())) {
        error!("failed to register {name} metric: {source}");
        return None;
    }

    Some(metric)
}

fn build_metrics() -> Option<Metrics> {
    let registry = Registry::new();

    let requests_total = register(
        &registry,
        IntCounterVec::new(
            Opts::new(
                "larder_json_http_requests_total",
                "Total HTTP requests partitioned by method, route, status class, and status code.",
            ),
            &["method", "route", "status_class", "status_code"],
        ),
        "requests_total",
    )?;

    let request_duration_seconds = register(
        &registry,
        HistogramVec::new(
            HistogramOpts::new(
                "larder_json_http_request_duration_seconds",
                "HTTP request duration in seconds partitioned by method and route.",
            )
            .buckets(vec![
                0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "route"],
        ),
        "request_duration",
    )?;

    let requests_in_flight = register(
        &registry,
        IntGauge::with_opts(Opts::new(
            "larder_json_http_requests_in_flight",
            "Current number of in-flight HTTP requests.",
        )),
        "in-flight gauge",
    )?;

    let sweep_runs_total = register(
        &registry,
        IntCounterVec::new(
            Opts::new(
                "larder_json_sweep_runs_total",
                "Lot sweep runs partitioned by outcome (complete, partial, error).",
            ),
            &["outcome"],
        ),
        "sweep_runs_total",
    )?;

    let sweep_lots_total = register(
        &registry,
        IntCounterVec::new(
            Opts::new(
                "larder_json_sweep_lots_total",
                "Lot transitions applied by the sweep, partitioned by transition.",
            ),
            &["transition"],
        ),
        "sweep_lots_total",
    )?;

    let sweep_failures_total = register(
        &registry,
        IntCounter::new(
            "larder_json_sweep_failures_total",
            "Swept products that could not be saved.",
        ),
        "sweep_failures_total",
    )?;

    Some(Metrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        sweep_runs_total,
        sweep_lots_total,
        sweep_failures_total,
    })
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };

    use super::*;

    #[tokio::test]
    async fn metrics_endpoint_exposes_http_and_sweep_metrics() {
        observe_request("GET", "/products", 200, 0.042);
        observe_request("GET", "/products", 500, 0.123);
        observe_sweep(Some(&SweepReport {
            today: date(2025, 6, 1),
            examined: 4,
            activated: 2,
            decayed: 1,
            persisted: 3,
            failures: Vec::new(),
        }));
        observe_sweep(None);

        let service =
            Service::new(Router::new().push(Router::with_path("metrics").get(metrics_handler)));

        let response_result = TestClient::get("http://example.com/metrics")
            .send(&service)
            .await
            .take_string()
            .await;

        let response: String = response_result.unwrap_or_default();

        assert!(
            response.contains("larder_json_http_requests_total"),
            "expected requests_total metric in response"
        );
        assert!(
            response.contains("larder_json_http_request_duration_seconds"),
            "expected request_duration metric in response"
        );
        assert!(
            response.contains("larder_json_http_requests_in_flight"),
            "expected in-flight metric in response"
        );
        assert!(
            response.contains("larder_json_sweep_runs_total{outcome=\"complete\"}"),
            "expected completed sweep run in response"
        );
        assert!(
            response.contains("larder_json_sweep_runs_total{outcome=\"error\"}"),
            "expected failed sweep run in response"
        );
        assert!(
            response.contains("larder_json_sweep_lots_total{transition=\"activated\"}"),
            "expected activation counter in response"
        );
    }

    #[test]
    fn status_codes_are_grouped_by_class() {
        assert_eq!(status_class(204), "2xx");
        assert_eq!(status_class(404), "4xx");
        assert_eq!(status_class(503), "5xx");
        assert_eq!(status_class(42), "other");
    }
}
