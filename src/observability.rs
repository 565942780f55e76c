//! Aggregator metrics, recorded through the `metrics` facade.
//!
//! Nothing is exported unless [`init_metrics`] installs the Prometheus recorder.

use std::net::SocketAddr;
use tracing::{info, warn};

pub const METRICS_ADDR_ENV: &str = "EDITORIAL_API_METRICS_ADDR";

/// Sub-fetch whose failure degrades the document instead of failing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradedOperation {
    InsertedNews,
    RecommendedEditorial,
    Signature,
    Tag,
    BodyPhoto,
    Multimedia,
    OpeningMultimedia,
    MembershipLinks,
    CommentsCount,
}

impl DegradedOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InsertedNews => "inserted_news",
            Self::RecommendedEditorial => "recommended_editorial",
            Self::Signature => "signature",
            Self::Tag => "tag",
            Self::BodyPhoto => "body_photo",
            Self::Multimedia => "multimedia",
            Self::OpeningMultimedia => "opening_multimedia",
            Self::MembershipLinks => "membership_links",
            Self::CommentsCount => "comments_count",
        }
    }
}

pub struct AggregatorMetrics;

impl AggregatorMetrics {
    pub fn record_degraded(operation: DegradedOperation) {
        ::metrics::counter!("editorial_degraded_total", "operation" => operation.as_str()).increment(1);
    }

    /// `outcome` is one of "resolved", "legacy" or "error".
    pub fn record_request(outcome: &'static str, duration_secs: f64) {
        ::metrics::counter!("editorial_requests_total", "outcome" => outcome).increment(1);
        ::metrics::histogram!("editorial_resolve_duration_seconds").record(duration_secs);
    }

    pub fn record_circuit_opened(service: &'static str) {
        ::metrics::counter!("editorial_circuit_opened_total", "service" => service).increment(1);
    }
}

/// Install the Prometheus exporter when `EDITORIAL_API_METRICS_ADDR` is set. Must run inside a tokio runtime.
pub fn init_metrics() {
    let Ok(addr) = std::env::var(METRICS_ADDR_ENV) else {
        return;
    };
    let addr: SocketAddr = match addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address '{}': {}", addr, e);
            return;
        }
    };
    match metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => info!("Prometheus exporter listening on http://{}/metrics", addr),
        Err(e) => warn!("Failed to install Prometheus exporter: {}", e),
    }
}
