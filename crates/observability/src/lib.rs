use std::env;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

pub const LOG_FORMAT_VAR: &str = "VIBE_PP_LOG_FORMAT";

#[derive(Debug, Default)]
pub struct FormatMetrics {
    requests_total: AtomicU64,
    validation_failures_total: AtomicU64,
    remote_attempts_total: AtomicU64,
    remote_success_total: AtomicU64,
    fallback_total: AtomicU64,
    local_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub validation_failures_total: u64,
    pub remote_attempts_total: u64,
    pub remote_success_total: u64,
    pub fallback_total: u64,
    pub local_total: u64,
    pub avg_latency_millis: f64,
}

impl FormatMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_validation_failure(&self) {
        self.validation_failures_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_remote_attempt(&self) {
        self.remote_attempts_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_remote_success(&self) {
        self.remote_success_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_fallback(&self) {
        self.fallback_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_local(&self) {
        self.local_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_latency(&self, duration: Duration) {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.total_latency_millis
            .fetch_add(millis, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.requests_total.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests_total: requests,
            validation_failures_total: self.validation_failures_total.load(Ordering::Relaxed),
            remote_attempts_total: self.remote_attempts_total.load(Ordering::Relaxed),
            remote_success_total: self.remote_success_total.load(Ordering::Relaxed),
            fallback_total: self.fallback_total.load(Ordering::Relaxed),
            local_total: self.local_total.load(Ordering::Relaxed),
            avg_latency_millis: if requests == 0 {
                0.0
            } else {
                latency as f64 / requests as f64
            },
        }
    }
}

// Logs go to stderr; stdout carries formatted output only.
pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("warn,{}=info", service_name)));

        let json = env::var(LOG_FORMAT_VAR)
            .map(|value| value.trim().eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if json {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(std::io::stderr)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    });
}
