// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::{AtomicU64, Ordering};

const METRIC_SUBSYSTEM: &str = "settings";
const METRIC_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Request counters exported on `/metrics`.
#[derive(Default)]
pub struct RequestMetrics {
    pub http_requests: AtomicU64,
    pub page_renders: AtomicU64,
    pub submissions: AtomicU64,
    pub store_failures: AtomicU64,
}

impl RequestMetrics {
    pub fn observe_request(&self) {
        self.http_requests.fetch_add(1, Ordering::Relaxed);
    }
}

pub(crate) fn render_metrics(metrics: &RequestMetrics) -> String {
    String::from(
        "settings_http_requests_total{subsystem=\"%SUB%\",version=\"%VER%\"} %REQS%\n\
settings_page_renders_total{subsystem=\"%SUB%\",version=\"%VER%\"} %RENDERS%\n\
settings_submissions_total{subsystem=\"%SUB%\",version=\"%VER%\"} %SUBMITS%\n\
settings_store_failures_total{subsystem=\"%SUB%\",version=\"%VER%\"} %FAILURES%\n",
    )
    .replace("%SUB%", METRIC_SUBSYSTEM)
    .replace("%VER%", METRIC_VERSION)
    .replace(
        "%REQS%",
        &metrics.http_requests.load(Ordering::Relaxed).to_string(),
    )
    .replace(
        "%RENDERS%",
        &metrics.page_renders.load(Ordering::Relaxed).to_string(),
    )
    .replace(
        "%SUBMITS%",
        &metrics.submissions.load(Ordering::Relaxed).to_string(),
    )
    .replace(
        "%FAILURES%",
        &metrics.store_failures.load(Ordering::Relaxed).to_string(),
    )
}
