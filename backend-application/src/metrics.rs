use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    report_requests: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    provider_skips: AtomicU64,
    audit_write_failures: AtomicU64,
}

impl Metrics {
    pub fn record_report_request(&self) {
        self.report_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_provider_skips(&self, count: usize) {
        self.provider_skips
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_audit_write_failure(&self) {
        self.audit_write_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let requests = self.report_requests.load(Ordering::Relaxed);
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        let skips = self.provider_skips.load(Ordering::Relaxed);
        let audit_failures = self.audit_write_failures.load(Ordering::Relaxed);

        format!(
            "# TYPE boxoffice_report_requests_total counter\n\
boxoffice_report_requests_total {}\n\
# TYPE boxoffice_cache_hits_total counter\n\
boxoffice_cache_hits_total {}\n\
# TYPE boxoffice_cache_misses_total counter\n\
boxoffice_cache_misses_total {}\n\
# TYPE boxoffice_provider_skips_total counter\n\
boxoffice_provider_skips_total {}\n\
# TYPE boxoffice_audit_write_failures_total counter\n\
boxoffice_audit_write_failures_total {}\n",
            requests, hits, misses, skips, audit_failures
        )
    }
}
