use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    sources_fetched: AtomicU64,
    sources_failed: AtomicU64,
    events_adapted: AtomicU64,
    events_dropped: AtomicU64,
    events_published: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub sources_fetched: u64,
    pub sources_failed: u64,
    pub events_adapted: u64,
    pub events_dropped: u64,
    pub events_published: u64,
}

impl Metrics {
    pub fn record_fetch(&self) {
        self.sources_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_error(&self) {
        self.sources_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_adapted(&self, adapted: usize, dropped: usize) {
        self.events_adapted
            .fetch_add(adapted as u64, Ordering::Relaxed);
        self.events_dropped
            .fetch_add(dropped as u64, Ordering::Relaxed);
    }

    pub fn record_published(&self, count: usize) {
        self.events_published
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sources_fetched: self.sources_fetched.load(Ordering::Relaxed),
            sources_failed: self.sources_failed.load(Ordering::Relaxed),
            events_adapted: self.events_adapted.load(Ordering::Relaxed),
            events_dropped: self.events_dropped.load(Ordering::Relaxed),
            events_published: self.events_published.load(Ordering::Relaxed),
        }
    }

    pub fn summary_line(&self) -> String {
        let snapshot = self.snapshot();
        format!(
            "sources fetched={} failed={}; events adapted={} dropped={} published={}",
            snapshot.sources_fetched,
            snapshot.sources_failed,
            snapshot.events_adapted,
            snapshot.events_dropped,
            snapshot.events_published
        )
    }
}
