//! Process-wide counters (spec.md §2 C7, §5 "global mutable state"): one
//! atomic per counter, read into a JSON-able snapshot for the `/metrics`
//! route. Never decremented by the core.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    fetch_runs: AtomicU64,
    provider_calls: AtomicU64,
    provider_call_failures: AtomicU64,
    notifications_sent: AtomicU64,
    notifications_failed: AtomicU64,
    processing_errors: AtomicU64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricsSnapshot {
    pub fetch_runs: u64,
    pub provider_calls: u64,
    pub provider_call_failures: u64,
    pub notifications_sent: u64,
    pub notifications_failed: u64,
    pub processing_errors: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_fetch_run(&self) {
        self.fetch_runs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_provider_call(&self) {
        self.provider_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_provider_call_failure(&self) {
        self.provider_call_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// `slack_notifications_sent` (spec.md §4.3).
    pub fn record_notification_sent(&self) {
        self.notifications_sent.fetch_add(1, Ordering::Relaxed);
    }

    /// `slack_notifications_failed` (spec.md §4.3).
    pub fn record_notification_failed(&self) {
        self.notifications_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// The dedicated failure counter spec.md §7 requires for `Fatal` errors.
    pub fn record_processing_error(&self) {
        self.processing_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            fetch_runs: self.fetch_runs.load(Ordering::Relaxed),
            provider_calls: self.provider_calls.load(Ordering::Relaxed),
            provider_call_failures: self.provider_call_failures.load(Ordering::Relaxed),
            notifications_sent: self.notifications_sent.load(Ordering::Relaxed),
            notifications_failed: self.notifications_failed.load(Ordering::Relaxed),
            processing_errors: self.processing_errors.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero_and_accumulate() {
        let m = Metrics::new();
        assert_eq!(m.snapshot().fetch_runs, 0);

        m.record_fetch_run();
        m.record_fetch_run();
        m.record_notification_sent();

        let snap = m.snapshot();
        assert_eq!(snap.fetch_runs, 2);
        assert_eq!(snap.notifications_sent, 1);
        assert_eq!(snap.notifications_failed, 0);
    }
}
