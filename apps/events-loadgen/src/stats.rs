//! Per-operation request statistics.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::time::Duration;

/// How a single request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    ClientError,
    ServerError,
    /// Connection, timeout or body decoding failure
    Transport,
}

impl Outcome {
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        if status.is_success() {
            Self::Success
        } else if status.is_server_error() {
            Self::ServerError
        } else {
            Self::ClientError
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpStats {
    pub requests: u64,
    pub client_errors: u64,
    pub server_errors: u64,
    pub transport_errors: u64,
    pub total_latency: Duration,
    pub max_latency: Duration,
}

impl OpStats {
    pub fn failures(&self) -> u64 {
        self.client_errors + self.server_errors + self.transport_errors
    }

    pub fn mean_latency(&self) -> Duration {
        self.total_latency
            .as_nanos()
            .checked_div(u128::from(self.requests))
            .map_or(Duration::ZERO, |nanos| {
                Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
            })
    }

    fn record(&mut self, outcome: Outcome, latency: Duration) {
        self.requests += 1;
        match outcome {
            Outcome::Success => {}
            Outcome::ClientError => self.client_errors += 1,
            Outcome::ServerError => self.server_errors += 1,
            Outcome::Transport => self.transport_errors += 1,
        }
        self.total_latency += latency;
        self.max_latency = self.max_latency.max(latency);
    }

    fn merge(&mut self, other: &OpStats) {
        self.requests += other.requests;
        self.client_errors += other.client_errors;
        self.server_errors += other.server_errors;
        self.transport_errors += other.transport_errors;
        self.total_latency += other.total_latency;
        self.max_latency = self.max_latency.max(other.max_latency);
    }
}

/// Stats keyed by request label, e.g. `GET /events/[id]`.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    ops: BTreeMap<&'static str, OpStats>,
}

impl Stats {
    pub fn record(&mut self, label: &'static str, outcome: Outcome, latency: Duration) {
        self.ops.entry(label).or_default().record(outcome, latency);
    }

    pub fn merge(&mut self, other: &Stats) {
        for (label, op) in &other.ops {
            self.ops.entry(*label).or_default().merge(op);
        }
    }

    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&OpStats> {
        self.ops.get(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &OpStats)> {
        self.ops.iter().map(|(label, op)| (*label, op))
    }

    pub fn total(&self) -> OpStats {
        let mut total = OpStats::default();
        for op in self.ops.values() {
            total.merge(op);
        }
        total
    }

    /// Fixed-width summary table, one row per label plus a total.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<28} {:>9} {:>9} {:>6} {:>6} {:>6} {:>10} {:>10}",
            "Name", "Requests", "Failures", "4xx", "5xx", "Net", "Mean(ms)", "Max(ms)"
        );

        let total = self.total();
        for (label, op) in self.iter().chain(std::iter::once(("Aggregated", &total))) {
            let _ = writeln!(
                out,
                "{:<28} {:>9} {:>9} {:>6} {:>6} {:>6} {:>10} {:>10}",
                label,
                op.requests,
                op.failures(),
                op.client_errors,
                op.server_errors,
                op.transport_errors,
                op.mean_latency().as_millis(),
                op.max_latency.as_millis()
            );
        }
        out
    }
}
