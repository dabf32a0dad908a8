//! Events Load Generator
//!
//! Spawns virtual users that hit the event service with a weighted mix of
//! create, list, get, update and delete requests, then prints per-request
//! statistics.

use clap::Parser;
use core_config::Environment;
use core_config::tracing::{init_tracing, install_color_eyre};
use eyre::Result;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{info, warn};

mod stats;
mod user;

use stats::Stats;
use user::{VirtualUser, WaitTime};

#[derive(Parser, Debug)]
#[command(name = "events-loadgen")]
#[command(about = "Generate load against the event service")]
struct Cli {
    /// Base URL of the event service
    #[arg(long, default_value = "http://localhost:5000")]
    host: String,

    /// Number of concurrent virtual users
    #[arg(short, long, default_value_t = 10)]
    users: usize,

    /// How long to run, in seconds
    #[arg(short, long, default_value_t = 60)]
    duration_secs: u64,

    /// Minimum pause between a user's tasks, in milliseconds
    #[arg(long, default_value_t = 1000)]
    min_wait_ms: u64,

    /// Maximum pause between a user's tasks, in milliseconds
    #[arg(long, default_value_t = 3000)]
    max_wait_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

impl Cli {
    fn wait_time(&self) -> Result<WaitTime> {
        if self.min_wait_ms > self.max_wait_ms {
            eyre::bail!(
                "--min-wait-ms ({}) must not exceed --max-wait-ms ({})",
                self.min_wait_ms,
                self.max_wait_ms
            );
        }
        Ok(WaitTime {
            min: Duration::from_millis(self.min_wait_ms),
            max: Duration::from_millis(self.max_wait_ms),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let cli = Cli::parse();
    let wait = cli.wait_time()?;
    if cli.users == 0 {
        eyre::bail!("--users must be at least 1");
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout_secs))
        .build()?;

    let deadline = Instant::now() + Duration::from_secs(cli.duration_secs);
    let (stop_tx, stop_rx) = watch::channel(false);

    info!(
        host = %cli.host,
        users = cli.users,
        duration_secs = cli.duration_secs,
        "Starting load generation"
    );

    let handles: Vec<_> = (0..cli.users)
        .map(|id| {
            let user = VirtualUser::new(id, client.clone(), &cli.host);
            tokio::spawn(user.run(deadline, wait, stop_rx.clone()))
        })
        .collect();

    let mut run = std::pin::pin!(futures::future::join_all(handles));
    let results = tokio::select! {
        results = &mut run => results,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, stopping users");
            let _ = stop_tx.send(true);
            run.await
        }
    };

    let mut totals = Stats::default();
    for result in results {
        match result {
            Ok(stats) => totals.merge(&stats),
            Err(e) => warn!("Virtual user task failed: {}", e),
        }
    }

    println!("{}", totals.render_table());

    for (label, op) in totals.iter() {
        info!(
            name = label,
            requests = op.requests,
            failures = op.failures(),
            mean_ms = op.mean_latency().as_millis() as u64,
            max_ms = op.max_latency.as_millis() as u64,
            "Request stats"
        );
    }

    let total = totals.total();
    info!(
        requests = total.requests,
        failures = total.failures(),
        "Load generation complete"
    );
    Ok(())
}
