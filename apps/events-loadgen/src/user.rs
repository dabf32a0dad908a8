//! A simulated client: picks a weighted task, runs it, waits, repeats.

use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::stats::{Outcome, Stats};

const CREATE: &str = "POST /events";
const LIST: &str = "GET /events";
const GET: &str = "GET /events/[id]";
const UPDATE: &str = "PUT /events/[id]";
const DELETE: &str = "DELETE /events/[id]";
const DELETE_SETUP: &str = "GET /events (delete setup)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    Create,
    List,
    Get,
    Update,
    Delete,
}

impl Task {
    /// Relative frequency of each task.
    pub const WEIGHTS: [(Task, u32); 5] = [
        (Task::Create, 2),
        (Task::List, 5),
        (Task::Get, 5),
        (Task::Update, 1),
        (Task::Delete, 1),
    ];

    pub fn total_weight() -> u32 {
        Self::WEIGHTS.iter().map(|(_, w)| w).sum()
    }

    /// Map `roll` in `0..total_weight()` onto a task.
    pub fn from_roll(roll: u32) -> Task {
        let mut remaining = roll;
        for (task, weight) in Self::WEIGHTS {
            if remaining < weight {
                return task;
            }
            remaining -= weight;
        }
        Task::Delete
    }

    pub fn pick() -> Task {
        Self::from_roll(rand::random_range(0..Self::total_weight()))
    }
}

/// Random inclusive wait bounds between tasks.
#[derive(Debug, Clone, Copy)]
pub struct WaitTime {
    pub min: Duration,
    pub max: Duration,
}

impl WaitTime {
    pub fn sample(&self) -> Duration {
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        if max <= min {
            return self.min;
        }
        Duration::from_millis(rand::random_range(min..=max))
    }
}

#[derive(Debug, Deserialize)]
struct EventId {
    id: String,
}

fn random_date(year: u16) -> String {
    format!(
        "{}-{:02}-{:02}",
        year,
        rand::random_range(1..=12u8),
        rand::random_range(1..=28u8)
    )
}

pub fn create_payload() -> Value {
    json!({
        "name": format!("Load Event {}", rand::random_range(1..=100_000u32)),
        "date": random_date(2024),
        "description": format!("Load test event {}", rand::random::<f64>()),
    })
}

pub fn update_payload() -> Value {
    json!({
        "name": format!("Updated Load Event {}", rand::random_range(1..=100_000u32)),
        "date": random_date(2025),
        "description": format!("Updated by load test {}", rand::random::<f64>()),
    })
}

fn choose(ids: &[String]) -> Option<&String> {
    if ids.is_empty() {
        return None;
    }
    ids.get(rand::random_range(0..ids.len()))
}

pub struct VirtualUser {
    id: usize,
    client: reqwest::Client,
    base_url: String,
    /// Ids this user created and has not seen deleted
    created_ids: Vec<String>,
    stats: Stats,
}

impl VirtualUser {
    pub fn new(id: usize, client: reqwest::Client, host: &str) -> Self {
        Self {
            id,
            client,
            base_url: format!("{}/events", host.trim_end_matches('/')),
            created_ids: Vec::new(),
            stats: Stats::default(),
        }
    }

    /// Run tasks until `deadline` or until `stop` flips to true.
    #[instrument(skip_all, fields(user = self.id))]
    pub async fn run(
        mut self,
        deadline: Instant,
        wait: WaitTime,
        mut stop: watch::Receiver<bool>,
    ) -> Stats {
        debug!("User started");

        while Instant::now() < deadline && !*stop.borrow() {
            self.run_task(Task::pick()).await;

            let pause = wait.sample();
            let wake = (Instant::now() + pause).min(deadline);
            tokio::select! {
                _ = tokio::time::sleep_until(wake) => {}
                _ = stop.changed() => break,
            }
        }

        debug!(requests = self.stats.total().requests, "User finished");
        self.stats
    }

    async fn run_task(&mut self, task: Task) {
        match task {
            Task::Create => self.create_event().await,
            Task::List => {
                self.list_events(LIST).await;
            }
            Task::Get => self.get_event().await,
            Task::Update => self.update_event().await,
            Task::Delete => self.delete_random_event().await,
        }
    }

    async fn send(
        &mut self,
        label: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Option<reqwest::Response> {
        let started = Instant::now();
        let result = request.send().await;
        let latency = started.elapsed();

        match result {
            Ok(response) => {
                self.stats
                    .record(label, Outcome::from_status(response.status()), latency);
                Some(response)
            }
            Err(e) => {
                debug!(label, error = %e, "Request failed");
                self.stats.record(label, Outcome::Transport, latency);
                None
            }
        }
    }

    async fn create_event(&mut self) {
        let request = self.client.post(&self.base_url).json(&create_payload());
        let Some(response) = self.send(CREATE, request).await else {
            return;
        };

        if response.status() == reqwest::StatusCode::CREATED {
            if let Ok(created) = response.json::<EventId>().await {
                self.created_ids.push(created.id);
            }
        }
    }

    async fn list_events(&mut self, label: &'static str) -> Option<Vec<EventId>> {
        let request = self.client.get(&self.base_url);
        let response = self.send(label, request).await?;
        if !response.status().is_success() {
            return None;
        }
        response.json::<Vec<EventId>>().await.ok()
    }

    async fn get_event(&mut self) {
        let Some(id) = choose(&self.created_ids).cloned() else {
            return;
        };
        let request = self.client.get(format!("{}/{}", self.base_url, id));
        self.send(GET, request).await;
    }

    async fn update_event(&mut self) {
        let Some(id) = choose(&self.created_ids).cloned() else {
            return;
        };
        let request = self
            .client
            .put(format!("{}/{}", self.base_url, id))
            .json(&update_payload());
        self.send(UPDATE, request).await;
    }

    /// List, pick any stored event (not only our own), delete it.
    async fn delete_random_event(&mut self) {
        let Some(events) = self.list_events(DELETE_SETUP).await else {
            return;
        };
        let ids: Vec<String> = events.into_iter().map(|e| e.id).collect();
        let Some(id) = choose(&ids).cloned() else {
            return;
        };

        let request = self.client.delete(format!("{}/{}", self.base_url, id));
        self.send(DELETE, request).await;
        self.created_ids.retain(|own| own != &id);
    }
}
