//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestDataBuilder`: deterministic event payloads (always available)
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_mongo_test");
//!
//!     let payload = builder.event_json(1);
//! }
//! ```

use serde_json::{Value, json};

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Builder for event test data, seeded so that reruns produce the same values.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name, so each test gets its own stable data.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_event");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// `test-<prefix>-<seed>-<suffix>`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("event", "main"), "test-event-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// A calendar date in 2024 derived from the seed and `n`.
    pub fn date(&self, n: u64) -> String {
        let mixed = self.seed.wrapping_add(n.wrapping_mul(31));
        format!("2024-{:02}-{:02}", mixed % 12 + 1, mixed % 28 + 1)
    }

    /// Create payload without an id: `{name, date, description}`.
    pub fn event_json(&self, n: u64) -> Value {
        json!({
            "name": self.name("event", &n.to_string()),
            "date": self.date(n),
            "description": format!("Test event {} for seed {}", n, self.seed),
        })
    }

    /// Create payload with an explicit id.
    pub fn event_json_with_id(&self, id: &str, n: u64) -> Value {
        let mut payload = self.event_json(n);
        payload["id"] = json!(id);
        payload
    }
}
