//! Per-peck statistics.
//!
//! Every peck records into a bucket keyed by its [`StatsToken`]. Buckets are
//! append-only for the duration of a run and are turned into [`AggregatedResult`]s
//! once the run is over.
//!
//! # Key Types
//!
//! - [`StatsAggregator`] - Owns all buckets of a run, in registration order.
//! - [`StatsBucket`] - The ordered hit records of one token.
//! - [`Counter`] - Running tally of hits, successes, failures and total duration.

mod counter;

pub use counter::Counter;

use std::collections::HashMap;

use crate::{
    peck::StatsToken,
    report::{AggregatedResult, HitRecord, round2},
};

/// The hit records of one stats token.
#[derive(Clone, Debug)]
pub struct StatsBucket {
    method: String,
    path: String,
    hits: Vec<HitRecord>,
}

impl StatsBucket {
    fn new(method: String, path: String) -> Self {
        Self { method, path, hits: Vec::new() }
    }

    /// Recorded hits, oldest first.
    pub fn hits(&self) -> &[HitRecord] {
        &self.hits
    }

    /// Totals over all recorded hits.
    pub fn counter(&self) -> Counter {
        self.hits.iter().collect()
    }

    /// Aggregates the bucket. The average is rounded to 2 decimals.
    pub fn aggregate(&self) -> AggregatedResult {
        let counter = self.counter();
        AggregatedResult {
            method: self.method.clone(),
            path: self.path.clone(),
            hits: counter.hits,
            successes: counter.successes,
            failures: counter.failures,
            avg_ms: counter.mean_ms().map(round2),
        }
    }
}

/// Append-only statistics of a run.
///
/// Buckets keep the order in which their token was first registered, and that order
/// carries over to [`finalize`](Self::finalize).
#[derive(Clone, Debug, Default)]
pub struct StatsAggregator {
    buckets: Vec<StatsBucket>,
    index: HashMap<StatsToken, usize>,
}

impl StatsAggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the bucket for `token` unless it already exists.
    pub fn register(&mut self, token: &StatsToken, method: &str, path: &str) {
        if self.index.contains_key(token) {
            return;
        }
        self.index.insert(token.clone(), self.buckets.len());
        self.buckets.push(StatsBucket::new(method.to_owned(), path.to_owned()));
    }

    /// Appends a hit to the bucket of `token`.
    ///
    /// Appending to an unregistered token is ignored with a warning, since the bucket's
    /// method and path are unknown.
    pub fn append(&mut self, token: &StatsToken, hit: HitRecord) {
        match self.index.get(token) {
            Some(&i) => self.buckets[i].hits.push(hit),
            None => tracing::warn!(%token, "hit recorded for an unregistered peck, dropping it"),
        }
    }

    /// Number of hits recorded for `token` so far.
    pub fn hit_count(&self, token: &StatsToken) -> usize {
        self.bucket(token).map_or(0, |b| b.hits.len())
    }

    /// The bucket of `token`, if registered.
    pub fn bucket(&self, token: &StatsToken) -> Option<&StatsBucket> {
        self.index.get(token).map(|&i| &self.buckets[i])
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns true if no bucket has been registered.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// The aggregated result of a single bucket.
    pub fn result(&self, token: &StatsToken) -> Option<AggregatedResult> {
        self.bucket(token).map(StatsBucket::aggregate)
    }

    /// Aggregates every bucket, in registration order.
    ///
    /// Calling this repeatedly without further appends yields the same results.
    pub fn finalize(&self) -> Vec<AggregatedResult> {
        self.buckets.iter().map(StatsBucket::aggregate).collect()
    }
}
