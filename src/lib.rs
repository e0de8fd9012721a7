//! Probabilistic availability load testing for HTTP services.
//!
//! woodpecker repeatedly fires a set of declarative test cases ("pecks") at a
//! service. Each peck names a target request and how likely it is to fire in a given
//! round. Per-peck latency and success statistics are reported once the run is over.
//!
//! ## Features
//!
//! - **Chance-weighted firing**: every peck fires with its own probability each round.
//! - **At-least-once**: a peck can be forced to fire until it has recorded a hit.
//! - **Reproducible**: seed the selector to replay the same fire sequence.
//! - **Sequential**: never more than one request in flight, so latencies are not
//!   skewed by the load generator itself.
//! - **Reports**: console table plus optional JSON or CSV report files.
//!
//! ## Example
//!
//! Pecks can be loaded from files (see [`loader`]) or built in code, with custom
//! lifecycle hooks:
//!
//! ```no_run
//! use anyhow::Result;
//! use async_trait::async_trait;
//! use woodpecker::{
//!     HttpExecutor, PeckConfig, PeckDefinition, PeckEnvironment, RunOpts, Runner, Selector, Target,
//! };
//!
//! struct Seed;
//!
//! #[async_trait]
//! impl PeckEnvironment for Seed {
//!     async fn prepare(&mut self) -> Result<()> {
//!         // create fixtures here
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let pecks = vec![
//!         PeckDefinition::new(Target::get("/meta/healthcheck"), PeckConfig::new(60, true), Box::new(Seed))?,
//!         PeckDefinition::without_hooks(Target::post("/meta/ping", None), PeckConfig::new(30, false))?,
//!     ];
//!     let opts = RunOpts { base_url: "http://localhost:8080".into(), count: 100 };
//!     let mut runner = Runner::new(opts, pecks, HttpExecutor::new(), Selector::seeded(42));
//!
//!     for result in runner.run().await?.finalize() {
//!         println!("{} {}: {} hits, avg {:?} ms", result.method, result.path, result.hits, result.avg_ms);
//!     }
//!     Ok(())
//! }
//! ```
#![deny(missing_docs)]

mod report;
mod runner;
mod selection;
mod stats;

pub mod cli;
pub mod error;
pub mod executor;
pub mod loader;
pub mod peck;
pub mod reporter;

pub use crate::{
    executor::{Executor, HttpExecutor},
    peck::{NoopEnvironment, PeckConfig, PeckDefinition, PeckEnvironment, StatsToken, Target, Verb},
    report::{AggregatedResult, HitRecord},
    runner::{RunOpts, RunPhase, Runner},
    selection::Selector,
    stats::{Counter, StatsAggregator, StatsBucket},
};
