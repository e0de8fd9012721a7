//! The run engine: prepares every peck, fires them over a number of rounds and
//! cleans up.
use rand::{Rng, rngs::StdRng};
use tokio::time::Instant;

use crate::{
    error::RunError,
    executor::Executor,
    peck::PeckDefinition,
    selection::Selector,
    stats::StatsAggregator,
};

/// Core options for the run engine.
#[derive(Clone, Debug)]
pub struct RunOpts {
    /// Base URL every target path is appended to, without a trailing slash.
    pub base_url: String,

    /// Number of rounds. Every round visits every peck once.
    pub count: u64,
}

/// Lifecycle of a [`Runner`].
///
/// State transitions: `Idle → Preparing → Running → CleaningUp → Finalized`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
pub enum RunPhase {
    /// Not started yet.
    #[default]
    Idle,
    /// Calling `prepare` on every peck.
    Preparing,
    /// Firing rounds.
    Running,
    /// Calling `cleanup` on every peck.
    CleaningUp,
    /// Done, statistics are read-only.
    Finalized,
}

/// Runs pecks sequentially against a target.
///
/// There is never more than one request in flight: each fired request is awaited and
/// recorded before the next peck is visited.
pub struct Runner<E, R = StdRng> {
    opts: RunOpts,
    pecks: Vec<PeckDefinition>,
    executor: E,
    selector: Selector<R>,
    stats: StatsAggregator,
    phase: RunPhase,
}

impl<E, R> Runner<E, R>
where
    E: Executor,
    R: Rng,
{
    /// Create a new runner. Pecks are visited in the given order.
    pub fn new(opts: RunOpts, pecks: Vec<PeckDefinition>, executor: E, selector: Selector<R>) -> Self {
        Self { opts, pecks, executor, selector, stats: StatsAggregator::new(), phase: RunPhase::Idle }
    }

    /// Current phase.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// The pecks of this run.
    pub fn pecks(&self) -> &[PeckDefinition] {
        &self.pecks
    }

    /// Statistics collected so far.
    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    /// Run every phase to completion and return the final statistics.
    ///
    /// A failed request never aborts the run. A failing hook does, and its error is
    /// returned as is; hooks of the remaining pecks are not called.
    pub async fn run(&mut self) -> Result<&StatsAggregator, RunError> {
        if self.phase != RunPhase::Idle {
            return Err(RunError::AlreadyStarted { phase: self.phase });
        }
        let t = Instant::now();

        self.prepare().await?;
        self.rounds().await;
        self.cleanup().await?;

        self.phase = RunPhase::Finalized;
        tracing::info!(elapsed = ?t.elapsed(), buckets = self.stats.len(), "run finished");
        Ok(&self.stats)
    }

    async fn prepare(&mut self) -> Result<(), RunError> {
        self.phase = RunPhase::Preparing;
        tracing::info!(pecks = self.pecks.len(), "preparing pecks");

        for peck in &mut self.pecks {
            let target = peck.target();
            self.stats.register(peck.token(), target.method.as_str(), &target.path);

            let label = target.to_string();
            peck.environment_mut()
                .prepare()
                .await
                .map_err(|e| RunError::Prepare { peck: label, source: e.into() })?;
        }
        Ok(())
    }

    async fn rounds(&mut self) {
        self.phase = RunPhase::Running;
        tracing::info!(rounds = self.opts.count, pecks = self.pecks.len(), "running pecks");

        if self.opts.count == 0 && self.pecks.iter().any(|p| p.config().at_least_once) {
            tracing::warn!("no rounds to run, at-least-once pecks will not fire");
        }

        let mut warned = vec![false; self.pecks.len()];
        for round in 0..self.opts.count {
            let mut fired = 0usize;
            for (i, peck) in self.pecks.iter().enumerate() {
                let hits = self.stats.hit_count(peck.token());
                if !self.selector.decide(peck.config(), hits) {
                    continue;
                }

                let target = peck.target();
                let Some(verb) = target.verb() else {
                    if warned[i] {
                        tracing::debug!(method = %target.method, path = %target.path, "unknown request type, skipping");
                    } else {
                        warned[i] = true;
                        tracing::warn!(method = %target.method, path = %target.path, "unknown request type, skipping");
                    }
                    continue;
                };

                let hit = self.executor.execute(&self.opts.base_url, verb, target).await;
                self.stats.append(peck.token(), hit);
                fired += 1;
            }
            tracing::debug!(round, fired, "round complete");
        }
    }

    async fn cleanup(&mut self) -> Result<(), RunError> {
        self.phase = RunPhase::CleaningUp;
        tracing::info!(pecks = self.pecks.len(), "cleaning up");

        for peck in &mut self.pecks {
            let label = peck.target().to_string();
            peck.environment_mut()
                .cleanup()
                .await
                .map_err(|e| RunError::Cleanup { peck: label, source: e.into() })?;
        }
        Ok(())
    }
}
