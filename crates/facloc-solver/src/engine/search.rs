// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::{
    engine::{
        config::LnsConfig, err::SearchError, incumbent::IncumbentHandle, stats::SearchStats,
    },
    lns::{
        neighborhood::NeighborhoodSelector,
        subproblem::Subproblem,
        updater::{SolutionUpdater, UpdateOutcome},
    },
    model::instance::InstanceModel,
    monitor::{
        CompositeSearchMonitor, InterruptMonitor, IterationLimitMonitor, LogMonitor,
        SearchMonitor, StopToken, TimeLimitMonitor,
    },
    opening::greedy::GreedyOpening,
    optimizer::{Optimizer, OptimizerStatus},
    state::solver_state::SolverState,
};
use facloc_model::prelude::Solution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchPhase {
    Init = 0,
    Iterating = 1,
    Done = 2,
}

impl SearchPhase {
    #[inline]
    pub(crate) fn from_u8(v: u8) -> Self {
        match v {
            0 => SearchPhase::Init,
            1 => SearchPhase::Iterating,
            _ => SearchPhase::Done,
        }
    }
}

impl std::fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SearchPhase::Init => "INIT",
            SearchPhase::Iterating => "ITERATING",
            SearchPhase::Done => "DONE",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub solution: Solution,
    pub stats: SearchStats,
}

/// Anytime large neighborhood search.
///
/// `INIT` builds the greedy opening solution. `ITERATING` repeatedly picks a
/// random neighborhood, solves it exactly and merges strict improvements.
/// The monitors are polled before every iteration; the configured time
/// budget, the stop token and the optional iteration cap are always among
/// them. The global value never increases.
#[derive(Debug)]
pub struct LnsSearch {
    config: LnsConfig,
    monitors: CompositeSearchMonitor,
    stop: StopToken,
    incumbent: IncumbentHandle,
}

impl Default for LnsSearch {
    fn default() -> Self {
        Self::new(LnsConfig::default())
    }
}

impl LnsSearch {
    pub fn new(config: LnsConfig) -> Self {
        let stop = StopToken::new();
        let mut monitors = CompositeSearchMonitor::new()
            .with(TimeLimitMonitor::new(config.time_limit))
            .with(InterruptMonitor::new(stop.clone()));
        if let Some(limit) = config.max_iterations {
            monitors.push(IterationLimitMonitor::new(limit));
        }
        if let Some(every) = config.log_every {
            monitors.push(LogMonitor::new(every));
        }

        Self {
            config,
            monitors,
            stop,
            incumbent: IncumbentHandle::new(),
        }
    }

    #[inline]
    pub fn with_monitor<M: SearchMonitor + 'static>(mut self, monitor: M) -> Self {
        self.monitors.push(monitor);
        self
    }

    #[inline]
    pub fn config(&self) -> &LnsConfig {
        &self.config
    }

    /// Setting the returned token ends the search before its next iteration.
    #[inline]
    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    #[inline]
    pub fn incumbent(&self) -> IncumbentHandle {
        self.incumbent.clone()
    }

    #[inline]
    pub fn phase(&self) -> SearchPhase {
        self.incumbent.phase()
    }

    /// Runs with a `ChaCha8Rng` seeded from the configuration.
    pub fn run_seeded(
        &mut self,
        model: &InstanceModel<'_>,
        optimizer: &mut dyn Optimizer,
    ) -> Result<SearchOutcome, SearchError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.run(model, optimizer, &mut rng)
    }

    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(facilities = model.facilities_len(), customers = model.customers_len())
    )]
    pub fn run<R: Rng>(
        &mut self,
        model: &InstanceModel<'_>,
        optimizer: &mut dyn Optimizer,
        rng: &mut R,
    ) -> Result<SearchOutcome, SearchError> {
        self.incumbent.set_phase(SearchPhase::Init);
        let state = match GreedyOpening::new().build(model) {
            Ok(state) => state,
            Err(err) => {
                self.incumbent.set_phase(SearchPhase::Done);
                return Err(err.into());
            }
        };
        tracing::info!(
            value = state.value(),
            open = state.open_facilities_len(),
            "Opening solution built"
        );
        self.run_from(model, state, optimizer, rng)
    }

    /// Improves an existing feasible state.
    pub fn run_from<R: Rng>(
        &mut self,
        model: &InstanceModel<'_>,
        mut state: SolverState,
        optimizer: &mut dyn Optimizer,
        rng: &mut R,
    ) -> Result<SearchOutcome, SearchError> {
        let config = self.config;
        let selector = NeighborhoodSelector::new(config.neighborhood_size);
        let updater = SolutionUpdater::new().with_min_improvement(config.min_improvement);
        let mut stats = SearchStats::new(state.value());
        let mut optimal = false;
        let mut since_checkpoint = 0u64;

        self.incumbent.install(state.to_solution(false));
        self.incumbent.set_phase(SearchPhase::Iterating);
        let started = Instant::now();
        self.monitors.on_search_start(state.value());
        tracing::info!(
            optimizer = optimizer.name(),
            value = state.value(),
            "Entering {}",
            SearchPhase::Iterating
        );

        let searchable = model.customers_len() > 0 && config.neighborhood_size > 0;
        let mut iteration = 0u64;
        while searchable && !self.monitors.should_terminate() {
            self.monitors.on_iteration_start(iteration);

            let nb = selector.select(model, &state, rng);
            let update = if nb.is_empty() {
                stats.skipped_empty += 1;
                None
            } else {
                let sub = Subproblem::formulate(model, &nb);
                let remaining = config.time_limit.saturating_sub(started.elapsed());
                let limit = config.subproblem_time_limit.min(remaining);

                let t0 = Instant::now();
                let result = optimizer.solve(sub.program(), limit);
                stats.optimizer_latency.observe_duration(t0.elapsed());
                optimal = result.status() == OptimizerStatus::Optimal;

                let value_before = state.value();
                let update = updater.apply(model, &mut state, &nb, &sub, &result);
                stats.record(&update);
                tracing::debug!(iteration, pivot = %nb.pivot(), %update, "Iteration done");

                if let UpdateOutcome::Accepted {
                    old_value,
                    new_value,
                } = update
                {
                    tracing::info!(
                        iteration,
                        value = state.value(),
                        gain = old_value - new_value,
                        "New incumbent"
                    );
                    self.monitors
                        .on_new_incumbent(iteration, value_before, state.value());
                    self.incumbent.publish(state.to_solution(optimal));

                    since_checkpoint += 1;
                    if since_checkpoint >= config.checkpoint_interval {
                        self.checkpoint(model, &mut state, &mut stats)?;
                        since_checkpoint = 0;
                    }
                }
                Some(update)
            };

            stats.iterations += 1;
            self.incumbent
                .record_iteration(update.is_some_and(|u| u.is_accepted()));
            self.monitors.on_iteration_end(iteration, update.as_ref());
            iteration += 1;
        }

        self.checkpoint(model, &mut state, &mut stats)?;
        stats.final_value = state.value();
        stats.elapsed = started.elapsed();
        self.monitors.on_search_end(state.value());

        let solution = state.into_solution(optimal);
        self.incumbent.install(solution.clone());
        self.incumbent.set_phase(SearchPhase::Done);
        tracing::info!(%stats, "Entering {}", SearchPhase::Done);

        Ok(SearchOutcome { solution, stats })
    }

    fn checkpoint(
        &self,
        model: &InstanceModel<'_>,
        state: &mut SolverState,
        stats: &mut SearchStats,
    ) -> Result<(), SearchError> {
        stats.checkpoints += 1;
        match state.checkpoint(model, self.config.checkpoint_tolerance) {
            Ok(_) => Ok(()),
            Err(err) => {
                tracing::warn!(
                    incremental = err.incremental(),
                    recomputed = err.recomputed(),
                    "Value drift detected"
                );
                self.incumbent.set_phase(SearchPhase::Done);
                Err(err.into())
            }
        }
    }
}
