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

use crate::{lns::updater::UpdateOutcome, monitor::search_monitor::SearchMonitor};
use facloc_core::prelude::Cost;
use std::time::Instant;

/// Periodic `info!` progress lines.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    every: u64,
    started: Instant,
    initial_value: Cost,
    best_value: Cost,
    iterations: u64,
    accepted: u64,
}

impl LogMonitor {
    /// Logs every `every` completed iterations (at least one).
    #[inline]
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            started: Instant::now(),
            initial_value: f64::INFINITY,
            best_value: f64::INFINITY,
            iterations: 0,
            accepted: 0,
        }
    }

    #[inline]
    pub fn every(&self) -> u64 {
        self.every
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(100)
    }
}

impl SearchMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_search_start(&mut self, initial_value: Cost) {
        self.started = Instant::now();
        self.initial_value = initial_value;
        self.best_value = initial_value;
        self.iterations = 0;
        self.accepted = 0;
    }

    fn on_iteration_end(&mut self, iteration: u64, outcome: Option<&UpdateOutcome>) {
        self.iterations += 1;
        if outcome.is_some_and(UpdateOutcome::is_accepted) {
            self.accepted += 1;
        }
        if self.iterations % self.every == 0 {
            tracing::info!(
                iteration,
                accepted = self.accepted,
                best = self.best_value,
                elapsed_ms = self.started.elapsed().as_millis() as u64,
                "LNS progress"
            );
        }
    }

    fn on_new_incumbent(&mut self, _iteration: u64, _old_value: Cost, new_value: Cost) {
        self.best_value = new_value;
    }

    fn on_search_end(&mut self, final_value: Cost) {
        let gain = self.initial_value - final_value;
        tracing::info!(
            iterations = self.iterations,
            accepted = self.accepted,
            final_value,
            gain,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "LNS finished"
        );
    }

    #[inline]
    fn should_terminate(&self) -> bool {
        false
    }
}
