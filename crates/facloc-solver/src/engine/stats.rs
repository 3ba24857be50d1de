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

use crate::lns::updater::{RejectReason, UpdateOutcome};
use facloc_core::prelude::{Cost, Ewma};
use std::time::Duration;

/// Counters collected over one search run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStats {
    pub iterations: u64,
    pub accepted: u64,
    pub not_improving: u64,
    pub infeasible: u64,
    pub not_solved: u64,
    pub invalid: u64,
    pub stale: u64,
    pub skipped_empty: u64,
    pub checkpoints: u64,
    pub initial_value: Cost,
    pub final_value: Cost,
    pub elapsed: Duration,
    /// Smoothed optimizer latency in seconds.
    pub optimizer_latency: Ewma,
}

impl SearchStats {
    #[inline]
    pub fn new(initial_value: Cost) -> Self {
        Self {
            iterations: 0,
            accepted: 0,
            not_improving: 0,
            infeasible: 0,
            not_solved: 0,
            invalid: 0,
            stale: 0,
            skipped_empty: 0,
            checkpoints: 0,
            initial_value,
            final_value: initial_value,
            elapsed: Duration::ZERO,
            optimizer_latency: Ewma::default(),
        }
    }

    pub fn record(&mut self, outcome: &UpdateOutcome) {
        match outcome {
            UpdateOutcome::Accepted { .. } => self.accepted += 1,
            UpdateOutcome::Rejected(RejectReason::NotImproving) => self.not_improving += 1,
            UpdateOutcome::Rejected(RejectReason::Infeasible) => self.infeasible += 1,
            UpdateOutcome::Rejected(RejectReason::NotSolved) => self.not_solved += 1,
            UpdateOutcome::Rejected(RejectReason::InvalidProposal) => self.invalid += 1,
            UpdateOutcome::Rejected(RejectReason::Stale) => self.stale += 1,
        }
    }

    #[inline]
    pub fn rejected(&self) -> u64 {
        self.not_improving + self.infeasible + self.not_solved + self.invalid + self.stale
    }

    #[inline]
    pub fn improvement(&self) -> Cost {
        self.initial_value - self.final_value
    }
}

impl std::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchStats{{ iterations: {}, accepted: {}, rejected: {}, skipped: {}, \
             value: {} -> {}, elapsed: {:?}",
            self.iterations,
            self.accepted,
            self.rejected(),
            self.skipped_empty,
            self.initial_value,
            self.final_value,
            self.elapsed
        )?;
        if let Some(latency) = self.optimizer_latency.value() {
            write!(f, ", optimizer_latency: {:.3}s", latency)?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_buckets_outcomes() {
        let mut s = SearchStats::new(10.0);
        s.record(&UpdateOutcome::Accepted {
            old_value: 5.0,
            new_value: 4.0,
        });
        s.record(&UpdateOutcome::Rejected(RejectReason::Stale));
        s.record(&UpdateOutcome::Rejected(RejectReason::NotSolved));
        s.final_value = 9.0;

        assert_eq!(s.accepted, 1);
        assert_eq!(s.stale, 1);
        assert_eq!(s.rejected(), 2);
        assert_eq!(s.improvement(), 1.0);
        assert!(s.to_string().contains("value: 10 -> 9"));
    }
}
