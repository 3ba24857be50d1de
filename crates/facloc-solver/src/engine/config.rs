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

use facloc_core::prelude::Cost;
use std::time::Duration;

/// Tuning knobs of the LNS loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LnsConfig {
    /// Facilities per neighborhood, pivot included.
    pub neighborhood_size: usize,
    /// Upper bound for a single optimizer call.
    pub subproblem_time_limit: Duration,
    /// Wall-clock budget of the whole search.
    pub time_limit: Duration,
    pub seed: u64,
    pub min_improvement: Cost,
    /// Accepted merges between two value checkpoints.
    pub checkpoint_interval: u64,
    pub checkpoint_tolerance: f64,
    pub max_iterations: Option<u64>,
    /// Iterations between progress lines; `None` disables them.
    pub log_every: Option<u64>,
}

impl Default for LnsConfig {
    #[inline]
    fn default() -> Self {
        Self {
            neighborhood_size: 50,
            subproblem_time_limit: Duration::from_secs(20),
            time_limit: Duration::from_secs(60),
            seed: 42,
            min_improvement: 1e-6,
            checkpoint_interval: 64,
            checkpoint_tolerance: 1e-9,
            max_iterations: None,
            log_every: Some(100),
        }
    }
}

impl LnsConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_neighborhood_size(mut self, k: usize) -> Self {
        self.neighborhood_size = k;
        self
    }

    #[inline]
    pub fn with_subproblem_time_limit(mut self, limit: Duration) -> Self {
        self.subproblem_time_limit = limit;
        self
    }

    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[inline]
    pub fn with_min_improvement(mut self, min_improvement: Cost) -> Self {
        self.min_improvement = min_improvement;
        self
    }

    #[inline]
    pub fn with_checkpoint_interval(mut self, interval: u64) -> Self {
        self.checkpoint_interval = interval.max(1);
        self
    }

    #[inline]
    pub fn with_checkpoint_tolerance(mut self, tolerance: f64) -> Self {
        self.checkpoint_tolerance = tolerance;
        self
    }

    #[inline]
    pub fn with_max_iterations(mut self, max_iterations: Option<u64>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[inline]
    pub fn with_log_every(mut self, every: Option<u64>) -> Self {
        self.log_every = every;
        self
    }
}

impl std::fmt::Display for LnsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LnsConfig{{ k: {}, subproblem_time_limit: {:?}, time_limit: {:?}, seed: {}, \
             min_improvement: {}, checkpoint_interval: {}, max_iterations: {:?} }}",
            self.neighborhood_size,
            self.subproblem_time_limit,
            self.time_limit,
            self.seed,
            self.min_improvement,
            self.checkpoint_interval,
            self.max_iterations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_builders() {
        let c = LnsConfig::default();
        assert_eq!(c.neighborhood_size, 50);
        assert_eq!(c.subproblem_time_limit, Duration::from_secs(20));
        assert_eq!(c.time_limit, Duration::from_secs(60));
        assert_eq!(c.min_improvement, 1e-6);
        assert_eq!(c.max_iterations, None);

        let c = LnsConfig::new()
            .with_neighborhood_size(3)
            .with_seed(7)
            .with_checkpoint_interval(0)
            .with_max_iterations(Some(10));
        assert_eq!(c.neighborhood_size, 3);
        assert_eq!(c.seed, 7);
        assert_eq!(c.checkpoint_interval, 1);
        assert!(c.to_string().contains("k: 3"));
    }
}
