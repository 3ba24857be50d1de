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

use crate::engine::search::SearchPhase;
use facloc_core::prelude::Cost;
use facloc_model::prelude::Solution;
use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicU8, AtomicU64, Ordering},
};

#[derive(Debug)]
struct Shared {
    best_value: AtomicU64, // f64 bits; avoids locking for simple reads
    iterations: AtomicU64,
    accepted: AtomicU64,
    phase: AtomicU8,
    best: Mutex<Option<Solution>>,
}

/// Read side of the search progress, cheap to clone and safe to poll from
/// other threads while the loop runs.
#[derive(Debug, Clone)]
pub struct IncumbentHandle {
    shared: Arc<Shared>,
}

impl Default for IncumbentHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl IncumbentHandle {
    #[inline]
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                best_value: AtomicU64::new(f64::INFINITY.to_bits()),
                iterations: AtomicU64::new(0),
                accepted: AtomicU64::new(0),
                phase: AtomicU8::new(SearchPhase::Init as u8),
                best: Mutex::new(None),
            }),
        }
    }

    /// Best value so far; infinite until the opening solution exists.
    #[inline]
    pub fn peek(&self) -> Cost {
        f64::from_bits(self.shared.best_value.load(Ordering::Acquire))
    }

    #[inline]
    pub fn iterations(&self) -> u64 {
        self.shared.iterations.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn accepted(&self) -> u64 {
        self.shared.accepted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn phase(&self) -> SearchPhase {
        SearchPhase::from_u8(self.shared.phase.load(Ordering::Acquire))
    }

    /// Cloned snapshot of the best solution published so far.
    #[inline]
    pub fn snapshot(&self) -> Option<Solution> {
        self.shared.best.lock().clone()
    }

    #[inline]
    pub(crate) fn set_phase(&self, phase: SearchPhase) {
        self.shared.phase.store(phase as u8, Ordering::Release);
    }

    #[inline]
    pub(crate) fn record_iteration(&self, accepted: bool) {
        self.shared.iterations.fetch_add(1, Ordering::Relaxed);
        if accepted {
            self.shared.accepted.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Publishes `solution` if it is better than the current best.
    pub(crate) fn publish(&self, solution: Solution) -> bool {
        let mut guard = self.shared.best.lock();
        let current = guard.as_ref().map_or(f64::INFINITY, |s| s.value());
        if solution.value() >= current {
            return false;
        }
        self.shared
            .best_value
            .store(solution.value().to_bits(), Ordering::Release);
        *guard = Some(solution);
        true
    }

    /// Replaces the published solution unconditionally.
    pub(crate) fn install(&self, solution: Solution) {
        let mut guard = self.shared.best.lock();
        self.shared
            .best_value
            .store(solution.value().to_bits(), Ordering::Release);
        *guard = Some(solution);
    }
}

impl std::fmt::Display for IncumbentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IncumbentHandle(phase: {}, best: {}, iterations: {})",
            self.phase(),
            self.peek(),
            self.iterations()
        )
    }
}
