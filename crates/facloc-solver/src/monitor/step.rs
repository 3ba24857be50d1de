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

/// Stops after a fixed number of completed iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationLimitMonitor {
    limit: u64,
    completed: u64,
}

impl IterationLimitMonitor {
    #[inline]
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            completed: 0,
        }
    }

    #[inline]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    #[inline]
    pub fn completed(&self) -> u64 {
        self.completed
    }
}

impl SearchMonitor for IterationLimitMonitor {
    fn name(&self) -> &str {
        "IterationLimitMonitor"
    }

    #[inline]
    fn on_search_start(&mut self, _initial_value: f64) {
        self.completed = 0;
    }

    #[inline]
    fn on_iteration_end(&mut self, _iteration: u64, _outcome: Option<&UpdateOutcome>) {
        self.completed += 1;
    }

    #[inline]
    fn should_terminate(&self) -> bool {
        self.completed >= self.limit
    }
}
