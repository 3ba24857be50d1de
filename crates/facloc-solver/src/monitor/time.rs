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

use crate::monitor::search_monitor::SearchMonitor;
use facloc_core::prelude::Cost;
use std::time::{Duration, Instant};

/// Wall-clock budget. The clock restarts when the search starts.
#[derive(Debug, Clone)]
pub struct TimeLimitMonitor {
    start_time: Instant,
    time_limit: Duration,
}

impl TimeLimitMonitor {
    #[inline]
    pub fn new(time_limit: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            time_limit,
        }
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    #[inline]
    pub fn remaining(&self) -> Duration {
        self.time_limit.saturating_sub(self.elapsed())
    }
}

impl SearchMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    #[inline]
    fn on_search_start(&mut self, _initial_value: Cost) {
        self.start_time = Instant::now();
    }

    #[inline]
    fn should_terminate(&self) -> bool {
        self.elapsed() >= self.time_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn short_sleep_ms(ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }

    #[test]
    fn test_zero_duration_terminates_immediately() {
        let mut m = TimeLimitMonitor::new(Duration::ZERO);
        m.on_search_start(0.0);
        assert!(m.should_terminate());
        assert_eq!(m.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_terminates_after_limit() {
        let mut m = TimeLimitMonitor::new(Duration::from_millis(10));
        m.on_search_start(0.0);
        short_sleep_ms(25);
        assert!(m.should_terminate());
    }

    #[test]
    fn test_on_search_start_resets_clock() {
        let mut m = TimeLimitMonitor::new(Duration::from_millis(200));
        short_sleep_ms(250);
        assert!(m.should_terminate());

        m.on_search_start(0.0);
        assert!(!m.should_terminate());
        assert!(m.remaining() > Duration::ZERO);
        assert_eq!(m.time_limit(), Duration::from_millis(200));
    }
}
