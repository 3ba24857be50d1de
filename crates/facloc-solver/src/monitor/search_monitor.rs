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

use crate::lns::updater::UpdateOutcome;
use facloc_core::prelude::Cost;

/// Hooks into the LNS loop.
///
/// Events are delivered by the single thread that owns the search; the event
/// methods default to no-ops. `should_terminate` is polled before every
/// iteration and must be cheap.
pub trait SearchMonitor: Send {
    /// Human-readable name for diagnostics and logs.
    fn name(&self) -> &str;

    /// Called once after the opening solution is built.
    fn on_search_start(&mut self, _initial_value: Cost) {}

    /// Called once when the loop reaches its terminal phase.
    fn on_search_end(&mut self, _final_value: Cost) {}

    fn on_iteration_start(&mut self, _iteration: u64) {}

    /// `outcome` is `None` when the neighborhood was empty and skipped.
    fn on_iteration_end(&mut self, _iteration: u64, _outcome: Option<&UpdateOutcome>) {}

    /// Called after a merge lowered the global value.
    fn on_new_incumbent(&mut self, _iteration: u64, _old_value: Cost, _new_value: Cost) {}

    fn should_terminate(&self) -> bool;
}

impl<'a> std::fmt::Display for dyn SearchMonitor + 'a {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<'a> std::fmt::Debug for dyn SearchMonitor + 'a {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

/// Fans every event out to its children; terminates as soon as any child
/// asks to.
#[derive(Default)]
pub struct CompositeSearchMonitor {
    monitors: Vec<Box<dyn SearchMonitor>>,
}

impl std::fmt::Debug for CompositeSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompositeSearchMonitor[")?;
        for (i, monitor) in self.monitors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", monitor.name())?;
        }
        write!(f, "]")
    }
}

impl CompositeSearchMonitor {
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Chain-builder: add a monitor and return self.
    #[inline]
    pub fn with<M: SearchMonitor + 'static>(mut self, monitor: M) -> Self {
        self.monitors.push(Box::new(monitor));
        self
    }

    #[inline]
    pub fn push<M: SearchMonitor + 'static>(&mut self, monitor: M) {
        self.monitors.push(Box::new(monitor));
    }

    #[inline]
    pub fn push_boxed(&mut self, monitor: Box<dyn SearchMonitor>) {
        self.monitors.push(monitor);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl SearchMonitor for CompositeSearchMonitor {
    fn name(&self) -> &str {
        "CompositeSearchMonitor"
    }

    fn on_search_start(&mut self, initial_value: Cost) {
        for m in &mut self.monitors {
            m.on_search_start(initial_value);
        }
    }

    fn on_search_end(&mut self, final_value: Cost) {
        for m in &mut self.monitors {
            m.on_search_end(final_value);
        }
    }

    fn on_iteration_start(&mut self, iteration: u64) {
        for m in &mut self.monitors {
            m.on_iteration_start(iteration);
        }
    }

    fn on_iteration_end(&mut self, iteration: u64, outcome: Option<&UpdateOutcome>) {
        for m in &mut self.monitors {
            m.on_iteration_end(iteration, outcome);
        }
    }

    fn on_new_incumbent(&mut self, iteration: u64, old_value: Cost, new_value: Cost) {
        for m in &mut self.monitors {
            m.on_new_incumbent(iteration, old_value, new_value);
        }
    }

    #[inline]
    fn should_terminate(&self) -> bool {
        self.monitors.iter().any(|m| m.should_terminate())
    }
}
