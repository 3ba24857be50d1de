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

use crate::optimizer::{Optimizer, OptimizerOutcome, program::BinaryProgram};
use std::{collections::VecDeque, time::Duration};

type Response = Box<dyn FnMut(&BinaryProgram, Duration) -> OptimizerOutcome + Send>;

/// Deterministic fake that answers calls from a queue of scripted responses.
///
/// Once the queue is empty every call returns `NotSolved`. Each call is
/// recorded with its variable count and time limit.
#[derive(Default)]
pub struct ScriptedOptimizer {
    responses: VecDeque<Response>,
    calls: Vec<(usize, Duration)>,
}

impl std::fmt::Debug for ScriptedOptimizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedOptimizer")
            .field("pending", &self.responses.len())
            .field("calls", &self.calls.len())
            .finish()
    }
}

impl ScriptedOptimizer {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a fixed outcome.
    #[inline]
    pub fn push(&mut self, outcome: OptimizerOutcome) -> &mut Self {
        self.responses.push_back(Box::new(move |_, _| outcome.clone()));
        self
    }

    /// Queues a response computed from the submitted program.
    #[inline]
    pub fn push_with<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&BinaryProgram, Duration) -> OptimizerOutcome + Send + 'static,
    {
        self.responses.push_back(Box::new(f));
        self
    }

    #[inline]
    pub fn pending(&self) -> usize {
        self.responses.len()
    }

    #[inline]
    pub fn calls(&self) -> &[(usize, Duration)] {
        &self.calls
    }
}

impl Optimizer for ScriptedOptimizer {
    fn name(&self) -> &str {
        "ScriptedOptimizer"
    }

    fn solve(&mut self, program: &BinaryProgram, time_limit: Duration) -> OptimizerOutcome {
        self.calls.push((program.variables_len(), time_limit));
        match self.responses.pop_front() {
            Some(mut respond) => respond(program, time_limit),
            None => OptimizerOutcome::not_solved(),
        }
    }
}
