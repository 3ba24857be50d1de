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

use crate::optimizer::{
    Optimizer, OptimizerOutcome,
    program::{BinaryProgram, Comparison, Sense},
};
use std::time::{Duration, Instant};

const FEASIBILITY_TOLERANCE: f64 = 1e-9;
const NODES_PER_CLOCK_CHECK: u64 = 1024;

/// Depth-first branch and bound over all `2^n` assignments.
///
/// Rows are pruned with their minimum and maximum reachable activity and
/// branches with a lower bound on the objective. Programs with more than
/// `max_variables` variables are refused with `NotSolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumerationOptimizer {
    max_variables: usize,
}

impl Default for EnumerationOptimizer {
    fn default() -> Self {
        Self { max_variables: 40 }
    }
}

impl EnumerationOptimizer {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_max_variables(mut self, max_variables: usize) -> Self {
        self.max_variables = max_variables;
        self
    }

    #[inline]
    pub fn max_variables(&self) -> usize {
        self.max_variables
    }
}

impl Optimizer for EnumerationOptimizer {
    fn name(&self) -> &str {
        "EnumerationOptimizer"
    }

    fn solve(&mut self, program: &BinaryProgram, time_limit: Duration) -> OptimizerOutcome {
        if program.variables_len() > self.max_variables {
            tracing::debug!(
                variables = program.variables_len(),
                cap = self.max_variables,
                "Program too large for enumeration"
            );
            return OptimizerOutcome::not_solved();
        }

        let mut search = BranchAndBound::new(program, Instant::now().checked_add(time_limit));
        if !search.root_feasible() {
            return OptimizerOutcome::infeasible();
        }
        search.dfs(0, 0.0);

        match (search.best, search.timed_out) {
            (Some((_, asg)), false) => OptimizerOutcome::optimal(program.evaluate(&asg), asg),
            (Some((_, asg)), true) => OptimizerOutcome::feasible(program.evaluate(&asg), asg),
            (None, false) => OptimizerOutcome::infeasible(),
            (None, true) => OptimizerOutcome::not_solved(),
        }
    }
}

struct BranchAndBound<'p> {
    program: &'p BinaryProgram,
    // Objective in minimisation form.
    cost: Vec<f64>,
    // Sum of negative costs of variables i..n.
    neg_suffix: Vec<f64>,
    columns: Vec<Vec<(usize, f64)>>,
    activity: Vec<f64>,
    rem_min: Vec<f64>,
    rem_max: Vec<f64>,
    assignment: Vec<bool>,
    best: Option<(f64, Vec<bool>)>,
    nodes: u64,
    deadline: Option<Instant>,
    timed_out: bool,
}

impl<'p> BranchAndBound<'p> {
    fn new(program: &'p BinaryProgram, deadline: Option<Instant>) -> Self {
        let n = program.variables_len();
        let sign = match program.sense() {
            Sense::Minimize => 1.0,
            Sense::Maximize => -1.0,
        };
        let mut cost = vec![0.0; n];
        for &(v, c) in program.objective() {
            cost[v.get()] += sign * c;
        }
        let mut neg_suffix = vec![0.0; n + 1];
        for i in (0..n).rev() {
            neg_suffix[i] = neg_suffix[i + 1] + cost[i].min(0.0);
        }

        let rows = program.constraints().len();
        let mut columns = vec![Vec::new(); n];
        let mut rem_min = vec![0.0; rows];
        let mut rem_max = vec![0.0; rows];
        for (r, row) in program.constraints().iter().enumerate() {
            for &(v, c) in row.terms() {
                columns[v.get()].push((r, c));
                if c < 0.0 {
                    rem_min[r] += c;
                } else {
                    rem_max[r] += c;
                }
            }
        }

        Self {
            program,
            cost,
            neg_suffix,
            columns,
            activity: vec![0.0; rows],
            rem_min,
            rem_max,
            assignment: vec![false; n],
            best: None,
            nodes: 0,
            deadline,
            timed_out: false,
        }
    }

    #[inline]
    fn row_reachable(&self, r: usize) -> bool {
        let row = &self.program.constraints()[r];
        let lo = self.activity[r] + self.rem_min[r];
        let hi = self.activity[r] + self.rem_max[r];
        match row.comparison() {
            Comparison::Le => lo <= row.rhs() + FEASIBILITY_TOLERANCE,
            Comparison::Ge => hi >= row.rhs() - FEASIBILITY_TOLERANCE,
            Comparison::Eq => {
                lo <= row.rhs() + FEASIBILITY_TOLERANCE && hi >= row.rhs() - FEASIBILITY_TOLERANCE
            }
        }
    }

    fn root_feasible(&self) -> bool {
        (0..self.activity.len()).all(|r| self.row_reachable(r))
    }

    fn out_of_time(&mut self) -> bool {
        if self.nodes % NODES_PER_CLOCK_CHECK == 0
            && self.deadline.is_some_and(|d| Instant::now() >= d)
        {
            self.timed_out = true;
        }
        self.nodes += 1;
        self.timed_out
    }

    fn dfs(&mut self, i: usize, current: f64) {
        if self.timed_out || self.out_of_time() {
            return;
        }
        let bound = current + self.neg_suffix[i];
        if self
            .best
            .as_ref()
            .is_some_and(|(best, _)| bound >= *best - FEASIBILITY_TOLERANCE)
        {
            return;
        }
        if i == self.assignment.len() {
            debug_assert!(self.program.is_feasible(&self.assignment, 1e-6));
            self.best = Some((current, self.assignment.clone()));
            return;
        }

        let order = if self.cost[i] < 0.0 {
            [true, false]
        } else {
            [false, true]
        };
        for value in order {
            self.fix(i, value);
            let ok = self.columns[i].iter().all(|&(r, _)| self.row_reachable(r));
            if ok {
                let step = if value { self.cost[i] } else { 0.0 };
                self.dfs(i + 1, current + step);
            }
            self.unfix(i, value);
            if self.timed_out {
                return;
            }
        }
    }

    fn fix(&mut self, i: usize, value: bool) {
        for &(r, c) in &self.columns[i] {
            if c < 0.0 {
                self.rem_min[r] -= c;
            } else {
                self.rem_max[r] -= c;
            }
            if value {
                self.activity[r] += c;
            }
        }
        self.assignment[i] = value;
    }

    fn unfix(&mut self, i: usize, value: bool) {
        for &(r, c) in &self.columns[i] {
            if c < 0.0 {
                self.rem_min[r] += c;
            } else {
                self.rem_max[r] += c;
            }
            if value {
                self.activity[r] -= c;
            }
        }
        self.assignment[i] = false;
    }
}
