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
use good_lp::solvers::highs::highs;
use good_lp::*;
use std::time::{Duration, Instant};

/// Smallest limit handed to HiGHS; it refuses a zero time limit.
const MIN_TIME_LIMIT_SECS: f64 = 1e-3;

/// Solves programs with HiGHS through `good_lp`.
///
/// HiGHS does not report whether it stopped on the time limit, so a solution
/// returned before the limit elapsed is taken as optimal and one returned at
/// the limit as merely feasible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighsOptimizer {
    feasibility_tolerance: f64,
}

impl Default for HighsOptimizer {
    fn default() -> Self {
        Self {
            feasibility_tolerance: 1e-6,
        }
    }
}

impl HighsOptimizer {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_feasibility_tolerance(mut self, tolerance: f64) -> Self {
        self.feasibility_tolerance = tolerance;
        self
    }
}

impl Optimizer for HighsOptimizer {
    fn name(&self) -> &str {
        "HighsOptimizer"
    }

    fn solve(&mut self, program: &BinaryProgram, time_limit: Duration) -> OptimizerOutcome {
        let mut vars = variables!();
        let x: Vec<Variable> = program
            .names()
            .iter()
            .map(|n| vars.add(variable().binary().name(n.clone())))
            .collect();

        let objective = program
            .objective()
            .iter()
            .fold(Expression::from(program.objective_constant()), |acc, &(v, c)| {
                acc + c * x[v.get()]
            });

        let limit = time_limit.as_secs_f64().max(MIN_TIME_LIMIT_SECS);
        let mut prob = match program.sense() {
            Sense::Minimize => vars.minimise(objective),
            Sense::Maximize => vars.maximise(objective),
        }
        .using(highs)
        .with_time_limit(limit);

        for row in program.constraints() {
            let lhs = row
                .terms()
                .iter()
                .fold(Expression::from(0.0), |acc, &(v, c)| acc + c * x[v.get()]);
            let constraint = match row.comparison() {
                Comparison::Le => lhs.leq(row.rhs()),
                Comparison::Eq => lhs.eq(row.rhs()),
                Comparison::Ge => lhs.geq(row.rhs()),
            };
            prob.add_constraint(constraint);
        }

        let started = Instant::now();
        let sol = match prob.solve() {
            Ok(sol) => sol,
            Err(ResolutionError::Infeasible) => return OptimizerOutcome::infeasible(),
            Err(err) => {
                tracing::debug!(error = %err, "HiGHS returned no solution");
                return OptimizerOutcome::not_solved();
            }
        };
        let elapsed = started.elapsed();

        let assignment: Vec<bool> = x.iter().map(|&v| sol.value(v) >= 0.5).collect();
        if !program.is_feasible(&assignment, self.feasibility_tolerance) {
            tracing::debug!("HiGHS assignment violates the program after rounding");
            return OptimizerOutcome::not_solved();
        }

        let objective_value = program.evaluate(&assignment);
        if elapsed < time_limit {
            OptimizerOutcome::optimal(objective_value, assignment)
        } else {
            OptimizerOutcome::feasible(objective_value, assignment)
        }
    }
}
