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

//! Exact solvers for the 0/1 programs produced by the LNS subproblems.
//!
//! The search loop only talks to the [`Optimizer`] trait, so backends can be
//! swapped freely: HiGHS through `good_lp` for real runs, exhaustive
//! enumeration for tiny programs, and a scripted fake for tests.

pub mod enumerate;
#[cfg(feature = "highs")]
pub mod highs;
pub mod program;
pub mod scripted;

pub use enumerate::EnumerationOptimizer;
#[cfg(feature = "highs")]
pub use highs::HighsOptimizer;
pub use program::{BinaryProgram, Comparison, LinearConstraint, Sense, Var};
pub use scripted::ScriptedOptimizer;

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptimizerStatus {
    Optimal,
    Feasible,
    Infeasible,
    NotSolved,
}

impl OptimizerStatus {
    /// `true` for statuses that come with an assignment.
    #[inline]
    pub fn has_solution(&self) -> bool {
        matches!(self, OptimizerStatus::Optimal | OptimizerStatus::Feasible)
    }
}

impl std::fmt::Display for OptimizerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OptimizerStatus::Optimal => "OPTIMAL",
            OptimizerStatus::Feasible => "FEASIBLE",
            OptimizerStatus::Infeasible => "INFEASIBLE",
            OptimizerStatus::NotSolved => "NOT_SOLVED",
        };
        f.write_str(s)
    }
}

/// Result of one optimizer call. `objective_value` and `assignment` are
/// present for `Optimal` and `Feasible` only.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerOutcome {
    status: OptimizerStatus,
    objective_value: Option<f64>,
    assignment: Option<Vec<bool>>,
}

impl OptimizerOutcome {
    #[inline]
    pub fn optimal(objective_value: f64, assignment: Vec<bool>) -> Self {
        Self {
            status: OptimizerStatus::Optimal,
            objective_value: Some(objective_value),
            assignment: Some(assignment),
        }
    }

    #[inline]
    pub fn feasible(objective_value: f64, assignment: Vec<bool>) -> Self {
        Self {
            status: OptimizerStatus::Feasible,
            objective_value: Some(objective_value),
            assignment: Some(assignment),
        }
    }

    #[inline]
    pub fn infeasible() -> Self {
        Self {
            status: OptimizerStatus::Infeasible,
            objective_value: None,
            assignment: None,
        }
    }

    #[inline]
    pub fn not_solved() -> Self {
        Self {
            status: OptimizerStatus::NotSolved,
            objective_value: None,
            assignment: None,
        }
    }

    #[inline]
    pub fn status(&self) -> OptimizerStatus {
        self.status
    }

    #[inline]
    pub fn objective_value(&self) -> Option<f64> {
        self.objective_value
    }

    #[inline]
    pub fn assignment(&self) -> Option<&[bool]> {
        self.assignment.as_deref()
    }
}

impl std::fmt::Display for OptimizerOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.objective_value {
            Some(v) => write!(f, "OptimizerOutcome({}, objective: {})", self.status, v),
            None => write!(f, "OptimizerOutcome({})", self.status),
        }
    }
}

/// An exact solver for [`BinaryProgram`]s.
///
/// Implementations must return within roughly `time_limit`; the search loop
/// relies on it to honor its own budget.
pub trait Optimizer {
    fn name(&self) -> &str;

    fn solve(&mut self, program: &BinaryProgram, time_limit: Duration) -> OptimizerOutcome;
}

impl std::fmt::Debug for dyn Optimizer + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Optimizer({})", self.name())
    }
}

impl std::fmt::Display for dyn Optimizer + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Optimizer({})", self.name())
    }
}

impl<O: Optimizer + ?Sized> Optimizer for &mut O {
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn solve(&mut self, program: &BinaryProgram, time_limit: Duration) -> OptimizerOutcome {
        (**self).solve(program, time_limit)
    }
}

impl<O: Optimizer + ?Sized> Optimizer for Box<O> {
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn solve(&mut self, program: &BinaryProgram, time_limit: Duration) -> OptimizerOutcome {
        (**self).solve(program, time_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_constructors() {
        let o = OptimizerOutcome::optimal(3.0, vec![true, false]);
        assert_eq!(o.status(), OptimizerStatus::Optimal);
        assert_eq!(o.objective_value(), Some(3.0));
        assert_eq!(o.assignment(), Some(&[true, false][..]));

        let o = OptimizerOutcome::infeasible();
        assert!(!o.status().has_solution());
        assert!(o.assignment().is_none());
        assert_eq!(o.to_string(), "OptimizerOutcome(INFEASIBLE)");
    }

    #[test]
    fn test_boxed_optimizer_delegates() {
        let mut inner = ScriptedOptimizer::new();
        inner.push(OptimizerOutcome::infeasible());
        let mut boxed: Box<dyn Optimizer> = Box::new(inner);
        let p = BinaryProgram::new(Sense::Minimize);
        assert_eq!(boxed.name(), "ScriptedOptimizer");
        assert_eq!(
            boxed.solve(&p, Duration::from_secs(1)).status(),
            OptimizerStatus::Infeasible
        );
        assert_eq!(format!("{:?}", &*boxed), "Optimizer(ScriptedOptimizer)");
    }
}
