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

use crate::{
    engine::err::ExactError,
    lns::subproblem::Subproblem,
    model::instance::InstanceModel,
    optimizer::{Optimizer, OptimizerStatus},
    state::solver_state::SolverState,
};
use facloc_model::prelude::{FacilityIndex, Solution};
use std::time::{Duration, Instant};

/// Solves the whole instance as a single 0/1 program.
///
/// No opening solution is needed, so this also covers instances where
/// first-fit cannot place every customer. The reported value is recomputed
/// from the decoded attendance and the solution is flagged optimal only if
/// the optimizer proved it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExactSearch {
    time_limit: Duration,
}

impl Default for ExactSearch {
    fn default() -> Self {
        Self::new(Duration::from_secs(30 * 60))
    }
}

impl ExactSearch {
    #[inline]
    pub fn new(time_limit: Duration) -> Self {
        Self { time_limit }
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(facilities = model.facilities_len(), customers = model.customers_len())
    )]
    pub fn run(
        &self,
        model: &InstanceModel<'_>,
        optimizer: &mut dyn Optimizer,
    ) -> Result<Solution, ExactError> {
        let sub = Subproblem::whole(model);
        tracing::info!(
            optimizer = optimizer.name(),
            variables = sub.program().variables_len(),
            rows = sub.program().constraints().len(),
            "Solving whole instance"
        );

        let t0 = Instant::now();
        let outcome = optimizer.solve(sub.program(), self.time_limit);
        let status = outcome.status();
        let assignment = match outcome.assignment() {
            Some(a) if status.has_solution() => a,
            _ => {
                tracing::warn!(%status, elapsed = ?t0.elapsed(), "No whole-instance solution");
                return Err(ExactError::NoSolution(status));
            }
        };

        let patch = sub.decode(assignment)?;
        let mut attendance = vec![FacilityIndex::new(0); model.customers_len()];
        for (c, f) in patch.iter() {
            attendance[c.get()] = f;
        }
        let state = SolverState::from_attendance(model, attendance)?;
        tracing::info!(
            %status,
            value = state.value(),
            open = state.open_facilities_len(),
            elapsed = ?t0.elapsed(),
            "Whole instance solved"
        );

        Ok(state.into_solution(status == OptimizerStatus::Optimal))
    }
}
