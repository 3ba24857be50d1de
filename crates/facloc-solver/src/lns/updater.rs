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
    lns::{neighborhood::Neighborhood, subproblem::Subproblem},
    model::instance::InstanceModel,
    optimizer::{OptimizerOutcome, OptimizerStatus},
    state::{patch::AttendancePatch, solver_state::SolverState},
};
use facloc_core::prelude::{Cost, is_strict_improvement};
use facloc_model::prelude::within_capacity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    NotImproving,
    Infeasible,
    NotSolved,
    InvalidProposal,
    Stale,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RejectReason::NotImproving => "not improving",
            RejectReason::Infeasible => "infeasible",
            RejectReason::NotSolved => "not solved",
            RejectReason::InvalidProposal => "invalid proposal",
            RejectReason::Stale => "stale",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateOutcome {
    Accepted { old_value: Cost, new_value: Cost },
    Rejected(RejectReason),
}

impl UpdateOutcome {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, UpdateOutcome::Accepted { .. })
    }
}

impl std::fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateOutcome::Accepted {
                old_value,
                new_value,
            } => write!(f, "Accepted({} -> {})", old_value, new_value),
            UpdateOutcome::Rejected(reason) => write!(f, "Rejected({})", reason),
        }
    }
}

/// Merges optimizer results into the live state when they strictly improve
/// the neighborhood.
///
/// The proposal's value is recomputed from the decoded attendance rather than
/// taken from the optimizer, and the neighborhood is checked against the live
/// state right before the merge. Any rejection leaves the state untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolutionUpdater {
    min_improvement: Cost,
}

impl Default for SolutionUpdater {
    fn default() -> Self {
        Self {
            min_improvement: 1e-6,
        }
    }
}

impl SolutionUpdater {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_min_improvement(mut self, min_improvement: Cost) -> Self {
        self.min_improvement = min_improvement.max(0.0);
        self
    }

    #[inline]
    pub fn min_improvement(&self) -> Cost {
        self.min_improvement
    }

    /// Cost of the neighborhood after `patch`, or `None` if the patch sends a
    /// customer outside the selected facilities or overloads one of them.
    ///
    /// Every customer attending a selected facility is part of the patch, so
    /// the new loads follow from the patch alone.
    pub fn proposal_value(
        model: &InstanceModel<'_>,
        sub: &Subproblem,
        patch: &AttendancePatch,
    ) -> Option<Cost> {
        let facilities = sub.facilities();
        let mut loads = vec![0.0; facilities.len()];
        let mut assignment: Cost = 0.0;
        for (c, f) in patch.iter() {
            let i = facilities.iter().position(|&s| s == f)?;
            loads[i] += model.demand(c);
            assignment += model.distance(f, c);
        }

        let mut setup: Cost = 0.0;
        for (&f, &load) in facilities.iter().zip(&loads) {
            if !within_capacity(load, model.capacity(f)) {
                return None;
            }
            if load > 0.0 {
                setup += model.setup_cost(f);
            }
        }
        Some(setup + assignment)
    }

    /// `true` if the live state no longer matches the neighborhood: a
    /// selected facility gained or lost attendees, or its value moved.
    pub fn is_stale(model: &InstanceModel<'_>, state: &SolverState, nb: &Neighborhood) -> bool {
        let attending: usize = nb.facilities().iter().map(|&f| state.attendees(f)).sum();
        if attending != nb.customers().len() {
            return true;
        }
        let inside = nb
            .customers()
            .iter()
            .all(|&c| nb.facilities().contains(&state.facility_of(c)));
        !inside || nb.current_value(model, state) != nb.old_value()
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(pivot = %nb.pivot(), status = %outcome.status())
    )]
    pub fn apply(
        &self,
        model: &InstanceModel<'_>,
        state: &mut SolverState,
        nb: &Neighborhood,
        sub: &Subproblem,
        outcome: &OptimizerOutcome,
    ) -> UpdateOutcome {
        let assignment = match outcome.status() {
            OptimizerStatus::Infeasible => {
                return UpdateOutcome::Rejected(RejectReason::Infeasible);
            }
            OptimizerStatus::NotSolved => {
                return UpdateOutcome::Rejected(RejectReason::NotSolved);
            }
            OptimizerStatus::Optimal | OptimizerStatus::Feasible => outcome.assignment(),
        };
        let Some(assignment) = assignment else {
            tracing::debug!("Optimizer reported a solution without an assignment");
            return UpdateOutcome::Rejected(RejectReason::InvalidProposal);
        };

        let patch = match sub.decode(assignment) {
            Ok(patch) => patch,
            Err(err) => {
                tracing::debug!(error = %err, "Discarding undecodable assignment");
                return UpdateOutcome::Rejected(RejectReason::InvalidProposal);
            }
        };
        let Some(new_value) = Self::proposal_value(model, sub, &patch) else {
            tracing::debug!("Discarding proposal that violates capacity");
            return UpdateOutcome::Rejected(RejectReason::InvalidProposal);
        };

        if Self::is_stale(model, state, nb) {
            return UpdateOutcome::Rejected(RejectReason::Stale);
        }
        let old_value = nb.old_value();
        if !is_strict_improvement(old_value, new_value, self.min_improvement) {
            return UpdateOutcome::Rejected(RejectReason::NotImproving);
        }

        state.apply_patch(model, &patch, old_value, new_value);
        tracing::debug!(old_value, new_value, moved = patch.len(), "Merged neighborhood");
        UpdateOutcome::Accepted {
            old_value,
            new_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        lns::neighborhood::NeighborhoodSelector,
        optimizer::{EnumerationOptimizer, Optimizer},
    };
    use facloc_core::prelude::Location;
    use facloc_model::prelude::{
        CustomerIndex, FacilityIndex, Problem, ProblemBuilder, SolutionValidator,
    };
    use std::time::Duration;

    fn fi(i: usize) -> FacilityIndex {
        FacilityIndex::new(i)
    }

    fn ci(j: usize) -> CustomerIndex {
        CustomerIndex::new(j)
    }

    fn problem() -> Problem {
        let mut b = ProblemBuilder::new();
        b.add_facility(10.0, 2.0, Location::new(0.0, 0.0))
            .add_facility(1.0, 2.0, Location::new(2.0, 0.0))
            .add_facility(3.0, 5.0, Location::new(50.0, 0.0))
            .add_customer(1.0, Location::new(0.0, 1.0))
            .add_customer(1.0, Location::new(2.0, 1.0))
            .add_customer(1.0, Location::new(50.0, 1.0));
        b.build().unwrap()
    }

    /// Assignment serving the `j`-th affected customer from the `i`-th
    /// selected facility for every `(j, i)` pair.
    fn assignment(sub: &Subproblem, serve: &[(usize, usize)]) -> Vec<bool> {
        let mut asg = vec![false; sub.program().variables_len()];
        for &(j, i) in serve {
            asg[sub.attend_var(i, j).get()] = true;
            asg[sub.open_var(i).get()] = true;
        }
        asg
    }

    #[test]
    fn test_accepts_strict_improvement() {
        let p = problem();
        let m = InstanceModel::from_problem(&p).unwrap();
        let mut s = SolverState::from_attendance(&m, vec![fi(0), fi(1), fi(2)]).unwrap();
        let before = s.value();

        let nb = NeighborhoodSelector::new(2).around(&m, &s, fi(0));
        let sub = Subproblem::formulate(&m, &nb);
        let out = EnumerationOptimizer::new().solve(sub.program(), Duration::from_secs(5));

        let res = SolutionUpdater::new().apply(&m, &mut s, &nb, &sub, &out);
        let UpdateOutcome::Accepted {
            old_value,
            new_value,
        } = res
        else {
            panic!("expected acceptance, got {res}");
        };
        assert!(new_value < old_value);
        assert!((s.value() - (before - (old_value - new_value))).abs() < 1e-12);
        assert!(!s.is_open(fi(0)));
        assert_eq!(s.facility_of(ci(0)), fi(1));
        let recomputed = SolutionValidator::cost_of(&p, s.attendance()).unwrap();
        assert!((recomputed - s.value()).abs() < 1e-9);
    }

    #[test]
    fn test_equal_cost_is_not_improving() {
        let p = problem();
        let m = InstanceModel::from_problem(&p).unwrap();
        let mut s = SolverState::from_attendance(&m, vec![fi(0), fi(1), fi(2)]).unwrap();
        let snapshot = s.clone();

        let nb = NeighborhoodSelector::new(2).around(&m, &s, fi(0));
        let sub = Subproblem::formulate(&m, &nb);
        let same = assignment(&sub, &[(0, 0), (1, 1)]);
        // The reported objective is ignored; only the decoded attendance counts.
        let out = OptimizerOutcome::optimal(-100.0, same);

        assert_eq!(
            SolutionUpdater::new().apply(&m, &mut s, &nb, &sub, &out),
            UpdateOutcome::Rejected(RejectReason::NotImproving)
        );
        assert_eq!(s, snapshot);
    }

    #[test]
    fn test_non_success_statuses_leave_state_untouched() {
        let p = problem();
        let m = InstanceModel::from_problem(&p).unwrap();
        let mut s = SolverState::from_attendance(&m, vec![fi(0), fi(1), fi(2)]).unwrap();
        let snapshot = s.clone();
        let nb = NeighborhoodSelector::new(2).around(&m, &s, fi(0));
        let sub = Subproblem::formulate(&m, &nb);
        let updater = SolutionUpdater::new();

        assert_eq!(
            updater.apply(&m, &mut s, &nb, &sub, &OptimizerOutcome::infeasible()),
            UpdateOutcome::Rejected(RejectReason::Infeasible)
        );
        assert_eq!(
            updater.apply(&m, &mut s, &nb, &sub, &OptimizerOutcome::not_solved()),
            UpdateOutcome::Rejected(RejectReason::NotSolved)
        );
        assert_eq!(
            updater.apply(&m, &mut s, &nb, &sub, &OptimizerOutcome::feasible(0.0, vec![true])),
            UpdateOutcome::Rejected(RejectReason::InvalidProposal)
        );
        assert_eq!(s, snapshot);
    }

    #[test]
    fn test_overloaded_proposal_is_invalid() {
        let p = problem();
        let m = InstanceModel::from_problem(&p).unwrap();
        let mut s = SolverState::from_attendance(&m, vec![fi(0), fi(1), fi(2)]).unwrap();
        let nb = NeighborhoodSelector::new(3).around(&m, &s, fi(0));
        let sub = Subproblem::formulate(&m, &nb);
        assert_eq!(sub.facilities(), &[fi(0), fi(1), fi(2)]);

        // All three customers on facility 1 (capacity 2).
        let overloaded = assignment(&sub, &[(0, 1), (1, 1), (2, 1)]);
        assert_eq!(
            SolutionUpdater::new().apply(
                &m,
                &mut s,
                &nb,
                &sub,
                &OptimizerOutcome::optimal(0.0, overloaded)
            ),
            UpdateOutcome::Rejected(RejectReason::InvalidProposal)
        );
    }

    #[test]
    fn test_stale_neighborhood_is_rejected() {
        let p = problem();
        let m = InstanceModel::from_problem(&p).unwrap();
        let mut s = SolverState::from_attendance(&m, vec![fi(0), fi(1), fi(2)]).unwrap();
        let nb = NeighborhoodSelector::new(1).around(&m, &s, fi(0));
        let sub = Subproblem::formulate(&m, &nb);

        // Another merge moves customer 1 onto facility 0 in the meantime.
        let old = s.value();
        let moved: AttendancePatch = [(ci(1), fi(0))].into_iter().collect();
        let mut scratch = s.clone();
        scratch.apply_patch(&m, &moved, 0.0, 0.0);
        let new = scratch.recompute_value(&m);
        s.apply_patch(&m, &moved, old, new);

        let keep = assignment(&sub, &[(0, 0)]);
        assert!(SolutionUpdater::is_stale(&m, &s, &nb));
        let out = OptimizerOutcome::optimal(0.0, keep);
        assert_eq!(
            SolutionUpdater::new().apply(&m, &mut s, &nb, &sub, &out),
            UpdateOutcome::Rejected(RejectReason::Stale)
        );
    }

    #[test]
    fn test_min_improvement_threshold() {
        let p = problem();
        let m = InstanceModel::from_problem(&p).unwrap();
        let mut s = SolverState::from_attendance(&m, vec![fi(0), fi(1), fi(2)]).unwrap();
        let nb = NeighborhoodSelector::new(2).around(&m, &s, fi(0));
        let sub = Subproblem::formulate(&m, &nb);
        let better = assignment(&sub, &[(0, 1), (1, 1)]);
        let patch = sub.decode(&better).unwrap();
        let gain = nb.old_value() - SolutionUpdater::proposal_value(&m, &sub, &patch).unwrap();

        let strict = SolutionUpdater::new().with_min_improvement(gain + 1.0);
        assert_eq!(
            strict.apply(&m, &mut s, &nb, &sub, &OptimizerOutcome::optimal(0.0, better.clone())),
            UpdateOutcome::Rejected(RejectReason::NotImproving)
        );
        assert!(
            SolutionUpdater::new()
                .apply(&m, &mut s, &nb, &sub, &OptimizerOutcome::optimal(0.0, better))
                .is_accepted()
        );
    }
}
