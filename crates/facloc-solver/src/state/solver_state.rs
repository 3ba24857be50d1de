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
    model::instance::InstanceModel,
    state::{err::ValueDriftError, patch::AttendancePatch},
};
use facloc_core::prelude::{Cost, costs_match};
use facloc_model::prelude::{
    CustomerIndex, FacilityIndex, Solution, SolutionValidationError, SolutionValidator,
};

/// The live global solution owned by the search loop.
///
/// Besides the attendance itself the state tracks the summed demand and the
/// number of attendees per facility, so openness and capacity questions are
/// answered without scanning customers. `value` is maintained incrementally
/// and re-synchronised at checkpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverState {
    attendance: Vec<FacilityIndex>, // len = C
    loads: Vec<f64>, // len = F
    attendees: Vec<usize>, // len = F
    value: Cost,
}

impl SolverState {
    /// Builds a state from a complete attendance, checking shape and
    /// capacities and computing the value from scratch.
    pub fn from_attendance(
        model: &InstanceModel<'_>,
        attendance: Vec<FacilityIndex>,
    ) -> Result<Self, SolutionValidationError> {
        SolutionValidator::validate_capacities(model.problem(), &attendance)?;

        let mut loads = vec![0.0; model.facilities_len()];
        let mut attendees = vec![0usize; model.facilities_len()];
        for (j, &f) in attendance.iter().enumerate() {
            loads[f.get()] += model.demand(CustomerIndex::new(j));
            attendees[f.get()] += 1;
        }

        let mut state = Self {
            attendance,
            loads,
            attendees,
            value: 0.0,
        };
        state.value = state.recompute_value(model);
        Ok(state)
    }

    #[inline]
    pub(crate) fn from_parts(
        attendance: Vec<FacilityIndex>,
        loads: Vec<f64>,
        attendees: Vec<usize>,
        value: Cost,
    ) -> Self {
        debug_assert_eq!(loads.len(), attendees.len());
        debug_assert_eq!(attendees.iter().sum::<usize>(), attendance.len());

        Self {
            attendance,
            loads,
            attendees,
            value,
        }
    }

    #[inline]
    pub fn attendance(&self) -> &[FacilityIndex] {
        &self.attendance
    }

    #[inline]
    pub fn facility_of(&self, customer: CustomerIndex) -> FacilityIndex {
        debug_assert!(customer.get() < self.attendance.len());

        self.attendance[customer.get()]
    }

    #[inline]
    pub fn load(&self, facility: FacilityIndex) -> f64 {
        debug_assert!(facility.get() < self.loads.len());

        self.loads[facility.get()]
    }

    #[inline]
    pub fn attendees(&self, facility: FacilityIndex) -> usize {
        debug_assert!(facility.get() < self.attendees.len());

        self.attendees[facility.get()]
    }

    #[inline]
    pub fn is_open(&self, facility: FacilityIndex) -> bool {
        self.attendees(facility) > 0
    }

    #[inline]
    pub fn open_facilities_len(&self) -> usize {
        self.attendees.iter().filter(|&&n| n > 0).count()
    }

    #[inline]
    pub fn value(&self) -> Cost {
        self.value
    }

    /// Total cost from scratch: setup of every open facility once plus every
    /// customer's assignment distance.
    pub fn recompute_value(&self, model: &InstanceModel<'_>) -> Cost {
        let setup: Cost = model
            .iter_facility_indices()
            .filter(|&f| self.is_open(f))
            .map(|f| model.setup_cost(f))
            .sum();
        let assignment: Cost = self
            .attendance
            .iter()
            .enumerate()
            .map(|(j, &f)| model.distance(f, CustomerIndex::new(j)))
            .sum();
        setup + assignment
    }

    /// Compares the running value against a recomputation. Within
    /// `tolerance` the running value is replaced by the recomputed one and
    /// returned; otherwise the state is left untouched.
    pub fn checkpoint(
        &mut self,
        model: &InstanceModel<'_>,
        tolerance: f64,
    ) -> Result<Cost, ValueDriftError> {
        let recomputed = self.recompute_value(model);
        if !costs_match(self.value, recomputed, tolerance) {
            return Err(ValueDriftError::new(self.value, recomputed));
        }
        if self.value != recomputed {
            tracing::debug!(
                incremental = self.value,
                recomputed,
                drift = self.value - recomputed,
                "Checkpoint resynchronised running value"
            );
        }
        self.value = recomputed;
        Ok(recomputed)
    }

    /// Rewrites the attendance of the patched customers and shifts the
    /// running value by `old_value - new_value`.
    ///
    /// The caller guarantees the patch is feasible.
    pub fn apply_patch(
        &mut self,
        model: &InstanceModel<'_>,
        patch: &AttendancePatch,
        old_value: Cost,
        new_value: Cost,
    ) {
        for (c, to) in patch.iter() {
            let from = self.attendance[c.get()];
            if from == to {
                continue;
            }
            let d = model.demand(c);

            self.attendees[from.get()] -= 1;
            self.loads[from.get()] = if self.attendees[from.get()] == 0 {
                0.0
            } else {
                self.loads[from.get()] - d
            };

            self.attendees[to.get()] += 1;
            self.loads[to.get()] += d;
            self.attendance[c.get()] = to;
        }
        self.value -= old_value - new_value;
    }

    #[inline]
    pub fn to_solution(&self, optimal: bool) -> Solution {
        Solution::new(self.attendance.clone(), self.value, optimal)
    }

    #[inline]
    pub fn into_solution(self, optimal: bool) -> Solution {
        Solution::new(self.attendance, self.value, optimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facloc_core::prelude::Location;
    use facloc_model::prelude::{Problem, ProblemBuilder};

    #[inline]
    fn fi(i: usize) -> FacilityIndex {
        FacilityIndex::new(i)
    }

    #[inline]
    fn ci(j: usize) -> CustomerIndex {
        CustomerIndex::new(j)
    }

    fn problem() -> Problem {
        let mut b = ProblemBuilder::new();
        b.add_facility(10.0, 4.0, Location::new(0.0, 0.0))
            .add_facility(5.0, 3.0, Location::new(4.0, 0.0))
            .add_customer(1.0, Location::new(1.0, 0.0))
            .add_customer(2.0, Location::new(3.0, 0.0))
            .add_customer(1.0, Location::new(0.0, 2.0));
        b.build().unwrap()
    }

    #[test]
    fn test_from_attendance_tracks_loads_and_value() {
        let p = problem();
        let m = InstanceModel::from_problem(&p).unwrap();
        let s = SolverState::from_attendance(&m, vec![fi(0), fi(1), fi(0)]).unwrap();

        assert_eq!(s.load(fi(0)), 2.0);
        assert_eq!(s.load(fi(1)), 2.0);
        assert_eq!(s.attendees(fi(0)), 2);
        assert_eq!(s.open_facilities_len(), 2);
        assert!((s.value() - (15.0 + 1.0 + 1.0 + 2.0)).abs() < 1e-12);
        assert_eq!(
            SolutionValidator::cost_of(&p, s.attendance()).unwrap(),
            s.value()
        );
    }

    #[test]
    fn test_from_attendance_rejects_over_capacity() {
        let p = problem();
        let m = InstanceModel::from_problem(&p).unwrap();
        assert!(matches!(
            SolverState::from_attendance(&m, vec![fi(1), fi(1), fi(1)]),
            Err(SolutionValidationError::CapacityExceeded(_))
        ));
        assert!(matches!(
            SolverState::from_attendance(&m, vec![fi(1)]),
            Err(SolutionValidationError::AttendanceLength(_))
        ));
    }

    #[test]
    fn test_apply_patch_moves_customers_and_closes_facilities() {
        let p = problem();
        let m = InstanceModel::from_problem(&p).unwrap();
        let mut s = SolverState::from_attendance(&m, vec![fi(0), fi(1), fi(0)]).unwrap();
        let old = s.value();

        // Move customer 1 to facility 0; facility 1 closes.
        let patch: AttendancePatch = [(ci(0), fi(0)), (ci(1), fi(0)), (ci(2), fi(0))]
            .into_iter()
            .collect();
        let new_value = 10.0 + 1.0 + 3.0 + 2.0;
        s.apply_patch(&m, &patch, old, new_value);

        assert!(!s.is_open(fi(1)));
        assert_eq!(s.load(fi(1)), 0.0);
        assert_eq!(s.load(fi(0)), 4.0);
        assert_eq!(s.facility_of(ci(1)), fi(0));
        assert!((s.value() - new_value).abs() < 1e-12);
        assert!((s.recompute_value(&m) - s.value()).abs() < 1e-12);
    }

    #[test]
    fn test_checkpoint_resyncs_within_tolerance() {
        let p = problem();
        let m = InstanceModel::from_problem(&p).unwrap();
        let mut s = SolverState::from_attendance(&m, vec![fi(0), fi(1), fi(0)]).unwrap();
        let truth = s.value();

        s.value = truth + 1e-12;
        assert_eq!(s.checkpoint(&m, 1e-9).unwrap(), truth);
        assert_eq!(s.value(), truth);
    }

    #[test]
    fn test_checkpoint_reports_drift() {
        let p = problem();
        let m = InstanceModel::from_problem(&p).unwrap();
        let mut s = SolverState::from_attendance(&m, vec![fi(0), fi(1), fi(0)]).unwrap();
        let truth = s.value();

        s.value = truth - 3.0;
        let err = s.checkpoint(&m, 1e-9).unwrap_err();
        assert_eq!(err.recomputed(), truth);
        assert!((err.drift() + 3.0).abs() < 1e-12);
        // Untouched on failure.
        assert_eq!(s.value(), truth - 3.0);
    }

    #[test]
    fn test_solution_export() {
        let p = problem();
        let m = InstanceModel::from_problem(&p).unwrap();
        let s = SolverState::from_attendance(&m, vec![fi(0), fi(1), fi(0)]).unwrap();
        let sol = s.to_solution(true);
        assert_eq!(sol.attendance(), s.attendance());
        assert!(sol.is_optimal());
        assert!(SolutionValidator::validate(&p, &s.into_solution(false), 1e-9).is_ok());
    }
}
