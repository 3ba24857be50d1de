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

pub mod err;

use crate::{
    common::{CustomerIndex, FacilityIndex},
    problem::prob::Problem,
    solution::sol::Solution,
    validation::err::{
        AttendanceLengthError, CapacityExceededError, SolutionValidationError,
        UnknownFacilityError, ValueMismatchError,
    },
};
use facloc_core::prelude::{Cost, costs_match};

/// Relative slack granted when comparing summed demands against a capacity.
pub const CAPACITY_TOLERANCE: f64 = 1e-9;

/// Returns `true` if `load` fits into `capacity` up to [`CAPACITY_TOLERANCE`].
#[inline]
pub fn within_capacity(load: f64, capacity: f64) -> bool {
    load - capacity <= CAPACITY_TOLERANCE * capacity.abs().max(1.0)
}

#[derive(Debug, Clone)]
pub struct SolutionValidator;

impl SolutionValidator {
    /// Checks that `attendance` names exactly one known facility per customer.
    pub fn validate_attendance(
        problem: &Problem,
        attendance: &[FacilityIndex],
    ) -> Result<(), SolutionValidationError> {
        if attendance.len() != problem.customer_count() {
            return Err(
                AttendanceLengthError::new(problem.customer_count(), attendance.len()).into(),
            );
        }
        for (j, &f) in attendance.iter().enumerate() {
            if f.get() >= problem.facility_count() {
                return Err(UnknownFacilityError::new(CustomerIndex::new(j), f).into());
            }
        }
        Ok(())
    }

    /// Summed demand per facility. `attendance` must already be validated.
    pub fn facility_loads(problem: &Problem, attendance: &[FacilityIndex]) -> Vec<f64> {
        let mut loads = vec![0.0; problem.facility_count()];
        for (c, &f) in problem.customers().iter().zip(attendance) {
            loads[f.get()] += c.demand();
        }
        loads
    }

    pub fn validate_capacities(
        problem: &Problem,
        attendance: &[FacilityIndex],
    ) -> Result<(), SolutionValidationError> {
        Self::validate_attendance(problem, attendance)?;
        let loads = Self::facility_loads(problem, attendance);
        for (f, load) in problem.facilities().iter().zip(loads) {
            if !within_capacity(load, f.capacity()) {
                return Err(CapacityExceededError::new(f.index(), load, f.capacity()).into());
            }
        }
        Ok(())
    }

    /// Recomputes the total cost from scratch: every facility with at least
    /// one attendee contributes its setup cost once, every customer the
    /// distance to its facility.
    pub fn cost_of(
        problem: &Problem,
        attendance: &[FacilityIndex],
    ) -> Result<Cost, SolutionValidationError> {
        Self::validate_attendance(problem, attendance)?;

        let mut opened = vec![false; problem.facility_count()];
        let mut assignment: Cost = 0.0;
        for (j, &f) in attendance.iter().enumerate() {
            opened[f.get()] = true;
            assignment += problem.distance(f, CustomerIndex::new(j));
        }
        let setup: Cost = problem
            .facilities()
            .iter()
            .zip(&opened)
            .filter(|(_, open)| **open)
            .map(|(f, _)| f.setup_cost())
            .sum();

        Ok(setup + assignment)
    }

    /// Full check of a solution against its instance. Returns the recomputed
    /// cost on success.
    pub fn validate(
        problem: &Problem,
        solution: &Solution,
        tolerance: f64,
    ) -> Result<Cost, SolutionValidationError> {
        Self::validate_capacities(problem, solution.attendance())?;
        let cost = Self::cost_of(problem, solution.attendance())?;
        if !costs_match(cost, solution.value(), tolerance) {
            return Err(ValueMismatchError::new(solution.value(), cost).into());
        }
        Ok(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        problem::{builder::ProblemBuilder, loader::ProblemLoader},
        solution::loader::SolutionLoader,
    };
    use facloc_core::prelude::Location;

    fn fi(i: usize) -> FacilityIndex {
        FacilityIndex::new(i)
    }

    fn problem() -> Problem {
        let mut b = ProblemBuilder::new();
        b.add_facility(10.0, 3.0, Location::new(0.0, 0.0))
            .add_facility(20.0, 2.0, Location::new(10.0, 0.0))
            .add_customer(1.0, Location::new(0.0, 1.0))
            .add_customer(2.0, Location::new(10.0, 2.0))
            .add_customer(2.0, Location::new(3.0, 4.0));
        b.build().unwrap()
    }

    #[test]
    fn test_cost_counts_setup_once() {
        let p = problem();
        // Facility 0 serves customers 0 and 2, facility 1 serves customer 1.
        let cost = SolutionValidator::cost_of(&p, &[fi(0), fi(1), fi(0)]).unwrap();
        assert!((cost - (10.0 + 20.0 + 1.0 + 2.0 + 5.0)).abs() < 1e-12);

        // Facility 1 unused: no setup cost.
        let cost = SolutionValidator::cost_of(&p, &[fi(0), fi(0), fi(0)]).unwrap();
        let expected = 10.0 + 1.0 + (100.0f64 + 4.0).sqrt() + 5.0;
        assert!((cost - expected).abs() < 1e-12);
    }

    #[test]
    fn test_capacity_violation_is_reported() {
        let p = problem();
        let err = SolutionValidator::validate_capacities(&p, &[fi(0), fi(0), fi(0)]).unwrap_err();
        match err {
            SolutionValidationError::CapacityExceeded(e) => {
                assert_eq!(e.facility(), fi(0));
                assert_eq!(e.load(), 5.0);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(SolutionValidator::validate_capacities(&p, &[fi(0), fi(1), fi(0)]).is_ok());
    }

    #[test]
    fn test_attendance_shape() {
        let p = problem();
        assert!(matches!(
            SolutionValidator::validate_attendance(&p, &[fi(0)]),
            Err(SolutionValidationError::AttendanceLength(_))
        ));
        match SolutionValidator::validate_attendance(&p, &[fi(0), fi(2), fi(0)]) {
            Err(SolutionValidationError::UnknownFacility(e)) => {
                assert_eq!(e.customer(), CustomerIndex::new(1));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_validate_checks_reported_value() {
        let p = problem();
        let good = Solution::new(vec![fi(0), fi(1), fi(0)], 38.0, false);
        assert!((SolutionValidator::validate(&p, &good, 1e-9).unwrap() - 38.0).abs() < 1e-9);

        let bad = Solution::new(vec![fi(0), fi(1), fi(0)], 37.0, false);
        assert!(matches!(
            SolutionValidator::validate(&p, &bad, 1e-9),
            Err(SolutionValidationError::ValueMismatch(_))
        ));
    }

    #[test]
    fn test_written_answer_reproduces_value() {
        let p = ProblemLoader::new()
            .from_str("2 3\n0 10 0 0\n100 10 1000 1000\n1 1 0\n1 0 2\n1 1.5 1.5\n")
            .unwrap();
        let attendance = vec![fi(0), fi(0), fi(0)];
        let value = SolutionValidator::cost_of(&p, &attendance).unwrap();
        let text = Solution::new(attendance, value, false).to_string();

        let parsed = SolutionLoader::new().from_str(&text).unwrap();
        let recomputed = SolutionValidator::validate(&p, &parsed, 1e-12).unwrap();
        assert!((recomputed - parsed.value()).abs() < 1e-9);
    }

    #[test]
    fn test_within_capacity_tolerance() {
        assert!(within_capacity(10.0, 10.0));
        assert!(within_capacity(10.0 + 1e-12, 10.0));
        assert!(!within_capacity(10.1, 10.0));
        assert!(!within_capacity(1e-6, 0.0));
    }
}
