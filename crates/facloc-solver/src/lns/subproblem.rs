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
    lns::{err::DecodeError, neighborhood::Neighborhood},
    model::instance::InstanceModel,
    optimizer::program::{BinaryProgram, Comparison, Sense, Var},
    state::patch::AttendancePatch,
};
use facloc_model::prelude::{CustomerIndex, FacilityIndex};

/// The restricted facility location model of one neighborhood.
///
/// Variables are `open_{f}` for every selected facility followed by
/// `attend_{f}_{c}` for every (selected facility, affected customer) pair,
/// facility-major. Rows, in order:
///
/// 1. every affected customer is served exactly once,
/// 2. `attend_{f}_{c} <= open_{f}` for every pair,
/// 3. the demand served by `f` is at most `capacity(f) * open_{f}`.
///
/// The objective minimizes setup plus assignment distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Subproblem {
    facilities: Vec<FacilityIndex>,
    customers: Vec<CustomerIndex>,
    program: BinaryProgram,
}

impl Subproblem {
    pub fn formulate(model: &InstanceModel<'_>, nb: &Neighborhood) -> Self {
        Self::over(model, nb.facilities().to_vec(), nb.customers().to_vec())
    }

    /// The model of the whole instance: every facility, every customer.
    pub fn whole(model: &InstanceModel<'_>) -> Self {
        Self::over(
            model,
            model.iter_facility_indices().collect(),
            model.iter_customer_indices().collect(),
        )
    }

    fn over(
        model: &InstanceModel<'_>,
        facilities: Vec<FacilityIndex>,
        customers: Vec<CustomerIndex>,
    ) -> Self {
        let (nf, nc) = (facilities.len(), customers.len());

        let mut program = BinaryProgram::new(Sense::Minimize);
        let open: Vec<Var> = facilities
            .iter()
            .map(|f| program.add_binary(format!("open_{}", f.get())))
            .collect();
        let mut attend: Vec<Var> = Vec::with_capacity(nf * nc);
        for f in &facilities {
            for c in &customers {
                attend.push(program.add_binary(format!("attend_{}_{}", f.get(), c.get())));
            }
        }

        for j in 0..nc {
            let terms = (0..nf).map(|i| (attend[i * nc + j], 1.0)).collect();
            program.add_constraint(terms, Comparison::Eq, 1.0);
        }
        for i in 0..nf {
            for j in 0..nc {
                program.add_constraint(
                    vec![(attend[i * nc + j], 1.0), (open[i], -1.0)],
                    Comparison::Le,
                    0.0,
                );
            }
        }
        for (i, &f) in facilities.iter().enumerate() {
            let mut terms: Vec<(Var, f64)> = customers
                .iter()
                .enumerate()
                .map(|(j, &c)| (attend[i * nc + j], model.demand(c)))
                .collect();
            terms.push((open[i], -model.capacity(f)));
            program.add_constraint(terms, Comparison::Le, 0.0);
        }

        let mut objective: Vec<(Var, f64)> = Vec::with_capacity(nf + nf * nc);
        for (i, &f) in facilities.iter().enumerate() {
            objective.push((open[i], model.setup_cost(f)));
            for (j, &c) in customers.iter().enumerate() {
                objective.push((attend[i * nc + j], model.distance(f, c)));
            }
        }
        program.set_objective(objective, 0.0);

        Self {
            facilities,
            customers,
            program,
        }
    }

    #[inline]
    pub fn facilities(&self) -> &[FacilityIndex] {
        &self.facilities
    }

    #[inline]
    pub fn customers(&self) -> &[CustomerIndex] {
        &self.customers
    }

    #[inline]
    pub fn program(&self) -> &BinaryProgram {
        &self.program
    }

    /// Variable of the `i`-th selected facility's open indicator.
    #[inline]
    pub fn open_var(&self, i: usize) -> Var {
        debug_assert!(i < self.facilities.len());
        Var::new(i)
    }

    /// Variable assigning the `j`-th affected customer to the `i`-th selected
    /// facility.
    #[inline]
    pub fn attend_var(&self, i: usize, j: usize) -> Var {
        debug_assert!(i < self.facilities.len());
        debug_assert!(j < self.customers.len());
        Var::new(self.facilities.len() + i * self.customers.len() + j)
    }

    /// Reads the served facility of every affected customer off an
    /// assignment.
    pub fn decode(&self, assignment: &[bool]) -> Result<AttendancePatch, DecodeError> {
        if assignment.len() != self.program.variables_len() {
            return Err(DecodeError::AssignmentLength {
                expected: self.program.variables_len(),
                found: assignment.len(),
            });
        }

        let mut patch = AttendancePatch::with_capacity(self.customers.len());
        for (j, &c) in self.customers.iter().enumerate() {
            let mut served = (0..self.facilities.len())
                .filter(|&i| assignment[self.attend_var(i, j).get()]);
            let Some(i) = served.next() else {
                return Err(DecodeError::Unassigned(c));
            };
            if served.next().is_some() {
                return Err(DecodeError::MultiplyAssigned(c));
            }
            patch.push(c, self.facilities[i]);
        }
        Ok(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        lns::neighborhood::NeighborhoodSelector,
        optimizer::{EnumerationOptimizer, Optimizer, OptimizerStatus},
        state::solver_state::SolverState,
    };
    use facloc_core::prelude::Location;
    use facloc_model::prelude::{Problem, ProblemBuilder};
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

    fn subproblem(
        p: &Problem,
        attendance: Vec<FacilityIndex>,
        pivot: usize,
        k: usize,
    ) -> Subproblem {
        let m = InstanceModel::from_problem(p).unwrap();
        let s = SolverState::from_attendance(&m, attendance).unwrap();
        let nb = NeighborhoodSelector::new(k).around(&m, &s, fi(pivot));
        Subproblem::formulate(&m, &nb)
    }

    #[test]
    fn test_layout_and_linking_rows() {
        let p = problem();
        let sub = subproblem(&p, vec![fi(0), fi(1), fi(2)], 0, 2);
        let program = sub.program();

        // 2 facilities x 2 customers.
        assert_eq!(program.variables_len(), 2 + 4);
        assert_eq!(program.name(sub.open_var(1)), "open_1");
        assert_eq!(program.name(sub.attend_var(1, 0)), "attend_1_0");
        assert_eq!(program.name(sub.attend_var(0, 1)), "attend_0_1");

        // C assignment rows + F*C linking rows + F capacity rows.
        assert_eq!(program.constraints().len(), 2 + 2 * 2 + 2);
        let linking = &program.constraints()[2];
        assert_eq!(linking.comparison(), Comparison::Le);
        assert_eq!(
            linking.terms(),
            &[(sub.attend_var(0, 0), 1.0), (sub.open_var(0), -1.0)]
        );
        let capacity = &program.constraints()[2 + 4];
        assert_eq!(capacity.terms().last(), Some(&(sub.open_var(0), -2.0)));
    }

    #[test]
    fn test_whole_instance_covers_everything() {
        let p = problem();
        let m = InstanceModel::from_problem(&p).unwrap();
        let sub = Subproblem::whole(&m);

        assert_eq!(sub.facilities(), &[fi(0), fi(1), fi(2)]);
        assert_eq!(sub.customers(), &[ci(0), ci(1), ci(2)]);
        assert_eq!(sub.program().variables_len(), 3 + 3 * 3);
        assert_eq!(sub.program().constraints().len(), 3 + 3 * 3 + 3);
        assert_eq!(sub.program().name(sub.attend_var(2, 1)), "attend_2_1");
    }

    #[test]
    fn test_objective_matches_current_attendance() {
        let p = problem();
        let m = InstanceModel::from_problem(&p).unwrap();
        let s = SolverState::from_attendance(&m, vec![fi(0), fi(1), fi(2)]).unwrap();
        let nb = NeighborhoodSelector::new(2).around(&m, &s, fi(0));
        let sub = Subproblem::formulate(&m, &nb);

        let mut current = vec![false; sub.program().variables_len()];
        current[sub.open_var(0).get()] = true;
        current[sub.open_var(1).get()] = true;
        current[sub.attend_var(0, 0).get()] = true;
        current[sub.attend_var(1, 1).get()] = true;

        assert!(sub.program().is_feasible(&current, 1e-9));
        assert!((sub.program().evaluate(&current) - nb.old_value()).abs() < 1e-12);
        let patch = sub.decode(&current).unwrap();
        assert_eq!(patch.moves(), &[(ci(0), fi(0)), (ci(1), fi(1))]);
    }

    #[test]
    fn test_solved_program_decodes_to_cheaper_patch() {
        let p = problem();
        let sub = subproblem(&p, vec![fi(0), fi(1), fi(2)], 0, 2);
        let out = EnumerationOptimizer::new().solve(sub.program(), Duration::from_secs(5));
        assert_eq!(out.status(), OptimizerStatus::Optimal);

        // Closing facility 0 and serving both customers from 1 is cheaper.
        let patch = sub.decode(out.assignment().unwrap()).unwrap();
        assert_eq!(patch.moves(), &[(ci(0), fi(1)), (ci(1), fi(1))]);
        let expected = 1.0 + 5f64.sqrt() + 1.0;
        assert!((out.objective_value().unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_decode_rejects_bad_assignments() {
        let p = problem();
        let sub = subproblem(&p, vec![fi(0), fi(1), fi(2)], 0, 2);
        let n = sub.program().variables_len();

        assert_eq!(
            sub.decode(&[true]),
            Err(DecodeError::AssignmentLength {
                expected: n,
                found: 1
            })
        );

        let mut asg = vec![false; n];
        asg[sub.attend_var(0, 0).get()] = true;
        assert_eq!(sub.decode(&asg), Err(DecodeError::Unassigned(ci(1))));

        asg[sub.attend_var(0, 1).get()] = true;
        asg[sub.attend_var(1, 1).get()] = true;
        assert_eq!(sub.decode(&asg), Err(DecodeError::MultiplyAssigned(ci(1))));
    }
}
