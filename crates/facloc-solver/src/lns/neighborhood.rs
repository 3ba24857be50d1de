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

use crate::{model::instance::InstanceModel, state::solver_state::SolverState};
use facloc_core::prelude::Cost;
use facloc_model::prelude::{CustomerIndex, FacilityIndex};
use rand::Rng;

/// The restricted part of the instance re-optimized in one iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighborhood {
    pivot: FacilityIndex,
    facilities: Vec<FacilityIndex>, // ranking order, pivot first
    customers: Vec<CustomerIndex>, // ascending
    old_value: Cost,
}

impl Neighborhood {
    #[inline]
    pub fn pivot(&self) -> FacilityIndex {
        self.pivot
    }

    #[inline]
    pub fn facilities(&self) -> &[FacilityIndex] {
        &self.facilities
    }

    #[inline]
    pub fn customers(&self) -> &[CustomerIndex] {
        &self.customers
    }

    /// Cost of the neighborhood in the state it was carved from.
    #[inline]
    pub fn old_value(&self) -> Cost {
        self.old_value
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Cost of the same facilities and customers in `state`: setup of every
    /// selected facility that is open plus the current assignment distance of
    /// every affected customer.
    pub fn current_value(&self, model: &InstanceModel<'_>, state: &SolverState) -> Cost {
        let setup: Cost = self
            .facilities
            .iter()
            .filter(|&&f| state.is_open(f))
            .map(|&f| model.setup_cost(f))
            .sum();
        let assignment: Cost = self
            .customers
            .iter()
            .map(|&c| model.distance(state.facility_of(c), c))
            .sum();
        setup + assignment
    }
}

impl std::fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Neighborhood(pivot: {}, facilities: {}, customers: {}, value: {})",
            self.pivot,
            self.facilities.len(),
            self.customers.len(),
            self.old_value
        )
    }
}

/// Picks a pivot facility and its `k` nearest facilities; the customers
/// currently attending any of them form the neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborhoodSelector {
    k: usize,
}

impl Default for NeighborhoodSelector {
    fn default() -> Self {
        Self { k: 50 }
    }
}

impl NeighborhoodSelector {
    #[inline]
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Draws the pivot uniformly from all facilities.
    #[inline]
    pub fn select<R: Rng>(
        &self,
        model: &InstanceModel<'_>,
        state: &SolverState,
        rng: &mut R,
    ) -> Neighborhood {
        let pivot = FacilityIndex::new(rng.random_range(0..model.facilities_len()));
        self.around(model, state, pivot)
    }

    pub fn around(
        &self,
        model: &InstanceModel<'_>,
        state: &SolverState,
        pivot: FacilityIndex,
    ) -> Neighborhood {
        let facilities = model.k_nearest_facilities(pivot, self.k).to_vec();

        let mut selected = vec![false; model.facilities_len()];
        for f in &facilities {
            selected[f.get()] = true;
        }
        let customers: Vec<CustomerIndex> = model
            .iter_customer_indices()
            .filter(|&c| selected[state.facility_of(c).get()])
            .collect();

        let mut nb = Neighborhood {
            pivot,
            facilities,
            customers,
            old_value: 0.0,
        };
        nb.old_value = nb.current_value(model, state);
        nb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facloc_core::prelude::Location;
    use facloc_model::prelude::{Problem, ProblemBuilder};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fi(i: usize) -> FacilityIndex {
        FacilityIndex::new(i)
    }

    fn ci(j: usize) -> CustomerIndex {
        CustomerIndex::new(j)
    }

    fn problem() -> Problem {
        // Facilities at x = 0, 1, 10; one customer next to each.
        let mut b = ProblemBuilder::new();
        b.add_facility(5.0, 10.0, Location::new(0.0, 0.0))
            .add_facility(7.0, 10.0, Location::new(1.0, 0.0))
            .add_facility(9.0, 10.0, Location::new(10.0, 0.0))
            .add_customer(1.0, Location::new(0.0, 1.0))
            .add_customer(1.0, Location::new(1.0, 1.0))
            .add_customer(1.0, Location::new(10.0, 1.0));
        b.build().unwrap()
    }

    fn state(m: &InstanceModel<'_>) -> SolverState {
        SolverState::from_attendance(m, vec![fi(0), fi(1), fi(2)]).unwrap()
    }

    #[test]
    fn test_around_collects_attending_customers() {
        let p = problem();
        let m = InstanceModel::from_problem(&p).unwrap();
        let s = state(&m);

        let nb = NeighborhoodSelector::new(2).around(&m, &s, fi(1));
        assert_eq!(nb.pivot(), fi(1));
        assert_eq!(nb.facilities(), &[fi(1), fi(0)]);
        assert_eq!(nb.customers(), &[ci(0), ci(1)]);
        assert!((nb.old_value() - (5.0 + 7.0 + 1.0 + 1.0)).abs() < 1e-12);
        assert_eq!(nb.old_value(), nb.current_value(&m, &s));
    }

    #[test]
    fn test_k_is_clipped_and_closed_facilities_cost_nothing() {
        let p = problem();
        let m = InstanceModel::from_problem(&p).unwrap();
        let s = SolverState::from_attendance(&m, vec![fi(0), fi(0), fi(2)]).unwrap();

        let nb = NeighborhoodSelector::new(50).around(&m, &s, fi(2));
        assert_eq!(nb.facilities().len(), 3);
        assert_eq!(nb.customers(), &[ci(0), ci(1), ci(2)]);
        let expected = 5.0 + 9.0 + 1.0 + 2f64.sqrt() + 1.0;
        assert!((nb.old_value() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_closed_pivot_without_neighbors_is_empty() {
        let p = problem();
        let m = InstanceModel::from_problem(&p).unwrap();
        let s = SolverState::from_attendance(&m, vec![fi(0), fi(0), fi(2)]).unwrap();

        let nb = NeighborhoodSelector::new(1).around(&m, &s, fi(1));
        assert!(nb.is_empty());
        assert_eq!(nb.old_value(), 0.0);
    }

    #[test]
    fn test_select_is_reproducible_under_seed() {
        let p = problem();
        let m = InstanceModel::from_problem(&p).unwrap();
        let s = state(&m);
        let sel = NeighborhoodSelector::default();
        assert_eq!(sel.k(), 50);

        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..10 {
            let na = sel.select(&m, &s, &mut a);
            let nb = sel.select(&m, &s, &mut b);
            assert_eq!(na, nb);
            assert!(na.pivot().get() < 3);
        }
    }
}
