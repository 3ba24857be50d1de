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
    opening::err::{GreedyError, UnplaceableCustomerError},
    state::solver_state::SolverState,
};
use facloc_core::prelude::Cost;
use facloc_model::prelude::within_capacity;

/// First-fit construction: customers in index order, each assigned to the
/// lowest-indexed facility that still has room for its demand.
///
/// Failing to place a customer means this order cannot satisfy the
/// instance, which is not a proof of infeasibility.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyOpening;

impl GreedyOpening {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, model: &InstanceModel<'_>) -> Result<SolverState, GreedyError> {
        let f_len = model.facilities_len();
        let mut loads = vec![0.0; f_len];
        let mut attendees = vec![0usize; f_len];
        let mut attendance = Vec::with_capacity(model.customers_len());
        let mut value: Cost = 0.0;

        for c in model.iter_customer_indices() {
            let demand = model.demand(c);
            let placed = model
                .iter_facility_indices()
                .find(|&f| within_capacity(loads[f.get()] + demand, model.capacity(f)));
            let Some(f) = placed else {
                return Err(UnplaceableCustomerError::new(c, demand).into());
            };

            if attendees[f.get()] == 0 {
                value += model.setup_cost(f);
            }
            loads[f.get()] += demand;
            attendees[f.get()] += 1;
            value += model.distance(f, c);
            attendance.push(f);
        }

        let state = SolverState::from_parts(attendance, loads, attendees, value);
        tracing::debug!(
            value = state.value(),
            open = state.open_facilities_len(),
            "Greedy opening built initial solution"
        );
        Ok(state)
    }
}
