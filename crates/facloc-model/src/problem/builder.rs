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
    common::{CustomerIndex, FacilityIndex},
    problem::{ProblemError, customer::Customer, facility::Facility, prob::Problem},
};
use facloc_core::prelude::{Cost, Location};

/// Collects facilities and customers and assigns them consecutive indices in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct ProblemBuilder {
    facilities: Vec<Facility>,
    customers: Vec<Customer>,
}

impl ProblemBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacities(facilities: usize, customers: usize) -> Self {
        Self {
            facilities: Vec::with_capacity(facilities),
            customers: Vec::with_capacity(customers),
        }
    }

    #[inline]
    pub fn add_facility(
        &mut self,
        setup_cost: Cost,
        capacity: f64,
        location: Location,
    ) -> &mut Self {
        let index = FacilityIndex::new(self.facilities.len());
        self.facilities
            .push(Facility::new(index, setup_cost, capacity, location));
        self
    }

    #[inline]
    pub fn add_customer(&mut self, demand: f64, location: Location) -> &mut Self {
        let index = CustomerIndex::new(self.customers.len());
        self.customers.push(Customer::new(index, demand, location));
        self
    }

    #[inline]
    pub fn extend_facilities<I>(&mut self, it: I) -> &mut Self
    where
        I: IntoIterator<Item = (Cost, f64, Location)>,
    {
        for (setup_cost, capacity, location) in it {
            self.add_facility(setup_cost, capacity, location);
        }
        self
    }

    #[inline]
    pub fn extend_customers<I>(&mut self, it: I) -> &mut Self
    where
        I: IntoIterator<Item = (f64, Location)>,
    {
        for (demand, location) in it {
            self.add_customer(demand, location);
        }
        self
    }

    #[inline]
    pub fn facility_count(&self) -> usize {
        self.facilities.len()
    }

    #[inline]
    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    #[inline]
    pub fn build(self) -> Result<Problem, ProblemError> {
        Problem::new(self.facilities, self.customers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn loc(x: f64, y: f64) -> Location {
        Location::new(x, y)
    }

    #[test]
    fn build_empty() {
        let p = ProblemBuilder::new().build().unwrap();
        assert_eq!(p.facility_count(), 0);
        assert_eq!(p.customer_count(), 0);
    }

    #[test]
    fn indices_follow_insertion_order() {
        let mut b = ProblemBuilder::with_capacities(2, 3);
        b.add_facility(1.0, 10.0, loc(0.0, 0.0))
            .add_facility(2.0, 20.0, loc(1.0, 1.0));
        b.extend_customers([(1.0, loc(0.0, 1.0)), (2.0, loc(1.0, 0.0)), (3.0, loc(2.0, 2.0))]);
        assert_eq!(b.facility_count(), 2);
        assert_eq!(b.customer_count(), 3);

        let p = b.build().unwrap();
        for (i, f) in p.facilities().iter().enumerate() {
            assert_eq!(f.index().get(), i);
        }
        for (j, c) in p.customers().iter().enumerate() {
            assert_eq!(c.index().get(), j);
        }
        assert_eq!(p.customers()[2].demand(), 3.0);
        assert_eq!(p.facilities()[1].capacity(), 20.0);
    }

    #[test]
    fn build_propagates_validation() {
        let mut b = ProblemBuilder::new();
        b.extend_facilities([(-5.0, 1.0, loc(0.0, 0.0))]);
        assert!(matches!(b.build(), Err(ProblemError::InvalidFacility(_))));
    }
}
