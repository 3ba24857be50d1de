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

use crate::common::{CustomerIndex, FacilityIndex};
use crate::problem::{
    customer::Customer,
    err::{InvalidCustomerError, InvalidFacilityError, ProblemError},
    facility::Facility,
};

/// An immutable capacitated facility location instance.
///
/// Facilities and customers are stored in index order, so `facilities()[i]`
/// always has index `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    facilities: Vec<Facility>,
    customers: Vec<Customer>,
}

impl Problem {
    pub fn new(facilities: Vec<Facility>, customers: Vec<Customer>) -> Result<Self, ProblemError> {
        for (i, f) in facilities.iter().enumerate() {
            debug_assert_eq!(f.index().get(), i);
            let ok = f.setup_cost().is_finite()
                && f.setup_cost() >= 0.0
                && f.capacity().is_finite()
                && f.capacity() >= 0.0;
            if !ok {
                return Err(
                    InvalidFacilityError::new(f.index(), f.setup_cost(), f.capacity()).into(),
                );
            }
            if !f.location().is_finite() {
                return Err(ProblemError::NonFiniteFacilityLocation(f.index()));
            }
        }

        for (j, c) in customers.iter().enumerate() {
            debug_assert_eq!(c.index().get(), j);
            if !(c.demand().is_finite() && c.demand() > 0.0) {
                return Err(InvalidCustomerError::new(c.index(), c.demand()).into());
            }
            if !c.location().is_finite() {
                return Err(ProblemError::NonFiniteCustomerLocation(c.index()));
            }
        }

        Ok(Self {
            facilities,
            customers,
        })
    }

    #[inline]
    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    #[inline]
    pub fn customers(&self) -> &[Customer] {
        &self.customers
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
    pub fn facility(&self, index: FacilityIndex) -> Option<&Facility> {
        self.facilities.get(index.get())
    }

    #[inline]
    pub fn customer(&self, index: CustomerIndex) -> Option<&Customer> {
        self.customers.get(index.get())
    }

    #[inline]
    pub fn iter_facility_indices(&self) -> impl Iterator<Item = FacilityIndex> + '_ {
        (0..self.facilities.len()).map(FacilityIndex::new)
    }

    #[inline]
    pub fn iter_customer_indices(&self) -> impl Iterator<Item = CustomerIndex> + '_ {
        (0..self.customers.len()).map(CustomerIndex::new)
    }

    /// Euclidean distance between a facility and a customer.
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn distance(&self, facility: FacilityIndex, customer: CustomerIndex) -> f64 {
        self.facilities[facility.get()]
            .location()
            .distance_to(&self.customers[customer.get()].location())
    }

    #[inline]
    pub fn total_demand(&self) -> f64 {
        self.customers.iter().map(|c| c.demand()).sum()
    }

    #[inline]
    pub fn total_capacity(&self) -> f64 {
        self.facilities.iter().map(|f| f.capacity()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facloc_core::prelude::Location;

    fn fac(i: usize, setup: f64, cap: f64, x: f64, y: f64) -> Facility {
        Facility::new(FacilityIndex::new(i), setup, cap, Location::new(x, y))
    }

    fn cust(j: usize, demand: f64, x: f64, y: f64) -> Customer {
        Customer::new(CustomerIndex::new(j), demand, Location::new(x, y))
    }

    #[test]
    fn test_distance_and_totals() {
        let p = Problem::new(
            vec![fac(0, 1.0, 10.0, 0.0, 0.0), fac(1, 2.0, 5.0, 10.0, 0.0)],
            vec![cust(0, 2.0, 3.0, 4.0), cust(1, 1.5, 10.0, 1.0)],
        )
        .unwrap();

        assert_eq!(p.facility_count(), 2);
        assert_eq!(p.customer_count(), 2);
        assert!((p.distance(FacilityIndex::new(0), CustomerIndex::new(0)) - 5.0).abs() < 1e-12);
        assert!((p.distance(FacilityIndex::new(1), CustomerIndex::new(1)) - 1.0).abs() < 1e-12);
        assert!((p.total_demand() - 3.5).abs() < 1e-12);
        assert!((p.total_capacity() - 15.0).abs() < 1e-12);
        assert!(p.facility(FacilityIndex::new(2)).is_none());
    }

    #[test]
    fn test_rejects_negative_capacity() {
        let err = Problem::new(vec![fac(0, 1.0, -1.0, 0.0, 0.0)], vec![]).unwrap_err();
        assert!(matches!(err, ProblemError::InvalidFacility(e) if e.index().get() == 0));
    }

    #[test]
    fn test_rejects_non_positive_demand() {
        let err = Problem::new(
            vec![fac(0, 1.0, 1.0, 0.0, 0.0)],
            vec![cust(0, 1.0, 0.0, 0.0), cust(1, 0.0, 0.0, 0.0)],
        )
        .unwrap_err();
        assert!(matches!(err, ProblemError::InvalidCustomer(e) if e.index().get() == 1));
    }

    #[test]
    fn test_rejects_non_finite_location() {
        let err = Problem::new(vec![fac(0, 1.0, 1.0, f64::NAN, 0.0)], vec![]).unwrap_err();
        assert_eq!(err, ProblemError::NonFiniteFacilityLocation(FacilityIndex::new(0)));
    }

    #[test]
    fn test_zero_capacity_and_free_setup_are_allowed() {
        assert!(Problem::new(vec![fac(0, 0.0, 0.0, 0.0, 0.0)], vec![]).is_ok());
    }
}
