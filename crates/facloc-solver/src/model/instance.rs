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

use crate::model::err::{ModelBuildError, NoFacilitiesError};
use facloc_core::prelude::Cost;
use facloc_model::prelude::{CustomerIndex, FacilityIndex, Problem};

/// Read-only, index-based view of a [`Problem`] with all distances
/// precomputed.
///
/// Distances live in flat row-major matrices: facility to customer
/// (`F x C`) and facility to facility (`F x F`). For every facility the
/// full ranking of all facilities by ascending distance is stored as well,
/// so neighborhood lookups never sort.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceModel<'problem> {
    facilities_len: usize, // F
    customers_len: usize, // C
    setup_costs: Vec<Cost>, // len = F
    capacities: Vec<f64>, // len = F
    demands: Vec<f64>, // len = C
    customer_distances: Vec<f64>, // len = F * C
    facility_distances: Vec<f64>, // len = F * F
    rankings: Vec<FacilityIndex>, // len = F * F
    problem: &'problem Problem,
}

impl<'problem> InstanceModel<'problem> {
    pub fn from_problem(p: &'problem Problem) -> Result<Self, ModelBuildError> {
        let facilities_len = p.facility_count();
        let customers_len = p.customer_count();
        if facilities_len == 0 {
            return Err(NoFacilitiesError.into());
        }

        let setup_costs: Vec<Cost> = p.facilities().iter().map(|f| f.setup_cost()).collect();
        let capacities: Vec<f64> = p.facilities().iter().map(|f| f.capacity()).collect();
        let demands: Vec<f64> = p.customers().iter().map(|c| c.demand()).collect();

        let mut customer_distances = Vec::with_capacity(facilities_len * customers_len);
        let mut facility_distances = Vec::with_capacity(facilities_len * facilities_len);
        for f in p.facilities() {
            let at = f.location();
            customer_distances.extend(p.customers().iter().map(|c| at.distance_to(&c.location())));
            facility_distances.extend(p.facilities().iter().map(|o| at.distance_to(&o.location())));
        }

        let mut rankings = Vec::with_capacity(facilities_len * facilities_len);
        let mut row: Vec<usize> = Vec::with_capacity(facilities_len);
        for pivot in 0..facilities_len {
            let dist = &facility_distances[pivot * facilities_len..(pivot + 1) * facilities_len];
            row.clear();
            row.extend(0..facilities_len);
            // Pivot first even if another facility shares its location.
            row.sort_by(|&a, &b| {
                (a != pivot)
                    .cmp(&(b != pivot))
                    .then_with(|| dist[a].total_cmp(&dist[b]))
                    .then_with(|| a.cmp(&b))
            });
            rankings.extend(row.iter().map(|&i| FacilityIndex::new(i)));
        }

        Ok(Self {
            facilities_len,
            customers_len,
            setup_costs,
            capacities,
            demands,
            customer_distances,
            facility_distances,
            rankings,
            problem: p,
        })
    }

    #[inline]
    pub fn problem(&self) -> &'problem Problem {
        self.problem
    }

    #[inline]
    pub fn facilities_len(&self) -> usize {
        self.facilities_len
    }

    #[inline]
    pub fn customers_len(&self) -> usize {
        self.customers_len
    }

    #[inline]
    pub fn setup_cost(&self, facility: FacilityIndex) -> Cost {
        let index = facility.get();
        debug_assert!(index < self.facilities_len);

        self.setup_costs[index]
    }

    #[inline]
    pub fn capacity(&self, facility: FacilityIndex) -> f64 {
        let index = facility.get();
        debug_assert!(index < self.facilities_len);

        self.capacities[index]
    }

    #[inline]
    pub fn demand(&self, customer: CustomerIndex) -> f64 {
        let index = customer.get();
        debug_assert!(index < self.customers_len);

        self.demands[index]
    }

    #[inline]
    pub fn demands(&self) -> &[f64] {
        &self.demands
    }

    #[inline]
    pub fn distance(&self, facility: FacilityIndex, customer: CustomerIndex) -> f64 {
        debug_assert!(facility.get() < self.facilities_len);
        debug_assert!(customer.get() < self.customers_len);

        self.customer_distances[facility.get() * self.customers_len + customer.get()]
    }

    #[inline]
    pub fn facility_distance(&self, a: FacilityIndex, b: FacilityIndex) -> f64 {
        debug_assert!(a.get() < self.facilities_len);
        debug_assert!(b.get() < self.facilities_len);

        self.facility_distances[a.get() * self.facilities_len + b.get()]
    }

    /// All facilities ordered by distance from `pivot`, ties by index, with
    /// `pivot` itself first.
    #[inline]
    pub fn ranking(&self, pivot: FacilityIndex) -> &[FacilityIndex] {
        let start = pivot.get() * self.facilities_len;
        debug_assert!(pivot.get() < self.facilities_len);

        &self.rankings[start..start + self.facilities_len]
    }

    /// The `min(k, F)` facilities closest to `pivot`, pivot included.
    #[inline]
    pub fn k_nearest_facilities(&self, pivot: FacilityIndex, k: usize) -> &[FacilityIndex] {
        &self.ranking(pivot)[..k.min(self.facilities_len)]
    }

    #[inline]
    pub fn iter_facility_indices(&self) -> impl Iterator<Item = FacilityIndex> + '_ {
        (0..self.facilities_len).map(FacilityIndex::new)
    }

    #[inline]
    pub fn iter_customer_indices(&self) -> impl Iterator<Item = CustomerIndex> + '_ {
        (0..self.customers_len).map(CustomerIndex::new)
    }
}

impl<'problem> TryFrom<&'problem Problem> for InstanceModel<'problem> {
    type Error = ModelBuildError;

    fn try_from(p: &'problem Problem) -> Result<Self, Self::Error> {
        Self::from_problem(p)
    }
}
