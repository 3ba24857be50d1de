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

use crate::common::FacilityIndex;
use facloc_core::prelude::{Cost, Location};

/// A candidate site with a one-off setup cost and a demand capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facility {
    index: FacilityIndex,
    setup_cost: Cost,
    capacity: f64,
    location: Location,
}

impl Facility {
    #[inline]
    pub fn new(index: FacilityIndex, setup_cost: Cost, capacity: f64, location: Location) -> Self {
        Self {
            index,
            setup_cost,
            capacity,
            location,
        }
    }

    #[inline]
    pub fn index(&self) -> FacilityIndex {
        self.index
    }

    #[inline]
    pub fn setup_cost(&self) -> Cost {
        self.setup_cost
    }

    #[inline]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }
}

impl std::fmt::Display for Facility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (setup: {}, capacity: {}, at {})",
            self.index, self.setup_cost, self.capacity, self.location
        )
    }
}
