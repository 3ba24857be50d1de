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

use facloc_model::prelude::{CustomerIndex, FacilityIndex};

/// New facilities for a subset of customers.
///
/// A patch produced by a subproblem lists every affected customer exactly
/// once, including those that keep their facility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendancePatch {
    moves: Vec<(CustomerIndex, FacilityIndex)>,
}

impl AttendancePatch {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(n: usize) -> Self {
        Self {
            moves: Vec::with_capacity(n),
        }
    }

    #[inline]
    pub fn push(&mut self, customer: CustomerIndex, facility: FacilityIndex) {
        self.moves.push((customer, facility));
    }

    #[inline]
    pub fn moves(&self) -> &[(CustomerIndex, FacilityIndex)] {
        &self.moves
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (CustomerIndex, FacilityIndex)> + '_ {
        self.moves.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl FromIterator<(CustomerIndex, FacilityIndex)> for AttendancePatch {
    fn from_iter<I: IntoIterator<Item = (CustomerIndex, FacilityIndex)>>(iter: I) -> Self {
        Self {
            moves: iter.into_iter().collect(),
        }
    }
}
