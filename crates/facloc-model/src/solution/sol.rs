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
use facloc_core::prelude::Cost;

/// A full assignment of customers to facilities together with its cost.
///
/// `optimal` certifies only the last subproblem that produced this solution,
/// never the solution as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    attendance: Vec<FacilityIndex>,
    value: Cost,
    optimal: bool,
}

impl Solution {
    #[inline]
    pub fn new(attendance: Vec<FacilityIndex>, value: Cost, optimal: bool) -> Self {
        Self {
            attendance,
            value,
            optimal,
        }
    }

    #[inline]
    pub fn attendance(&self) -> &[FacilityIndex] {
        &self.attendance
    }

    #[inline]
    pub fn facility_of(&self, customer: CustomerIndex) -> Option<FacilityIndex> {
        self.attendance.get(customer.get()).copied()
    }

    #[inline]
    pub fn value(&self) -> Cost {
        self.value
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        self.optimal
    }

    #[inline]
    pub fn customer_count(&self) -> usize {
        self.attendance.len()
    }

    /// Facilities with at least one attendee, ascending and without duplicates.
    pub fn open_facilities(&self) -> Vec<FacilityIndex> {
        let mut open = self.attendance.clone();
        open.sort_unstable();
        open.dedup();
        open
    }

    #[inline]
    pub fn into_attendance(self) -> Vec<FacilityIndex> {
        self.attendance
    }
}

/// Writes the two-line answer format: `<value> <optimal_flag>` followed by
/// the attended facility of every customer in customer order.
impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} {}", self.value, u8::from(self.optimal))?;
        for (j, fac) in self.attendance.iter().enumerate() {
            if j > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", fac.get())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fi(i: usize) -> FacilityIndex {
        FacilityIndex::new(i)
    }

    #[test]
    fn test_display_matches_answer_format() {
        let s = Solution::new(vec![fi(1), fi(1), fi(0), fi(3)], 2550.013, false);
        assert_eq!(s.to_string(), "2550.013 0\n1 1 0 3");

        let s = Solution::new(vec![fi(0)], 12.0, true);
        assert_eq!(s.to_string(), "12 1\n0");
    }

    #[test]
    fn test_open_facilities_are_deduplicated() {
        let s = Solution::new(vec![fi(4), fi(1), fi(4), fi(2), fi(1)], 0.0, false);
        assert_eq!(s.open_facilities(), vec![fi(1), fi(2), fi(4)]);
        assert_eq!(s.facility_of(CustomerIndex::new(3)), Some(fi(2)));
        assert_eq!(s.facility_of(CustomerIndex::new(5)), None);
    }
}
