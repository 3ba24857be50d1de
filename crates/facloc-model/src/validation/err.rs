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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttendanceLengthError {
    expected: usize,
    found: usize,
}

impl AttendanceLengthError {
    pub fn new(expected: usize, found: usize) -> Self {
        Self { expected, found }
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn found(&self) -> usize {
        self.found
    }
}

impl std::fmt::Display for AttendanceLengthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Attendance covers {} customers but the instance has {}",
            self.found, self.expected
        )
    }
}

impl std::error::Error for AttendanceLengthError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownFacilityError {
    customer: CustomerIndex,
    facility: FacilityIndex,
}

impl UnknownFacilityError {
    pub fn new(customer: CustomerIndex, facility: FacilityIndex) -> Self {
        Self { customer, facility }
    }

    pub fn customer(&self) -> CustomerIndex {
        self.customer
    }

    pub fn facility(&self) -> FacilityIndex {
        self.facility
    }
}

impl std::fmt::Display for UnknownFacilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} attends unknown {}",
            self.customer, self.facility
        )
    }
}

impl std::error::Error for UnknownFacilityError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityExceededError {
    facility: FacilityIndex,
    load: f64,
    capacity: f64,
}

impl CapacityExceededError {
    pub fn new(facility: FacilityIndex, load: f64, capacity: f64) -> Self {
        Self {
            facility,
            load,
            capacity,
        }
    }

    pub fn facility(&self) -> FacilityIndex {
        self.facility
    }

    pub fn load(&self) -> f64 {
        self.load
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }
}

impl std::fmt::Display for CapacityExceededError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} serves demand {} above its capacity {}",
            self.facility, self.load, self.capacity
        )
    }
}

impl std::error::Error for CapacityExceededError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueMismatchError {
    reported: f64,
    recomputed: f64,
}

impl ValueMismatchError {
    pub fn new(reported: f64, recomputed: f64) -> Self {
        Self {
            reported,
            recomputed,
        }
    }

    pub fn reported(&self) -> f64 {
        self.reported
    }

    pub fn recomputed(&self) -> f64 {
        self.recomputed
    }
}

impl std::fmt::Display for ValueMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Reported value {} differs from recomputed cost {}",
            self.reported, self.recomputed
        )
    }
}

impl std::error::Error for ValueMismatchError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolutionValidationError {
    AttendanceLength(AttendanceLengthError),
    UnknownFacility(UnknownFacilityError),
    CapacityExceeded(CapacityExceededError),
    ValueMismatch(ValueMismatchError),
}

impl std::fmt::Display for SolutionValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolutionValidationError::AttendanceLength(e) => write!(f, "{}", e),
            SolutionValidationError::UnknownFacility(e) => write!(f, "{}", e),
            SolutionValidationError::CapacityExceeded(e) => write!(f, "{}", e),
            SolutionValidationError::ValueMismatch(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SolutionValidationError {}

impl From<AttendanceLengthError> for SolutionValidationError {
    fn from(err: AttendanceLengthError) -> Self {
        SolutionValidationError::AttendanceLength(err)
    }
}

impl From<UnknownFacilityError> for SolutionValidationError {
    fn from(err: UnknownFacilityError) -> Self {
        SolutionValidationError::UnknownFacility(err)
    }
}

impl From<CapacityExceededError> for SolutionValidationError {
    fn from(err: CapacityExceededError) -> Self {
        SolutionValidationError::CapacityExceeded(err)
    }
}

impl From<ValueMismatchError> for SolutionValidationError {
    fn from(err: ValueMismatchError) -> Self {
        SolutionValidationError::ValueMismatch(err)
    }
}
