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
use std::num::{ParseFloatError, ParseIntError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidFacilityError {
    index: FacilityIndex,
    setup_cost: f64,
    capacity: f64,
}

impl InvalidFacilityError {
    pub fn new(index: FacilityIndex, setup_cost: f64, capacity: f64) -> Self {
        Self {
            index,
            setup_cost,
            capacity,
        }
    }

    pub fn index(&self) -> FacilityIndex {
        self.index
    }

    pub fn setup_cost(&self) -> f64 {
        self.setup_cost
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }
}

impl std::fmt::Display for InvalidFacilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} has invalid data (setup cost: {}, capacity: {}); both must be finite and non-negative",
            self.index, self.setup_cost, self.capacity
        )
    }
}

impl std::error::Error for InvalidFacilityError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidCustomerError {
    index: CustomerIndex,
    demand: f64,
}

impl InvalidCustomerError {
    pub fn new(index: CustomerIndex, demand: f64) -> Self {
        Self { index, demand }
    }

    pub fn index(&self) -> CustomerIndex {
        self.index
    }

    pub fn demand(&self) -> f64 {
        self.demand
    }
}

impl std::fmt::Display for InvalidCustomerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} has invalid demand {}; demand must be finite and positive",
            self.index, self.demand
        )
    }
}

impl std::error::Error for InvalidCustomerError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProblemError {
    InvalidFacility(InvalidFacilityError),
    InvalidCustomer(InvalidCustomerError),
    NonFiniteFacilityLocation(FacilityIndex),
    NonFiniteCustomerLocation(CustomerIndex),
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::InvalidFacility(e) => write!(f, "{}", e),
            ProblemError::InvalidCustomer(e) => write!(f, "{}", e),
            ProblemError::NonFiniteFacilityLocation(i) => {
                write!(f, "{} has a non-finite location", i)
            }
            ProblemError::NonFiniteCustomerLocation(i) => {
                write!(f, "{} has a non-finite location", i)
            }
        }
    }
}

impl std::error::Error for ProblemError {}

impl From<InvalidFacilityError> for ProblemError {
    fn from(err: InvalidFacilityError) -> Self {
        ProblemError::InvalidFacility(err)
    }
}

impl From<InvalidCustomerError> for ProblemError {
    fn from(err: InvalidCustomerError) -> Self {
        ProblemError::InvalidCustomer(err)
    }
}

#[derive(Debug)]
pub enum ProblemLoaderError {
    Io(std::io::Error),
    ParseInt { line: usize, source: ParseIntError },
    ParseFloat { line: usize, source: ParseFloatError },
    UnexpectedEof { line: usize },
    TrailingData { line: usize },
    NoFacilities,
    Problem(ProblemError),
}

impl From<std::io::Error> for ProblemLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ProblemError> for ProblemLoaderError {
    fn from(e: ProblemError) -> Self {
        Self::Problem(e)
    }
}

impl std::fmt::Display for ProblemLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ProblemLoaderError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            ParseInt { line, source } => write!(f, "line {line}: parse-int error: {source}"),
            ParseFloat { line, source } => write!(f, "line {line}: parse-float error: {source}"),
            UnexpectedEof { line } => {
                write!(f, "unexpected end of file after line {line} while parsing instance")
            }
            TrailingData { line } => write!(f, "line {line}: unexpected data after instance"),
            NoFacilities => write!(f, "instance declares no facilities"),
            Problem(e) => write!(f, "problem error: {e}"),
        }
    }
}

impl std::error::Error for ProblemLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProblemLoaderError::Io(e) => Some(e),
            ProblemLoaderError::ParseInt { source, .. } => Some(source),
            ProblemLoaderError::ParseFloat { source, .. } => Some(source),
            ProblemLoaderError::Problem(e) => Some(e),
            _ => None,
        }
    }
}
