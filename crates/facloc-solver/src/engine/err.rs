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
    lns::err::DecodeError, opening::err::GreedyError, optimizer::OptimizerStatus,
    state::err::ValueDriftError,
};
use facloc_model::prelude::SolutionValidationError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchError {
    Opening(GreedyError),
    Drift(ValueDriftError),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::Opening(err) => write!(f, "Opening solution failed: {}", err),
            SearchError::Drift(err) => write!(f, "Checkpoint failed: {}", err),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<GreedyError> for SearchError {
    #[inline]
    fn from(err: GreedyError) -> Self {
        SearchError::Opening(err)
    }
}

impl From<ValueDriftError> for SearchError {
    #[inline]
    fn from(err: ValueDriftError) -> Self {
        SearchError::Drift(err)
    }
}

/// The whole-instance program produced no usable attendance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExactError {
    NoSolution(OptimizerStatus),
    Decode(DecodeError),
    Invalid(SolutionValidationError),
}

impl std::fmt::Display for ExactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExactError::NoSolution(status) => {
                write!(f, "Optimizer returned no solution (status: {})", status)
            }
            ExactError::Decode(err) => write!(f, "Optimizer assignment is malformed: {}", err),
            ExactError::Invalid(err) => write!(f, "Optimizer attendance is invalid: {}", err),
        }
    }
}

impl std::error::Error for ExactError {}

impl From<DecodeError> for ExactError {
    #[inline]
    fn from(err: DecodeError) -> Self {
        ExactError::Decode(err)
    }
}

impl From<SolutionValidationError> for ExactError {
    #[inline]
    fn from(err: SolutionValidationError) -> Self {
        ExactError::Invalid(err)
    }
}
