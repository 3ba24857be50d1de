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

//! # Facloc Model
//!
//! Domain types for capacitated facility location.
//!
//! - `common`: kind-tagged dense indices (`FacilityIndex`, `CustomerIndex`).
//! - `problem`: immutable `Facility`/`Customer` records, the validated
//!   `Problem`, a `ProblemBuilder` and the text instance loader.
//! - `solution`: the `Solution` record, its two-line answer format and a
//!   loader for it.
//! - `validation`: from-scratch cost recomputation and feasibility checks.

pub mod common;
pub mod problem;
pub mod solution;
pub mod validation;

pub mod prelude {
    pub use crate::common::{CustomerIndex, FacilityIndex, Index, IndexMarkerName};
    pub use crate::problem::builder::ProblemBuilder;
    pub use crate::problem::customer::Customer;
    pub use crate::problem::err::{
        InvalidCustomerError, InvalidFacilityError, ProblemError, ProblemLoaderError,
    };
    pub use crate::problem::facility::Facility;
    pub use crate::problem::loader::ProblemLoader;
    pub use crate::problem::prob::Problem;
    pub use crate::solution::err::SolutionLoaderError;
    pub use crate::solution::loader::SolutionLoader;
    pub use crate::solution::sol::Solution;
    pub use crate::validation::err::SolutionValidationError;
    pub use crate::validation::{CAPACITY_TOLERANCE, SolutionValidator, within_capacity};
}
