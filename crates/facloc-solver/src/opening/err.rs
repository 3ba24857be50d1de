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

use facloc_model::prelude::CustomerIndex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnplaceableCustomerError {
    customer: CustomerIndex,
    demand: f64,
}

impl UnplaceableCustomerError {
    pub fn new(customer: CustomerIndex, demand: f64) -> Self {
        Self { customer, demand }
    }

    pub fn customer(&self) -> CustomerIndex {
        self.customer
    }

    pub fn demand(&self) -> f64 {
        self.demand
    }
}

impl std::fmt::Display for UnplaceableCustomerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "No facility has {} units of capacity left for {}",
            self.demand, self.customer
        )
    }
}

impl std::error::Error for UnplaceableCustomerError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GreedyError {
    Unplaceable(UnplaceableCustomerError),
}

impl std::fmt::Display for GreedyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GreedyError::Unplaceable(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GreedyError {}

impl From<UnplaceableCustomerError> for GreedyError {
    fn from(err: UnplaceableCustomerError) -> Self {
        GreedyError::Unplaceable(err)
    }
}
