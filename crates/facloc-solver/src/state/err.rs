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

use facloc_core::prelude::Cost;

/// The incrementally maintained value disagrees with a from-scratch
/// recomputation beyond the checkpoint tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueDriftError {
    incremental: Cost,
    recomputed: Cost,
}

impl ValueDriftError {
    pub fn new(incremental: Cost, recomputed: Cost) -> Self {
        Self {
            incremental,
            recomputed,
        }
    }

    pub fn incremental(&self) -> Cost {
        self.incremental
    }

    pub fn recomputed(&self) -> Cost {
        self.recomputed
    }

    pub fn drift(&self) -> Cost {
        self.incremental - self.recomputed
    }
}

impl std::fmt::Display for ValueDriftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Incremental value {} drifted from recomputed value {} (drift: {})",
            self.incremental,
            self.recomputed,
            self.drift()
        )
    }
}

impl std::error::Error for ValueDriftError {}
