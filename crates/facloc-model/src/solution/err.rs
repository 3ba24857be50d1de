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

use std::num::{ParseFloatError, ParseIntError};

#[derive(Debug)]
pub enum SolutionLoaderError {
    Io(std::io::Error),
    MissingHeader,
    MissingField { line: usize, field: &'static str },
    ParseInt { line: usize, source: ParseIntError },
    ParseFloat { line: usize, source: ParseFloatError },
    InvalidOptimalFlag { line: usize, found: String },
    TrailingData { line: usize },
}

impl From<std::io::Error> for SolutionLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl std::fmt::Display for SolutionLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use SolutionLoaderError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            MissingHeader => write!(f, "solution text is empty"),
            MissingField { line, field } => write!(f, "line {line}: missing {field}"),
            ParseInt { line, source } => write!(f, "line {line}: parse-int error: {source}"),
            ParseFloat { line, source } => write!(f, "line {line}: parse-float error: {source}"),
            InvalidOptimalFlag { line, found } => {
                write!(f, "line {line}: optimal flag must be 0 or 1, found `{found}`")
            }
            TrailingData { line } => write!(f, "line {line}: unexpected data after solution"),
        }
    }
}

impl std::error::Error for SolutionLoaderError {}
