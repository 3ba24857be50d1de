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
    common::FacilityIndex,
    solution::{err::SolutionLoaderError, sol::Solution},
};
use std::{fs, path::Path};

/// Parses the answer format written by [`Solution`]'s `Display` impl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolutionLoader;

impl SolutionLoader {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    pub fn from_str(&self, s: &str) -> Result<Solution, SolutionLoaderError> {
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let (header_line, header) = lines.next().ok_or(SolutionLoaderError::MissingHeader)?;
        let mut fields = header.split_whitespace();
        let value = fields
            .next()
            .ok_or(SolutionLoaderError::MissingField {
                line: header_line,
                field: "value",
            })?
            .parse::<f64>()
            .map_err(|source| SolutionLoaderError::ParseFloat {
                line: header_line,
                source,
            })?;
        let optimal = match fields.next() {
            Some("0") => false,
            Some("1") => true,
            Some(other) => {
                return Err(SolutionLoaderError::InvalidOptimalFlag {
                    line: header_line,
                    found: other.to_string(),
                });
            }
            None => {
                return Err(SolutionLoaderError::MissingField {
                    line: header_line,
                    field: "optimal flag",
                });
            }
        };
        if fields.next().is_some() {
            return Err(SolutionLoaderError::TrailingData { line: header_line });
        }

        // An instance without customers has an empty attendance line.
        let mut attendance = Vec::new();
        if let Some((line, body)) = lines.next() {
            for tok in body.split_whitespace() {
                let idx = tok
                    .parse::<usize>()
                    .map_err(|source| SolutionLoaderError::ParseInt { line, source })?;
                attendance.push(FacilityIndex::new(idx));
            }
        }
        if let Some((line, _)) = lines.next() {
            return Err(SolutionLoaderError::TrailingData { line });
        }

        Ok(Solution::new(attendance, value, optimal))
    }

    #[inline]
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<Solution, SolutionLoaderError> {
        let text = fs::read_to_string(path)?;
        self.from_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_written_solution() {
        let original = Solution::new(
            vec![FacilityIndex::new(2), FacilityIndex::new(0), FacilityIndex::new(2)],
            3269.821320343,
            true,
        );
        let parsed = SolutionLoader::new().from_str(&original.to_string()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_tolerates_trailing_newline_and_blank_lines() {
        let s = SolutionLoader::new().from_str("\n10.5 0\n\n0 1\n\n").unwrap();
        assert_eq!(s.value(), 10.5);
        assert!(!s.is_optimal());
        assert_eq!(s.customer_count(), 2);
    }

    #[test]
    fn test_rejects_bad_flag() {
        let err = SolutionLoader::new().from_str("10 2\n0\n").unwrap_err();
        assert!(matches!(err, SolutionLoaderError::InvalidOptimalFlag { line: 1, .. }));
    }

    #[test]
    fn test_rejects_bad_index() {
        let err = SolutionLoader::new().from_str("10 0\n0 x\n").unwrap_err();
        assert!(matches!(err, SolutionLoaderError::ParseInt { line: 2, .. }));
    }

    #[test]
    fn test_rejects_extra_lines() {
        let err = SolutionLoader::new().from_str("10 0\n0\n1\n").unwrap_err();
        assert!(matches!(err, SolutionLoaderError::TrailingData { line: 3 }));
    }

    #[test]
    fn test_empty_text() {
        assert!(matches!(
            SolutionLoader::new().from_str("  \n"),
            Err(SolutionLoaderError::MissingHeader)
        ));
    }
}
