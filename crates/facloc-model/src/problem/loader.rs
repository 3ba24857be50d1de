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

use crate::problem::{builder::ProblemBuilder, err::ProblemLoaderError, prob::Problem};
use facloc_core::prelude::Location;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// Upper bound on the records reserved up front from the header counts.
const PREALLOCATION_LIMIT: usize = 1 << 16;

/// Reads instances in the plain text format
///
/// ```text
/// <facility_count> <customer_count>
/// <setup_cost> <capacity> <x> <y>     (facility_count lines)
/// <demand> <x> <y>                    (customer_count lines)
/// ```
///
/// Tokens are whitespace separated; line breaks carry no meaning beyond
/// error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemLoader {
    allow_trailing_data: bool,
}

impl Default for ProblemLoader {
    fn default() -> Self {
        Self {
            allow_trailing_data: false,
        }
    }
}

impl ProblemLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn allow_trailing_data(mut self, yes: bool) -> Self {
        self.allow_trailing_data = yes;
        self
    }

    pub fn from_bufread<R: BufRead>(&self, br: R) -> Result<Problem, ProblemLoaderError> {
        let mut sc = Scanner::new(br);
        let n_facilities = sc.next_usize()?;
        let n_customers = sc.next_usize()?;
        if n_facilities == 0 {
            return Err(ProblemLoaderError::NoFacilities);
        }

        // Counts are untrusted until the records are actually read.
        let mut builder = ProblemBuilder::with_capacities(
            n_facilities.min(PREALLOCATION_LIMIT),
            n_customers.min(PREALLOCATION_LIMIT),
        );
        for _ in 0..n_facilities {
            let setup_cost = sc.next_f64()?;
            let capacity = sc.next_f64()?;
            let x = sc.next_f64()?;
            let y = sc.next_f64()?;
            builder.add_facility(setup_cost, capacity, Location::new(x, y));
        }

        for _ in 0..n_customers {
            let demand = sc.next_f64()?;
            let x = sc.next_f64()?;
            let y = sc.next_f64()?;
            builder.add_customer(demand, Location::new(x, y));
        }

        if !self.allow_trailing_data && sc.has_more()? {
            return Err(ProblemLoaderError::TrailingData { line: sc.line() });
        }

        Ok(builder.build()?)
    }

    #[inline]
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<Problem, ProblemLoaderError> {
        let file = File::open(path).map_err(ProblemLoaderError::Io)?;
        self.from_bufread(BufReader::new(file))
    }

    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Problem, ProblemLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Problem, ProblemLoaderError> {
        self.from_bufread(s.as_bytes())
    }
}

/// Whitespace tokenizer over a buffered reader that remembers the current
/// line number.
#[derive(Debug)]
pub(crate) struct Scanner<R: BufRead> {
    rdr: R,
    buf: String,
    pos: usize,
    line: usize,
}

impl<R: BufRead> Scanner<R> {
    pub(crate) fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            pos: 0,
            line: 0,
        }
    }

    #[inline]
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    /// Reads the next line; `Ok(false)` at end of input.
    #[inline]
    fn fill_line(&mut self) -> std::io::Result<bool> {
        self.buf.clear();
        self.pos = 0;
        let n = self.rdr.read_line(&mut self.buf)?;
        if n == 0 {
            return Ok(false);
        }
        self.line += 1;
        Ok(true)
    }

    /// Advances to the next token; `Ok(false)` if input is exhausted.
    fn skip_ws(&mut self) -> std::io::Result<bool> {
        loop {
            let bytes = self.buf.as_bytes();
            while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos < bytes.len() {
                return Ok(true);
            }
            if !self.fill_line()? {
                return Ok(false);
            }
        }
    }

    pub(crate) fn next_token(&mut self) -> Result<&str, ProblemLoaderError> {
        if !self.skip_ws()? {
            return Err(ProblemLoaderError::UnexpectedEof { line: self.line });
        }
        let start = self.pos;
        let bytes = self.buf.as_bytes();
        while self.pos < bytes.len() && !bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        Ok(&self.buf[start..self.pos])
    }

    pub(crate) fn has_more(&mut self) -> Result<bool, ProblemLoaderError> {
        Ok(self.skip_ws()?)
    }

    pub(crate) fn next_usize(&mut self) -> Result<usize, ProblemLoaderError> {
        let tok = self.next_token()?;
        let parsed = tok.parse::<usize>();
        parsed.map_err(|source| ProblemLoaderError::ParseInt {
            line: self.line,
            source,
        })
    }

    pub(crate) fn next_f64(&mut self) -> Result<f64, ProblemLoaderError> {
        let tok = self.next_token()?;
        let parsed = tok.parse::<f64>();
        parsed.map_err(|source| ProblemLoaderError::ParseFloat {
            line: self.line,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{common::CustomerIndex, problem::ProblemError};

    const SMALL_OK: &str = "3 4
100 100 1065.0 1065.0
100 100 1062.0 1062.0
100 500 0.0 0.0
50 1397.0 1397.0
50 1398.0 1398.0
75 1399.0 1399.0
75 586.0 586.0
";

    #[test]
    fn test_loads_small_instance() {
        let p = ProblemLoader::new().from_str(SMALL_OK).unwrap();
        assert_eq!(p.facility_count(), 3);
        assert_eq!(p.customer_count(), 4);
        assert_eq!(p.facilities()[2].capacity(), 500.0);
        assert_eq!(p.customers()[3].demand(), 75.0);
        assert_eq!(p.customers()[3].location(), Location::new(586.0, 586.0));
    }

    #[test]
    fn test_tokens_may_span_lines() {
        let p = ProblemLoader::new()
            .from_str("1\n1\n0 10\n0 0\n1\n2 2\n")
            .unwrap();
        assert_eq!(p.facility_count(), 1);
        assert_eq!(p.customers()[0].location(), Location::new(2.0, 2.0));
    }

    #[test]
    fn test_truncated_input_reports_eof() {
        let err = ProblemLoader::new().from_str("2 1\n0 10 0 0\n").unwrap_err();
        assert!(matches!(err, ProblemLoaderError::UnexpectedEof { line: 2 }));
    }

    #[test]
    fn test_oversized_counts_report_eof() {
        let err = ProblemLoader::new()
            .from_str("1 18446744073709551615\n1 1 0 0\n")
            .unwrap_err();
        assert!(matches!(err, ProblemLoaderError::UnexpectedEof { line: 2 }));

        let err = ProblemLoader::new()
            .from_str("18446744073709551615 0\n1 1 0 0\n")
            .unwrap_err();
        assert!(matches!(err, ProblemLoaderError::UnexpectedEof { line: 2 }));
    }

    #[test]
    fn test_non_numeric_field_reports_line() {
        let err = ProblemLoader::new()
            .from_str("1 1\n0 10 0 0\nabc 1 1\n")
            .unwrap_err();
        assert!(matches!(err, ProblemLoaderError::ParseFloat { line: 3, .. }));
    }

    #[test]
    fn test_negative_count_is_a_parse_error() {
        let err = ProblemLoader::new().from_str("-1 2\n").unwrap_err();
        assert!(matches!(err, ProblemLoaderError::ParseInt { line: 1, .. }));
    }

    #[test]
    fn test_zero_facilities_rejected() {
        let err = ProblemLoader::new().from_str("0 0\n").unwrap_err();
        assert!(matches!(err, ProblemLoaderError::NoFacilities));
    }

    #[test]
    fn test_trailing_data() {
        let text = "1 1\n0 10 0 0\n1 1 1\n42\n";
        let err = ProblemLoader::new().from_str(text).unwrap_err();
        assert!(matches!(err, ProblemLoaderError::TrailingData { line: 4 }));
        assert!(ProblemLoader::new().allow_trailing_data(true).from_str(text).is_ok());
    }

    #[test]
    fn test_invalid_demand_surfaces_problem_error() {
        let err = ProblemLoader::new()
            .from_str("1 1\n0 10 0 0\n0 1 1\n")
            .unwrap_err();
        match err {
            ProblemLoaderError::Problem(ProblemError::InvalidCustomer(e)) => {
                assert_eq!(e.index(), CustomerIndex::new(0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_all_instances_from_workspace_root_instances_folder() {
        use std::fs;
        use std::path::{Path, PathBuf};

        fn find_instances_dir() -> Option<PathBuf> {
            let mut cur: Option<&Path> = Some(Path::new(env!("CARGO_MANIFEST_DIR")));
            while let Some(p) = cur {
                let cand = p.join("instances");
                if cand.is_dir() {
                    return Some(cand);
                }
                cur = p.parent();
            }
            None
        }

        let inst_dir = find_instances_dir().expect(
            "Could not find an `instances/` directory in any ancestor of CARGO_MANIFEST_DIR",
        );

        let mut files: Vec<PathBuf> = fs::read_dir(&inst_dir)
            .expect("read_dir(instances) failed")
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().map(|x| x == "txt").unwrap_or(false))
            .collect();
        files.sort();

        assert!(
            !files.is_empty(),
            "No .txt instance files found in {}",
            inst_dir.display()
        );

        let loader = ProblemLoader::default();
        for path in files {
            let problem = loader
                .from_path(&path)
                .unwrap_or_else(|e| panic!("Failed to load {}: {e}", path.display()));
            assert!(problem.facility_count() > 0, "{}", path.display());
            assert!(problem.customer_count() > 0, "{}", path.display());
        }
    }
}
