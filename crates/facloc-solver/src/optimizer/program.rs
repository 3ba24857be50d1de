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

//! Solver-agnostic 0/1 linear programs.

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(pub usize);

impl Var {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Var({})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sense {
    Minimize,
    Maximize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Le,
    Eq,
    Ge,
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparison::Le => write!(f, "<="),
            Comparison::Eq => write!(f, "="),
            Comparison::Ge => write!(f, ">="),
        }
    }
}

/// `sum(coef * var) <cmp> rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    terms: Vec<(Var, f64)>,
    comparison: Comparison,
    rhs: f64,
}

impl LinearConstraint {
    #[inline]
    pub fn new(terms: Vec<(Var, f64)>, comparison: Comparison, rhs: f64) -> Self {
        Self {
            terms,
            comparison,
            rhs,
        }
    }

    #[inline]
    pub fn terms(&self) -> &[(Var, f64)] {
        &self.terms
    }

    #[inline]
    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    #[inline]
    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    #[inline]
    pub fn activity(&self, assignment: &[bool]) -> f64 {
        self.terms
            .iter()
            .filter(|(v, _)| assignment[v.get()])
            .map(|(_, c)| *c)
            .sum()
    }

    #[inline]
    pub fn is_satisfied(&self, assignment: &[bool], tolerance: f64) -> bool {
        let lhs = self.activity(assignment);
        match self.comparison {
            Comparison::Le => lhs <= self.rhs + tolerance,
            Comparison::Ge => lhs >= self.rhs - tolerance,
            Comparison::Eq => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

/// A program over binary variables with linear constraints and a linear
/// objective.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryProgram {
    names: Vec<String>,
    constraints: Vec<LinearConstraint>,
    objective: Vec<(Var, f64)>,
    objective_constant: f64,
    sense: Sense,
}

impl BinaryProgram {
    #[inline]
    pub fn new(sense: Sense) -> Self {
        Self {
            names: Vec::new(),
            constraints: Vec::new(),
            objective: Vec::new(),
            objective_constant: 0.0,
            sense,
        }
    }

    #[inline]
    pub fn add_binary(&mut self, name: impl Into<String>) -> Var {
        let v = Var(self.names.len());
        self.names.push(name.into());
        v
    }

    #[inline]
    pub fn add_constraint(&mut self, terms: Vec<(Var, f64)>, comparison: Comparison, rhs: f64) {
        debug_assert!(terms.iter().all(|(v, _)| v.get() < self.names.len()));
        self.constraints
            .push(LinearConstraint::new(terms, comparison, rhs));
    }

    #[inline]
    pub fn set_objective(&mut self, terms: Vec<(Var, f64)>, constant: f64) {
        debug_assert!(terms.iter().all(|(v, _)| v.get() < self.names.len()));
        self.objective = terms;
        self.objective_constant = constant;
    }

    #[inline]
    pub fn variables_len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn name(&self, v: Var) -> &str {
        &self.names[v.get()]
    }

    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[inline]
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    #[inline]
    pub fn objective(&self) -> &[(Var, f64)] {
        &self.objective
    }

    #[inline]
    pub fn objective_constant(&self) -> f64 {
        self.objective_constant
    }

    #[inline]
    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Objective value of a full assignment.
    pub fn evaluate(&self, assignment: &[bool]) -> f64 {
        debug_assert_eq!(assignment.len(), self.names.len());
        self.objective_constant
            + self
                .objective
                .iter()
                .filter(|(v, _)| assignment[v.get()])
                .map(|(_, c)| *c)
                .sum::<f64>()
    }

    pub fn is_feasible(&self, assignment: &[bool], tolerance: f64) -> bool {
        assignment.len() == self.names.len()
            && self
                .constraints
                .iter()
                .all(|c| c.is_satisfied(assignment, tolerance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knapsack() -> BinaryProgram {
        // max 3a + 4b + 5c  s.t.  2a + 3b + 4c <= 5,  a + c >= 1
        let mut p = BinaryProgram::new(Sense::Maximize);
        let a = p.add_binary("a");
        let b = p.add_binary("b");
        let c = p.add_binary("c");
        p.add_constraint(vec![(a, 2.0), (b, 3.0), (c, 4.0)], Comparison::Le, 5.0);
        p.add_constraint(vec![(a, 1.0), (c, 1.0)], Comparison::Ge, 1.0);
        p.set_objective(vec![(a, 3.0), (b, 4.0), (c, 5.0)], 0.5);
        p
    }

    #[test]
    fn test_variables_are_numbered_in_order() {
        let p = knapsack();
        assert_eq!(p.variables_len(), 3);
        assert_eq!(p.name(Var(1)), "b");
        assert_eq!(p.constraints().len(), 2);
        assert_eq!(p.sense(), Sense::Maximize);
    }

    #[test]
    fn test_evaluate_includes_constant() {
        let p = knapsack();
        assert_eq!(p.evaluate(&[true, true, false]), 7.5);
        assert_eq!(p.evaluate(&[false, false, false]), 0.5);
    }

    #[test]
    fn test_feasibility() {
        let p = knapsack();
        assert!(p.is_feasible(&[true, true, false], 1e-9));
        assert!(!p.is_feasible(&[false, true, false], 1e-9));
        assert!(!p.is_feasible(&[true, true, true], 1e-9));
        assert!(!p.is_feasible(&[true, true], 1e-9));
    }

    #[test]
    fn test_equality_uses_tolerance() {
        let mut p = BinaryProgram::new(Sense::Minimize);
        let x = p.add_binary("x");
        p.add_constraint(vec![(x, 1.0 + 1e-12)], Comparison::Eq, 1.0);
        assert!(p.is_feasible(&[true], 1e-9));
        assert!(!p.is_feasible(&[false], 1e-9));
    }
}
