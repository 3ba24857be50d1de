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

use std::time::Duration;

/// Exponentially weighted moving average over `f64` samples.
///
/// The first observation seeds the average; later ones are blended in with
/// weight `alpha`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ewma {
    alpha: f64,
    value: Option<f64>,
    samples: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidAlphaError {
    value: f64,
}

impl InvalidAlphaError {
    #[inline]
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl std::fmt::Display for InvalidAlphaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid smoothing factor {}. Allowed range is (0.0, 1.0].",
            self.value
        )
    }
}

impl std::error::Error for InvalidAlphaError {}

#[inline]
fn check_alpha(alpha: f64) -> Result<f64, InvalidAlphaError> {
    if !alpha.is_finite() || alpha <= 0.0 || alpha > 1.0 {
        return Err(InvalidAlphaError::new(alpha));
    }
    Ok(alpha)
}

impl Default for Ewma {
    /// `alpha = 0.2`.
    fn default() -> Self {
        Self {
            alpha: 0.2,
            value: None,
            samples: 0,
        }
    }
}

impl Ewma {
    #[inline]
    pub fn new(alpha: f64) -> Result<Self, InvalidAlphaError> {
        Ok(Self {
            alpha: check_alpha(alpha)?,
            value: None,
            samples: 0,
        })
    }

    /// Picks `alpha` so that a sample's weight halves after `half_life` further
    /// observations.
    #[inline]
    pub fn from_half_life(half_life: f64) -> Result<Self, InvalidAlphaError> {
        if !half_life.is_finite() || half_life <= 0.0 {
            return Err(InvalidAlphaError::new(f64::NAN));
        }
        Self::new(1.0 - 0.5f64.powf(1.0 / half_life))
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    #[inline]
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    #[inline]
    pub fn samples(&self) -> u64 {
        self.samples
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.value.is_some()
    }

    pub fn observe(&mut self, x: f64) -> f64 {
        let next = match self.value {
            None => x,
            Some(current) => self.alpha * x + (1.0 - self.alpha) * current,
        };
        self.value = Some(next);
        self.samples += 1;
        next
    }

    /// Observes a duration in seconds.
    #[inline]
    pub fn observe_duration(&mut self, d: Duration) -> f64 {
        self.observe(d.as_secs_f64())
    }

    #[inline]
    pub fn reset(&mut self) {
        self.value = None;
        self.samples = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_alpha_outside_unit_interval() {
        assert!(Ewma::new(0.0).is_err());
        assert!(Ewma::new(-0.5).is_err());
        assert!(Ewma::new(1.01).is_err());
        assert!(Ewma::new(f64::NAN).is_err());
        assert!(Ewma::new(1.0).is_ok());
    }

    #[test]
    fn test_first_sample_seeds_then_blends() {
        let mut ew = Ewma::new(0.5).unwrap();
        assert_eq!(ew.value(), None);
        assert_eq!(ew.observe(10.0), 10.0);
        assert!((ew.observe(12.0) - 11.0).abs() < 1e-12);
        assert_eq!(ew.samples(), 2);
    }

    #[test]
    fn test_observe_duration_uses_seconds() {
        let mut ew = Ewma::new(1.0).unwrap();
        ew.observe_duration(Duration::from_millis(1500));
        assert!((ew.value().unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_half_life() {
        let ew = Ewma::from_half_life(1.0).unwrap();
        assert!((ew.alpha() - 0.5).abs() < 1e-12);
        assert!(Ewma::from_half_life(0.0).is_err());
        assert!(Ewma::from_half_life(f64::INFINITY).is_err());
    }

    #[test]
    fn test_reset_clears_state() {
        let mut ew = Ewma::new(0.3).unwrap();
        ew.observe(4.0);
        ew.reset();
        assert!(!ew.is_initialized());
        assert_eq!(ew.samples(), 0);
    }
}
