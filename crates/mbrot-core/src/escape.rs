#![forbid(unsafe_code)]

//! Escape-time evaluation of the multibrot recurrence `z → z^d + c`.
//!
//! The orbit starts at `z = c` (not at zero), so a point escaping on the
//! first step reports iteration `0`. The escape index of a point does not
//! depend on the budget: a larger budget only lets more points escape, it
//! never moves an escape that already happened. That is what makes
//! escaped results cacheable across passes.

use num_complex::Complex64;

use crate::config::{ConfigError, parse_finite};

/// `|z| > 2` expressed on the squared norm.
pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Outcome of iterating one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EscapeResult {
    /// `|z| > 2` first held after step `i`, with `i < budget`.
    Escaped(u32),
    /// The orbit stayed bounded for the whole budget.
    NotEscaped,
}

impl EscapeResult {
    #[inline]
    pub const fn is_escaped(self) -> bool {
        matches!(self, Self::Escaped(_))
    }

    /// Escape index, if any.
    #[inline]
    pub const fn escaped_at(self) -> Option<u32> {
        match self {
            Self::Escaped(i) => Some(i),
            Self::NotEscaped => None,
        }
    }

    /// Iteration count fed to the color mapper: the escape index, or `budget`
    /// itself for points that stayed bounded.
    #[inline]
    pub const fn iteration_or(self, budget: u32) -> u32 {
        match self {
            Self::Escaped(i) => i,
            Self::NotEscaped => budget,
        }
    }
}

/// Multibrot exponent `d`.
///
/// Integral exponents are applied by repeated multiplication; anything else
/// goes through the principal branch of `z^d`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Power {
    exponent: f64,
    integral: Option<i32>,
}

impl Power {
    /// The classic Mandelbrot set, `d = 2`.
    pub const MANDELBROT: Self = Self {
        exponent: 2.0,
        integral: Some(2),
    };

    /// # Errors
    ///
    /// Returns [`ConfigError::NonFinite`] for NaN or infinite exponents.
    pub fn new(exponent: f64) -> Result<Self, ConfigError> {
        if !exponent.is_finite() {
            return Err(ConfigError::NonFinite { field: "power" });
        }
        let integral = (exponent.fract() == 0.0 && exponent.abs() <= f64::from(i32::MAX))
            .then_some(exponent as i32);
        Ok(Self { exponent, integral })
    }

    /// Parse a decimal exponent such as `"2"` or `"3.5"`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        Self::new(parse_finite("power", raw)?)
    }

    #[inline]
    pub const fn get(self) -> f64 {
        self.exponent
    }

    #[inline]
    fn apply(self, z: Complex64) -> Complex64 {
        match self.integral {
            Some(n) => z.powi(n),
            None => z.powf(self.exponent),
        }
    }
}

impl Default for Power {
    fn default() -> Self {
        Self::MANDELBROT
    }
}

/// Iterate `z = z^power + c` from `z = c = z0` for at most `budget` steps.
///
/// Returns [`EscapeResult::Escaped`] with the first step index at which
/// `|z| > 2`, or [`EscapeResult::NotEscaped`] if the orbit stays bounded.
/// A zero budget never escapes.
#[inline]
pub fn evaluate(z0: Complex64, power: Power, budget: u32) -> EscapeResult {
    let c = z0;
    let mut z = z0;
    for i in 0..budget {
        z = power.apply(z) + c;
        if z.norm_sqr() > ESCAPE_RADIUS_SQ {
            return EscapeResult::Escaped(i);
        }
    }
    EscapeResult::NotEscaped
}
