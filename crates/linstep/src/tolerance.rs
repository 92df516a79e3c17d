//! Numeric tolerances, one per family of operations.

use std::env::{self, VarError};

use anyhow::{bail, Context};

/// Floating-point tolerances used by the operation services.
///
/// Inputs are floats, so "zero" and "equal" are always decided against one of these values. Each
/// family of operations has its own tolerance; see the field docs for which operations use it.
///
/// The [`Default`] impl provides the standard values. [`Tolerances::from_env`] additionally allows
/// overriding them through environment variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Maximum `|a · b|` for two vectors to count as orthogonal, and maximum deviation of a
    /// magnitude from 1 for a vector to count as normalized.
    pub orthogonality: f64,
    /// Magnitude below which a cross product, triple product or Gram-Schmidt remainder is treated
    /// as zero, marking the inputs as linearly dependent.
    ///
    /// This is an absolute bound and does not scale with the inputs: vectors whose length is
    /// around this value or below are reported as dependent regardless of their directions.
    pub dependence: f64,
    /// Pivot magnitude below which Gauss-Jordan elimination skips a row, and factor magnitude below
    /// which an elimination step is not recorded.
    pub pivot: f64,
    /// Default maximum distance for a point to count as lying on a segment.
    pub containment: f64,
    /// Magnitude below which a divisor (vector length, squared length) is treated as zero.
    pub division: f64,
}

impl Tolerances {
    pub const DEFAULT: Self = Self {
        orthogonality: 1e-4,
        dependence: 1e-4,
        pivot: 1e-4,
        containment: 1e-3,
        division: 1e-12,
    };

    /// Creates [`Tolerances`] from the defaults, overridden by any of the following environment
    /// variables that are set:
    ///
    /// * `LINSTEP_EPSILON_ORTHOGONALITY`
    /// * `LINSTEP_EPSILON_DEPENDENCE`
    /// * `LINSTEP_EPSILON_PIVOT`
    /// * `LINSTEP_EPSILON_CONTAINMENT`
    /// * `LINSTEP_EPSILON_DIVISION`
    ///
    /// Values must parse as positive, finite `f64`s.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut tol = Self::DEFAULT;
        for (var, field) in [
            ("LINSTEP_EPSILON_ORTHOGONALITY", &mut tol.orthogonality),
            ("LINSTEP_EPSILON_DEPENDENCE", &mut tol.dependence),
            ("LINSTEP_EPSILON_PIVOT", &mut tol.pivot),
            ("LINSTEP_EPSILON_CONTAINMENT", &mut tol.containment),
            ("LINSTEP_EPSILON_DIVISION", &mut tol.division),
        ] {
            if let Some(value) = read_var(var)? {
                log::debug!("tolerance override: `{var}` is set to {value}");
                *field = value;
            }
        }
        Ok(tol)
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn read_var(var: &str) -> anyhow::Result<Option<f64>> {
    let raw = match env::var(var) {
        Ok(raw) => raw,
        Err(VarError::NotPresent) => return Ok(None),
        Err(VarError::NotUnicode(s)) => {
            bail!("invalid value set for `{var}`: {}", s.to_string_lossy())
        }
    };
    parse_tolerance(&raw).with_context(|| format!("invalid value set for `{var}`"))
}

fn parse_tolerance(raw: &str) -> anyhow::Result<Option<f64>> {
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("'{raw}' is not a number"))?;
    if !value.is_finite() || value <= 0.0 {
        bail!("'{raw}' is not a positive, finite tolerance");
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let tol = Tolerances::default();
        assert_eq!(tol.orthogonality, 1e-4);
        assert_eq!(tol.pivot, 1e-4);
        assert_eq!(tol.containment, 1e-3);
    }

    #[test]
    fn parse() {
        assert_eq!(parse_tolerance("1e-6").unwrap(), Some(1e-6));
        assert_eq!(parse_tolerance(" 0.5 ").unwrap(), Some(0.5));
        assert!(parse_tolerance("abc").is_err());
        assert!(parse_tolerance("0").is_err());
        assert!(parse_tolerance("-1e-3").is_err());
        assert!(parse_tolerance("inf").is_err());
    }

    #[test]
    fn env_override() {
        env::set_var("LINSTEP_EPSILON_CONTAINMENT", "0.25");
        let tol = Tolerances::from_env().unwrap();
        env::remove_var("LINSTEP_EPSILON_CONTAINMENT");
        assert_eq!(tol.containment, 0.25);
        assert_eq!(tol.pivot, Tolerances::DEFAULT.pivot);
    }
}
