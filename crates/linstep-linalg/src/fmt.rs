use std::fmt;

/// Number of decimal places shown in derivation text.
const DECIMALS: i32 = 4;

/// Formats an `f64` the way it should appear in derivation steps.
///
/// Values are rounded to 4 decimal places, trailing zeros are dropped, integral values are printed
/// without a fractional part, and negative zero is printed as `0`.
///
/// # Examples
///
/// ```
/// # use linstep_linalg::Num;
/// assert_eq!(Num(5.0).to_string(), "5");
/// assert_eq!(Num(2.5).to_string(), "2.5");
/// assert_eq!(Num(0.948683).to_string(), "0.9487");
/// assert_eq!(Num(-0.00001).to_string(), "0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Num(pub f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if !value.is_finite() {
            return write!(f, "{value}");
        }

        let scale = 10f64.powi(DECIMALS);
        let rounded = (value * scale).round() / scale;
        if rounded == 0.0 {
            return f.write_str("0");
        }
        if rounded.fract() == 0.0 && rounded.abs() < 1e15 {
            return write!(f, "{}", rounded as i64);
        }

        let text = format!("{rounded:.prec$}", prec = DECIMALS as usize);
        f.write_str(text.trim_end_matches('0').trim_end_matches('.'))
    }
}

/// Formats a number as a factor inside a product, parenthesizing negative values.
///
/// ```
/// # use linstep_linalg::Factor;
/// assert_eq!(format!("2·{}", Factor(-3.0)), "2·(-3)");
/// assert_eq!(format!("2·{}", Factor(3.0)), "2·3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Factor(pub f64);

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num = Num(self.0);
        if num.to_string().starts_with('-') {
            write!(f, "({num})")
        } else {
            write!(f, "{num}")
        }
    }
}
