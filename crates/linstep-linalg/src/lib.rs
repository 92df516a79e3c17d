//! Value types for the linstep derivation engine.
//!
//! This crate holds the numeric entities that the operation services in `linstep` consume and
//! produce:
//!
//! - [`Vector`]: a 3-component `f64` vector with an optional name tag. 2D vectors use `z = 0`.
//! - [`Matrix`]: a row-major `rows × cols` grid of `f64` whose shape is validated on construction.
//! - [`Segment`]: a pair of [`Vector`]s treated as the endpoints of a line segment.
//!
//! Neither type performs any derivation bookkeeping; they only provide the arithmetic the services
//! build on, plus [`Num`] for rendering numbers in derivation text.
//!
//! # Approximate Equality
//!
//! [`Vector`] and [`Matrix`] implement [`approx::AbsDiffEq`] and [`approx::RelativeEq`], so the
//! `approx` assertion macros work on them directly:
//!
//! ```
//! # use linstep_linalg::*;
//! use approx::assert_relative_eq;
//!
//! let third = vec3(1.0, 1.0, 1.0) / 3.0;
//! assert_relative_eq!(third * 3.0, vec3(1.0, 1.0, 1.0));
//! ```

mod error;
mod fmt;
mod matrix;
mod segment;
mod vector;

pub use error::*;
pub use fmt::*;
pub use matrix::*;
pub use segment::*;
pub use vector::*;
