//! Step-by-step linear algebra.
//!
//! linstep performs vector, matrix and segment computations and returns, along with every result,
//! the ordered derivation that produced it and a short rationale. The output is meant to be shown
//! to a learner, so the intermediate values are as important as the final one.
//!
//! Every operation returns an [`OperationResult`] holding:
//!
//! - `result`: the value with its concrete type (a [`Vector`], a [`Matrix`], an `f64`, ...),
//! - `steps`: the derivation lines, in order,
//! - `explanation`: one sentence describing why the method works.
//!
//! Operations are grouped into four stateless services:
//!
//! - [`VectorAlgebra`]: component-wise arithmetic, dot and cross products, magnitude, angle,
//!   projection, orthogonality and linear dependence.
//! - [`MatrixAlgebra`]: arithmetic, products, cofactor determinants, Gauss-Jordan elimination and
//!   inversion.
//! - [`GramSchmidt`]: orthonormalization of a set of vectors, with verification.
//! - [`SegmentGeometry`]: lengths, midpoints, equations, containment and subdivision of line
//!   segments.
//!
//! ```
//! use linstep::{vec3, VectorAlgebra};
//!
//! let alg = VectorAlgebra::new();
//! let dot = alg.dot(&vec3(1.0, 2.0, 3.0), &vec3(4.0, 5.0, 6.0));
//! assert_eq!(dot.result, 32.0);
//! assert_eq!(dot.steps.last().unwrap(), "= 32");
//! ```
//!
//! # Tolerances
//!
//! Every "is zero" and "is equal" decision compares against one of the [`Tolerances`]. The
//! services use [`Tolerances::DEFAULT`] unless constructed with `with_tolerances`.
//!
//! # Environment Variables
//!
//! [`Tolerances::from_env`] reads the following variables, each overriding one tolerance:
//!
//! * `LINSTEP_EPSILON_ORTHOGONALITY`
//! * `LINSTEP_EPSILON_DEPENDENCE`
//! * `LINSTEP_EPSILON_PIVOT`
//! * `LINSTEP_EPSILON_CONTAINMENT`
//! * `LINSTEP_EPSILON_DIVISION`
//!
//! Log output is configured through `RUST_LOG` as usual once [`init_logger!`] has been called.

use log::LevelFilter;

mod derivation;
mod error;
mod gram_schmidt;
mod matrix_algebra;
mod segment;
mod tolerance;
mod vector_algebra;

pub use derivation::{OperationResult, Value};
pub use error::{MathError, Result};
pub use gram_schmidt::{GramSchmidt, GramSchmidtBasis, OrthogonalityReport, OrthonormalityReport};
pub use linstep_linalg::{vec2, vec3, DimensionError, Matrix, Num, Segment, Vector};
pub use matrix_algebra::MatrixAlgebra;
pub use segment::{ParametricEquation, SegmentGeometry};
pub use tolerance::Tolerances;
pub use vector_algebra::{DependencyReport, VectorAlgebra};

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and linstep will log at *debug* level, unless overridden by `RUST_LOG`.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
