//! Gram-Schmidt orthonormalization.

use itertools::Itertools;
use linstep_linalg::{Num, Vector};

use crate::{
    vector_algebra::labels, MathError, OperationResult, Result, Tolerances, VectorAlgebra,
};

/// Bases produced by [`GramSchmidt::orthonormalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct GramSchmidtBasis {
    /// Mutually orthogonal vectors `u₁, u₂, ...` spanning the same space as the input.
    pub orthogonal: Vec<Vector>,
    /// `orthogonal`, with every vector scaled to unit length.
    pub orthonormal: Vec<Vector>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrthogonalityReport {
    pub is_orthogonal: bool,
    /// Pairwise dot products; `dot_matrix[i][j] = vᵢ · vⱼ`.
    pub dot_matrix: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrthonormalityReport {
    pub is_orthonormal: bool,
    /// Magnitude of every input vector, in input order.
    pub magnitudes: Vec<f64>,
}

/// Gram-Schmidt orthonormalization and orthogonality checks, built on [`VectorAlgebra`].
#[derive(Debug, Clone, Default)]
pub struct GramSchmidt {
    alg: VectorAlgebra,
}

impl GramSchmidt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerances(tol: Tolerances) -> Self {
        Self {
            alg: VectorAlgebra::with_tolerances(tol),
        }
    }

    #[inline]
    pub fn tolerances(&self) -> &Tolerances {
        self.alg.tolerances()
    }

    /// Turns `vectors` into an orthogonal and an orthonormal basis of their span.
    ///
    /// Each `uᵢ` is `vᵢ` minus its projections onto the previously computed `u₁ … uᵢ₋₁`, and
    /// `eᵢ = uᵢ / |uᵢ|`. The steps end with a verification block listing `eᵢ · eⱼ` for every pair
    /// `i < j`.
    ///
    /// # Errors
    ///
    /// - [`MathError::EmptyInput`] if `vectors` is empty.
    /// - [`MathError::LinearDependence`] if some `uᵢ` is shorter than the dependence tolerance,
    ///   meaning `vᵢ` lies in the span of the vectors before it. The tolerance is an absolute
    ///   length, so an input vector that is itself shorter than it (such as `(1e-5, 0, 0)` with the
    ///   default of `1e-4`) is rejected as well.
    /// - [`MathError::NonFinite`] if a projection overflows or an input component is not finite.
    pub fn orthonormalize(&self, vectors: &[Vector]) -> Result<OperationResult<GramSchmidtBasis>> {
        if vectors.is_empty() {
            return Err(MathError::EmptyInput {
                operation: "Gram-Schmidt",
            });
        }

        let eps = self.tolerances().dependence;
        let names = labels(vectors);
        let mut steps = Vec::new();
        let mut orthogonal: Vec<Vector> = Vec::with_capacity(vectors.len());
        let mut orthonormal = Vec::with_capacity(vectors.len());

        for (i, v) in vectors.iter().enumerate() {
            let n = i + 1;
            let v = v.clone().named(names[i].clone());
            let mut u = Vector::new(v.x, v.y, v.z);
            if orthogonal.is_empty() {
                steps.push(format!("u{n} = {} = {u}", names[i]));
            } else {
                let mut terms = Vec::with_capacity(orthogonal.len());
                for prev in &orthogonal {
                    let proj = self.alg.project(&v, prev)?;
                    steps.push(format!(
                        "proj_{u_name}({}) = ({} / {})·{u_name} = {}",
                        names[i],
                        Num(v.dot(prev)),
                        Num(prev.length2()),
                        proj.result,
                        u_name = prev.label("u"),
                    ));
                    u -= &proj.result;
                    terms.push(format!("proj_{}({})", prev.label("u"), names[i]));
                }
                steps.push(format!(
                    "u{n} = {} - {} = {u}",
                    names[i],
                    terms.iter().format(" - ")
                ));
            }

            let length = u.length();
            if length < eps {
                log::debug!("Gram-Schmidt: |u{n}| = {length} is below {eps}");
                steps.push(format!("|u{n}| = {} < {eps}", Num(length)));
                return Err(MathError::LinearDependence { index: i });
            }

            let u = u.named(format!("u{n}"));
            let e = self.alg.normalize(&u)?.result.named(format!("e{n}"));
            steps.push(format!("|u{n}| = {}, e{n} = u{n} / |u{n}| = {e}", Num(length)));
            orthogonal.push(u);
            orthonormal.push(e);
        }

        steps.push("Verification:".to_string());
        for (a, b) in orthonormal.iter().tuple_combinations() {
            steps.push(format!(
                "{} · {} = {}",
                a.label("e"),
                b.label("e"),
                Num(a.dot(b))
            ));
        }

        Ok(OperationResult::new(
            GramSchmidtBasis {
                orthogonal,
                orthonormal,
            },
            steps,
            "Subtracting the projections onto the previous vectors removes every shared direction, \
             and dividing by the magnitude makes each vector unit length.",
        ))
    }

    /// Checks whether every pair of distinct vectors is orthogonal.
    ///
    /// An empty or single-vector set is trivially orthogonal.
    pub fn is_orthogonal_set(&self, vectors: &[Vector]) -> OperationResult<OrthogonalityReport> {
        let eps = self.tolerances().orthogonality;
        let names = labels(vectors);
        let dot_matrix = vectors
            .iter()
            .map(|a| vectors.iter().map(|b| a.dot(b)).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        let mut steps = Vec::new();
        let mut is_orthogonal = true;
        for (i, j) in (0..vectors.len()).tuple_combinations() {
            let dot = dot_matrix[i][j];
            let ok = dot.abs() < eps;
            is_orthogonal &= ok;
            steps.push(format!(
                "{} · {} = {}{}",
                names[i],
                names[j],
                Num(dot),
                if ok { "" } else { " ≠ 0" }
            ));
        }
        steps.push(if is_orthogonal {
            "all pairwise dot products vanish".to_string()
        } else {
            "some pairwise dot products do not vanish".to_string()
        });

        OperationResult::new(
            OrthogonalityReport {
                is_orthogonal,
                dot_matrix,
            },
            steps,
            "A set is orthogonal when the dot product of every pair of distinct vectors is zero.",
        )
    }

    /// Checks whether the vectors are pairwise orthogonal and each of unit length.
    pub fn is_orthonormal_set(&self, vectors: &[Vector]) -> OperationResult<OrthonormalityReport> {
        let eps = self.tolerances().orthogonality;
        let names = labels(vectors);
        let orthogonal = self.is_orthogonal_set(vectors);
        let mut steps = orthogonal.steps;

        let magnitudes = vectors.iter().map(Vector::length).collect::<Vec<_>>();
        let mut unit = true;
        for (name, &m) in names.iter().zip(&magnitudes) {
            let ok = (m - 1.0).abs() < eps;
            unit &= ok;
            steps.push(format!("|{name}| = {}{}", Num(m), if ok { "" } else { " ≠ 1" }));
        }

        let is_orthonormal = orthogonal.result.is_orthogonal && unit;
        OperationResult::new(
            OrthonormalityReport {
                is_orthonormal,
                magnitudes,
            },
            steps,
            "An orthonormal set is orthogonal and consists of unit vectors.",
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use linstep_linalg::vec3;

    use super::*;

    fn gs() -> GramSchmidt {
        GramSchmidt::new()
    }

    #[test]
    fn two_vectors_in_plane() {
        let res = gs()
            .orthonormalize(&[vec3(3.0, 1.0, 0.0), vec3(2.0, 2.0, 0.0)])
            .unwrap();
        let basis = &res.result;
        assert_relative_eq!(basis.orthogonal[1], vec3(-0.4, 1.2, 0.0), epsilon = 1e-12);

        let inv = 1.0 / 10f64.sqrt();
        assert_relative_eq!(basis.orthonormal[0], vec3(3.0 * inv, inv, 0.0), epsilon = 1e-12);
        assert_relative_eq!(basis.orthonormal[1], vec3(-inv, 3.0 * inv, 0.0), epsilon = 1e-12);
        assert_eq!(basis.orthonormal[0].to_string(), "e1(0.9487, 0.3162, 0)");

        assert_eq!(res.steps[0], "u1 = v1 = (3, 1, 0)");
        assert_eq!(res.steps[2], "proj_u1(v2) = (8 / 10)·u1 = (2.4, 0.8, 0)");
        assert_eq!(res.steps.last().unwrap(), "e1 · e2 = 0");
    }

    #[test]
    fn three_vectors_are_orthonormal() {
        let vs = [vec3(1.0, 1.0, 0.0), vec3(1.0, 0.0, 1.0), vec3(0.0, 1.0, 1.0)];
        let res = gs().orthonormalize(&vs).unwrap();
        let e = &res.result.orthonormal;
        for (a, b) in e.iter().tuple_combinations() {
            assert_abs_diff_eq!(a.dot(b), 0.0, epsilon = 1e-12);
        }
        for v in e {
            assert_relative_eq!(v.length(), 1.0, epsilon = 1e-12);
        }
        assert!(gs().is_orthonormal_set(e).result.is_orthonormal);
        // 3 pairs verified
        let verify = res.steps.iter().position(|s| s == "Verification:").unwrap();
        assert_eq!(res.steps.len() - verify - 1, 3);
    }

    #[test]
    fn dependent_input() {
        let vs = [vec3(1.0, 2.0, 3.0), vec3(2.0, 4.0, 6.0)];
        assert_eq!(
            gs().orthonormalize(&vs).unwrap_err(),
            MathError::LinearDependence { index: 1 }
        );
        assert_eq!(
            gs().orthonormalize(&[Vector::ZERO]).unwrap_err(),
            MathError::LinearDependence { index: 0 }
        );
        assert_eq!(
            gs().orthonormalize(&[]).unwrap_err(),
            MathError::EmptyInput {
                operation: "Gram-Schmidt"
            }
        );
    }

    #[test]
    fn huge_and_tiny_inputs() {
        let res = gs().orthonormalize(&[vec3(1e200, 0.0, 0.0)]).unwrap();
        assert_relative_eq!(res.result.orthonormal[0], Vector::X);

        let overflowing = [vec3(1e200, 0.0, 0.0), vec3(1e200, 1e200, 0.0)];
        assert_eq!(
            gs().orthonormalize(&overflowing).unwrap_err(),
            MathError::NonFinite {
                operation: "projection"
            }
        );

        let tiny = [vec3(1e-5, 0.0, 0.0)];
        assert_eq!(
            gs().orthonormalize(&tiny).unwrap_err(),
            MathError::LinearDependence { index: 0 }
        );
        let fine = GramSchmidt::with_tolerances(Tolerances {
            dependence: 1e-9,
            ..Tolerances::DEFAULT
        });
        let res = fine.orthonormalize(&tiny).unwrap();
        assert_relative_eq!(res.result.orthonormal[0], Vector::X);
    }

    #[test]
    fn random_independent_sets() {
        let mut rng = fastrand::Rng::with_seed(0x65);
        let mut checked = 0;
        while checked < 50 {
            let vs: Vec<Vector> = (0..3)
                .map(|_| vec3(rng.f64() - 0.5, rng.f64() - 0.5, rng.f64() - 0.5))
                .collect();
            if vs[0].dot(&vs[1].cross(&vs[2])).abs() < 0.05 {
                continue;
            }
            let e = gs().orthonormalize(&vs).unwrap().result.orthonormal;
            let report = gs().is_orthonormal_set(&e);
            assert!(report.result.is_orthonormal, "{:?}", report.result);
            checked += 1;
        }
    }

    #[test]
    fn orthogonal_set() {
        let res = gs().is_orthogonal_set(&[Vector::X, Vector::Y, vec3(0.0, 0.0, 5.0)]);
        assert!(res.result.is_orthogonal);
        assert_eq!(res.result.dot_matrix[2][2], 25.0);
        assert_eq!(res.result.dot_matrix[0][1], 0.0);

        let res = gs().is_orthogonal_set(&[Vector::X, vec3(1.0, 1.0, 0.0)]);
        assert!(!res.result.is_orthogonal);
        assert_eq!(res.steps[0], "v1 · v2 = 1 ≠ 0");

        assert!(gs().is_orthogonal_set(&[]).result.is_orthogonal);
    }

    #[test]
    fn orthonormal_set() {
        let res = gs().is_orthonormal_set(&[Vector::X, Vector::Y]);
        assert!(res.result.is_orthonormal);
        assert_eq!(res.result.magnitudes, [1.0, 1.0]);

        let res = gs().is_orthonormal_set(&[Vector::X, vec3(0.0, 2.0, 0.0)]);
        assert!(!res.result.is_orthonormal);
        assert_eq!(res.result.magnitudes, [1.0, 2.0]);
    }
}
