//! Matrix arithmetic, determinants and row reduction with derivations.

use itertools::Itertools;
use linstep_linalg::{Factor, Matrix, Num};

use crate::{MathError, OperationResult, Result, Tolerances};

/// Stateless operations over [`Matrix`] values.
///
/// Inputs are never modified: destructive algorithms like Gauss-Jordan elimination work on a
/// clone. Step text refers to rows and columns 1-based (`R1`, `C[1,2]`), the way they are written
/// by hand.
#[derive(Debug, Clone, Default)]
pub struct MatrixAlgebra {
    tol: Tolerances,
}

/// Output of the elimination loop shared by [`MatrixAlgebra::gauss_jordan`] and
/// [`MatrixAlgebra::inverse`].
struct Reduction {
    matrix: Matrix,
    steps: Vec<String>,
    /// Pivot columns that were skipped because no usable pivot was found.
    skipped: Vec<usize>,
}

impl MatrixAlgebra {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerances(tol: Tolerances) -> Self {
        Self { tol }
    }

    #[inline]
    pub fn tolerances(&self) -> &Tolerances {
        &self.tol
    }

    /// Element-wise sum of two matrices of identical shape.
    pub fn add(&self, a: &Matrix, b: &Matrix) -> Result<OperationResult<Matrix>> {
        self.elementwise(a, b, "add", "+", |x, y| x + y)
    }

    /// Element-wise difference of two matrices of identical shape.
    pub fn subtract(&self, a: &Matrix, b: &Matrix) -> Result<OperationResult<Matrix>> {
        self.elementwise(a, b, "subtract", "-", |x, y| x - y)
    }

    fn elementwise(
        &self,
        a: &Matrix,
        b: &Matrix,
        operation: &'static str,
        symbol: &str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<OperationResult<Matrix>> {
        if a.shape() != b.shape() {
            return Err(MathError::DimensionMismatch {
                operation,
                left: a.shape(),
                right: b.shape(),
            });
        }

        let (la, lb) = (a.label("A"), b.label("B"));
        let result = Matrix::from_fn(a.rows(), a.cols(), |r, c| f(a[(r, c)], b[(r, c)]))?;
        let terms = (0..a.rows())
            .map(|r| {
                format!(
                    "[{}]",
                    (0..a.cols())
                        .map(|c| format!("{} {symbol} {}", Num(a[(r, c)]), Factor(b[(r, c)])))
                        .format(", ")
                )
            })
            .format(", ");
        let steps = vec![
            format!("{la} {symbol} {lb} = [{terms}]"),
            format!("= {result}"),
        ];
        Ok(OperationResult::new(
            result,
            steps,
            format!("Matrices of the same shape are combined element by element ({operation})."),
        ))
    }

    /// Multiplies every element by `k`.
    pub fn scale(&self, a: &Matrix, k: f64) -> OperationResult<Matrix> {
        let la = a.label("A");
        let result = a.map(|v| k * v);
        let steps = vec![
            format!("{}·{la} = {}·{a}", Factor(k), Factor(k)),
            format!("= {result}"),
        ];
        OperationResult::new(
            result,
            steps,
            "A scalar multiple multiplies every element by the scalar.",
        )
    }

    /// Computes the matrix product `A·B`.
    ///
    /// Requires `A.cols() == B.rows()`. Each element of the `A.rows() × B.cols()` result is the dot
    /// product of a row of `A` with a column of `B`, and is recorded as its own step.
    pub fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<OperationResult<Matrix>> {
        if a.cols() != b.rows() {
            return Err(MathError::DimensionMismatch {
                operation: "multiply",
                left: a.shape(),
                right: b.shape(),
            });
        }

        let (la, lb) = (a.label("A"), b.label("B"));
        let mut steps = vec![format!(
            "{la} is {}x{}, {lb} is {}x{}, so {la}·{lb} is {}x{}",
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols(),
            a.rows(),
            b.cols()
        )];
        let mut result = Matrix::zeros(a.rows(), b.cols())?;
        for r in 0..a.rows() {
            for c in 0..b.cols() {
                let value: f64 = (0..a.cols()).map(|k| a[(r, k)] * b[(k, c)]).sum();
                result[(r, c)] = value;
                steps.push(format!(
                    "C[{},{}] = {} = {}",
                    r + 1,
                    c + 1,
                    (0..a.cols())
                        .map(|k| format!("{}·{}", Factor(a[(r, k)]), Factor(b[(k, c)])))
                        .format(" + "),
                    Num(value)
                ));
            }
        }
        steps.push(format!("{la}·{lb} = {result}"));

        Ok(OperationResult::new(
            result,
            steps,
            "Each element of the product is the dot product of a row of the left matrix with a \
             column of the right matrix.",
        ))
    }

    /// Computes the determinant of a square matrix by cofactor expansion along the first row.
    ///
    /// Cofactor expansion takes O(n!) time. It mirrors the hand calculation and produces a
    /// readable derivation, which is the point of this library; for matrices beyond roughly 10×10
    /// it becomes impractically slow, and LU decomposition would be the better choice.
    ///
    /// The steps show the expansion of the top level and the value of each top-level minor.
    pub fn determinant(&self, a: &Matrix) -> Result<OperationResult<f64>> {
        if !a.is_square() {
            return Err(MathError::NotSquare {
                rows: a.rows(),
                cols: a.cols(),
            });
        }

        let la = a.label("A");
        let mut steps = Vec::new();
        let result = match a.rows() {
            1 => {
                let v = a[(0, 0)];
                steps.push(format!("det({la}) = {}", Num(v)));
                v
            }
            2 => {
                let (p, q, r, s) = (a[(0, 0)], a[(0, 1)], a[(1, 0)], a[(1, 1)]);
                let det = p * s - q * r;
                steps.push(format!("det({la}) = a·d - b·c"));
                steps.push(format!(
                    "= {}·{} - {}·{}",
                    Factor(p),
                    Factor(s),
                    Factor(q),
                    Factor(r)
                ));
                steps.push(format!("= {} - {}", Num(p * s), Factor(q * r)));
                steps.push(format!("= {}", Num(det)));
                det
            }
            n => {
                steps.push(format!(
                    "det({la}) = Σⱼ (-1)^(1+j)·a[1,j]·det(M[1,j]), expanding along row 1"
                ));
                let mut terms = Vec::with_capacity(n);
                for j in 0..n {
                    let minor = a.minor(0, j)?;
                    let minor_det = cofactor_determinant(&minor)?;
                    steps.push(format!(
                        "M[1,{}] = {minor}, det(M[1,{}]) = {}",
                        j + 1,
                        j + 1,
                        Num(minor_det)
                    ));
                    let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                    terms.push((sign, a[(0, j)], minor_det));
                }
                steps.push(format!(
                    "= {}",
                    terms
                        .iter()
                        .map(|&(sign, elem, minor)| format!(
                            "{}·{}·{}",
                            if sign > 0.0 { "(+1)" } else { "(-1)" },
                            Factor(elem),
                            Factor(minor)
                        ))
                        .format(" + ")
                ));
                let det: f64 = terms
                    .iter()
                    .map(|&(sign, elem, minor)| sign * elem * minor)
                    .sum();
                steps.push(format!("= {}", Num(det)));
                det
            }
        };

        Ok(OperationResult::new(
            result,
            steps,
            "The determinant is expanded along the first row: each element is multiplied by its \
             signed minor determinant.",
        ))
    }

    /// Reduces `a` to reduced row-echelon form by Gauss-Jordan elimination with partial pivoting.
    ///
    /// For each pivot position `i` (up to `min(rows, cols)`), the row with the largest absolute
    /// value in column `i` is swapped into row `i`. If that value is below the pivot tolerance, the
    /// column has no usable pivot and is skipped. Otherwise the row is divided by the pivot (a step
    /// that is recorded even when the pivot already is 1) and column `i` is eliminated from all
    /// other rows.
    ///
    /// Elimination never fails; singular or rectangular inputs simply produce skipped pivots.
    pub fn gauss_jordan(&self, a: &Matrix) -> OperationResult<Matrix> {
        let la = a.label("A");
        let Reduction {
            matrix,
            mut steps,
            skipped,
        } = self.reduce(a.clone());
        steps.insert(0, format!("{la} = {a}"));
        if !skipped.is_empty() {
            steps.push(format!(
                "no pivot in column(s) {}",
                skipped.iter().map(|c| c + 1).format(", ")
            ));
        }
        steps.push(format!("RREF({la}) = {matrix}"));

        OperationResult::new(
            matrix,
            steps,
            "Row swaps, row scaling and adding multiples of rows preserve the solution set, and \
             bring the matrix to reduced row-echelon form.",
        )
    }

    fn reduce(&self, mut m: Matrix) -> Reduction {
        let eps = self.tol.pivot;
        let mut steps = Vec::new();
        let mut skipped = Vec::new();

        for i in 0..m.rows().min(m.cols()) {
            let (best, pivot) = (i..m.rows())
                .map(|r| (r, m[(r, i)]))
                .fold((i, m[(i, i)]), |acc, (r, v)| {
                    if v.abs() > acc.1.abs() {
                        (r, v)
                    } else {
                        acc
                    }
                });
            log::trace!("column {i}: pivot {pivot} in row {best}");

            if best != i {
                m.swap_rows(i, best);
                steps.push(format!("R{} ↔ R{}: {m}", i + 1, best + 1));
            }

            if pivot.abs() < eps {
                log::debug!("column {i}: pivot {pivot} is below {eps}, skipping");
                steps.push(format!(
                    "|pivot| in column {} is {} < {eps}, skipping",
                    i + 1,
                    Num(pivot.abs())
                ));
                skipped.push(i);
                continue;
            }

            m.scale_row(i, 1.0 / pivot);
            // Remove the rounding residue so that the pivot reads exactly 1.
            m[(i, i)] = 1.0;
            steps.push(format!("R{} → R{} / {}: {m}", i + 1, i + 1, Factor(pivot)));

            for k in 0..m.rows() {
                if k == i {
                    continue;
                }
                let factor = m[(k, i)];
                if factor == 0.0 {
                    continue;
                }
                m.sub_scaled_row(k, i, factor);
                m[(k, i)] = 0.0;
                if factor.abs() > eps {
                    steps.push(format!(
                        "R{} → R{} - {}·R{}: {m}",
                        k + 1,
                        k + 1,
                        Factor(factor),
                        i + 1
                    ));
                }
            }
        }

        Reduction {
            matrix: m,
            steps,
            skipped,
        }
    }

    /// Swaps rows and columns.
    pub fn transpose(&self, a: &Matrix) -> OperationResult<Matrix> {
        let la = a.label("A");
        let result = a.transpose();
        let steps = vec![
            format!(
                "{la} is {}x{}, so {la}ᵀ is {}x{} with {la}ᵀ[j,i] = {la}[i,j]",
                a.rows(),
                a.cols(),
                a.cols(),
                a.rows()
            ),
            format!("{la}ᵀ = {result}"),
        ];
        OperationResult::new(
            result,
            steps,
            "Transposing turns the rows of a matrix into its columns.",
        )
    }

    /// Computes the inverse of a square matrix by reducing the augmented matrix `[A | I]`.
    ///
    /// Fails with [`MathError::NotSquare`] for rectangular input, and with [`MathError::Singular`]
    /// if the left block cannot be reduced to the identity.
    pub fn inverse(&self, a: &Matrix) -> Result<OperationResult<Matrix>> {
        if !a.is_square() {
            return Err(MathError::NotSquare {
                rows: a.rows(),
                cols: a.cols(),
            });
        }

        let la = a.label("A");
        let n = a.rows();
        let augmented = a.augment(&Matrix::identity(n)?)?;
        let mut steps = vec![format!("[{la} | I] = {augmented}")];
        let reduction = self.reduce(augmented);
        steps.extend(reduction.steps);
        if let Some(&col) = reduction.skipped.first() {
            log::debug!("inverse: no pivot in column {col}, matrix is singular");
            return Err(MathError::Singular);
        }

        let result = reduction.matrix.column_block(n, 2 * n)?;
        steps.push(format!("{la}⁻¹ = {result}"));
        Ok(OperationResult::new(
            result,
            steps,
            "Reducing [A | I] to [I | B] applies the row operations that turn A into I to the \
             identity, which yields B = A⁻¹.",
        ))
    }
}

fn cofactor_determinant(m: &Matrix) -> Result<f64> {
    match m.rows() {
        1 => Ok(m[(0, 0)]),
        2 => Ok(m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)]),
        n => {
            let mut det = 0.0;
            for j in 0..n {
                let elem = m[(0, j)];
                if elem == 0.0 {
                    continue;
                }
                let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                det += sign * elem * cofactor_determinant(&m.minor(0, j)?)?;
            }
            Ok(det)
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::DMatrix;

    use super::*;

    fn m(data: &[&[f64]]) -> Matrix {
        Matrix::from_rows(data.iter().map(|row| row.to_vec()).collect()).unwrap()
    }

    fn random_matrix(rng: &mut fastrand::Rng, rows: usize, cols: usize) -> Matrix {
        Matrix::from_fn(rows, cols, |_, _| rng.f64() * 10.0 - 5.0).unwrap()
    }

    fn to_nalgebra(a: &Matrix) -> DMatrix<f64> {
        let flat: Vec<f64> = a.as_rows().iter().flatten().copied().collect();
        DMatrix::from_row_slice(a.rows(), a.cols(), &flat)
    }

    fn alg() -> MatrixAlgebra {
        MatrixAlgebra::new()
    }

    #[test]
    fn add_and_subtract() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = m(&[&[5.0, -6.0], &[7.0, 8.0]]);
        let sum = alg().add(&a, &b).unwrap();
        assert_eq!(sum.result, m(&[&[6.0, -4.0], &[10.0, 12.0]]));
        assert_eq!(sum.steps[0], "A + B = [[1 + 5, 2 + (-6)], [3 + 7, 4 + 8]]");
        assert_eq!(
            alg().subtract(&sum.result, &b).unwrap().result,
            a
        );
    }

    #[test]
    fn add_shape_mismatch() {
        let a = m(&[&[1.0, 2.0, 3.0]]);
        let b = m(&[&[1.0], &[2.0], &[3.0]]);
        assert_eq!(
            alg().add(&a, &b).unwrap_err(),
            MathError::DimensionMismatch {
                operation: "add",
                left: (1, 3),
                right: (3, 1),
            }
        );
    }

    #[test]
    fn scale() {
        let a = m(&[&[1.0, -2.0]]).named("P");
        let res = alg().scale(&a, 3.0);
        assert_eq!(res.result, m(&[&[3.0, -6.0]]));
        assert_eq!(res.steps[0], "3·P = 3·[[1, -2]]");
    }

    #[test]
    fn multiply() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = m(&[&[5.0, 6.0], &[7.0, 8.0]]);
        let res = alg().multiply(&a, &b).unwrap();
        assert_eq!(res.result, m(&[&[19.0, 22.0], &[43.0, 50.0]]));
        assert_eq!(res.steps[1], "C[1,1] = 1·5 + 2·7 = 19");
        assert_eq!(res.steps.len(), 6);
    }

    #[test]
    fn multiply_rectangular() {
        let a = m(&[&[1.0, 0.0, 2.0]]);
        let b = m(&[&[1.0], &[5.0], &[-1.0]]);
        let res = alg().multiply(&a, &b).unwrap();
        assert_eq!(res.result.shape(), (1, 1));
        assert_eq!(res.result[(0, 0)], -1.0);

        assert_eq!(
            alg().multiply(&a, &a).unwrap_err(),
            MathError::DimensionMismatch {
                operation: "multiply",
                left: (1, 3),
                right: (1, 3),
            }
        );
    }

    #[test]
    fn multiply_is_associative() {
        let mut rng = fastrand::Rng::with_seed(0xdecaf);
        for _ in 0..20 {
            let (p, q, r, s) = (
                rng.usize(1..5),
                rng.usize(1..5),
                rng.usize(1..5),
                rng.usize(1..5),
            );
            let a = random_matrix(&mut rng, p, q);
            let b = random_matrix(&mut rng, q, r);
            let c = random_matrix(&mut rng, r, s);
            let ab_c = alg()
                .multiply(&alg().multiply(&a, &b).unwrap().result, &c)
                .unwrap()
                .result;
            let a_bc = alg()
                .multiply(&a, &alg().multiply(&b, &c).unwrap().result)
                .unwrap()
                .result;
            assert_relative_eq!(ab_c, a_bc, epsilon = 1e-9, max_relative = 1e-9);
        }
    }

    #[test]
    fn determinant_small() {
        let res = alg().determinant(&m(&[&[7.5]])).unwrap();
        assert_eq!(res.result, 7.5);

        let res = alg().determinant(&m(&[&[1.0, 2.0], &[3.0, 4.0]])).unwrap();
        assert_eq!(res.result, -2.0);
        assert_eq!(res.steps[1], "= 1·4 - 2·3");
        assert_eq!(res.steps.last().unwrap(), "= -2");
    }

    #[test]
    fn determinant_3x3() {
        let a = m(&[&[2.0, 0.0, 1.0], &[1.0, 3.0, 2.0], &[1.0, 1.0, 2.0]]);
        let res = alg().determinant(&a).unwrap();
        assert_eq!(res.result, 6.0);
        // Expansion header, three minors, the combined terms and the value.
        assert_eq!(res.steps.len(), 6);
        assert_eq!(res.steps[1], "M[1,1] = [[3, 2], [1, 2]], det(M[1,1]) = 4");
    }

    #[test]
    fn determinant_matches_nalgebra() {
        let mut rng = fastrand::Rng::with_seed(1234);
        for n in 1..=6 {
            let a = random_matrix(&mut rng, n, n);
            let expected = to_nalgebra(&a).determinant();
            let actual = alg().determinant(&a).unwrap().result;
            assert_relative_eq!(actual, expected, epsilon = 1e-9, max_relative = 1e-9);
        }
    }

    #[test]
    fn determinant_not_square() {
        assert_eq!(
            alg().determinant(&m(&[&[1.0, 2.0]])).unwrap_err(),
            MathError::NotSquare { rows: 1, cols: 2 }
        );
    }

    #[test]
    fn gauss_jordan_solves_system() {
        let a = m(&[&[2.0, 1.0, 5.0], &[1.0, 3.0, 10.0]]);
        let res = alg().gauss_jordan(&a);
        assert_relative_eq!(res.result, m(&[&[1.0, 0.0, 1.0], &[0.0, 1.0, 3.0]]), epsilon = 1e-12);
        assert_eq!(res.steps[1], "R1 → R1 / 2: [[1, 0.5, 2.5], [1, 3, 10]]");
        // input is left alone
        assert_eq!(a[(0, 0)], 2.0);
    }

    #[test]
    fn gauss_jordan_records_every_pivot_division() {
        let res = alg().gauss_jordan(&Matrix::identity(2).unwrap());
        assert_eq!(
            res.steps,
            [
                "A = [[1, 0], [0, 1]]",
                "R1 → R1 / 1: [[1, 0], [0, 1]]",
                "R2 → R2 / 1: [[1, 0], [0, 1]]",
                "RREF(A) = [[1, 0], [0, 1]]",
            ]
        );
    }

    #[test]
    fn gauss_jordan_pivots_on_largest() {
        let a = m(&[&[1.0, 2.0], &[4.0, 1.0]]);
        let res = alg().gauss_jordan(&a);
        assert_eq!(res.steps[1], "R1 ↔ R2: [[4, 1], [1, 2]]");
        assert_relative_eq!(res.result, Matrix::identity(2).unwrap(), epsilon = 1e-12);
    }

    #[test]
    fn gauss_jordan_full_rank_gives_identity() {
        let mut rng = fastrand::Rng::with_seed(42);
        for n in 1..=5 {
            let a = loop {
                let a = random_matrix(&mut rng, n, n);
                if to_nalgebra(&a).determinant().abs() > 0.1 {
                    break a;
                }
            };
            let res = alg().gauss_jordan(&a);
            assert_relative_eq!(res.result, Matrix::identity(n).unwrap(), epsilon = 1e-9);
        }
    }

    #[test]
    fn gauss_jordan_singular_skips() {
        let a = m(&[&[1.0, 2.0], &[2.0, 4.0]]);
        let res = alg().gauss_jordan(&a);
        assert_abs_diff_eq!(res.result, m(&[&[1.0, 2.0], &[0.0, 0.0]]), epsilon = 1e-12);
        assert!(res.steps.iter().any(|s| s.contains("skipping")));
        assert!(res.result.is_zero_row(1, 1e-12));
    }

    #[test]
    fn gauss_jordan_tall_matrix() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
        let res = alg().gauss_jordan(&a);
        assert_eq!(res.result.shape(), (3, 2));
        assert_abs_diff_eq!(res.result[(0, 0)], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(res.result[(1, 1)], 1.0, epsilon = 1e-12);
        assert!(res.result.is_zero_row(2, 1e-9));
    }

    #[test]
    fn transpose() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let res = alg().transpose(&a);
        assert_eq!(res.result, m(&[&[1.0, 4.0], &[2.0, 5.0], &[3.0, 6.0]]));
        assert_eq!(alg().transpose(&res.result).result, a);
    }

    #[test]
    fn inverse() {
        let a = m(&[&[4.0, 7.0], &[2.0, 6.0]]);
        let res = alg().inverse(&a).unwrap();
        assert_relative_eq!(
            res.result,
            m(&[&[0.6, -0.7], &[-0.2, 0.4]]),
            epsilon = 1e-12
        );
        let product = alg().multiply(&a, &res.result).unwrap().result;
        assert_relative_eq!(product, Matrix::identity(2).unwrap(), epsilon = 1e-12);
    }

    #[test]
    fn inverse_errors() {
        assert_eq!(
            alg().inverse(&m(&[&[1.0, 2.0], &[2.0, 4.0]])).unwrap_err(),
            MathError::Singular
        );
        assert_eq!(
            alg().inverse(&m(&[&[1.0, 2.0]])).unwrap_err(),
            MathError::NotSquare { rows: 1, cols: 2 }
        );
    }
}
