//! Vector arithmetic with derivations.

use itertools::Itertools;
use linstep_linalg::{Factor, Num, Vector};

use crate::{MathError, OperationResult, Result, Tolerances};

/// Outcome of [`VectorAlgebra::check_linear_dependence`].
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyReport {
    pub dependent: bool,
    /// Human-readable verdict naming the redundant vectors.
    pub explanation: String,
    /// 0-based positions of vectors that lie in the span of the vectors before them and can be
    /// dropped without changing the span of the set.
    pub redundant_indices: Vec<usize>,
}

/// Stateless operations over [`Vector`]s.
///
/// Every operation leaves its inputs untouched and returns a freshly allocated result together
/// with the steps that produced it. Operand names (see [`Vector::named`]) are used in the step
/// text; unnamed operands are called `a`, `b`, `v`, ...
#[derive(Debug, Clone, Default)]
pub struct VectorAlgebra {
    tol: Tolerances,
}

impl VectorAlgebra {
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

    /// Component-wise sum `a + b`.
    pub fn add(&self, a: &Vector, b: &Vector) -> OperationResult<Vector> {
        let (la, lb) = (a.label("a"), b.label("b"));
        let result = a + b;
        let steps = vec![
            format!("{la} + {lb} = ({la}x + {lb}x, {la}y + {lb}y, {la}z + {lb}z)"),
            format!("= {}", componentwise(a, b, "+")),
            format!("= {result}"),
        ];
        OperationResult::new(
            result,
            steps,
            "Vectors are added by adding their corresponding components.",
        )
    }

    /// Component-wise difference `a - b`.
    pub fn subtract(&self, a: &Vector, b: &Vector) -> OperationResult<Vector> {
        let (la, lb) = (a.label("a"), b.label("b"));
        let result = a - b;
        let steps = vec![
            format!("{la} - {lb} = ({la}x - {lb}x, {la}y - {lb}y, {la}z - {lb}z)"),
            format!("= {}", componentwise(a, b, "-")),
            format!("= {result}"),
        ];
        OperationResult::new(
            result,
            steps,
            "Vectors are subtracted by subtracting their corresponding components.",
        )
    }

    /// Multiplies every component of `v` by `k`.
    pub fn scale(&self, v: &Vector, k: f64) -> OperationResult<Vector> {
        let lv = v.label("v");
        let result = v * k;
        let k_text = Factor(k);
        let steps = vec![
            format!("{k_text}·{lv} = ({k_text}·{lv}x, {k_text}·{lv}y, {k_text}·{lv}z)"),
            format!(
                "= ({k_text}·{}, {k_text}·{}, {k_text}·{})",
                Factor(v.x),
                Factor(v.y),
                Factor(v.z)
            ),
            format!("= {result}"),
        ];
        OperationResult::new(
            result,
            steps,
            "Multiplying by a scalar scales every component by the same factor.",
        )
    }

    /// Returns `-v`.
    pub fn negate(&self, v: &Vector) -> OperationResult<Vector> {
        let lv = v.label("v");
        let result = -v;
        let steps = vec![
            format!("-{lv} = (-1)·{lv}"),
            format!("= {result}"),
        ];
        OperationResult::new(
            result,
            steps,
            "The opposite vector has the same length and points the other way.",
        )
    }

    /// Computes the dot product `Σ aᵢbᵢ`.
    pub fn dot(&self, a: &Vector, b: &Vector) -> OperationResult<f64> {
        let (la, lb) = (a.label("a"), b.label("b"));
        let result = a.dot(b);
        let pairs = a.to_array().into_iter().zip(b.to_array());
        let steps = vec![
            format!("{la} · {lb} = {la}x·{lb}x + {la}y·{lb}y + {la}z·{lb}z"),
            format!(
                "= {}",
                pairs
                    .clone()
                    .map(|(x, y)| format!("{}·{}", Factor(x), Factor(y)))
                    .format(" + ")
            ),
            format!("= {}", pairs.map(|(x, y)| Factor(x * y)).format(" + ")),
            format!("= {}", Num(result)),
        ];
        OperationResult::new(
            result,
            steps,
            "The dot product is the sum of the products of corresponding components.",
        )
    }

    /// Computes the cross product `a × b`.
    pub fn cross(&self, a: &Vector, b: &Vector) -> OperationResult<Vector> {
        let (la, lb) = (a.label("a"), b.label("b"));
        let result = a.cross(b);
        let [ax, ay, az] = a.to_array();
        let [bx, by, bz] = b.to_array();
        let component = |axis: char, p: f64, q: f64, r: f64, s: f64, value: f64| {
            format!(
                "{axis} = {}·{} - {}·{} = {}",
                Factor(p),
                Factor(q),
                Factor(r),
                Factor(s),
                Num(value)
            )
        };
        let steps = vec![
            format!(
                "{la} × {lb} = |i j k; {} {} {}; {} {} {}|",
                Num(ax),
                Num(ay),
                Num(az),
                Num(bx),
                Num(by),
                Num(bz)
            ),
            component('x', ay, bz, az, by, result.x),
            component('y', az, bx, ax, bz, result.y),
            component('z', ax, by, ay, bx, result.z),
            format!("{la} × {lb} = {result}"),
        ];
        OperationResult::new(
            result,
            steps,
            "The cross product expands the determinant with the unit vectors i, j, k in the first \
             row and is perpendicular to both operands.",
        )
    }

    /// Computes the Euclidean length `√(x² + y² + z²)`.
    pub fn magnitude(&self, v: &Vector) -> OperationResult<f64> {
        let lv = v.label("v");
        let result = v.length();
        let steps = vec![
            format!("|{lv}| = √({lv}x² + {lv}y² + {lv}z²)"),
            format!(
                "= √({})",
                v.to_array().iter().map(|&c| format!("{}²", Factor(c))).format(" + ")
            ),
            format!("= √{}", Num(v.length2())),
            format!("= {}", Num(result)),
        ];
        OperationResult::new(
            result,
            steps,
            "The magnitude is the square root of the sum of the squared components.",
        )
    }

    /// Computes the Euclidean distance `|b - a|`.
    pub fn distance(&self, a: &Vector, b: &Vector) -> OperationResult<f64> {
        let (la, lb) = (a.label("a"), b.label("b"));
        let diff = b - a;
        let result = diff.length();
        let steps = vec![
            format!("{lb} - {la} = {diff}"),
            format!(
                "d({la}, {lb}) = √({})",
                diff.to_array().iter().map(|&c| format!("{}²", Factor(c))).format(" + ")
            ),
            format!("= {}", Num(result)),
        ];
        OperationResult::new(
            result,
            steps,
            "The distance between two points is the magnitude of their difference.",
        )
    }

    /// Divides `v` by its magnitude, producing a unit vector.
    ///
    /// Fails with [`MathError::DivisionByZero`] when `v` is (numerically) the zero vector, and
    /// with [`MathError::NonFinite`] when a component is infinite or `NaN`.
    pub fn normalize(&self, v: &Vector) -> Result<OperationResult<Vector>> {
        let lv = v.label("v");
        let magnitude = self.magnitude(v);
        let length = magnitude.result;
        if length < self.tol.division {
            return Err(MathError::DivisionByZero {
                operation: "normalize",
            });
        }
        if !length.is_finite() {
            return Err(MathError::NonFinite {
                operation: "normalize",
            });
        }

        let result = v / length;
        let mut steps = magnitude.steps;
        steps.push(format!("{lv} / |{lv}| = {v_plain} / {}", Num(length), v_plain = plain(v)));
        steps.push(format!("= {result}"));
        Ok(OperationResult::new(
            result,
            steps,
            "Dividing a vector by its magnitude keeps its direction and makes its length 1.",
        ))
    }

    /// Computes the angle between `a` and `b` in degrees.
    ///
    /// The angle is undefined when either operand has zero magnitude; that case fails with
    /// [`MathError::DivisionByZero`] instead of producing `NaN`. If the dot product overflows, or
    /// an operand is not finite, the call fails with [`MathError::NonFinite`].
    pub fn angle_degrees(&self, a: &Vector, b: &Vector) -> Result<OperationResult<f64>> {
        let (la, lb) = (a.label("a"), b.label("b"));
        let (ma, mb) = (a.length(), b.length());
        if ma < self.tol.division || mb < self.tol.division {
            return Err(MathError::DivisionByZero { operation: "angle" });
        }

        let dot = self.dot(a, b);
        if !(dot.result.is_finite() && ma.is_finite() && mb.is_finite()) {
            log::debug!("angle: a · b = {}, |a| = {ma}, |b| = {mb}", dot.result);
            return Err(MathError::NonFinite { operation: "angle" });
        }
        let mut steps = dot.steps;
        steps.push(format!("|{la}| = {}", Num(ma)));
        steps.push(format!("|{lb}| = {}", Num(mb)));
        // Rounding can push the quotient just outside of acos' domain.
        let cos = (dot.result / ma / mb).clamp(-1.0, 1.0);
        steps.push(format!(
            "cos θ = ({la} · {lb}) / (|{la}|·|{lb}|) = {} / ({}·{}) = {}",
            Num(dot.result),
            Num(ma),
            Num(mb),
            Num(cos)
        ));
        let result = cos.acos().to_degrees();
        steps.push(format!("θ = arccos({}) = {}°", Num(cos), Num(result)));
        Ok(OperationResult::new(
            result,
            steps,
            "The cosine of the angle equals the dot product divided by the product of the \
             magnitudes.",
        ))
    }

    /// Projects `a` onto `b`: `(a·b / b·b) b`.
    ///
    /// Fails with [`MathError::DivisionByZero`] when `b` is the zero vector, and with
    /// [`MathError::NonFinite`] when `a · b` or `b · b` overflows.
    pub fn project(&self, a: &Vector, b: &Vector) -> Result<OperationResult<Vector>> {
        let (la, lb) = (a.label("a"), b.label("b"));
        if b.length() < self.tol.division {
            return Err(MathError::DivisionByZero {
                operation: "projection",
            });
        }

        let dot_ab = a.dot(b);
        let dot_bb = b.length2();
        let factor = dot_ab / dot_bb;
        let result = b * factor;
        if !(dot_ab.is_finite() && dot_bb.is_finite() && result.is_finite()) {
            log::debug!("projection: a · b = {dot_ab}, b · b = {dot_bb}");
            return Err(MathError::NonFinite {
                operation: "projection",
            });
        }
        let steps = vec![
            format!("proj_{lb}({la}) = (({la} · {lb}) / ({lb} · {lb}))·{lb}"),
            format!("{la} · {lb} = {}", Num(dot_ab)),
            format!("{lb} · {lb} = {}", Num(dot_bb)),
            format!(
                "factor = {} / {} = {}",
                Num(dot_ab),
                Num(dot_bb),
                Num(factor)
            ),
            format!("proj_{lb}({la}) = {}·{} = {result}", Factor(factor), plain(b)),
        ];
        Ok(OperationResult::new(
            result,
            steps,
            "The projection is the component of the first vector along the direction of the \
             second.",
        ))
    }

    /// Adds up all `vectors`.
    ///
    /// Fails with [`MathError::EmptyInput`] if `vectors` is empty.
    pub fn sum_many(&self, vectors: &[Vector]) -> Result<OperationResult<Vector>> {
        let (first, rest) = vectors
            .split_first()
            .ok_or(MathError::EmptyInput { operation: "sum" })?;

        let labels = labels(vectors);
        let mut acc = plain(first);
        let mut steps = vec![format!(
            "{} = {}",
            labels.iter().format(" + "),
            vectors.iter().map(plain).format(" + ")
        )];
        for (v, label) in rest.iter().zip(&labels[1..]) {
            let next = &acc + v;
            steps.push(format!("{acc} + {label}{} = {next}", plain(v)));
            acc = next;
        }
        steps.push(format!("= {acc}"));

        Ok(OperationResult::new(
            acc,
            steps,
            "A sum of vectors accumulates the components of every term.",
        ))
    }

    /// Checks whether `|a · b|` is below the orthogonality tolerance.
    pub fn are_orthogonal(&self, a: &Vector, b: &Vector) -> OperationResult<bool> {
        let (la, lb) = (a.label("a"), b.label("b"));
        let dot = self.dot(a, b);
        let eps = self.tol.orthogonality;
        let result = dot.result.abs() < eps;
        let mut steps = dot.steps;
        steps.push(if result {
            format!("|{la} · {lb}| < {eps}, so {la} ⊥ {lb}")
        } else {
            format!("|{la} · {lb}| ≥ {eps}, so {la} and {lb} are not orthogonal")
        });
        OperationResult::new(
            result,
            steps,
            "Two vectors are orthogonal when their dot product is zero.",
        )
    }

    /// Determines whether `vectors` are linearly dependent, and which of them are redundant.
    ///
    /// Each vector is tested against the span of the non-redundant vectors before it:
    ///
    /// - against nothing: it is redundant if it is the zero vector,
    /// - against one vector: it is redundant if their cross product vanishes (they are parallel),
    /// - against two vectors: it is redundant if the scalar triple product, which is the 3×3
    ///   determinant of the three vectors, vanishes (they are coplanar),
    /// - against three vectors: it is always redundant, since 3-space has no room for a fourth
    ///   independent direction.
    ///
    /// "Vanishes" means falling below the dependence tolerance. An empty set is independent.
    ///
    /// The tolerance is an absolute bound, while cross and triple products scale with the
    /// magnitudes of their operands. Very short vectors are therefore reported as dependent even
    /// when they point in different directions: `(0.001, 0, 0)` and `(0, 0.001, 0)` have a cross
    /// product of length `1e-6`. Scale the input, or pass a smaller
    /// [`Tolerances::dependence`], when working at such magnitudes.
    pub fn check_linear_dependence(&self, vectors: &[Vector]) -> OperationResult<DependencyReport> {
        let eps = self.tol.dependence;
        let labels = labels(vectors);
        let mut steps = Vec::new();

        if vectors.is_empty() {
            let report = DependencyReport {
                dependent: false,
                explanation: "An empty set of vectors is linearly independent by convention."
                    .to_string(),
                redundant_indices: Vec::new(),
            };
            steps.push("The set contains no vectors.".to_string());
            return OperationResult::new(report, steps, "There is nothing to combine.");
        }
        if vectors.len() > 3 {
            steps.push(format!(
                "{} vectors in 3-dimensional space: the rank is at most 3, so the set is dependent",
                vectors.len()
            ));
        }

        let mut basis: Vec<usize> = Vec::new();
        let mut redundant = Vec::new();
        for (i, v) in vectors.iter().enumerate() {
            let label = &labels[i];
            let in_span = match *basis.as_slice() {
                [] => {
                    let m = v.length();
                    steps.push(format!("|{label}| = {}", Num(m)));
                    m < eps
                }
                [p] => {
                    let cross = vectors[p].cross(v);
                    let m = cross.length();
                    steps.push(format!(
                        "{} × {label} = {cross}, |{} × {label}| = {}",
                        labels[p],
                        labels[p],
                        Num(m)
                    ));
                    m < eps
                }
                [p, q] => {
                    let det = vectors[p].dot(&vectors[q].cross(v));
                    steps.push(format!(
                        "det[{}; {}; {label}] = {} · ({} × {label}) = {}",
                        labels[p],
                        labels[q],
                        labels[p],
                        labels[q],
                        Num(det)
                    ));
                    det.abs() < eps
                }
                _ => {
                    steps.push(format!(
                        "{}, {}, {} already span 3-space",
                        labels[basis[0]], labels[basis[1]], labels[basis[2]]
                    ));
                    true
                }
            };

            if in_span {
                steps.push(format!("→ {label} is redundant"));
                redundant.push(i);
            } else {
                basis.push(i);
            }
        }

        let dependent = !redundant.is_empty();
        log::debug!(
            "linear dependence of {} vectors: dependent={dependent}, redundant={redundant:?}",
            vectors.len()
        );
        let explanation = if dependent {
            format!(
                "The vectors are linearly dependent: {} can be expressed through the others.",
                redundant.iter().map(|&i| &labels[i]).format(", ")
            )
        } else {
            "The vectors are linearly independent: none lies in the span of the others.".to_string()
        };
        let report = DependencyReport {
            dependent,
            explanation,
            redundant_indices: redundant,
        };
        OperationResult::new(
            report,
            steps,
            "A set is dependent when some vector is a linear combination of the others, which \
             shows up as a vanishing cross product or determinant.",
        )
    }
}

/// Formats `a op b` component by component, e.g. `(1 + 4, 2 + 5, 3 + 6)`.
fn componentwise(a: &Vector, b: &Vector, op: &str) -> String {
    format!(
        "({})",
        a.to_array()
            .into_iter()
            .zip(b.to_array())
            .map(|(x, y)| format!("{} {op} {}", Num(x), Factor(y)))
            .format(", ")
    )
}

/// Returns `v` without its name, so that it displays as a bare tuple.
fn plain(v: &Vector) -> Vector {
    Vector::new(v.x, v.y, v.z)
}

/// Labels for a list of vectors: their names, or `v1`, `v2`, ... when unnamed.
pub(crate) fn labels(vectors: &[Vector]) -> Vec<String> {
    vectors
        .iter()
        .enumerate()
        .map(|(i, v)| match v.name() {
            Some(name) => name.to_string(),
            None => format!("v{}", i + 1),
        })
        .collect()
}
