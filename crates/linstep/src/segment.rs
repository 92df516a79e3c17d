//! Line segment geometry with derivations.

use itertools::Itertools;
use linstep_linalg::{Factor, Num, Segment, Vector};

use crate::{MathError, OperationResult, Result, Tolerances};

const AXES: [char; 3] = ['x', 'y', 'z'];

/// Machine-readable form of `P(t) = start + t·direction`, `t ∈ [0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParametricEquation {
    pub start: Vector,
    pub direction: Vector,
    /// The equation as text, e.g. `P(t) = (1, 2, 0) + t·(3, 4, 0), t ∈ [0, 1]`.
    pub text: String,
}

/// Operations on [`Segment`]s.
#[derive(Debug, Clone, Default)]
pub struct SegmentGeometry {
    tol: Tolerances,
}

impl SegmentGeometry {
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

    /// Euclidean distance between the endpoints.
    pub fn length(&self, seg: &Segment) -> OperationResult<f64> {
        let (ls, la, lb) = labels(seg);
        let d = seg.direction();
        let result = d.length();
        let steps = vec![
            format!("{lb} - {la} = {}", d),
            format!(
                "|{ls}| = √({})",
                d.to_array().iter().map(|&c| format!("{}²", Factor(c))).format(" + ")
            ),
            format!("= √{}", Num(d.length2())),
            format!("= {}", Num(result)),
        ];
        OperationResult::new(
            result,
            steps,
            "The length of a segment is the distance between its endpoints.",
        )
    }

    /// Component-wise average of the endpoints.
    pub fn midpoint(&self, seg: &Segment) -> OperationResult<Vector> {
        let (ls, _, _) = labels(seg);
        let (s, e) = (&seg.start, &seg.end);
        let result = (s + e) / 2.0;
        let steps = vec![
            format!(
                "M = ({})",
                s.to_array()
                    .into_iter()
                    .zip(e.to_array())
                    .map(|(a, b)| format!("({} + {})/2", Num(a), Factor(b)))
                    .format(", ")
            ),
            format!("M = {result}"),
        ];
        OperationResult::new(
            result,
            steps,
            format!("The midpoint of {ls} averages the coordinates of its endpoints."),
        )
    }

    /// Returns `end - start`, which is the zero vector for a degenerate segment.
    pub fn direction_vector(&self, seg: &Segment) -> OperationResult<Vector> {
        let (_, la, lb) = labels(seg);
        let result = seg.direction();
        let steps = vec![
            format!("d = {lb} - {la}"),
            format!(
                "= ({})",
                seg.end
                    .to_array()
                    .into_iter()
                    .zip(seg.start.to_array())
                    .map(|(b, a)| format!("{} - {}", Num(b), Factor(a)))
                    .format(", ")
            ),
            format!("= {result}"),
        ];
        OperationResult::new(
            result,
            steps,
            "The direction vector points from the start of the segment to its end.",
        )
    }

    /// Returns the point at parameter `t`, `start + t·(end - start)`.
    ///
    /// `t = 0` yields the start and `t = 1` the end; other values extrapolate along the line.
    pub fn point_at(&self, seg: &Segment, t: f64) -> OperationResult<Vector> {
        let (_, la, _) = labels(seg);
        let d = seg.direction();
        let result = seg.point_at(t);
        let steps = vec![
            format!("P({}) = {la} + {}·d", Num(t), Factor(t)),
            format!("= {} + {}·{}", plain(&seg.start), Factor(t), d),
            format!("= {result}"),
        ];
        OperationResult::new(
            result,
            steps,
            "Points on the segment are reached by moving from the start along the direction vector.",
        )
    }

    /// Builds the parametric equation `P(t) = start + t·d`, `t ∈ [0, 1]`.
    pub fn parametric_equation(&self, seg: &Segment) -> OperationResult<ParametricEquation> {
        let start = plain(&seg.start);
        let direction = seg.direction();
        let text = format!("P(t) = {start} + t·{direction}, t ∈ [0, 1]");
        let mut steps = vec![format!("d = {direction}")];
        for ((axis, s), d) in AXES.iter().zip(start.to_array()).zip(direction.to_array()) {
            steps.push(format!("{axis}(t) = {} + {}·t", Num(s), Factor(d)));
        }
        steps.push(text.clone());
        OperationResult::new(
            ParametricEquation {
                start,
                direction,
                text,
            },
            steps,
            "Every point of the segment is the start point plus a fraction t of the direction \
             vector.",
        )
    }

    /// Builds the continuous (symmetric) equation `(x - x₀)/dx = (y - y₀)/dy = (z - z₀)/dz`.
    ///
    /// Axes along which the segment does not move cannot appear in a ratio and are written as
    /// fixed coordinates after the ratios, e.g. `(x - 1)/3 = (y - 2)/4, z = 0`. If only one axis
    /// varies, the text is the fixed coordinates followed by that axis' range
    /// (`y = 2, z = 0, x ∈ [1, 4]`). A degenerate segment is written as its single point
    /// (`x = 1, y = 2, z = 3`).
    pub fn continuous_equation(&self, seg: &Segment) -> OperationResult<String> {
        let start = seg.start.to_array();
        let end = seg.end.to_array();
        let d = seg.direction().to_array();
        let (varying, fixed): (Vec<usize>, Vec<usize>) =
            (0..3).partition(|&i| d[i].abs() >= self.tol.division);

        let mut steps = vec![format!("d = {}", seg.direction())];
        let fixed_text = fixed
            .iter()
            .map(|&i| format!("{} = {}", AXES[i], Num(start[i])))
            .collect::<Vec<_>>();
        for (&i, text) in fixed.iter().zip(&fixed_text) {
            steps.push(format!("d{} = 0, so {text} along the whole segment", AXES[i]));
        }

        let result = match *varying.as_slice() {
            [] => {
                steps.push("the segment is a single point".to_string());
                fixed_text.join(", ")
            }
            [i] => {
                let (lo, hi) = if start[i] <= end[i] {
                    (start[i], end[i])
                } else {
                    (end[i], start[i])
                };
                let range = format!("{} ∈ [{}, {}]", AXES[i], Num(lo), Num(hi));
                steps.push(format!("only {} varies: {range}", AXES[i]));
                let text = fixed_text.iter().chain(std::iter::once(&range)).join(", ");
                text
            }
            _ => {
                let ratios = varying
                    .iter()
                    .map(|&i| format!("{}/{}", shifted(AXES[i], start[i]), Factor(d[i])))
                    .join(" = ");
                steps.push(format!("ratios: {ratios}"));
                let text = std::iter::once(&ratios).chain(&fixed_text).join(", ");
                text
            }
        };
        steps.push(result.clone());

        OperationResult::new(
            result,
            steps,
            "Eliminating the parameter t from the parametric equations equates the ratios of \
             displacement to direction along every moving axis.",
        )
    }

    /// Tests whether `point` lies on the segment, within `tolerance` (defaults to the containment
    /// tolerance).
    ///
    /// The point is projected onto the segment's line, giving the parameter
    /// `t = (p - start)·d / |d|²`. Points with `t` outside of `[0, 1]` lie beyond an endpoint and
    /// are rejected. Otherwise the point is accepted if its distance to `P(t)` is below
    /// `tolerance`.
    ///
    /// # Errors
    ///
    /// - [`MathError::DivisionByZero`] for a degenerate segment, since `t` is undefined.
    /// - [`MathError::InvalidArgument`] if `tolerance` is negative or not finite.
    pub fn is_point_on_segment(
        &self,
        seg: &Segment,
        point: &Vector,
        tolerance: Option<f64>,
    ) -> Result<OperationResult<bool>> {
        let tolerance = tolerance.unwrap_or(self.tol.containment);
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(MathError::InvalidArgument {
                message: format!("tolerance must be a non-negative number, got {tolerance}"),
            });
        }

        let (_, la, _) = labels(seg);
        let lp = point.label("P");
        let d = seg.direction();
        let len2 = d.length2();
        if len2 < self.tol.division {
            return Err(MathError::DivisionByZero {
                operation: "point-on-segment test",
            });
        }

        let rel = point - &seg.start;
        let t = rel.dot(&d) / len2;
        let mut steps = vec![
            format!("d = {d}, {lp} - {la} = {rel}"),
            format!(
                "t = (({lp} - {la}) · d) / |d|² = {} / {} = {}",
                Num(rel.dot(&d)),
                Num(len2),
                Num(t)
            ),
        ];

        let result = if !(0.0..=1.0).contains(&t) {
            steps.push(format!("t ∉ [0, 1], {lp} lies beyond an endpoint"));
            false
        } else {
            let closest = seg.point_at(t);
            let distance = closest.distance(point);
            steps.push(format!("P(t) = {closest}"));
            let inside = distance < tolerance;
            steps.push(format!(
                "|P(t) - {lp}| = {} {} {tolerance}",
                Num(distance),
                if inside { "<" } else { "≥" }
            ));
            inside
        };
        log::trace!("point-on-segment: t = {t}, result = {result}");

        Ok(OperationResult::new(
            result,
            steps,
            "A point lies on a segment when it projects onto the segment between its endpoints \
             and coincides with its projection.",
        ))
    }

    /// Divides the segment into `n` equal parts, returning the `n + 1` points at `t = i/n`.
    ///
    /// Fails with [`MathError::InvalidArgument`] if `n < 2`.
    pub fn subdivide(&self, seg: &Segment, n: usize) -> Result<OperationResult<Vec<Vector>>> {
        if n < 2 {
            return Err(MathError::InvalidArgument {
                message: format!("a segment must be divided into at least 2 parts, got {n}"),
            });
        }

        let (ls, _, _) = labels(seg);
        let d = seg.direction();
        let mut steps = vec![format!("step = d / {n} = {}", &d / n as f64)];
        let points = (0..=n)
            .map(|i| {
                let t = i as f64 / n as f64;
                let p = seg.point_at(t);
                steps.push(format!("P{i} (t = {}) = {p}", Num(t)));
                p
            })
            .collect::<Vec<_>>();

        Ok(OperationResult::new(
            points,
            steps,
            format!("Points at equal parameter intervals split {ls} into {n} equal parts."),
        ))
    }
}

/// Labels for a segment and its endpoints: `AB`, `A`, `B` unless named.
fn labels(seg: &Segment) -> (&str, &str, &str) {
    (
        seg.label("AB"),
        seg.start.label("A"),
        seg.end.label("B"),
    )
}

fn plain(v: &Vector) -> Vector {
    Vector::new(v.x, v.y, v.z)
}

/// Renders `axis - value` as it appears in a ratio numerator.
fn shifted(axis: char, value: f64) -> String {
    let num = Num(value.abs()).to_string();
    if num == "0" {
        axis.to_string()
    } else if value < 0.0 {
        format!("({axis} + {num})")
    } else {
        format!("({axis} - {num})")
    }
}
