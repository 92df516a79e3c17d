//! Prints the derivations of a few classic exercises.
//!
//! Tolerances can be adjusted through the `LINSTEP_EPSILON_*` environment variables.

use anyhow::Context;
use linstep::{
    vec3, GramSchmidt, Matrix, MatrixAlgebra, OperationResult, Segment, SegmentGeometry,
    Tolerances, VectorAlgebra,
};

fn show<T>(title: &str, res: &OperationResult<T>) {
    println!("== {title}");
    println!("{res}");
    println!();
}

fn main() -> anyhow::Result<()> {
    linstep::init_logger!();

    let tol = Tolerances::from_env()?;
    log::debug!("using {tol:?}");

    let vectors = VectorAlgebra::with_tolerances(tol);
    let matrices = MatrixAlgebra::with_tolerances(tol);
    let gram_schmidt = GramSchmidt::with_tolerances(tol);
    let segments = SegmentGeometry::with_tolerances(tol);

    let a = vec3(1.0, 2.0, 3.0).named("a");
    let b = vec3(4.0, 5.0, 6.0).named("b");
    show("sum", &vectors.add(&a, &b));
    show("cross product", &vectors.cross(&a, &b));
    show("angle", &vectors.angle_degrees(&a, &b)?);
    show(
        "linear dependence",
        &vectors.check_linear_dependence(&[a.clone(), &a * 2.0]),
    );

    let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?.named("A");
    show("determinant", &matrices.determinant(&m)?);
    show("inverse", &matrices.inverse(&m)?);

    let system = Matrix::from_rows(vec![vec![2.0, 1.0, 5.0], vec![1.0, 3.0, 10.0]])?;
    let solved = matrices.gauss_jordan(&system);
    show("2x + y = 5, x + 3y = 10", &solved);

    let basis = gram_schmidt
        .orthonormalize(&[vec3(3.0, 1.0, 0.0), vec3(2.0, 2.0, 0.0)])
        .context("Gram-Schmidt failed")?;
    show("Gram-Schmidt", &basis);

    let seg = Segment::new(vec3(0.0, 0.0, 0.0).named("A"), vec3(4.0, 3.0, 0.0).named("B"));
    show("segment length", &segments.length(&seg));
    show("continuous equation", &segments.continuous_equation(&seg));
    show(
        "point on segment",
        &segments.is_point_on_segment(&seg, &vec3(2.0, 1.5, 0.0), None)?,
    );
    show("subdivision", &segments.subdivide(&seg, 4)?);

    Ok(())
}
