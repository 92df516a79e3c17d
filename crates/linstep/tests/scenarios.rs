use approx::{assert_abs_diff_eq, assert_relative_eq};
use linstep::{
    vec3, GramSchmidt, MathError, Matrix, MatrixAlgebra, Segment, SegmentGeometry, Tolerances,
    Value, Vector, VectorAlgebra,
};

fn mat(data: &[&[f64]]) -> Matrix {
    Matrix::from_rows(data.iter().map(|row| row.to_vec()).collect()).unwrap()
}

#[test]
fn vector_sum() {
    let res = VectorAlgebra::new().add(&vec3(1.0, 2.0, 3.0), &vec3(4.0, 5.0, 6.0));
    assert_eq!(res.result, vec3(5.0, 7.0, 9.0));
    assert!(!res.steps.is_empty());
    assert!(!res.explanation.is_empty());
}

#[test]
fn determinant_2x2() {
    let res = MatrixAlgebra::new()
        .determinant(&mat(&[&[1.0, 2.0], &[3.0, 4.0]]))
        .unwrap();
    assert_eq!(res.result, -2.0);
}

#[test]
fn solve_linear_system() {
    // 2x + y = 5, x + 3y = 10
    let res = MatrixAlgebra::new().gauss_jordan(&mat(&[&[2.0, 1.0, 5.0], &[1.0, 3.0, 10.0]]));
    let x = res.result[(0, 2)];
    let y = res.result[(1, 2)];
    assert_relative_eq!(x, 1.0, epsilon = 1e-12);
    assert_relative_eq!(y, 3.0, epsilon = 1e-12);
}

#[test]
fn gram_schmidt_in_plane() {
    let res = GramSchmidt::new()
        .orthonormalize(&[vec3(3.0, 1.0, 0.0), vec3(2.0, 2.0, 0.0)])
        .unwrap();
    let e = &res.result.orthonormal;
    assert_abs_diff_eq!(e[0], vec3(0.9487, 0.3162, 0.0), epsilon = 1e-4);
    assert_abs_diff_eq!(e[1], vec3(-0.3162, 0.9487, 0.0), epsilon = 1e-4);
    assert!(res.steps.iter().any(|s| s == "Verification:"));
}

#[test]
fn segment_length() {
    let seg = Segment::new(Vector::ZERO, vec3(4.0, 3.0, 0.0));
    assert_eq!(SegmentGeometry::new().length(&seg).result, 5.0);
}

#[test]
fn parallel_vectors_are_dependent() {
    let res =
        VectorAlgebra::new().check_linear_dependence(&[vec3(1.0, 2.0, 3.0), vec3(2.0, 4.0, 6.0)]);
    assert!(res.result.dependent);
    assert_eq!(res.result.redundant_indices, [1]);
}

#[test]
fn inverse_times_matrix_is_identity() {
    let alg = MatrixAlgebra::new();
    let a = mat(&[&[2.0, -1.0, 0.0], &[-1.0, 2.0, -1.0], &[0.0, -1.0, 2.0]]);
    let inv = alg.inverse(&a).unwrap().result;
    let product = alg.multiply(&inv, &a).unwrap().result;
    assert_relative_eq!(product, Matrix::identity(3).unwrap(), epsilon = 1e-12);

    let det = alg.determinant(&a).unwrap().result;
    let inv_det = alg.determinant(&inv).unwrap().result;
    assert_relative_eq!(det * inv_det, 1.0, epsilon = 1e-12);
}

#[test]
fn errors_surface_as_values() {
    let alg = VectorAlgebra::new();
    assert!(matches!(
        alg.angle_degrees(&Vector::ZERO, &Vector::X),
        Err(MathError::DivisionByZero { .. })
    ));

    let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
    let err = MathError::from(err);
    assert!(matches!(err, MathError::Dimension(_)));
}

#[test]
fn erased_results() {
    let alg = VectorAlgebra::new();
    let results = [
        alg.add(&Vector::X, &Vector::Y).into_value(),
        alg.dot(&Vector::X, &Vector::Y).into_value(),
        alg.are_orthogonal(&Vector::X, &Vector::Y).into_value(),
        SegmentGeometry::new()
            .continuous_equation(&Segment::new(Vector::ZERO, Vector::X))
            .into_value(),
    ];
    assert_eq!(results[0].result, Value::Vector(vec3(1.0, 1.0, 0.0)));
    assert_eq!(results[1].result, Value::Scalar(0.0));
    assert_eq!(results[2].result, Value::Boolean(true));
    assert_eq!(
        results[3].result,
        Value::Text("y = 0, z = 0, x ∈ [0, 1]".to_string())
    );

    let points = SegmentGeometry::new()
        .subdivide(&Segment::new(Vector::ZERO, vec3(2.0, 0.0, 0.0)), 2)
        .unwrap()
        .into_value();
    assert_eq!(
        points.result,
        Value::Vectors(vec![Vector::ZERO, Vector::X, vec3(2.0, 0.0, 0.0)])
    );
    assert_eq!(points.result.to_string(), "(0, 0, 0), (1, 0, 0), (2, 0, 0)");

    let printed = results[0].to_string();
    assert!(printed.starts_with("1. "));
    assert!(printed.ends_with(&results[0].explanation));
}

#[test]
fn custom_tolerances() {
    let loose = Tolerances {
        pivot: 0.5,
        ..Tolerances::DEFAULT
    };
    // With a loose pivot tolerance the small second pivot is treated as zero.
    let a = mat(&[&[1.0, 0.0], &[0.0, 0.1]]);
    assert!(MatrixAlgebra::new().inverse(&a).is_ok());
    assert_eq!(
        MatrixAlgebra::with_tolerances(loose).inverse(&a).unwrap_err(),
        MathError::Singular
    );
}
