use std::ops::{Index, IndexMut};

use approx::{AbsDiffEq, RelativeEq};

use crate::Matrix;

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.as_rows()[row][col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row][col]
    }
}

// Shape and elements only; names are ignored.
impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.as_rows() == other.as_rows()
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.shape() == other.shape()
            && self
                .as_rows()
                .iter()
                .flatten()
                .zip(other.as_rows().iter().flatten())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.shape() == other.shape()
            && self
                .as_rows()
                .iter()
                .flatten()
                .zip(other.as_rows().iter().flatten())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_relative_eq, assert_relative_ne};

    use super::*;

    #[test]
    fn index() {
        let mut mat = Matrix::identity(3).unwrap();
        assert_eq!(mat[(1, 1)], 1.0);
        mat[(2, 0)] = 5.0;
        assert_eq!(mat.get(2, 0), Some(5.0));
    }

    #[test]
    fn approx() {
        let a = Matrix::from_fn(2, 2, |r, c| (r + c) as f64 / 3.0).unwrap();
        let b = a.map(|v| v * 3.0).map(|v| v / 3.0);
        assert_relative_eq!(a, b);
        assert_relative_ne!(a, Matrix::zeros(2, 3).unwrap());
    }
}
