use std::fmt;

use itertools::Itertools;

use crate::{DimensionError, Num};

mod ops;

/// A row-major matrix of `f64` elements with `rows` rows and `cols` columns.
///
/// The shape is fixed when the matrix is created and validated up front: both dimensions must be
/// positive, and the data must contain exactly `rows` rows of `cols` elements each. Every
/// constructor reports a violation as a [`DimensionError`].
///
/// # Construction
///
/// - [`Matrix::new`] takes the declared dimensions and the initial data.
/// - [`Matrix::from_rows`] infers the dimensions from the data.
/// - [`Matrix::zeros`] and [`Matrix::identity`] create the usual special matrices.
/// - [`Matrix::from_fn`] invokes a closure with the row and column of each element.
///
/// # Element Access
///
/// [`Matrix`] implements [`Index`] and [`IndexMut`] for `(row, col)` tuples, which panic when out of
/// bounds just like slices do. [`Matrix::get`] and [`Matrix::set_element`] are the checked
/// counterparts. Indices are 0-based.
///
/// ```
/// # use linstep_linalg::*;
/// let mut mat = Matrix::zeros(2, 2)?;
/// mat.set_element(0, 1, 4.0)?;
/// assert_eq!(mat[(0, 1)], 4.0);
/// assert_eq!(mat.get(0, 1), Some(4.0));
/// assert_eq!(mat.get(2, 0), None);
/// assert!(mat.set_element(2, 0, 1.0).is_err());
/// # Ok::<(), DimensionError>(())
/// ```
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Debug, Clone)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<f64>>,
    name: Option<String>,
}

impl Matrix {
    /// Creates a matrix with the declared dimensions from row-major `data`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use linstep_linalg::*;
    /// let mat = Matrix::new(2, 3, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])?;
    /// assert_eq!(mat.shape(), (2, 3));
    ///
    /// let err = Matrix::new(2, 2, vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
    /// assert_eq!(err, DimensionError::RowLength { row: 1, expected: 2, found: 1 });
    /// # Ok::<(), DimensionError>(())
    /// ```
    pub fn new(rows: usize, cols: usize, data: Vec<Vec<f64>>) -> Result<Self, DimensionError> {
        if rows == 0 || cols == 0 {
            return Err(DimensionError::Empty { rows, cols });
        }
        if data.len() != rows {
            return Err(DimensionError::RowCount {
                expected: rows,
                found: data.len(),
            });
        }
        if let Some((row, found)) = data
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != cols)
        {
            return Err(DimensionError::RowLength {
                row,
                expected: cols,
                found,
            });
        }

        Ok(Self {
            rows,
            cols,
            data,
            name: None,
        })
    }

    /// Creates a matrix from its rows, inferring the dimensions from the data.
    ///
    /// The number of columns is taken from the first row; all other rows must match it.
    ///
    /// ```
    /// # use linstep_linalg::*;
    /// let mat = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
    /// assert_eq!(mat.shape(), (2, 2));
    /// assert!(Matrix::from_rows(Vec::new()).is_err());
    /// # Ok::<(), DimensionError>(())
    /// ```
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Self, DimensionError> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        Self::new(rows, cols, data)
    }

    /// Creates a `rows × cols` matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, DimensionError> {
        Self::from_fn(rows, cols, |_, _| 0.0)
    }

    /// Creates the `n × n` identity matrix.
    ///
    /// ```
    /// # use linstep_linalg::*;
    /// let id = Matrix::identity(2)?;
    /// assert_eq!(id, Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]])?);
    /// # Ok::<(), DimensionError>(())
    /// ```
    pub fn identity(n: usize) -> Result<Self, DimensionError> {
        Self::from_fn(n, n, |row, col| if row == col { 1.0 } else { 0.0 })
    }

    /// Creates a matrix by invoking a closure with the position (row and column) of each element.
    ///
    /// ```
    /// # use linstep_linalg::*;
    /// let mat = Matrix::from_fn(2, 3, |row, col| (row * 10 + col) as f64)?;
    /// assert_eq!(mat, Matrix::from_rows(vec![
    ///     vec![ 0.0,  1.0,  2.0],
    ///     vec![10.0, 11.0, 12.0],
    /// ])?);
    /// # Ok::<(), DimensionError>(())
    /// ```
    pub fn from_fn<F>(rows: usize, cols: usize, mut cb: F) -> Result<Self, DimensionError>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let data = (0..rows)
            .map(|row| (0..cols).map(|col| cb(row, col)).collect())
            .collect();
        Self::new(rows, cols, data)
    }

    /// Returns `self` with its name set to `name`.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the name of this matrix, if it has one.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the name of this matrix, or `fallback` if it is unnamed.
    pub fn label<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name().unwrap_or(fallback)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns the element at `(row, col)`, or [`None`] if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Overwrites the element at `(row, col)`.
    pub fn set_element(&mut self, row: usize, col: usize, value: f64) -> Result<(), DimensionError> {
        let (rows, cols) = self.shape();
        let elem = self
            .data
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(DimensionError::OutOfBounds {
                row,
                col,
                rows,
                cols,
            })?;
        *elem = value;
        Ok(())
    }

    /// Returns row `row` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row]
    }

    /// Returns the rows of this matrix.
    #[inline]
    pub fn as_rows(&self) -> &[Vec<f64>] {
        &self.data
    }

    /// Returns column `col` as a newly allocated [`Vec`].
    pub fn column(&self, col: usize) -> Vec<f64> {
        self.data.iter().map(|row| row[col]).collect()
    }

    /// Applies a closure to each element, returning a new unnamed matrix.
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(f64) -> f64,
    {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&v| f(v)).collect())
                .collect(),
            name: None,
        }
    }

    /// Swaps the rows and columns of this matrix.
    ///
    /// ```
    /// # use linstep_linalg::*;
    /// let mat = Matrix::from_rows(vec![
    ///     vec![0.0, 1.0, 2.0],
    ///     vec![3.0, 4.0, 5.0],
    /// ])?.transpose();
    /// assert_eq!(mat, Matrix::from_rows(vec![
    ///     vec![0.0, 3.0],
    ///     vec![1.0, 4.0],
    ///     vec![2.0, 5.0],
    /// ])?);
    /// # Ok::<(), DimensionError>(())
    /// ```
    pub fn transpose(&self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
            data: (0..self.cols).map(|col| self.column(col)).collect(),
            name: None,
        }
    }

    /// Returns the matrix with row `row` and column `col` removed.
    ///
    /// Fails for 1-row or 1-column matrices, whose minors would be empty.
    ///
    /// ```
    /// # use linstep_linalg::*;
    /// let mat = Matrix::from_fn(3, 3, |row, col| (row * 3 + col) as f64)?;
    /// assert_eq!(mat.minor(0, 1)?, Matrix::from_rows(vec![vec![3.0, 5.0], vec![6.0, 8.0]])?);
    /// # Ok::<(), DimensionError>(())
    /// ```
    pub fn minor(&self, row: usize, col: usize) -> Result<Self, DimensionError> {
        if row >= self.rows || col >= self.cols {
            return Err(DimensionError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }

        let data = self
            .data
            .iter()
            .enumerate()
            .filter(|&(r, _)| r != row)
            .map(|(_, values)| {
                values
                    .iter()
                    .enumerate()
                    .filter(|&(c, _)| c != col)
                    .map(|(_, &v)| v)
                    .collect()
            })
            .collect();
        Self::new(self.rows - 1, self.cols - 1, data)
    }

    /// Appends the columns of `other` to the right of `self`, forming an augmented matrix.
    ///
    /// ```
    /// # use linstep_linalg::*;
    /// let a = Matrix::from_rows(vec![vec![2.0], vec![4.0]])?;
    /// let aug = a.augment(&Matrix::identity(2)?)?;
    /// assert_eq!(aug.row(1), &[4.0, 0.0, 1.0]);
    /// # Ok::<(), DimensionError>(())
    /// ```
    pub fn augment(&self, other: &Self) -> Result<Self, DimensionError> {
        if other.rows != self.rows {
            return Err(DimensionError::RowCount {
                expected: self.rows,
                found: other.rows,
            });
        }

        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(left, right)| left.iter().chain(right).copied().collect())
            .collect();
        Self::new(self.rows, self.cols + other.cols, data)
    }

    /// Returns the columns `start..end` as a new matrix.
    pub fn column_block(&self, start: usize, end: usize) -> Result<Self, DimensionError> {
        if start >= end || end > self.cols {
            return Err(DimensionError::OutOfBounds {
                row: 0,
                col: end.max(start),
                rows: self.rows,
                cols: self.cols,
            });
        }
        let data = self.data.iter().map(|row| row[start..end].to_vec()).collect();
        Self::new(self.rows, end - start, data)
    }

    /// Exchanges rows `a` and `b`.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
    }

    /// Multiplies every element of row `row` by `factor`.
    pub fn scale_row(&mut self, row: usize, factor: f64) {
        for v in &mut self.data[row] {
            *v *= factor;
        }
    }

    /// Performs the row operation `R[target] -= factor * R[source]`.
    pub fn sub_scaled_row(&mut self, target: usize, source: usize, factor: f64) {
        let source = self.data[source].clone();
        for (t, s) in self.data[target].iter_mut().zip(source) {
            *t -= factor * s;
        }
    }

    /// Returns `true` if every element of row `row` is within `tolerance` of zero.
    pub fn is_zero_row(&self, row: usize, tolerance: f64) -> bool {
        self.data[row].iter().all(|v| v.abs() < tolerance)
    }
}

/// Displays the matrix row by row, as in `[[1, 2], [3, 4]]`.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]",
            self.data
                .iter()
                .map(|row| format!("[{}]", row.iter().map(|&v| Num(v)).format(", ")))
                .format(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(data: &[&[f64]]) -> Matrix {
        Matrix::from_rows(data.iter().map(|row| row.to_vec()).collect()).unwrap()
    }

    #[test]
    fn validation() {
        assert_eq!(
            Matrix::zeros(0, 3).unwrap_err(),
            DimensionError::Empty { rows: 0, cols: 3 }
        );
        assert_eq!(
            Matrix::new(3, 1, vec![vec![1.0], vec![2.0]]).unwrap_err(),
            DimensionError::RowCount {
                expected: 3,
                found: 2
            }
        );
        assert_eq!(
            Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0, 5.0]]).unwrap_err(),
            DimensionError::RowLength {
                row: 1,
                expected: 2,
                found: 3
            }
        );
        assert!(Matrix::from_rows(vec![Vec::new()]).is_err());
    }

    #[test]
    fn fmt() {
        let mat = m(&[&[0.0, 1.5], &[-2.0, 1.0 / 3.0]]);
        assert_eq!(mat.to_string(), "[[0, 1.5], [-2, 0.3333]]");
    }

    #[test]
    fn names_are_not_compared() {
        let a = m(&[&[1.0]]).named("A");
        assert_eq!(a.name(), Some("A"));
        assert_eq!(a.label("M"), "A");
        assert_eq!(a, m(&[&[1.0]]));
        assert_ne!(m(&[&[1.0, 2.0]]), m(&[&[1.0], &[2.0]]));
    }

    #[test]
    fn set_element() {
        let mut mat = Matrix::zeros(2, 3).unwrap();
        mat.set_element(1, 2, 7.0).unwrap();
        assert_eq!(mat.row(1), &[0.0, 0.0, 7.0]);
        assert_eq!(
            mat.set_element(1, 3, 1.0).unwrap_err(),
            DimensionError::OutOfBounds {
                row: 1,
                col: 3,
                rows: 2,
                cols: 3
            }
        );
    }

    #[test]
    fn minor() {
        let mat = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        assert_eq!(mat.minor(1, 0).unwrap(), m(&[&[2.0]]));
        assert!(m(&[&[1.0]]).minor(0, 0).is_err());
        assert!(mat.minor(2, 0).is_err());
    }

    #[test]
    fn row_operations() {
        let mut mat = m(&[&[2.0, 4.0], &[1.0, 3.0]]);
        mat.swap_rows(0, 1);
        assert_eq!(mat, m(&[&[1.0, 3.0], &[2.0, 4.0]]));
        mat.sub_scaled_row(1, 0, 2.0);
        assert_eq!(mat, m(&[&[1.0, 3.0], &[0.0, -2.0]]));
        mat.scale_row(1, -0.5);
        assert_eq!(mat, m(&[&[1.0, 3.0], &[0.0, 1.0]]));
        assert!(!mat.is_zero_row(1, 1e-9));
    }

    #[test]
    fn blocks() {
        let aug = m(&[&[1.0, 2.0]]).augment(&m(&[&[3.0]])).unwrap();
        assert_eq!(aug, m(&[&[1.0, 2.0, 3.0]]));
        assert_eq!(aug.column_block(1, 3).unwrap(), m(&[&[2.0, 3.0]]));
        assert!(aug.column_block(2, 4).is_err());
        assert!(m(&[&[1.0]]).augment(&m(&[&[1.0], &[2.0]])).is_err());
    }
}
