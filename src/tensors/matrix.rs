use std::{
    convert::Infallible,
    fmt::Display,
    ops::{Index, IndexMut, Mul, Neg},
    slice::Chunks,
};

use tracing::{debug, instrument};

use crate::{
    domains::rational::{RationalError, RationalNumber},
    printer::{MatrixPrinter, PrintOptions},
};

/// Errors that can occur when performing matrix operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatrixError {
    /// The grid is not square, or the operands have different dimensions.
    DimensionMismatch { expected: usize, found: usize },
    InvalidArgument(String),
    /// An entry-wise operation failed.
    Arithmetic(RationalError),
}

impl std::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::DimensionMismatch { expected, found } => write!(
                f,
                "Dimension mismatch: expected {} but found {}",
                expected, found
            ),
            MatrixError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            MatrixError::Arithmetic(e) => write!(f, "Arithmetic error: {}", e),
        }
    }
}

impl std::error::Error for MatrixError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatrixError::Arithmetic(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RationalError> for MatrixError {
    fn from(e: RationalError) -> Self {
        MatrixError::Arithmetic(e)
    }
}

impl From<Infallible> for MatrixError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

/// A square matrix of exact rational numbers, stored row-major.
///
/// Every matrix owns its entries: cloning copies all of them.
#[derive(Clone, PartialEq, Debug)]
pub struct RationalMatrix {
    pub(crate) dimension: u32,
    pub(crate) data: Vec<RationalNumber>,
}

impl RationalMatrix {
    /// Create a new zeroed `dimension x dimension` matrix.
    pub fn new(dimension: u32) -> RationalMatrix {
        RationalMatrix {
            dimension,
            data: vec![RationalNumber::zero(); dimension as usize * dimension as usize],
        }
    }

    /// Create a new zeroed matrix.
    pub fn zero(dimension: u32) -> RationalMatrix {
        RationalMatrix::new(dimension)
    }

    /// Create a new identity matrix.
    pub fn identity(dimension: u32) -> RationalMatrix {
        let mut m = RationalMatrix::new(dimension);
        for i in 0..dimension {
            m[(i, i)] = RationalNumber::one();
        }
        m
    }

    /// Create a zero matrix with the same dimension.
    pub fn zero_like(&self) -> RationalMatrix {
        RationalMatrix::new(self.dimension)
    }

    /// Create an identity matrix with the same dimension.
    pub fn identity_like(&self) -> RationalMatrix {
        RationalMatrix::identity(self.dimension)
    }

    /// Create a new matrix from a 2-dimensional vector of scalars.
    pub fn from_nested_vec(matrix: Vec<Vec<RationalNumber>>) -> Result<RationalMatrix, MatrixError> {
        let dimension = matrix.len();
        let mut data = Vec::with_capacity(dimension * dimension);

        for row in matrix {
            if row.len() != dimension {
                return Err(MatrixError::DimensionMismatch {
                    expected: dimension,
                    found: row.len(),
                });
            }

            data.extend(row);
        }

        Ok(RationalMatrix {
            dimension: dimension as u32,
            data,
        })
    }

    /// Create a new matrix from a square grid of values that convert into rational numbers,
    /// such as integers, floats or rational numbers themselves.
    ///
    /// ```
    /// use ratmat::tensors::matrix::RationalMatrix;
    ///
    /// let m = RationalMatrix::from_grid(&[[1.5, 2.], [0.25, -1.]]).unwrap();
    /// assert_eq!(m[(1, 0)], (1, 4).into());
    /// ```
    pub fn from_grid<T, R>(grid: &[R]) -> Result<RationalMatrix, MatrixError>
    where
        T: Clone + TryInto<RationalNumber>,
        R: AsRef<[T]>,
        MatrixError: From<T::Error>,
    {
        let dimension = grid.len();
        let mut data = Vec::with_capacity(dimension * dimension);

        for row in grid {
            let row = row.as_ref();
            if row.len() != dimension {
                return Err(MatrixError::DimensionMismatch {
                    expected: dimension,
                    found: row.len(),
                });
            }

            for e in row {
                data.push(e.clone().try_into()?);
            }
        }

        Ok(RationalMatrix {
            dimension: dimension as u32,
            data,
        })
    }

    /// Return the dimension of the matrix.
    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    /// Return an iterator over the rows of the matrix.
    pub fn row_iter(&self) -> Chunks<'_, RationalNumber> {
        self.data.chunks(self.dimension.max(1) as usize)
    }

    /// Get the entry at `(row, col)`.
    pub fn get(&self, row: u32, col: u32) -> &RationalNumber {
        &self[(row, col)]
    }

    /// Set the entry at `(row, col)`.
    pub fn set(&mut self, row: u32, col: u32, value: impl Into<RationalNumber>) {
        self[(row, col)] = value.into();
    }

    /// Get a copy of row `r`.
    pub fn row(&self, r: u32) -> Vec<RationalNumber> {
        self[r].to_vec()
    }

    /// Get a copy of column `c`.
    pub fn column(&self, c: u32) -> Vec<RationalNumber> {
        (0..self.dimension).map(|r| self[(r, c)].clone()).collect()
    }

    /// Overwrite the first `values.len()` entries of row `r`, starting at column 0,
    /// and return the updated row. Values beyond the dimension are ignored.
    pub fn write_row(&mut self, r: u32, values: &[RationalNumber]) -> Vec<RationalNumber> {
        for (c, v) in (0..self.dimension).zip(values) {
            self[(r, c)] = v.clone();
        }
        self.row(r)
    }

    /// Overwrite the first `values.len()` entries of column `c`, starting at row 0,
    /// and return the updated column. Values beyond the dimension are ignored.
    pub fn write_column(&mut self, c: u32, values: &[RationalNumber]) -> Vec<RationalNumber> {
        for (r, v) in (0..self.dimension).zip(values) {
            self[(r, c)] = v.clone();
        }
        self.column(c)
    }

    /// Swap two rows in-place.
    pub fn swap_rows(&mut self, a: u32, b: u32) {
        if a == b {
            return;
        }

        let d = self.dimension as usize;
        for c in 0..d {
            self.data.swap(a as usize * d + c, b as usize * d + c);
        }
    }

    /// Return true iff every entry in the matrix is zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|e| e.is_zero())
    }

    /// Return true iff the matrix is the identity matrix.
    pub fn is_identity(&self) -> bool {
        self.data.iter().enumerate().all(|(i, e)| {
            if i as u32 % self.dimension == i as u32 / self.dimension {
                e.is_one()
            } else {
                e.is_zero()
            }
        })
    }

    /// Return the sum of the diagonal entries.
    pub fn trace(&self) -> RationalNumber {
        (0..self.dimension).map(|i| &self[(i, i)]).sum()
    }

    /// Transpose the matrix.
    pub fn transpose(&self) -> RationalMatrix {
        let mut m = self.zero_like();
        for r in 0..self.dimension {
            for c in 0..self.dimension {
                m[(c, r)] = self[(r, c)].clone();
            }
        }
        m
    }

    /// Apply a function `f` to each entry of the matrix.
    pub fn map(&self, f: impl Fn(&RationalNumber) -> RationalNumber) -> RationalMatrix {
        RationalMatrix {
            dimension: self.dimension,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Compute the determinant with fraction-free (Bareiss) elimination.
    ///
    /// After step `i`, every entry `(j, k)` with `j, k > i` is the determinant of the
    /// leading `(i+1) x (i+1)` block bordered by row `j` and column `k`, so dividing by
    /// the previous pivot is always exact. A zero pivot is replaced by swapping in a
    /// later row; if there is none, the matrix is singular.
    ///
    /// The determinant of the empty matrix is 1.
    #[instrument(level = "trace", skip_all, fields(dimension = self.dimension))]
    pub fn det(&self) -> RationalNumber {
        let d = self.dimension;
        match d {
            0 => return RationalNumber::one(),
            1 => return self.data[0].clone(),
            _ => {}
        }

        let mut a = self.clone();
        let mut negate = false;
        let mut previous_inv = RationalNumber::one();

        for i in 0..d {
            if a[(i, i)].is_zero() {
                match (i + 1..d).find(|&k| !a[(k, i)].is_zero()) {
                    Some(k) => {
                        debug!("Zero pivot in column {}: swapping rows {} and {}", i, i, k);
                        a.swap_rows(i, k);
                        negate = !negate;
                    }
                    None => {
                        debug!("No nonzero pivot in column {}: matrix is singular", i);
                        return RationalNumber::zero();
                    }
                }
            }

            let pivot = a[(i, i)].clone();
            for j in i + 1..d {
                for k in i + 1..d {
                    let t = &(&pivot * &a[(j, k)]) - &(&a[(j, i)] * &a[(i, k)]);
                    a[(j, k)] = &t * &previous_inv;
                }
            }

            previous_inv = pivot.inv();
        }

        let det = a[(d - 1, d - 1)].clone();
        if negate {
            -det
        } else {
            det
        }
    }

    /// Return the submatrix with row `row` and column `col` removed.
    pub fn minor(&self, row: u32, col: u32) -> RationalMatrix {
        assert!(
            row < self.dimension && col < self.dimension,
            "Minor ({}, {}) is out of bounds for dimension {}",
            row,
            col,
            self.dimension
        );

        let mut data = Vec::with_capacity((self.dimension as usize - 1).pow(2));
        for (r, cells) in self.row_iter().enumerate() {
            if r as u32 == row {
                continue;
            }

            data.extend(
                cells
                    .iter()
                    .enumerate()
                    .filter(|(c, _)| *c as u32 != col)
                    .map(|(_, e)| e.clone()),
            );
        }

        RationalMatrix {
            dimension: self.dimension - 1,
            data,
        }
    }

    /// Compute the matrix of cofactors `(-1)^(i+j) det(minor(i, j))`.
    /// The cofactor of a `1 x 1` matrix is the determinant of the empty matrix, `1`.
    pub fn cofactor_matrix(&self) -> RationalMatrix {
        let mut cf = self.zero_like();
        for i in 0..self.dimension {
            for j in 0..self.dimension {
                let det = self.minor(i, j).det();
                cf[(i, j)] = if (i + j) % 2 == 0 { det } else { -det };
            }
        }
        cf
    }

    /// Compute the adjugate, the transpose of the cofactor matrix.
    pub fn adjoint(&self) -> RationalMatrix {
        self.cofactor_matrix().transpose()
    }

    /// Compute the inverse `adjoint / det`.
    ///
    /// A singular matrix has no inverse, for which the zero matrix is returned.
    pub fn inverse(&self) -> RationalMatrix {
        let det = self.det();
        if det.is_zero() {
            debug!("Matrix is singular: returning the zero matrix");
            return self.zero_like();
        }

        self.adjoint().mul_scalar(&det.inv())
    }

    /// Multiply the scalar `e` to each entry of the matrix.
    pub fn mul_scalar(&self, e: &RationalNumber) -> RationalMatrix {
        self.map(|x| e * x)
    }

    /// Divide each entry of the matrix by the scalar `e`.
    /// Fails if `e` is zero and the matrix has a nonzero entry.
    pub fn div_scalar(&self, e: &RationalNumber) -> Result<RationalMatrix, MatrixError> {
        let data = self
            .data
            .iter()
            .map(|x| x.checked_div(e))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RationalMatrix {
            dimension: self.dimension,
            data,
        })
    }

    fn check_dimension(&self, rhs: &RationalMatrix) -> Result<(), MatrixError> {
        if self.dimension != rhs.dimension {
            return Err(MatrixError::DimensionMismatch {
                expected: self.dimension as usize,
                found: rhs.dimension as usize,
            });
        }
        Ok(())
    }

    /// Add two matrices.
    pub fn checked_add(&self, rhs: &RationalMatrix) -> Result<RationalMatrix, MatrixError> {
        self.check_dimension(rhs)?;

        Ok(RationalMatrix {
            dimension: self.dimension,
            data: self.data.iter().zip(&rhs.data).map(|(a, b)| a + b).collect(),
        })
    }

    /// Subtract `rhs` from `self`.
    pub fn checked_sub(&self, rhs: &RationalMatrix) -> Result<RationalMatrix, MatrixError> {
        self.check_dimension(rhs)?;

        Ok(RationalMatrix {
            dimension: self.dimension,
            data: self.data.iter().zip(&rhs.data).map(|(a, b)| a - b).collect(),
        })
    }

    /// Multiply two matrices.
    pub fn checked_mul(&self, rhs: &RationalMatrix) -> Result<RationalMatrix, MatrixError> {
        self.check_dimension(rhs)?;
        Ok(self.product(rhs))
    }

    /// Multiply two matrices of equal dimension.
    fn product(&self, rhs: &RationalMatrix) -> RationalMatrix {
        let mut m = self.zero_like();

        for i in 0..self.dimension {
            for j in 0..self.dimension {
                m[(i, j)] = (0..self.dimension)
                    .map(|k| &self[(i, k)] * &rhs[(k, j)])
                    .sum();
            }
        }

        m
    }

    /// Raise the matrix to the power `e` using repeated squaring.
    /// The zeroth power is the identity. Negative powers are not supported.
    pub fn pow(&self, e: i64) -> Result<RationalMatrix, MatrixError> {
        if e < 0 {
            return Err(MatrixError::InvalidArgument(format!(
                "Matrix power must be non-negative, got {}",
                e
            )));
        }

        let mut e = e as u64;
        let mut result = self.identity_like();
        let mut base = self.clone();
        while e > 0 {
            if e & 1 == 1 {
                result = result.product(&base);
            }
            e >>= 1;
            if e > 0 {
                base = base.product(&base);
            }
        }

        Ok(result)
    }

    /// Sample a random matrix with entries from [RationalNumber::sample].
    pub fn sample(
        dimension: u32,
        rng: &mut impl rand::RngCore,
        range: (i64, i64),
    ) -> RationalMatrix {
        RationalMatrix {
            dimension,
            data: (0..dimension as usize * dimension as usize)
                .map(|_| RationalNumber::sample(rng, range))
                .collect(),
        }
    }

    /// Create a printer for the matrix with custom print options.
    pub fn printer(&self, opts: PrintOptions) -> MatrixPrinter<'_> {
        MatrixPrinter::new_with_options(self, opts)
    }
}

impl Index<u32> for RationalMatrix {
    type Output = [RationalNumber];

    /// Get the `index`th row of the matrix.
    #[inline]
    fn index(&self, index: u32) -> &Self::Output {
        let d = self.dimension as usize;
        &self.data[index as usize * d..(index as usize + 1) * d]
    }
}

impl Index<(u32, u32)> for RationalMatrix {
    type Output = RationalNumber;

    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index(&self, index: (u32, u32)) -> &Self::Output {
        assert!(index.1 < self.dimension, "Column {} is out of bounds", index.1);
        &self.data[(index.0 * self.dimension + index.1) as usize]
    }
}

impl IndexMut<(u32, u32)> for RationalMatrix {
    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index_mut(&mut self, index: (u32, u32)) -> &mut RationalNumber {
        assert!(index.1 < self.dimension, "Column {} is out of bounds", index.1);
        &mut self.data[(index.0 * self.dimension + index.1) as usize]
    }
}

impl Display for RationalMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        MatrixPrinter::new_with_options(self, PrintOptions::from_fmt(f)).fmt(f)
    }
}

impl Mul<&RationalMatrix> for &RationalNumber {
    type Output = RationalMatrix;

    /// Multiply each entry of the matrix by the scalar.
    fn mul(self, rhs: &RationalMatrix) -> Self::Output {
        rhs.mul_scalar(self)
    }
}

impl Neg for RationalMatrix {
    type Output = RationalMatrix;

    /// Negate each entry of the matrix.
    fn neg(mut self) -> Self::Output {
        for e in &mut self.data {
            *e = -&*e;
        }

        self
    }
}
