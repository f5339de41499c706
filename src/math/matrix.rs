use rand::prelude::*;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use crate::math::error::MatrixError;

/// Dense 2-D matrix of `f64` backed by a flat row-major `Vec`.
///
/// The element at `(row, col)` lives at linear index `row * ncol + col`.
/// Shape is fixed after construction except through [`Matrix::resize`];
/// element values are freely mutable through [`IndexMut`].
///
/// Fallible operations (`dot`, the reductions) return
/// `Result<_, MatrixError>`. The `std::ops` operators cannot, so they
/// panic with the corresponding [`MatrixError`] message instead; either
/// way a shape violation aborts the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matrix {
    pub nrow: usize,
    pub ncol: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Absolute tolerance used by `==`/`!=`.
    pub const EQ_TOLERANCE: f64 = 1e-10;

    pub fn zeros(nrow: usize, ncol: usize) -> Matrix {
        Matrix {
            nrow,
            ncol,
            data: vec![0.0; nrow * ncol],
        }
    }

    /// The 0×0 matrix, used as the "no downstream layer" sentinel in
    /// backward passes.
    pub fn empty() -> Matrix {
        Matrix::zeros(0, 0)
    }

    /// Builds a matrix from flat row-major data of length `nrow * ncol`.
    pub fn from_vec(data: Vec<f64>, nrow: usize, ncol: usize) -> Matrix {
        assert_eq!(
            data.len(),
            nrow * ncol,
            "{} elements do not fill a {}x{} matrix",
            data.len(),
            nrow,
            ncol
        );
        Matrix { nrow, ncol, data }
    }

    /// Builds a matrix from nested rows; every row must have the same width.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Matrix {
        let nrow = rows.len();
        let ncol = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrow * ncol);
        for row in &rows {
            assert_eq!(row.len(), ncol, "ragged rows: {} vs {}", row.len(), ncol);
            data.extend_from_slice(row);
        }
        Matrix { nrow, ncol, data }
    }

    pub fn row_vector(data: Vec<f64>) -> Matrix {
        let ncol = data.len();
        Matrix { nrow: 1, ncol, data }
    }

    pub fn column_vector(data: Vec<f64>) -> Matrix {
        let nrow = data.len();
        Matrix { nrow, ncol: 1, data }
    }

    /// Fills a fresh matrix by drawing every element from `generator`.
    pub fn with_generator<F>(nrow: usize, ncol: usize, mut generator: F) -> Matrix
    where
        F: FnMut() -> f64,
    {
        let data = (0..nrow * ncol).map(|_| generator()).collect();
        Matrix { nrow, ncol, data }
    }

    /// Uniform random elements in [-1, 1).
    pub fn random(nrow: usize, ncol: usize) -> Matrix {
        let mut rng = rand::thread_rng();
        Matrix::with_generator(nrow, ncol, || rng.gen::<f64>() * 2.0 - 1.0)
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    /// Both u1 and u2 must be uniform on (0, 1].
    fn sample_standard_normal<R: Rng>(rng: &mut R) -> f64 {
        // Draw two independent uniform samples in (0, 1] to avoid log(0).
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// He initialization: samples from N(0, sqrt(2 / ncol)).
    ///
    /// Recommended before ReLU layers. The variance 2/fan_in accounts for
    /// the fact that ReLU zeroes half of its inputs on average.
    ///
    /// Shape: (nrow, ncol). `ncol` is the fan-in (number of input connections).
    pub fn he(nrow: usize, ncol: usize) -> Matrix {
        let mut rng = rand::thread_rng();
        let std_dev = (2.0 / ncol as f64).sqrt();
        Matrix::with_generator(nrow, ncol, || {
            Matrix::sample_standard_normal(&mut rng) * std_dev
        })
    }

    /// Xavier (Glorot) initialization: samples from N(0, sqrt(1 / ncol)).
    ///
    /// Recommended before Sigmoid/Tanh layers. Keeps the variance of
    /// activations and gradients roughly equal across layers.
    ///
    /// Shape: (nrow, ncol). `ncol` is the fan-in (number of input connections).
    pub fn xavier(nrow: usize, ncol: usize) -> Matrix {
        let mut rng = rand::thread_rng();
        let std_dev = (1.0 / ncol as f64).sqrt();
        Matrix::with_generator(nrow, ncol, || {
            Matrix::sample_standard_normal(&mut rng) * std_dev
        })
    }

    pub fn size(&self) -> usize {
        self.nrow * self.ncol
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat row-major view of the elements.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Row `i` as a fresh 1×ncol matrix.
    pub fn row(&self, i: usize) -> Matrix {
        assert!(i < self.nrow, "row {} out of bounds for {} rows", i, self.nrow);
        Matrix {
            nrow: 1,
            ncol: self.ncol,
            data: self.data[i * self.ncol..(i + 1) * self.ncol].to_vec(),
        }
    }

    pub fn set_zero(&mut self) {
        self.data.fill(0.0);
    }

    pub fn set_ones(&mut self) {
        self.data.fill(1.0);
    }

    /// Reshapes to `nrow × ncol`, discarding the old elements; the only way
    /// to change shape after construction.
    pub fn resize(&mut self, nrow: usize, ncol: usize) {
        self.nrow = nrow;
        self.ncol = ncol;
        self.data = vec![0.0; nrow * ncol];
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            nrow: self.nrow,
            ncol: self.ncol,
            data: self.data.iter().map(|&x| functor(x)).collect(),
        }
    }

    /// Matrix product; requires `self.ncol == other.nrow`, yields
    /// `self.nrow × other.ncol`.
    pub fn dot(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.ncol != other.nrow {
            return Err(self.shape_mismatch(other));
        }
        let mut res = Matrix::zeros(self.nrow, other.ncol);
        for i in 0..self.nrow {
            for k in 0..other.ncol {
                let mut sum = 0.0;
                for j in 0..self.ncol {
                    sum += self[(i, j)] * other[(j, k)];
                }
                res[(i, k)] = sum;
            }
        }
        Ok(res)
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.ncol, self.nrow);
        for i in 0..self.nrow {
            for j in 0..self.ncol {
                res[(j, i)] = self[(i, j)];
            }
        }
        res
    }

    pub fn t(&self) -> Matrix {
        self.transpose()
    }

    /// Largest element in row-major scan order; ties keep the first
    /// occurrence.
    pub fn max_element(&self) -> Result<f64, MatrixError> {
        if self.data.is_empty() {
            return Err(MatrixError::EmptyOperand);
        }
        let mut max = self.data[0];
        for &x in &self.data {
            if x > max {
                max = x;
            }
        }
        Ok(max)
    }

    /// `(row, col)` of the largest element; ties keep the lowest linear
    /// index.
    pub fn max_index(&self) -> Result<(usize, usize), MatrixError> {
        if self.data.is_empty() {
            return Err(MatrixError::EmptyOperand);
        }
        let mut max = self.data[0];
        let mut max_index = 0;
        for (i, &x) in self.data.iter().enumerate() {
            if x > max {
                max = x;
                max_index = i;
            }
        }
        Ok((max_index / self.ncol, max_index % self.ncol))
    }

    fn shape_mismatch(&self, other: &Matrix) -> MatrixError {
        MatrixError::ShapeMismatch {
            left_rows: self.nrow,
            left_cols: self.ncol,
            right_rows: other.nrow,
            right_cols: other.ncol,
        }
    }

    fn elementwise<F>(&self, other: &Matrix, op: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.nrow != other.nrow || self.ncol != other.ncol {
            panic!("{}", self.shape_mismatch(other));
        }
        Matrix {
            nrow: self.nrow,
            ncol: self.ncol,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| op(a, b))
                .collect(),
        }
    }

    fn elementwise_assign<F>(&mut self, other: &Matrix, op: F)
    where
        F: Fn(&mut f64, f64),
    {
        if self.nrow != other.nrow || self.ncol != other.ncol {
            panic!("{}", self.shape_mismatch(other));
        }
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            op(a, b);
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::empty()
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        assert!(
            i < self.nrow && j < self.ncol,
            "index ({}, {}) out of bounds for {}x{} matrix",
            i,
            j,
            self.nrow,
            self.ncol
        );
        &self.data[i * self.ncol + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        assert!(
            i < self.nrow && j < self.ncol,
            "index ({}, {}) out of bounds for {}x{} matrix",
            i,
            j,
            self.nrow,
            self.ncol
        );
        &mut self.data[i * self.ncol + j]
    }
}

/// Shape-first equality, then elementwise comparison within
/// [`Matrix::EQ_TOLERANCE`]. Exact float equality is useless after any
/// arithmetic, so `==` never compares bits.
impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.nrow == other.nrow
            && self.ncol == other.ncol
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= Self::EQ_TOLERANCE)
    }
}

// ── elementwise matrix ⊕ matrix ─────────────────────────────────────────────

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Matrix {
        self.elementwise(rhs, |a, b| a + b)
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Matrix {
        self.elementwise(rhs, |a, b| a - b)
    }
}

/// Hadamard (elementwise) product; `dot` is the matrix product.
impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Matrix {
        self.elementwise(rhs, |a, b| a * b)
    }
}

impl Div for &Matrix {
    type Output = Matrix;

    fn div(self, rhs: Self) -> Matrix {
        if self.nrow != rhs.nrow || self.ncol != rhs.ncol {
            panic!("{}", self.shape_mismatch(rhs));
        }
        if rhs.data.iter().any(|&x| x == 0.0) {
            panic!("{}", MatrixError::DivisionByZero);
        }
        self.elementwise(rhs, |a, b| a / b)
    }
}

impl<'a> Add<&'a Matrix> for Matrix {
    type Output = Matrix;

    fn add(self, rhs: &'a Matrix) -> Matrix {
        &self + rhs
    }
}

impl<'a> Sub<&'a Matrix> for Matrix {
    type Output = Matrix;

    fn sub(self, rhs: &'a Matrix) -> Matrix {
        &self - rhs
    }
}

impl<'a> Mul<&'a Matrix> for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &'a Matrix) -> Matrix {
        &self * rhs
    }
}

impl<'a> Div<&'a Matrix> for Matrix {
    type Output = Matrix;

    fn div(self, rhs: &'a Matrix) -> Matrix {
        &self / rhs
    }
}

impl<'a> AddAssign<&'a Matrix> for Matrix {
    fn add_assign(&mut self, rhs: &'a Matrix) {
        self.elementwise_assign(rhs, |a, b| *a += b);
    }
}

impl<'a> SubAssign<&'a Matrix> for Matrix {
    fn sub_assign(&mut self, rhs: &'a Matrix) {
        self.elementwise_assign(rhs, |a, b| *a -= b);
    }
}

impl<'a> MulAssign<&'a Matrix> for Matrix {
    fn mul_assign(&mut self, rhs: &'a Matrix) {
        self.elementwise_assign(rhs, |a, b| *a *= b);
    }
}

// ── scalar broadcasts ───────────────────────────────────────────────────────

impl Add<f64> for &Matrix {
    type Output = Matrix;

    fn add(self, scalar: f64) -> Matrix {
        self.map(|x| x + scalar)
    }
}

impl Sub<f64> for &Matrix {
    type Output = Matrix;

    fn sub(self, scalar: f64) -> Matrix {
        self.map(|x| x - scalar)
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, scalar: f64) -> Matrix {
        self.map(|x| x * scalar)
    }
}

impl Div<f64> for &Matrix {
    type Output = Matrix;

    fn div(self, scalar: f64) -> Matrix {
        if scalar == 0.0 {
            panic!("{}", MatrixError::DivisionByZero);
        }
        self.map(|x| x / scalar)
    }
}

impl Add<f64> for Matrix {
    type Output = Matrix;

    fn add(self, scalar: f64) -> Matrix {
        &self + scalar
    }
}

impl Sub<f64> for Matrix {
    type Output = Matrix;

    fn sub(self, scalar: f64) -> Matrix {
        &self - scalar
    }
}

impl Mul<f64> for Matrix {
    type Output = Matrix;

    fn mul(self, scalar: f64) -> Matrix {
        &self * scalar
    }
}

impl Div<f64> for Matrix {
    type Output = Matrix;

    fn div(self, scalar: f64) -> Matrix {
        &self / scalar
    }
}

impl AddAssign<f64> for Matrix {
    fn add_assign(&mut self, scalar: f64) {
        for x in &mut self.data {
            *x += scalar;
        }
    }
}

impl SubAssign<f64> for Matrix {
    fn sub_assign(&mut self, scalar: f64) {
        for x in &mut self.data {
            *x -= scalar;
        }
    }
}

impl MulAssign<f64> for Matrix {
    fn mul_assign(&mut self, scalar: f64) {
        for x in &mut self.data {
            *x *= scalar;
        }
    }
}

impl DivAssign<f64> for Matrix {
    fn div_assign(&mut self, scalar: f64) {
        if scalar == 0.0 {
            panic!("{}", MatrixError::DivisionByZero);
        }
        for x in &mut self.data {
            *x /= scalar;
        }
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.map(|x| -x)
    }
}

impl Neg for Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        -&self
    }
}

/// Debug dump: bracketed row-major printout, six decimals per element,
/// rows separated by `],\n[`. Not a persisted format.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for i in 0..self.nrow {
            write!(f, "[")?;
            for j in 0..self.ncol {
                if j + 1 < self.ncol {
                    write!(f, "{:.6},", self[(i, j)])?;
                } else {
                    write!(f, "{:.6}", self[(i, j)])?;
                }
            }
            if i + 1 < self.nrow {
                write!(f, "],\n")?;
            } else {
                write!(f, "]")?;
            }
        }
        write!(f, "]")
    }
}
