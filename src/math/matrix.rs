use std::ops::Range;

use rand::Rng;

/// Row-major 2D matrix of `f64`.
///
/// The engine treats rows as samples and columns as features/neurons.
/// Shape mismatches in the operations below are programmer errors and panic.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Builds a matrix from row vectors. All rows must have equal length.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Matrix {
        let rows = data.len();
        let cols = data.first().map_or(0, |row| row.len());
        assert!(
            data.iter().all(|row| row.len() == cols),
            "all rows must have length {cols}"
        );
        Matrix { rows, cols, data }
    }

    /// Every entry drawn independently and uniformly from `[-bound, bound)`.
    ///
    /// Entries are drawn in row-major order, so a given RNG state yields a
    /// reproducible matrix.
    pub fn uniform<R: Rng + ?Sized>(rows: usize, cols: usize, bound: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for row in res.data.iter_mut() {
            for value in row.iter_mut() {
                *value = rng.gen_range(-bound..bound);
            }
        }
        res
    }

    /// Matrix product `self · rhs`.
    pub fn dot(&self, rhs: &Matrix) -> Matrix {
        assert_eq!(
            self.cols, rhs.rows,
            "dot: lhs is {}x{}, rhs is {}x{}",
            self.rows, self.cols, rhs.rows, rhs.cols
        );

        let mut res = Matrix::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let lhs_ik = self.data[i][k];
                for j in 0..rhs.cols {
                    res.data[i][j] += lhs_ik * rhs.data[k][j];
                }
            }
        }
        res
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[j][i] = self.data[i][j];
            }
        }
        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix::from_rows(
            self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        )
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn hadamard(&self, rhs: &Matrix) -> Matrix {
        assert_eq!(self.rows, rhs.rows, "hadamard: row counts differ");
        assert_eq!(self.cols, rhs.cols, "hadamard: column counts differ");
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(a, b)| a.iter().zip(b.iter()).map(|(x, y)| x * y).collect())
            .collect();
        Matrix::from_rows(data)
    }

    pub fn sub(&self, rhs: &Matrix) -> Matrix {
        assert_eq!(self.rows, rhs.rows, "sub: row counts differ");
        assert_eq!(self.cols, rhs.cols, "sub: column counts differ");
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(a, b)| a.iter().zip(b.iter()).map(|(x, y)| x - y).collect())
            .collect();
        Matrix::from_rows(data)
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    /// Adds `row` to every row of the matrix (bias broadcast).
    pub fn add_row(&self, row: &[f64]) -> Matrix {
        assert_eq!(self.cols, row.len(), "add_row: length must match columns");
        let data = self
            .data
            .iter()
            .map(|r| r.iter().zip(row.iter()).map(|(x, b)| x + b).collect())
            .collect();
        Matrix::from_rows(data)
    }

    /// Copies the rows in `range` into a new matrix, preserving order.
    pub fn slice_rows(&self, range: Range<usize>) -> Matrix {
        assert!(range.end <= self.rows, "slice_rows: range out of bounds");
        Matrix::from_rows(self.data[range].to_vec())
    }

    /// Reorders rows according to `order` (one index per output row).
    pub fn select_rows(&self, order: &[usize]) -> Matrix {
        Matrix::from_rows(order.iter().map(|&i| self.data[i].clone()).collect())
    }
}
