use std::ops::{Index, IndexMut};

/// Dense symmetric matrix stored in row-major order.
///
/// Only the storage is symmetric-agnostic; writers are expected to keep
/// `m[(i, j)] == m[(j, i)]`. [`SymmetricMatrix::set`] writes both halves.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricMatrix {
    dim: usize,
    data: Vec<f64>,
}

impl SymmetricMatrix {
    /// Creates a `dim × dim` matrix filled with zeros.
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![0.0; dim * dim],
        }
    }

    /// Creates a `dim × dim` identity matrix.
    #[must_use]
    pub fn identity(dim: usize) -> Self {
        let mut m = Self::zeros(dim);
        for i in 0..dim {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Builds a matrix from rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not form a square matrix.
    #[must_use]
    pub fn from_rows<R>(rows: &[R]) -> Self
    where
        R: AsRef<[f64]>,
    {
        let dim = rows.len();
        let mut m = Self::zeros(dim);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            assert_eq!(row.len(), dim, "matrix must be square");
            for (j, value) in row.iter().enumerate() {
                m[(i, j)] = *value;
            }
        }
        m
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Writes `value` at `(i, j)` and `(j, i)`.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self[(i, j)] = value;
        self[(j, i)] = value;
    }

    /// Returns `true` if every entry is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Sum of the diagonal entries.
    #[must_use]
    pub fn trace(&self) -> f64 {
        (0..self.dim).map(|i| self[(i, i)]).sum()
    }

    /// Frobenius norm of the strictly upper triangle.
    #[must_use]
    pub fn off_diagonal_norm(&self) -> f64 {
        let mut sum = 0.0;
        for i in 0..self.dim {
            for j in (i + 1)..self.dim {
                sum += self[(i, j)].powi(2);
            }
        }
        sum.sqrt()
    }

    /// Frobenius norm of the whole matrix.
    #[must_use]
    pub fn frobenius_norm(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum::<f64>().sqrt()
    }
}

impl Index<(usize, usize)> for SymmetricMatrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.data[i * self.dim + j]
    }
}

impl IndexMut<(usize, usize)> for SymmetricMatrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        &mut self.data[i * self.dim + j]
    }
}
