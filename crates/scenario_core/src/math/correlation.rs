//! Correlation and covariance matrices with Cholesky decomposition.
//!
//! ## Mathematical Background
//!
//! Given `n` independent standard normal variables `Z`, correlated shocks
//! with covariance `Σ` are obtained as
//!
//! ```text
//! X = L · Z,   Σ = L · Lᵀ
//! ```
//!
//! where `L` is the lower triangular Cholesky factor of
//!
//! ```text
//! Σ = diag(σ) · C · diag(σ)
//! ```
//!
//! Because `(L·Z)_i = σ_i · W_i` with `W` correlated standard normals, the
//! same factor drives both the additive and the log-normal return models.
//!
//! ## Semi-definite matrices
//!
//! A sector with zero volatility makes `Σ` singular but still positive
//! semi-definite. The factorisation accepts this: a vanishing pivot yields a
//! zero column, provided the remaining entries of that column vanish too.
//! Anything else is reported as [`CorrelationError::NotPositiveSemiDefinite`];
//! no nearby matrix is substituted.
//!
//! ## Usage
//!
//! ```
//! use scenario_core::CorrelationMatrix;
//!
//! let corr = CorrelationMatrix::from_rows(&[
//!     vec![1.0, 0.5],
//!     vec![0.5, 1.0],
//! ]).unwrap();
//!
//! let cov = corr.covariance(&[0.2, 0.1]);
//! let chol = cov.cholesky().unwrap();
//!
//! let mut shock = [0.0; 2];
//! chol.transform_into(&[1.0, 0.0], &mut shock);
//! assert!((shock[0] - 0.2).abs() < 1e-12);
//! assert!((shock[1] - 0.05).abs() < 1e-12);
//! ```

use std::fmt;

/// Tolerance for unit-diagonal and symmetry checks.
const STRUCTURE_EPSILON: f64 = 1e-9;

/// Relative pivot tolerance for the semi-definite Cholesky factorisation.
const PSD_EPSILON: f64 = 1e-12;

/// Error types for correlation operations.
#[derive(Debug, Clone, PartialEq)]
pub enum CorrelationError {
    /// Matrix has no rows.
    Empty,
    /// Row `row` has `got` entries, expected `expected`.
    InvalidDimensions {
        /// Offending row.
        row: usize,
        /// Expected row length.
        expected: usize,
        /// Actual row length.
        got: usize,
    },
    /// Diagonal element is not 1.0.
    InvalidDiagonal {
        /// Diagonal index.
        index: usize,
        /// Value found.
        value: f64,
    },
    /// Matrix is not symmetric at `(i, j)`.
    NotSymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
    },
    /// Element is outside [-1, 1] or not finite.
    OutOfRange {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
        /// Value found.
        value: f64,
    },
    /// Cholesky factorisation failed at pivot `index`.
    NotPositiveSemiDefinite {
        /// Pivot at which the factorisation broke down.
        index: usize,
    },
}

impl fmt::Display for CorrelationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationError::Empty => write!(f, "Matrix is empty"),
            CorrelationError::InvalidDimensions { row, expected, got } => {
                write!(
                    f,
                    "Invalid matrix dimensions: row {} has {} elements, expected {}",
                    row, got, expected
                )
            }
            CorrelationError::InvalidDiagonal { index, value } => {
                write!(
                    f,
                    "Diagonal element at index {} is {}, expected 1.0",
                    index, value
                )
            }
            CorrelationError::NotSymmetric { i, j } => {
                write!(f, "Matrix is not symmetric at ({}, {})", i, j)
            }
            CorrelationError::OutOfRange { i, j, value } => {
                write!(
                    f,
                    "Correlation at ({}, {}) is {}, must be in [-1, 1]",
                    i, j, value
                )
            }
            CorrelationError::NotPositiveSemiDefinite { index } => {
                write!(
                    f,
                    "Matrix is not positive semi-definite (Cholesky failed at pivot {})",
                    index
                )
            }
        }
    }
}

impl std::error::Error for CorrelationError {}

/// Sector correlation matrix.
///
/// A correlation matrix must satisfy:
/// - Square and symmetric
/// - Diagonal elements equal to 1.0
/// - Off-diagonal elements in [-1, 1]
///
/// Positive semi-definiteness is checked when the covariance is factorised.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationMatrix {
    /// Matrix elements in row-major order.
    data: Vec<f64>,
    /// Matrix dimension (n x n).
    dim: usize,
}

impl CorrelationMatrix {
    /// Create a correlation matrix from rows.
    ///
    /// # Errors
    ///
    /// Any structural violation listed on [`CorrelationError`] except
    /// `NotPositiveSemiDefinite`.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, CorrelationError> {
        let dim = rows.len();
        if dim == 0 {
            return Err(CorrelationError::Empty);
        }

        let mut data = Vec::with_capacity(dim * dim);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != dim {
                return Err(CorrelationError::InvalidDimensions {
                    row,
                    expected: dim,
                    got: values.len(),
                });
            }
            data.extend_from_slice(values);
        }

        for i in 0..dim {
            let diag = data[i * dim + i];
            if !diag.is_finite() || (diag - 1.0).abs() > STRUCTURE_EPSILON {
                return Err(CorrelationError::InvalidDiagonal {
                    index: i,
                    value: diag,
                });
            }
        }

        for i in 0..dim {
            for j in (i + 1)..dim {
                let val_ij = data[i * dim + j];
                let val_ji = data[j * dim + i];

                if !val_ij.is_finite() || !(-1.0..=1.0).contains(&val_ij) {
                    return Err(CorrelationError::OutOfRange { i, j, value: val_ij });
                }
                if !val_ji.is_finite() || (val_ij - val_ji).abs() > STRUCTURE_EPSILON {
                    return Err(CorrelationError::NotSymmetric { i, j });
                }
            }
        }

        Ok(Self { data, dim })
    }

    /// Create an identity correlation matrix (no correlation).
    pub fn identity(dim: usize) -> Self {
        let mut data = vec![0.0; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = 1.0;
        }
        Self { data, dim }
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at (i, j).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.dim + j]
    }

    /// Build `diag(vols) · C · diag(vols)`.
    ///
    /// `vols` must have one entry per row.
    pub fn covariance(&self, vols: &[f64]) -> CovarianceMatrix {
        debug_assert_eq!(vols.len(), self.dim);
        let n = self.dim;
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                data[i * n + j] = vols[i] * self.get(i, j) * vols[j];
            }
        }
        CovarianceMatrix { data, dim: n }
    }
}

/// Symmetric covariance matrix, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct CovarianceMatrix {
    data: Vec<f64>,
    dim: usize,
}

impl CovarianceMatrix {
    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at (i, j).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.dim + j]
    }

    /// Variance of the weighted sum `wᵀ Σ w`.
    pub fn quadratic_form(&self, w: &[f64]) -> f64 {
        let n = self.dim;
        let mut total = 0.0;
        for i in 0..n {
            for j in 0..n {
                total += w[i] * self.get(i, j) * w[j];
            }
        }
        total
    }

    /// Lower triangular `L` with `Σ = L · Lᵀ`.
    ///
    /// Column-by-column (Cholesky–Crout) factorisation with semi-definite pivots.
    ///
    /// # Errors
    ///
    /// `NotPositiveSemiDefinite` if a pivot is negative beyond tolerance,
    /// or a zero pivot has non-zero entries below it.
    pub fn cholesky(&self) -> Result<CholeskyFactor, CorrelationError> {
        let n = self.dim;
        let max_diag = (0..n).map(|i| self.get(i, i)).fold(0.0_f64, f64::max);
        let tol = PSD_EPSILON * max_diag.max(f64::MIN_POSITIVE);
        let mut lower = vec![0.0; n * n];

        for j in 0..n {
            let mut pivot = self.get(j, j);
            for k in 0..j {
                let l_jk = lower[j * n + k];
                pivot -= l_jk * l_jk;
            }

            if pivot < -tol {
                return Err(CorrelationError::NotPositiveSemiDefinite { index: j });
            }

            if pivot <= tol {
                // Degenerate direction: everything below the pivot must vanish.
                for i in (j + 1)..n {
                    let mut residual = self.get(i, j);
                    for k in 0..j {
                        residual -= lower[i * n + k] * lower[j * n + k];
                    }
                    if residual.abs() > tol.sqrt() * self.get(i, i).max(0.0).sqrt() + tol {
                        return Err(CorrelationError::NotPositiveSemiDefinite { index: j });
                    }
                }
                continue;
            }

            let l_jj = pivot.sqrt();
            lower[j * n + j] = l_jj;
            for i in (j + 1)..n {
                let mut sum = self.get(i, j);
                for k in 0..j {
                    sum -= lower[i * n + k] * lower[j * n + k];
                }
                lower[i * n + j] = sum / l_jj;
            }
        }

        Ok(CholeskyFactor { data: lower, dim: n })
    }
}

/// Lower triangular Cholesky factor.
///
/// Used to transform independent standard normals into correlated shocks.
#[derive(Clone, Debug, PartialEq)]
pub struct CholeskyFactor {
    /// Lower triangular matrix elements (row-major).
    data: Vec<f64>,
    /// Matrix dimension.
    dim: usize,
}

impl CholeskyFactor {
    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at (i, j). Zero above the diagonal.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if j > i {
            0.0
        } else {
            self.data[i * self.dim + j]
        }
    }

    /// Write `L · z` into `out` without allocating.
    ///
    /// Both slices must have length [`dim`](Self::dim).
    #[inline]
    pub fn transform_into(&self, z: &[f64], out: &mut [f64]) {
        let n = self.dim;
        for i in 0..n {
            let row = &self.data[i * n..i * n + i + 1];
            out[i] = row.iter().zip(&z[..=i]).map(|(l, z)| l * z).sum();
        }
    }
}
