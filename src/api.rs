//! High-level API for kernel matrix computations
//!
//! This module wraps the matrix, centering and Nyström layers behind a small
//! builder so the common cases take one expression.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rkernel::api::{quick, Gram};
//! use rkernel::kernel::GaussianKernel;
//! use rkernel::Orientation;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Centered Gram matrix of a dataset stored one observation per column
//! let x = ndarray::array![[0.0, 1.0, 2.0], [1.0, 0.0, 1.0]];
//! let k = Gram::new(GaussianKernel::new(0.5)?)
//!     .with_orientation(Orientation::Col)
//!     .centered(true)
//!     .compute(&x)?;
//! assert_eq!(k.dim(), (3, 3));
//!
//! // Straight from a CSV file
//! let k = quick::gram_from_csv(&GaussianKernel::default(), "data.csv")?;
//! println!("{k}");
//! # Ok(())
//! # }
//! ```

use crate::cache::CachedGram;
use crate::centering::center_kernel_matrix_inplace;
use crate::core::{Orientation, Result};
use crate::kernel::Kernel;
use crate::matrix::{cross_kernel_matrix, kernel_matrix};
use crate::nystrom::{NystromFactorization, NystromParams};
use linfa::Float;
use ndarray::{Array2, ArrayBase, Data, Ix2};

/// Gram matrix builder
#[derive(Debug, Clone)]
pub struct Gram<K> {
    kernel: K,
    orientation: Orientation,
    centered: bool,
}

impl<K> Gram<K> {
    /// Row-oriented, uncentered Gram matrices of `kernel`
    pub fn new(kernel: K) -> Self {
        Self {
            kernel,
            orientation: Orientation::Row,
            centered: false,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Double-center the computed matrices
    pub fn centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_centered(&self) -> bool {
        self.centered
    }

    /// Gram matrix of `x`
    pub fn compute<F: Float>(&self, x: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<Array2<F>>
    where
        K: Kernel<F>,
    {
        let mut k = kernel_matrix(&self.kernel, x, self.orientation)?;
        if self.centered {
            center_kernel_matrix_inplace(&mut k)?;
        }
        Ok(k)
    }

    /// Cross kernel matrix of `x` against `y`
    ///
    /// Never centered: double centering only applies to the Gram matrix of a
    /// single dataset.
    pub fn compute_cross<F: Float>(
        &self,
        x: &ArrayBase<impl Data<Elem = F>, Ix2>,
        y: &ArrayBase<impl Data<Elem = F>, Ix2>,
    ) -> Result<Array2<F>>
    where
        K: Kernel<F>,
    {
        cross_kernel_matrix(&self.kernel, x, y, self.orientation)
    }

    /// Lazily evaluated Gram matrix of `x` keeping up to `capacity` entries
    pub fn cached<F: Float>(
        self,
        x: &ArrayBase<impl Data<Elem = F>, Ix2>,
        capacity: usize,
    ) -> Result<CachedGram<F, K>>
    where
        K: Kernel<F>,
    {
        CachedGram::new(self.kernel, x, self.orientation, capacity)
    }

    /// Nyström factorization of the Gram matrix of `x` with `m` random landmarks
    pub fn nystrom<F: Float>(
        self,
        x: &ArrayBase<impl Data<Elem = F>, Ix2>,
        m: usize,
        seed: Option<u64>,
    ) -> Result<NystromFactorization<F, K>>
    where
        K: Kernel<F>,
    {
        NystromParams::default()
            .n_samples(m)
            .seed(seed)
            .orientation(self.orientation)
            .fit(self.kernel, x)
    }
}

/// Convenience functions for quick operations
pub mod quick {
    use super::*;
    use crate::data::read_csv_matrix;
    use std::path::Path;

    /// Gram matrix of the observations stored in a CSV file
    pub fn gram_from_csv<K: Kernel<f64>, P: AsRef<Path>>(kernel: &K, path: P) -> Result<Array2<f64>> {
        let x = read_csv_matrix(path)?;
        kernel_matrix(kernel, &x, Orientation::Row)
    }

    /// Centered Gram matrix of the observations stored in a CSV file
    pub fn centered_gram_from_csv<K: Kernel<f64>, P: AsRef<Path>>(
        kernel: &K,
        path: P,
    ) -> Result<Array2<f64>> {
        let mut k = gram_from_csv(kernel, path)?;
        center_kernel_matrix_inplace(&mut k)?;
        Ok(k)
    }

    /// Seeded Nyström factorization of the observations stored in a CSV file
    pub fn nystrom_from_csv<K: Kernel<f64>, P: AsRef<Path>>(
        kernel: K,
        path: P,
        m: usize,
        seed: u64,
    ) -> Result<NystromFactorization<f64, K>> {
        let x = read_csv_matrix(path)?;
        Gram::new(kernel).nystrom(&x, m, Some(seed))
    }
}
