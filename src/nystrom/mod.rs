//! Nyström low-rank approximation of kernel matrices
//!
//! A sample of `m` landmark observations is drawn from the `n` observations of
//! a dataset. With `W` the `m x m` Gram matrix of the landmarks and `C` the
//! `n x m` kernel matrix of the whole dataset against them, the full Gram
//! matrix is approximated by
//!
//! ```text
//! K ≈ C V Λ⁻¹ Vᵀ Cᵀ
//! ```
//!
//! where `(Λ, V)` are the eigenpairs of `W` kept above a tolerance.
//!
//! ```
//! use ndarray::array;
//! use rkernel::kernel::GaussianKernel;
//! use rkernel::nystrom::NystromParams;
//!
//! let x = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [2.0, 2.0]];
//! let factorization = NystromParams::default()
//!     .n_samples(3)
//!     .seed(Some(42))
//!     .fit(GaussianKernel::new(0.5).unwrap(), &x)
//!     .unwrap();
//!
//! assert_eq!(factorization.samples().len(), 3);
//! assert_eq!(factorization.approximate().dim(), (5, 5));
//! ```

mod params;

pub use params::*;

use crate::core::params::{check, non_negative};
use crate::core::{KernelError, Orientation, Result};
use crate::kernel::Kernel;
use crate::matrix::{check_features, cross_kernel_matrix, kernel_matrix, mirror_upper};
use linfa::Float;
use linfa_linalg::eigh::{EigSort, EighInto};
use log::{debug, info, warn};
use ndarray::{s, Array1, Array2, ArrayBase, Axis, Data, Ix2};

/// Low-rank factorization of a kernel matrix
///
/// Built once by [`NystromParams::fit`] and never modified afterwards.
#[derive(Debug, Clone)]
pub struct NystromFactorization<F: Float, K> {
    kernel: K,
    orientation: Orientation,
    samples: Vec<usize>,
    /// Landmark observations, one per row
    landmarks: Array2<F>,
    /// Retained eigenvalues of `W`, descending
    eigenvalues: Array1<F>,
    /// Matching eigenvectors of `W` as columns
    eigenvectors: Array2<F>,
    /// `V Λ^(-1/2)`
    projection: Array2<F>,
    /// `C`, the dataset against the landmarks
    cross: Array2<F>,
    tolerance: F,
}

impl<F: Float> NystromParams<F> {
    /// Factorize the Gram matrix of `x` under `kernel`
    pub fn fit<K: Kernel<F>>(
        &self,
        kernel: K,
        x: &ArrayBase<impl Data<Elem = F>, Ix2>,
    ) -> Result<NystromFactorization<F, K>> {
        if let Some(tolerance) = self.eigen_tolerance() {
            check("tolerance", "tolerance >= 0", tolerance, non_negative)?;
        }

        let xs = self.data_orientation().observations(x);
        check_features(&kernel, xs.ncols(), xs.ncols())?;
        let samples = self.sampling().select(xs.nrows())?;
        let m = samples.len();
        debug!("Nystrom landmarks ({m} of {}): {samples:?}", xs.nrows());

        let landmarks = xs.select(Axis(0), &samples);
        let w = kernel_matrix(&kernel, &landmarks, Orientation::Row)?;
        let (values, vectors) = w.eigh_into()?.sort_eig_desc();

        let tolerance = match self.eigen_tolerance() {
            Some(tolerance) => tolerance,
            None => default_tolerance(&values),
        };
        let rank = values.iter().take_while(|&&v| v > tolerance).count();
        if rank == 0 {
            return Err(KernelError::DegenerateSample {
                tolerance: tolerance.to_string(),
            });
        }
        if rank < m {
            warn!(
                "Discarding {} of {m} eigenpairs at or below tolerance {tolerance}",
                m - rank
            );
        }
        info!("Nystrom approximation of rank {rank} from {m} landmarks");

        let eigenvalues = values.slice(s![..rank]).to_owned();
        let eigenvectors = vectors.slice(s![.., ..rank]).to_owned();
        let projection = &eigenvectors * &eigenvalues.mapv(|v| v.sqrt().recip());
        let cross = cross_kernel_matrix(&kernel, &xs, &landmarks, Orientation::Row)?;

        Ok(NystromFactorization {
            kernel,
            orientation: self.data_orientation(),
            samples,
            landmarks,
            eigenvalues,
            eigenvectors,
            projection,
            cross,
            tolerance,
        })
    }
}

/// `λ_max * m * ε`
fn default_tolerance<F: Float>(values: &Array1<F>) -> F {
    let lambda_max = values
        .iter()
        .fold(F::zero(), |acc, &v| if v > acc { v } else { acc });
    let m = F::from_usize(values.len()).unwrap_or_else(F::one);
    lambda_max * m * F::epsilon()
}

/// Nyström factorization of the Gram matrix of `x`
pub fn nystrom<F: Float, K: Kernel<F>>(
    kernel: K,
    x: &ArrayBase<impl Data<Elem = F>, Ix2>,
    params: &NystromParams<F>,
) -> Result<NystromFactorization<F, K>> {
    params.fit(kernel, x)
}

impl<F: Float, K: Kernel<F>> NystromFactorization<F, K> {
    /// Approximate `n x n` Gram matrix `C V Λ⁻¹ Vᵀ Cᵀ`
    ///
    /// The result is exactly symmetric.
    pub fn approximate(&self) -> Array2<F> {
        let e = self.embedding();
        let mut k = e.dot(&e.t());
        mirror_upper(k.view_mut());
        k
    }

    /// Feature-space embedding `C V Λ^(-1/2)` of the fitted observations
    ///
    /// `embedding() · embedding()ᵀ` equals [`approximate`](Self::approximate).
    pub fn embedding(&self) -> Array2<F> {
        self.cross.dot(&self.projection)
    }

    /// Embedding `κ(y, landmarks) V Λ^(-1/2)` of new observations
    ///
    /// `y` is read with the orientation used at fit time.
    pub fn transform(&self, y: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<Array2<F>> {
        let ys = self.orientation.observations(y);
        let c = cross_kernel_matrix(&self.kernel, &ys, &self.landmarks, Orientation::Row)?;
        Ok(c.dot(&self.projection))
    }
}

impl<F: Float, K> NystromFactorization<F, K> {
    /// Indices of the landmark observations
    pub fn samples(&self) -> &[usize] {
        &self.samples
    }

    pub fn landmarks(&self) -> &Array2<F> {
        &self.landmarks
    }

    pub fn eigenvalues(&self) -> &Array1<F> {
        &self.eigenvalues
    }

    pub fn eigenvectors(&self) -> &Array2<F> {
        &self.eigenvectors
    }

    /// `C`, kernel values of every observation against the landmarks
    pub fn cross_kernel(&self) -> &Array2<F> {
        &self.cross
    }

    /// Number of retained eigenpairs
    pub fn rank(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Effective eigenvalue tolerance
    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of observations the factorization was fitted on
    pub fn n_obs(&self) -> usize {
        self.cross.nrows()
    }
}
