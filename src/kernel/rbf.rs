//! Gaussian (RBF) kernel implementation
//!
//! The Gaussian kernel is defined as: K(x, y) = exp(-α * ||x - y||²)
//! where α controls the kernel width.

use crate::core::params::{positive, Scale};
use crate::core::{KernelError, KernelProperties, Result};
use crate::distance::BaseFunction;
use crate::kernel::traits::{impl_kappa_kernel, ConvertKernel, Kappa};
use linfa::Float;
use std::fmt;

/// Gaussian kernel: K(x, y) = exp(-α * ||x - y||²)
///
/// The alpha parameter controls the "reach" of each observation:
/// - High alpha: only close points are similar
/// - Low alpha: distant points keep a high similarity
///
/// A vector alpha gives one inverse squared length scale per dimension
/// (automatic relevance determination).
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel<F: Float> {
    alpha: Scale<F>,
    base: BaseFunction<F>,
    scale: F,
}

impl<F: Float> GaussianKernel<F> {
    /// Create a new Gaussian kernel
    ///
    /// # Arguments
    /// * `alpha` - scalar or per-dimension alpha (must be positive)
    pub fn new(alpha: impl Into<Scale<F>>) -> Result<Self> {
        let alpha = alpha.into();
        alpha.check("alpha", "alpha > 0", positive)?;

        let (base, scale) = match &alpha {
            Scale::Scalar(a) => (BaseFunction::SquaredEuclidean, *a),
            Scale::Vector(a) => (BaseFunction::weighted(a.clone())?, F::one()),
        };
        Ok(Self { alpha, base, scale })
    }

    /// Create Gaussian kernel with alpha = 1.0 / n_features
    ///
    /// This is a common default choice that scales inversely with dimensionality.
    pub fn with_auto_alpha(n_features: usize) -> Result<Self> {
        if n_features == 0 {
            return Err(KernelError::invalid("n_features", "n_features > 0", 0));
        }
        let n = F::from_usize(n_features)
            .ok_or_else(|| KernelError::invalid("n_features", "representable", n_features))?;
        Self::new(n.recip())
    }

    pub fn alpha(&self) -> &Scale<F> {
        &self.alpha
    }

    /// Same kernel with parameters cast to `G`
    pub fn cast<G: Float>(&self) -> Result<GaussianKernel<G>> {
        GaussianKernel::new(self.alpha.cast::<G>("alpha")?)
    }
}

impl<F: Float> Default for GaussianKernel<F> {
    /// Gaussian kernel with alpha = 1.0
    fn default() -> Self {
        Self {
            alpha: Scale::Scalar(F::one()),
            base: BaseFunction::SquaredEuclidean,
            scale: F::one(),
        }
    }
}

impl<F: Float> Kappa<F> for GaussianKernel<F> {
    fn base_function(&self) -> &BaseFunction<F> {
        &self.base
    }

    fn kappa(&self, z: F) -> F {
        (-self.scale * z).exp()
    }
}

impl_kappa_kernel!(GaussianKernel, KernelProperties::MERCER_ISOTROPIC);

impl<F: Float, G: Float> ConvertKernel<G> for GaussianKernel<F> {
    type Output = GaussianKernel<G>;

    fn convert(&self) -> Result<Self::Output> {
        self.cast()
    }
}

impl<F: Float> fmt::Display for GaussianKernel<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "GaussianKernel<{}>(alpha={})",
            std::any::type_name::<F>(),
            self.alpha
        )
    }
}
