//! Rational-Quadratic kernel implementation
//!
//! The Rational-Quadratic kernel is defined as:
//! K(x, y) = (1 + α * ||x - y||²)^(-β)
//!
//! It behaves like a scale mixture of Gaussian kernels with different length
//! scales; β controls the relative weighting of large and small scales, and
//! the kernel tends to the Gaussian kernel exp(-αβ·d²) when β → ∞.

use crate::core::params::{cast_scalar, check, positive, Scale};
use crate::core::{KernelProperties, Result};
use crate::distance::BaseFunction;
use crate::kernel::traits::{impl_kappa_kernel, ConvertKernel, Kappa};
use linfa::Float;
use std::fmt;

/// Rational-Quadratic kernel: K(x, y) = (1 + α * ||x - y||²)^(-β)
///
/// When `alpha` is a vector, each input dimension gets its own scale and the
/// kernel uses the weighted distance Σᵢ αᵢ (xᵢ - yᵢ)² instead.
#[derive(Debug, Clone, PartialEq)]
pub struct RationalQuadraticKernel<F: Float> {
    alpha: Scale<F>,
    beta: F,
    base: BaseFunction<F>,
    /// α for a scalar alpha, 1 once α is folded into the distance
    scale: F,
}

impl<F: Float> RationalQuadraticKernel<F> {
    /// Create a new Rational-Quadratic kernel
    ///
    /// # Arguments
    /// * `alpha` - scale, scalar or per dimension (must be positive)
    /// * `beta` - shape (must be positive)
    ///
    /// # Examples
    /// ```
    /// use rkernel::kernel::RationalQuadraticKernel;
    ///
    /// let kernel = RationalQuadraticKernel::new(2.0, 0.5).unwrap();
    /// assert_eq!(kernel.beta(), 0.5);
    /// assert!(RationalQuadraticKernel::new(-1.0, 1.0).is_err());
    /// ```
    pub fn new(alpha: impl Into<Scale<F>>, beta: F) -> Result<Self> {
        let alpha = alpha.into();
        alpha.check("alpha", "alpha > 0", positive)?;
        check("beta", "beta > 0", beta, positive)?;

        let (base, scale) = match &alpha {
            Scale::Scalar(a) => (BaseFunction::SquaredEuclidean, *a),
            Scale::Vector(a) => (BaseFunction::weighted(a.clone())?, F::one()),
        };
        Ok(Self {
            alpha,
            beta,
            base,
            scale,
        })
    }

    pub fn alpha(&self) -> &Scale<F> {
        &self.alpha
    }

    pub fn beta(&self) -> F {
        self.beta
    }

    /// Same kernel with parameters cast to `G`
    pub fn cast<G: Float>(&self) -> Result<RationalQuadraticKernel<G>> {
        RationalQuadraticKernel::new(
            self.alpha.cast::<G>("alpha")?,
            cast_scalar("beta", self.beta)?,
        )
    }
}

impl<F: Float> Default for RationalQuadraticKernel<F> {
    /// α = 1, β = 1
    fn default() -> Self {
        Self {
            alpha: Scale::Scalar(F::one()),
            beta: F::one(),
            base: BaseFunction::SquaredEuclidean,
            scale: F::one(),
        }
    }
}

impl<F: Float> Kappa<F> for RationalQuadraticKernel<F> {
    fn base_function(&self) -> &BaseFunction<F> {
        &self.base
    }

    fn kappa(&self, z: F) -> F {
        (F::one() + self.scale * z).powf(-self.beta)
    }
}

impl_kappa_kernel!(RationalQuadraticKernel, KernelProperties::MERCER_ISOTROPIC);

impl<F: Float, G: Float> ConvertKernel<G> for RationalQuadraticKernel<F> {
    type Output = RationalQuadraticKernel<G>;

    fn convert(&self) -> Result<Self::Output> {
        self.cast()
    }
}

impl<F: Float> fmt::Display for RationalQuadraticKernel<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "RationalQuadraticKernel<{}>(alpha={}, beta={})",
            std::any::type_name::<F>(),
            self.alpha,
            self.beta
        )
    }
}
