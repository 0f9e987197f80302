//! Gamma-Rational-Quadratic kernel implementation
//!
//! K(x, y) = (1 + α * ||x - y||^(2γ))^(-β),  α > 0, β > 0, γ ∈ (0, 1]
//!
//! With γ = 1 this is the Rational-Quadratic kernel.

use crate::core::params::{cast_scalar, check, positive, unit_interval, Scale};
use crate::core::{KernelProperties, Result};
use crate::distance::BaseFunction;
use crate::kernel::traits::{impl_kappa_kernel, ConvertKernel, Kappa};
use linfa::Float;
use std::fmt;

/// Gamma-Rational-Quadratic kernel: K(x, y) = (1 + α * (||x - y||²)^γ)^(-β)
///
/// A vector `alpha` is pushed into the distance as weights α^(-γ); `kappa`
/// then runs with a unit scale.
#[derive(Debug, Clone, PartialEq)]
pub struct GammaRationalQuadraticKernel<F: Float> {
    alpha: Scale<F>,
    beta: F,
    gamma: F,
    base: BaseFunction<F>,
    scale: F,
}

impl<F: Float> GammaRationalQuadraticKernel<F> {
    /// Create a new Gamma-Rational-Quadratic kernel
    ///
    /// # Arguments
    /// * `alpha` - scale, scalar or per dimension (must be positive)
    /// * `beta` - shape (must be positive)
    /// * `gamma` - exponent of the squared distance, in (0, 1]
    pub fn new(alpha: impl Into<Scale<F>>, beta: F, gamma: F) -> Result<Self> {
        let alpha = alpha.into();
        alpha.check("alpha", "alpha > 0", positive)?;
        check("beta", "beta > 0", beta, positive)?;
        check("gamma", "0 < gamma <= 1", gamma, unit_interval)?;

        let (base, scale) = match &alpha {
            Scale::Scalar(a) => (BaseFunction::SquaredEuclidean, *a),
            Scale::Vector(a) => (
                BaseFunction::weighted(a.mapv(|v| v.powf(-gamma)))?,
                F::one(),
            ),
        };
        Ok(Self {
            alpha,
            beta,
            gamma,
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

    pub fn gamma(&self) -> F {
        self.gamma
    }

    /// Same kernel with parameters cast to `G`
    pub fn cast<G: Float>(&self) -> Result<GammaRationalQuadraticKernel<G>> {
        GammaRationalQuadraticKernel::new(
            self.alpha.cast::<G>("alpha")?,
            cast_scalar("beta", self.beta)?,
            cast_scalar("gamma", self.gamma)?,
        )
    }
}

impl<F: Float> Default for GammaRationalQuadraticKernel<F> {
    /// α = 1, β = 1, γ = 1
    fn default() -> Self {
        Self {
            alpha: Scale::Scalar(F::one()),
            beta: F::one(),
            gamma: F::one(),
            base: BaseFunction::SquaredEuclidean,
            scale: F::one(),
        }
    }
}

impl<F: Float> Kappa<F> for GammaRationalQuadraticKernel<F> {
    fn base_function(&self) -> &BaseFunction<F> {
        &self.base
    }

    fn kappa(&self, z: F) -> F {
        let zg = if self.gamma == F::one() {
            z
        } else {
            z.powf(self.gamma)
        };
        (F::one() + self.scale * zg).powf(-self.beta)
    }
}

impl_kappa_kernel!(
    GammaRationalQuadraticKernel,
    KernelProperties::MERCER_ISOTROPIC
);

impl<F: Float, G: Float> ConvertKernel<G> for GammaRationalQuadraticKernel<F> {
    type Output = GammaRationalQuadraticKernel<G>;

    fn convert(&self) -> Result<Self::Output> {
        self.cast()
    }
}

impl<F: Float> fmt::Display for GammaRationalQuadraticKernel<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "GammaRationalQuadraticKernel<{}>(alpha={}, beta={}, gamma={})",
            std::any::type_name::<F>(),
            self.alpha,
            self.beta,
            self.gamma
        )
    }
}
