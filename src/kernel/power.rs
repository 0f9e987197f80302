//! Power kernel implementation
//!
//! K(x, y) = ||x - y||^(2γ),  γ ∈ (0, 1]
//!
//! A conditionally negative definite kernel: it grows with distance, and
//! exp(-t * K) is a Mercer kernel for every t > 0.

use crate::core::params::{cast_scalar, check, unit_interval};
use crate::core::{KernelProperties, Result};
use crate::distance::BaseFunction;
use crate::kernel::traits::{impl_kappa_kernel, ConvertKernel, Kappa};
use linfa::Float;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct PowerKernel<F: Float> {
    gamma: F,
    base: BaseFunction<F>,
}

impl<F: Float> PowerKernel<F> {
    pub fn new(gamma: F) -> Result<Self> {
        check("gamma", "0 < gamma <= 1", gamma, unit_interval)?;
        Ok(Self {
            gamma,
            base: BaseFunction::SquaredEuclidean,
        })
    }

    pub fn gamma(&self) -> F {
        self.gamma
    }

    /// Same kernel with parameters cast to `G`
    pub fn cast<G: Float>(&self) -> Result<PowerKernel<G>> {
        PowerKernel::new(cast_scalar("gamma", self.gamma)?)
    }
}

impl<F: Float> Default for PowerKernel<F> {
    fn default() -> Self {
        Self {
            gamma: F::one(),
            base: BaseFunction::SquaredEuclidean,
        }
    }
}

impl<F: Float> Kappa<F> for PowerKernel<F> {
    fn base_function(&self) -> &BaseFunction<F> {
        &self.base
    }

    fn kappa(&self, z: F) -> F {
        z.powf(self.gamma)
    }
}

impl_kappa_kernel!(PowerKernel, KernelProperties::NEGATIVE_DEFINITE_ISOTROPIC);

impl<F: Float, G: Float> ConvertKernel<G> for PowerKernel<F> {
    type Output = PowerKernel<G>;

    fn convert(&self) -> Result<Self::Output> {
        self.cast()
    }
}

impl<F: Float> fmt::Display for PowerKernel<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "PowerKernel<{}>(gamma={})",
            std::any::type_name::<F>(),
            self.gamma
        )
    }
}
