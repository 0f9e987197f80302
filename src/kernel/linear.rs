//! Linear kernel implementation

use crate::core::params::{cast_scalar, check, non_negative, positive};
use crate::core::{KernelProperties, Result};
use crate::distance::BaseFunction;
use crate::kernel::traits::{impl_kappa_kernel, ConvertKernel, Kappa};
use linfa::Float;
use std::fmt;

/// Linear kernel: K(x, y) = a * xᵀy + c
///
/// This is the simplest kernel function: a scaled and shifted dot product.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearKernel<F: Float> {
    /// Scaling factor for the dot product (a > 0)
    a: F,
    /// Offset (c >= 0)
    c: F,
    base: BaseFunction<F>,
}

impl<F: Float> LinearKernel<F> {
    /// Create a new linear kernel
    pub fn new(a: F, c: F) -> Result<Self> {
        check("a", "a > 0", a, positive)?;
        check("c", "c >= 0", c, non_negative)?;
        Ok(Self {
            a,
            c,
            base: BaseFunction::ScalarProduct,
        })
    }

    /// Plain dot product: a = 1, c = 0
    pub fn dot() -> Self {
        Self {
            a: F::one(),
            c: F::zero(),
            base: BaseFunction::ScalarProduct,
        }
    }

    pub fn a(&self) -> F {
        self.a
    }

    pub fn c(&self) -> F {
        self.c
    }

    /// Same kernel with parameters cast to `G`
    pub fn cast<G: Float>(&self) -> Result<LinearKernel<G>> {
        LinearKernel::new(cast_scalar("a", self.a)?, cast_scalar("c", self.c)?)
    }
}

impl<F: Float> Default for LinearKernel<F> {
    /// a = 1, c = 1
    fn default() -> Self {
        Self {
            a: F::one(),
            c: F::one(),
            base: BaseFunction::ScalarProduct,
        }
    }
}

impl<F: Float> Kappa<F> for LinearKernel<F> {
    fn base_function(&self) -> &BaseFunction<F> {
        &self.base
    }

    fn kappa(&self, z: F) -> F {
        self.a * z + self.c
    }
}

impl_kappa_kernel!(LinearKernel, KernelProperties::MERCER);

impl<F: Float, G: Float> ConvertKernel<G> for LinearKernel<F> {
    type Output = LinearKernel<G>;

    fn convert(&self) -> Result<Self::Output> {
        self.cast()
    }
}

impl<F: Float> fmt::Display for LinearKernel<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "LinearKernel<{}>(a={}, c={})",
            std::any::type_name::<F>(),
            self.a,
            self.c
        )
    }
}
