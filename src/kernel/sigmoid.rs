//! Sigmoid (Tanh) Kernel Implementation
//!
//! The Sigmoid kernel, also known as the Hyperbolic Tangent kernel, is defined as:
//! K(x, y) = tanh(a * <x, y> + c)
//!
//! Unlike the polynomial or Gaussian kernels it is not positive semi-definite
//! in general, so its family carries no Mercer flag.

use crate::core::params::{cast_scalar, check, non_negative, positive};
use crate::core::{KernelProperties, Result};
use crate::distance::BaseFunction;
use crate::kernel::traits::{impl_kappa_kernel, ConvertKernel, Kappa};
use linfa::Float;
use std::fmt;

/// Sigmoid (Hyperbolic Tangent) kernel
#[derive(Debug, Clone, PartialEq)]
pub struct SigmoidKernel<F: Float> {
    /// Scaling parameter for the dot product (must be positive)
    a: F,
    /// Offset (must be non-negative)
    c: F,
    base: BaseFunction<F>,
}

impl<F: Float> SigmoidKernel<F> {
    /// Creates a new Sigmoid kernel with specified parameters
    ///
    /// # Examples
    /// ```
    /// use rkernel::kernel::SigmoidKernel;
    ///
    /// let kernel = SigmoidKernel::new(0.1, 0.0).unwrap();
    /// assert_eq!(kernel.a(), 0.1);
    /// ```
    pub fn new(a: F, c: F) -> Result<Self> {
        check("a", "a > 0", a, positive)?;
        check("c", "c >= 0", c, non_negative)?;
        Ok(Self {
            a,
            c,
            base: BaseFunction::ScalarProduct,
        })
    }

    /// Sigmoid kernel with a = 1/n_features and c = 0
    pub fn with_auto_scale(n_features: usize) -> Result<Self> {
        let n = F::from_usize(n_features.max(1)).unwrap_or_else(F::one);
        Self::new(n.recip(), F::zero())
    }

    pub fn a(&self) -> F {
        self.a
    }

    pub fn c(&self) -> F {
        self.c
    }

    /// Same kernel with parameters cast to `G`
    pub fn cast<G: Float>(&self) -> Result<SigmoidKernel<G>> {
        SigmoidKernel::new(cast_scalar("a", self.a)?, cast_scalar("c", self.c)?)
    }
}

impl<F: Float> Default for SigmoidKernel<F> {
    /// a = 1, c = 1
    fn default() -> Self {
        Self {
            a: F::one(),
            c: F::one(),
            base: BaseFunction::ScalarProduct,
        }
    }
}

impl<F: Float> Kappa<F> for SigmoidKernel<F> {
    fn base_function(&self) -> &BaseFunction<F> {
        &self.base
    }

    fn kappa(&self, z: F) -> F {
        (self.a * z + self.c).tanh()
    }
}

impl_kappa_kernel!(SigmoidKernel, KernelProperties::NONE);

impl<F: Float, G: Float> ConvertKernel<G> for SigmoidKernel<F> {
    type Output = SigmoidKernel<G>;

    fn convert(&self) -> Result<Self::Output> {
        self.cast()
    }
}

impl<F: Float> fmt::Display for SigmoidKernel<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "SigmoidKernel<{}>(a={}, c={})",
            std::any::type_name::<F>(),
            self.a,
            self.c
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::Kernel;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_sigmoid_kernel_basic() {
        let kernel = SigmoidKernel::new(0.5, 0.0).unwrap();
        let x = array![1.0, 2.0];
        let y = array![2.0, 1.0];

        // tanh(0.5 * 4)
        assert_relative_eq!(kernel.evaluate(&x, &y), 2.0_f64.tanh(), epsilon = 1e-12);
    }

    #[test]
    fn test_sigmoid_kernel_bounded() {
        let kernel = SigmoidKernel::<f64>::default();
        let x = array![1e3, 1e3];
        let y = array![-1e3, -1e3];

        let low = kernel.evaluate(&x, &y);
        let high = kernel.evaluate(&x, &x);
        assert!((-1.0..=1.0).contains(&low));
        assert!((-1.0..=1.0).contains(&high));
        assert!(low < high);
    }

    #[test]
    fn test_sigmoid_kernel_auto_scale() {
        let kernel = SigmoidKernel::<f64>::with_auto_scale(4).unwrap();
        assert_eq!(kernel.a(), 0.25);
        assert_eq!(kernel.c(), 0.0);
    }

    #[test]
    fn test_sigmoid_kernel_not_mercer() {
        let kernel = SigmoidKernel::<f64>::default();
        assert_eq!(kernel.properties(), KernelProperties::NONE);
        assert!(SigmoidKernel::new(0.0, 0.0).is_err());
    }
}
