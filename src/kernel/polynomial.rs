//! Polynomial Kernel Implementation
//!
//! The polynomial kernel is defined as:
//! K(x, y) = (a * <x, y> + c)^d
//!
//! Where:
//! - a: scaling factor for the dot product
//! - c: independent term in the polynomial
//! - d: degree of the polynomial
//!
//! Common configurations:
//! - Linear kernel: d=1, a=1, c=0
//! - Quadratic kernel: d=2, a=1, c=1
//! - Cubic kernel: d=3, a=1, c=1

use crate::core::params::{cast_scalar, check, non_negative, positive};
use crate::core::{KernelError, KernelProperties, Result};
use crate::distance::BaseFunction;
use crate::kernel::traits::{impl_kappa_kernel, ConvertKernel, Kappa};
use linfa::Float;
use std::fmt;

/// Polynomial kernel with configurable degree, scale, and offset
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialKernel<F: Float> {
    a: F,
    c: F,
    degree: u32,
    base: BaseFunction<F>,
}

impl<F: Float> PolynomialKernel<F> {
    /// Creates a new polynomial kernel with the specified parameters
    ///
    /// # Arguments
    /// * `a` - Scaling factor for the dot product (must be > 0)
    /// * `c` - Independent term in the polynomial (must be >= 0)
    /// * `degree` - Degree of the polynomial (must be > 0)
    ///
    /// # Examples
    /// ```
    /// use rkernel::kernel::PolynomialKernel;
    ///
    /// // Quadratic kernel: (x·y + 1)²
    /// let quad_kernel = PolynomialKernel::new(1.0, 1.0, 2).unwrap();
    ///
    /// // Cubic kernel: (0.5·x·y + 1)³
    /// let cubic_kernel = PolynomialKernel::new(0.5, 1.0, 3).unwrap();
    /// ```
    pub fn new(a: F, c: F, degree: u32) -> Result<Self> {
        check("a", "a > 0", a, positive)?;
        check("c", "c >= 0", c, non_negative)?;
        if degree == 0 || degree > i32::MAX as u32 {
            return Err(KernelError::invalid("degree", "degree >= 1", degree));
        }

        Ok(Self {
            a,
            c,
            degree,
            base: BaseFunction::ScalarProduct,
        })
    }

    /// Creates a quadratic kernel: (a * <x,y> + 1)²
    pub fn quadratic(a: F) -> Result<Self> {
        Self::new(a, F::one(), 2)
    }

    /// Creates a cubic kernel: (a * <x,y> + 1)³
    pub fn cubic(a: F) -> Result<Self> {
        Self::new(a, F::one(), 3)
    }

    pub fn a(&self) -> F {
        self.a
    }

    pub fn c(&self) -> F {
        self.c
    }

    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// Same kernel with parameters cast to `G`
    pub fn cast<G: Float>(&self) -> Result<PolynomialKernel<G>> {
        PolynomialKernel::new(
            cast_scalar("a", self.a)?,
            cast_scalar("c", self.c)?,
            self.degree,
        )
    }
}

impl<F: Float> Default for PolynomialKernel<F> {
    /// a = 1, c = 1, degree = 2
    fn default() -> Self {
        Self {
            a: F::one(),
            c: F::one(),
            degree: 2,
            base: BaseFunction::ScalarProduct,
        }
    }
}

impl<F: Float> Kappa<F> for PolynomialKernel<F> {
    fn base_function(&self) -> &BaseFunction<F> {
        &self.base
    }

    fn kappa(&self, z: F) -> F {
        // degree is bounded by i32::MAX at construction
        (self.a * z + self.c).powi(self.degree as i32)
    }
}

impl_kappa_kernel!(PolynomialKernel, KernelProperties::MERCER);

impl<F: Float, G: Float> ConvertKernel<G> for PolynomialKernel<F> {
    type Output = PolynomialKernel<G>;

    fn convert(&self) -> Result<Self::Output> {
        self.cast()
    }
}

impl<F: Float> fmt::Display for PolynomialKernel<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "PolynomialKernel<{}>(a={}, c={}, degree={})",
            std::any::type_name::<F>(),
            self.a,
            self.c,
            self.degree
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
    fn test_polynomial_kernel_creation() {
        let kernel = PolynomialKernel::new(0.5, 1.0, 3).unwrap();
        assert_eq!(kernel.degree(), 3);
        assert_eq!(kernel.a(), 0.5);
        assert_eq!(kernel.c(), 1.0);

        let quad = PolynomialKernel::quadratic(2.0).unwrap();
        assert_eq!(quad.degree(), 2);
        assert_eq!(quad.a(), 2.0);

        let cubic = PolynomialKernel::cubic(0.5).unwrap();
        assert_eq!(cubic.degree(), 3);
        assert_eq!(cubic.c(), 1.0);
    }

    #[test]
    fn test_polynomial_kernel_computation() {
        let kernel = PolynomialKernel::new(1.0, 1.0, 2).unwrap();

        let x = array![1.0, 2.0];
        let y = array![2.0, 1.0];

        // Dot product: 1*2 + 2*1 = 4
        // Kernel: (1.0 * 4 + 1.0)² = 5² = 25
        assert_relative_eq!(kernel.evaluate(&x, &y), 25.0, epsilon = 1e-10);
    }

    #[test]
    fn test_polynomial_kernel_same_vector() {
        let kernel = PolynomialKernel::new(0.5, 2.0, 3).unwrap();

        let x = array![3.0, 4.0];

        // Dot product: 3² + 4² = 25
        // Kernel: (0.5 * 25 + 2.0)³ = 14.5³ = 3048.625
        assert_relative_eq!(kernel.evaluate(&x, &x), 3048.625, epsilon = 1e-6);
    }

    #[test]
    fn test_polynomial_kernel_orthogonal_vectors() {
        let kernel = PolynomialKernel::<f64>::default();

        let x = array![1.0, 0.0];
        let y = array![0.0, 1.0];

        // Kernel: (1.0 * 0 + 1.0)² = 1
        assert_relative_eq!(kernel.evaluate(&x, &y), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_polynomial_kernel_negative_dot_product() {
        let kernel = PolynomialKernel::new(1.0, 0.0, 3).unwrap();

        let x = array![1.0];
        let y = array![-2.0];

        // odd degree keeps the sign: (-2)³
        assert_relative_eq!(kernel.evaluate(&x, &y), -8.0, epsilon = 1e-10);
    }

    #[test]
    fn test_polynomial_kernel_high_degree() {
        let kernel = PolynomialKernel::new(0.1, 1.0, 5).unwrap();

        let x = array![2.0];
        let y = array![3.0];

        // Kernel: (0.1 * 6.0 + 1.0)⁵ = 1.6⁵ ≈ 10.48576
        assert_relative_eq!(kernel.evaluate(&x, &y), 10.48576, epsilon = 1e-5);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(PolynomialKernel::new(1.0, 1.0, 0).is_err());
        assert!(PolynomialKernel::new(-1.0, 1.0, 2).is_err());
        assert!(PolynomialKernel::new(1.0, -0.5, 2).is_err());
    }

    #[test]
    fn test_cast_keeps_degree() {
        let kernel = PolynomialKernel::new(0.5, 2.0, 4).unwrap();
        let single = kernel.cast::<f32>().unwrap();
        assert_eq!(single.degree(), 4);
        assert_eq!(single.a(), 0.5f32);
    }
}
