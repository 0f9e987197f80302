//! Kernel trait definitions

use crate::core::{KernelProperties, Result};
use crate::distance::BaseFunction;
use crate::kernel::composite::{KernelAffine, KernelProduct, KernelSum};
use linfa::Float;
use ndarray::{ArrayBase, Data, Ix1};
use std::fmt;

/// Kernel function trait
///
/// A kernel maps a pair of observations to a scalar. `PROPERTIES` holds the
/// family-level capabilities (Mercer, negative definite, stationary,
/// isotropic); it is the same for every instance of a family.
pub trait Kernel<F: Float>: Send + Sync + fmt::Display {
    const PROPERTIES: KernelProperties;

    /// Compute kernel value K(x, y)
    ///
    /// # Panics
    /// Panics if `x` and `y` do not have the same length.
    fn evaluate(
        &self,
        x: &ArrayBase<impl Data<Elem = F>, Ix1>,
        y: &ArrayBase<impl Data<Elem = F>, Ix1>,
    ) -> F;

    /// Input dimension required by per-dimension parameters, if any
    fn input_dim(&self) -> Option<usize> {
        None
    }

    fn properties(&self) -> KernelProperties {
        Self::PROPERTIES
    }

    fn is_mercer(&self) -> bool {
        Self::PROPERTIES.mercer
    }

    fn is_negative_definite(&self) -> bool {
        Self::PROPERTIES.negative_definite
    }

    fn is_stationary(&self) -> bool {
        Self::PROPERTIES.stationary
    }

    fn is_isotropic(&self) -> bool {
        Self::PROPERTIES.isotropic
    }
}

/// Scalar transform of a kernel family
///
/// `kappa` is applied to the output of the family's base function; the
/// `impl_kappa_kernel!` macro derives `Kernel` from the pair.
pub trait Kappa<F: Float> {
    /// Base function chosen when the kernel was built
    fn base_function(&self) -> &BaseFunction<F>;

    /// Map a squared distance or a dot product to the kernel value
    fn kappa(&self, z: F) -> F;
}

/// Cast a kernel to another element type
///
/// Parameters are cast and validated again: a value that is not
/// representable in `G`, or leaves its domain once cast, is an error.
pub trait ConvertKernel<G: Float> {
    type Output: Kernel<G>;

    fn convert(&self) -> Result<Self::Output>;
}

/// Composition helpers available on every kernel
pub trait KernelExt<F: Float>: Kernel<F> + Sized {
    /// `self + other`
    fn plus<K: Kernel<F>>(self, other: K) -> Result<KernelSum<Self, K>> {
        KernelSum::new::<F>(self, other)
    }

    /// `self * other`
    fn times<K: Kernel<F>>(self, other: K) -> Result<KernelProduct<Self, K>> {
        KernelProduct::new::<F>(self, other)
    }

    /// `a * self + c` with `a > 0`, `c >= 0`
    fn affine(self, a: F, c: F) -> Result<KernelAffine<F, Self>> {
        KernelAffine::new(self, a, c)
    }
}

impl<F: Float, K: Kernel<F>> KernelExt<F> for K {}

/// Implement `Kernel` for a family through its `Kappa` impl
macro_rules! impl_kappa_kernel {
    ($kernel:ident, $properties:expr) => {
        impl<F: linfa::Float> $crate::kernel::Kernel<F> for $kernel<F> {
            const PROPERTIES: $crate::core::KernelProperties = $properties;

            fn evaluate(
                &self,
                x: &ndarray::ArrayBase<impl ndarray::Data<Elem = F>, ndarray::Ix1>,
                y: &ndarray::ArrayBase<impl ndarray::Data<Elem = F>, ndarray::Ix1>,
            ) -> F {
                use $crate::kernel::Kappa;
                self.kappa(self.base_function().apply(x, y))
            }

            fn input_dim(&self) -> Option<usize> {
                use $crate::kernel::Kappa;
                self.base_function().input_dim()
            }
        }
    };
}

pub(crate) use impl_kappa_kernel;
