//! Kernel composition
//!
//! Composite kernels wrap one or two child kernels and combine their values
//! pointwise. The composition tree is fixed by the type, so evaluation order
//! is always the construction order: left child first.

use crate::core::params::{cast_scalar, check, non_negative, positive};
use crate::core::{KernelError, KernelProperties, Result};
use crate::kernel::traits::{ConvertKernel, Kernel};
use linfa::Float;
use ndarray::{ArrayBase, Data, Ix1};
use std::fmt;

/// Children fixing their input dimension must agree on it
fn check_dims(left: Option<usize>, right: Option<usize>) -> Result<()> {
    match (left, right) {
        (Some(l), Some(r)) if l != r => Err(KernelError::DimensionMismatch {
            expected: l,
            actual: r,
        }),
        _ => Ok(()),
    }
}

/// K(x, y) = K₁(x, y) + K₂(x, y)
#[derive(Debug, Clone, PartialEq)]
pub struct KernelSum<K1, K2> {
    left: K1,
    right: K2,
}

impl<K1, K2> KernelSum<K1, K2> {
    /// Fails with `DimensionMismatch` when both children carry per-dimension
    /// parameters of different lengths.
    pub fn new<F: Float>(left: K1, right: K2) -> Result<Self>
    where
        K1: Kernel<F>,
        K2: Kernel<F>,
    {
        check_dims(left.input_dim(), right.input_dim())?;
        Ok(Self { left, right })
    }

    pub fn left(&self) -> &K1 {
        &self.left
    }

    pub fn right(&self) -> &K2 {
        &self.right
    }
}

impl<F: Float, K1: Kernel<F>, K2: Kernel<F>> Kernel<F> for KernelSum<K1, K2> {
    const PROPERTIES: KernelProperties = KernelProperties::sum(K1::PROPERTIES, K2::PROPERTIES);

    fn evaluate(
        &self,
        x: &ArrayBase<impl Data<Elem = F>, Ix1>,
        y: &ArrayBase<impl Data<Elem = F>, Ix1>,
    ) -> F {
        let l = self.left.evaluate(x, y);
        l + self.right.evaluate(x, y)
    }

    fn input_dim(&self) -> Option<usize> {
        self.left.input_dim().or(self.right.input_dim())
    }
}

impl<G: Float, K1: ConvertKernel<G>, K2: ConvertKernel<G>> ConvertKernel<G> for KernelSum<K1, K2> {
    type Output = KernelSum<K1::Output, K2::Output>;

    fn convert(&self) -> Result<Self::Output> {
        KernelSum::new::<G>(self.left.convert()?, self.right.convert()?)
    }
}

impl<K1: fmt::Display, K2: fmt::Display> fmt::Display for KernelSum<K1, K2> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({} + {})", self.left, self.right)
    }
}

/// K(x, y) = K₁(x, y) * K₂(x, y)
#[derive(Debug, Clone, PartialEq)]
pub struct KernelProduct<K1, K2> {
    left: K1,
    right: K2,
}

impl<K1, K2> KernelProduct<K1, K2> {
    /// Same dimension rule as [`KernelSum::new`]
    pub fn new<F: Float>(left: K1, right: K2) -> Result<Self>
    where
        K1: Kernel<F>,
        K2: Kernel<F>,
    {
        check_dims(left.input_dim(), right.input_dim())?;
        Ok(Self { left, right })
    }

    pub fn left(&self) -> &K1 {
        &self.left
    }

    pub fn right(&self) -> &K2 {
        &self.right
    }
}

impl<F: Float, K1: Kernel<F>, K2: Kernel<F>> Kernel<F> for KernelProduct<K1, K2> {
    const PROPERTIES: KernelProperties =
        KernelProperties::product(K1::PROPERTIES, K2::PROPERTIES);

    fn evaluate(
        &self,
        x: &ArrayBase<impl Data<Elem = F>, Ix1>,
        y: &ArrayBase<impl Data<Elem = F>, Ix1>,
    ) -> F {
        let l = self.left.evaluate(x, y);
        l * self.right.evaluate(x, y)
    }

    fn input_dim(&self) -> Option<usize> {
        self.left.input_dim().or(self.right.input_dim())
    }
}

impl<G: Float, K1: ConvertKernel<G>, K2: ConvertKernel<G>> ConvertKernel<G>
    for KernelProduct<K1, K2>
{
    type Output = KernelProduct<K1::Output, K2::Output>;

    fn convert(&self) -> Result<Self::Output> {
        KernelProduct::new::<G>(self.left.convert()?, self.right.convert()?)
    }
}

impl<K1: fmt::Display, K2: fmt::Display> fmt::Display for KernelProduct<K1, K2> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({} * {})", self.left, self.right)
    }
}

/// K(x, y) = a * K₀(x, y) + c with a > 0 and c >= 0
///
/// Both bounds keep every property flag of the wrapped kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelAffine<F: Float, K> {
    kernel: K,
    a: F,
    c: F,
}

impl<F: Float, K> KernelAffine<F, K> {
    pub fn new(kernel: K, a: F, c: F) -> Result<Self> {
        check("a", "a > 0", a, positive)?;
        check("c", "c >= 0", c, non_negative)?;
        Ok(Self { kernel, a, c })
    }

    pub fn inner(&self) -> &K {
        &self.kernel
    }

    pub fn a(&self) -> F {
        self.a
    }

    pub fn c(&self) -> F {
        self.c
    }
}

impl<F: Float, K: Kernel<F>> Kernel<F> for KernelAffine<F, K> {
    const PROPERTIES: KernelProperties = KernelProperties::affine(K::PROPERTIES);

    fn evaluate(
        &self,
        x: &ArrayBase<impl Data<Elem = F>, Ix1>,
        y: &ArrayBase<impl Data<Elem = F>, Ix1>,
    ) -> F {
        self.a * self.kernel.evaluate(x, y) + self.c
    }

    fn input_dim(&self) -> Option<usize> {
        self.kernel.input_dim()
    }
}

impl<F: Float, G: Float, K: ConvertKernel<G>> ConvertKernel<G> for KernelAffine<F, K> {
    type Output = KernelAffine<G, K::Output>;

    fn convert(&self) -> Result<Self::Output> {
        KernelAffine::new(
            self.kernel.convert()?,
            cast_scalar("a", self.a)?,
            cast_scalar("c", self.c)?,
        )
    }
}

impl<F: Float, K: fmt::Display> fmt::Display for KernelAffine<F, K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({} * {} + {})", self.a, self.kernel, self.c)
    }
}
