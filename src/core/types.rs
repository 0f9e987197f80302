//! Core type definitions shared by the kernel modules

use ndarray::{ArrayBase, ArrayView2, Data, Ix2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which axis of an observation matrix holds one observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Each row is one observation
    #[default]
    Row,
    /// Each column is one observation
    Col,
}

impl Orientation {
    /// View `x` so that observations are laid out along rows
    pub fn observations<'a, S: Data>(&self, x: &'a ArrayBase<S, Ix2>) -> ArrayView2<'a, S::Elem> {
        match self {
            Orientation::Row => x.view(),
            Orientation::Col => x.t(),
        }
    }

    /// Number of observations in `x`
    pub fn n_obs<S: Data>(&self, x: &ArrayBase<S, Ix2>) -> usize {
        match self {
            Orientation::Row => x.nrows(),
            Orientation::Col => x.ncols(),
        }
    }

    /// Number of features of each observation in `x`
    pub fn n_features<S: Data>(&self, x: &ArrayBase<S, Ix2>) -> usize {
        match self {
            Orientation::Row => x.ncols(),
            Orientation::Col => x.nrows(),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Orientation::Row => write!(f, "row"),
            Orientation::Col => write!(f, "col"),
        }
    }
}

/// Family-level capabilities of a kernel
///
/// These are facts about a kernel family, never about one instance: every
/// `GaussianKernel` is Mercer whatever its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KernelProperties {
    /// Gram matrices are positive semi-definite
    pub mercer: bool,
    /// Gram matrices are conditionally negative definite
    pub negative_definite: bool,
    /// Depends only on `x - y`
    pub stationary: bool,
    /// Depends only on `||x - y||`
    pub isotropic: bool,
}

impl KernelProperties {
    /// No capability at all
    pub const NONE: Self = Self {
        mercer: false,
        negative_definite: false,
        stationary: false,
        isotropic: false,
    };

    /// Mercer kernel of the inputs' dot product
    pub const MERCER: Self = Self {
        mercer: true,
        ..Self::NONE
    };

    /// Mercer kernel of the inputs' Euclidean distance
    pub const MERCER_ISOTROPIC: Self = Self {
        mercer: true,
        negative_definite: false,
        stationary: true,
        isotropic: true,
    };

    /// Negative definite kernel of the inputs' Euclidean distance
    pub const NEGATIVE_DEFINITE_ISOTROPIC: Self = Self {
        mercer: false,
        negative_definite: true,
        stationary: true,
        isotropic: true,
    };

    /// Flags of `k1 + k2`
    pub const fn sum(a: Self, b: Self) -> Self {
        Self {
            mercer: a.mercer && b.mercer,
            negative_definite: a.negative_definite && b.negative_definite,
            stationary: a.stationary && b.stationary,
            isotropic: a.isotropic && b.isotropic,
        }
    }

    /// Flags of `k1 * k2`
    ///
    /// The Schur product theorem keeps positive semi-definiteness; nothing
    /// comparable holds for negative definite kernels.
    pub const fn product(a: Self, b: Self) -> Self {
        Self {
            mercer: a.mercer && b.mercer,
            negative_definite: false,
            stationary: a.stationary && b.stationary,
            isotropic: a.isotropic && b.isotropic,
        }
    }

    /// Flags of `a * k + c` with `a > 0` and `c >= 0`
    pub const fn affine(k: Self) -> Self {
        k
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_orientation_views() {
        let x = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];

        assert_eq!(Orientation::Row.n_obs(&x), 2);
        assert_eq!(Orientation::Row.n_features(&x), 3);
        assert_eq!(Orientation::Col.n_obs(&x), 3);
        assert_eq!(Orientation::Col.n_features(&x), 2);

        let cols = Orientation::Col.observations(&x);
        assert_eq!(cols.row(1), array![2.0, 5.0]);
        assert_eq!(Orientation::default(), Orientation::Row);
    }

    #[test]
    fn test_sum_flags() {
        let s = KernelProperties::sum(
            KernelProperties::MERCER_ISOTROPIC,
            KernelProperties::MERCER,
        );
        assert!(s.mercer);
        assert!(!s.stationary);
        assert!(!s.isotropic);

        let nd = KernelProperties::sum(
            KernelProperties::NEGATIVE_DEFINITE_ISOTROPIC,
            KernelProperties::NEGATIVE_DEFINITE_ISOTROPIC,
        );
        assert!(nd.negative_definite);
        assert!(!nd.mercer);
    }

    #[test]
    fn test_product_flags() {
        let p = KernelProperties::product(
            KernelProperties::MERCER_ISOTROPIC,
            KernelProperties::MERCER_ISOTROPIC,
        );
        assert_eq!(p, KernelProperties::MERCER_ISOTROPIC);

        let nd = KernelProperties::product(
            KernelProperties::NEGATIVE_DEFINITE_ISOTROPIC,
            KernelProperties::NEGATIVE_DEFINITE_ISOTROPIC,
        );
        assert!(!nd.negative_definite);
        assert!(nd.isotropic);
    }
}
