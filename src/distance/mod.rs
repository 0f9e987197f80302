//! Pairwise distance engine
//!
//! Every kernel is evaluated in two steps: a base function reduces a pair of
//! observations to one scalar (a squared distance or a dot product), then the
//! kernel's `kappa` maps that scalar to the kernel value. This module owns the
//! first step.

use crate::core::params::{cast_array, non_negative, Scale};
use crate::core::{KernelError, Orientation, Result};
use linfa::Float;
use ndarray::{Array1, Array2, ArrayBase, Data, Ix1, Ix2, Zip};

/// Scalar reduction applied to a pair of observations before `kappa`
#[derive(Debug, Clone, PartialEq)]
pub enum BaseFunction<F: Float> {
    /// ||x - y||²
    SquaredEuclidean,
    /// Σᵢ wᵢ (xᵢ - yᵢ)²
    WeightedSquaredEuclidean(Array1<F>),
    /// xᵀy
    ScalarProduct,
}

impl<F: Float> BaseFunction<F> {
    /// Weighted squared Euclidean distance, weights must be non-negative
    pub fn weighted(weights: Array1<F>) -> Result<Self> {
        Scale::Vector(weights.clone()).check("weights", "weights >= 0", non_negative)?;
        Ok(BaseFunction::WeightedSquaredEuclidean(weights))
    }

    /// Apply the base function to one pair of observations
    ///
    /// # Panics
    /// Panics if `x`, `y` (and the weights) do not have the same length.
    pub fn apply(
        &self,
        x: &ArrayBase<impl Data<Elem = F>, Ix1>,
        y: &ArrayBase<impl Data<Elem = F>, Ix1>,
    ) -> F {
        match self {
            BaseFunction::SquaredEuclidean => squared_euclidean(x, y),
            BaseFunction::WeightedSquaredEuclidean(w) => weighted_squared_euclidean(w, x, y),
            BaseFunction::ScalarProduct => scalar_product(x, y),
        }
    }

    /// Input dimension imposed by the weights, if any
    pub fn input_dim(&self) -> Option<usize> {
        match self {
            BaseFunction::WeightedSquaredEuclidean(w) => Some(w.len()),
            _ => None,
        }
    }

    pub fn is_distance(&self) -> bool {
        !matches!(self, BaseFunction::ScalarProduct)
    }

    pub fn cast<G: Float>(&self) -> Result<BaseFunction<G>> {
        Ok(match self {
            BaseFunction::SquaredEuclidean => BaseFunction::SquaredEuclidean,
            BaseFunction::WeightedSquaredEuclidean(w) => {
                BaseFunction::WeightedSquaredEuclidean(cast_array("weights", w)?)
            }
            BaseFunction::ScalarProduct => BaseFunction::ScalarProduct,
        })
    }
}

/// ||x - y||²
pub fn squared_euclidean<F: Float>(
    x: &ArrayBase<impl Data<Elem = F>, Ix1>,
    y: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> F {
    Zip::from(x).and(y).fold(F::zero(), |acc, &a, &b| {
        let d = a - b;
        acc + d * d
    })
}

/// Σᵢ wᵢ (xᵢ - yᵢ)²
pub fn weighted_squared_euclidean<F: Float>(
    w: &ArrayBase<impl Data<Elem = F>, Ix1>,
    x: &ArrayBase<impl Data<Elem = F>, Ix1>,
    y: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> F {
    Zip::from(w).and(x).and(y).fold(F::zero(), |acc, &wi, &a, &b| {
        let d = a - b;
        acc + wi * (d * d)
    })
}

/// xᵀy
pub fn scalar_product<F: Float>(
    x: &ArrayBase<impl Data<Elem = F>, Ix1>,
    y: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> F {
    Zip::from(x)
        .and(y)
        .fold(F::zero(), |acc, &a, &b| acc + a * b)
}

/// Base function values of every pair `(x_i, y_j)`
pub fn pairwise<F: Float>(
    base: &BaseFunction<F>,
    x: &ArrayBase<impl Data<Elem = F>, Ix2>,
    y: &ArrayBase<impl Data<Elem = F>, Ix2>,
    orientation: Orientation,
) -> Result<Array2<F>> {
    let xs = orientation.observations(x);
    let ys = orientation.observations(y);
    if xs.ncols() != ys.ncols() {
        return Err(KernelError::DimensionMismatch {
            expected: xs.ncols(),
            actual: ys.ncols(),
        });
    }
    if let Some(dim) = base.input_dim() {
        if dim != xs.ncols() {
            return Err(KernelError::DimensionMismatch {
                expected: dim,
                actual: xs.ncols(),
            });
        }
    }

    Ok(Array2::from_shape_fn((xs.nrows(), ys.nrows()), |(i, j)| {
        base.apply(&xs.row(i), &ys.row(j))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_squared_euclidean() {
        let x = array![1.0, 3.0, 0.0, 2.0];
        let y = array![0.0, 2.0, 1.0, 4.0];

        // 1 + 1 + 1 + 4
        assert_eq!(squared_euclidean(&x, &y), 7.0);
        assert_eq!(squared_euclidean(&x, &x), 0.0);
    }

    #[test]
    fn test_scalar_product() {
        let x = array![1.0, 0.0, 3.0, 2.0];
        let y = array![0.0, 1.0, 2.0, 4.0];

        // 3*2 + 2*4
        assert_eq!(scalar_product(&x, &y), 14.0);
    }

    #[test]
    fn test_unit_weights_match_unweighted() {
        let x = array![0.3, -1.7, 2.2];
        let y = array![1.1, 0.4, -0.9];
        let w = Array1::ones(3);

        assert_eq!(
            weighted_squared_euclidean(&w, &x, &y),
            squared_euclidean(&x, &y)
        );
    }

    #[test]
    fn test_weighted_squared_euclidean() {
        let base = BaseFunction::weighted(array![2.0, 0.5]).unwrap();
        let x = array![1.0, 2.0];
        let y = array![0.0, 0.0];

        // 2*1 + 0.5*4
        assert_eq!(base.apply(&x, &y), 4.0);
        assert_eq!(base.input_dim(), Some(2));
    }

    #[test]
    fn test_negative_weights_rejected() {
        let err = BaseFunction::weighted(array![1.0, -0.5]).unwrap_err();
        assert!(matches!(
            err,
            KernelError::InvalidParameter {
                name: "weights",
                ..
            }
        ));
    }

    #[test]
    fn test_commutativity() {
        let x = array![0.1, 0.7, -3.3];
        let y = array![2.9, -0.2, 1e-3];
        let bases = [
            BaseFunction::SquaredEuclidean,
            BaseFunction::weighted(array![0.3, 1.9, 7.0]).unwrap(),
            BaseFunction::ScalarProduct,
        ];

        for base in &bases {
            assert_eq!(base.apply(&x, &y), base.apply(&y, &x));
        }
    }

    #[test]
    fn test_pairwise_orientation() {
        let x_rows = array![[0.0, 0.0], [1.0, 0.0], [0.0, 2.0]];
        let x_cols = x_rows.t().to_owned();

        let by_row = pairwise(
            &BaseFunction::SquaredEuclidean,
            &x_rows,
            &x_rows,
            Orientation::Row,
        )
        .unwrap();
        let by_col = pairwise(
            &BaseFunction::SquaredEuclidean,
            &x_cols,
            &x_cols,
            Orientation::Col,
        )
        .unwrap();

        let expected = array![[0.0, 1.0, 4.0], [1.0, 0.0, 5.0], [4.0, 5.0, 0.0]];
        assert_abs_diff_eq!(by_row, expected);
        assert_abs_diff_eq!(by_col, expected);
    }

    #[test]
    fn test_pairwise_dimension_mismatch() {
        let x = array![[0.0, 0.0]];
        let y = array![[0.0, 0.0, 0.0]];
        let res = pairwise(&BaseFunction::ScalarProduct, &x, &y, Orientation::Row);
        assert!(matches!(
            res,
            Err(KernelError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));

        let weighted = BaseFunction::weighted(array![1.0, 1.0, 1.0]).unwrap();
        assert!(pairwise(&weighted, &x, &x, Orientation::Row).is_err());
    }

    #[test]
    fn test_cast() {
        let base = BaseFunction::weighted(array![0.5, 2.0]).unwrap();
        let cast: BaseFunction<f32> = base.cast().unwrap();
        assert_eq!(cast, BaseFunction::WeightedSquaredEuclidean(array![0.5f32, 2.0]));
    }
}
