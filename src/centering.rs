//! Double centering of kernel matrices
//!
//! `K'[i,j] = K[i,j] - r_i - c_j + g` where `r`, `c` are the row and column
//! means and `g` the grand mean, i.e. the Gram matrix of the observations
//! once centered in feature space (kernel PCA).

use crate::core::{KernelError, Result};
use linfa::Float;
use ndarray::{Array2, ArrayBase, Axis, Data, DataMut, Ix2, Zip};

/// Centered copy of `k`
pub fn center_kernel_matrix<F: Float>(k: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<Array2<F>> {
    let mut centered = k.to_owned();
    center_kernel_matrix_inplace(&mut centered)?;
    Ok(centered)
}

/// Center `k` in place
pub fn center_kernel_matrix_inplace<F: Float>(
    k: &mut ArrayBase<impl DataMut<Elem = F>, Ix2>,
) -> Result<()> {
    let (rows, cols) = k.dim();
    if rows != cols {
        return Err(KernelError::NotSquare { rows, cols });
    }
    let (Some(row_means), Some(col_means), Some(grand)) =
        (k.mean_axis(Axis(1)), k.mean_axis(Axis(0)), k.mean())
    else {
        // 0 x 0
        return Ok(());
    };

    Zip::indexed(k).for_each(|(i, j), v| {
        *v = *v - row_means[i] - col_means[j] + grand;
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Orientation;
    use crate::kernel::{GaussianKernel, PolynomialKernel};
    use crate::matrix::kernel_matrix;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_row_and_column_sums_vanish() {
        let x = array![[0.0, 1.0], [2.0, -1.0], [0.5, 0.5], [3.0, 2.0], [-1.0, 0.0]];
        let k = kernel_matrix(
            &PolynomialKernel::<f64>::new(0.5, 1.0, 2).unwrap(),
            &x,
            Orientation::Row,
        )
        .unwrap();

        let centered = center_kernel_matrix(&k).unwrap();
        for s in centered.sum_axis(Axis(0)).iter() {
            assert_abs_diff_eq!(*s, 0.0, epsilon = 1e-10);
        }
        for s in centered.sum_axis(Axis(1)).iter() {
            assert_abs_diff_eq!(*s, 0.0, epsilon = 1e-10);
        }
        assert_abs_diff_eq!(centered, centered.t(), epsilon = 1e-12);
    }

    #[test]
    fn test_copy_leaves_input_untouched() {
        let k = array![[2.0, 1.0], [1.0, 2.0]];
        let before = k.clone();
        let centered = center_kernel_matrix(&k).unwrap();

        assert_eq!(k, before);
        assert_abs_diff_eq!(centered, array![[0.5, -0.5], [-0.5, 0.5]]);
    }

    #[test]
    fn test_inplace_matches_copy() {
        let x = array![[0.0], [1.0], [3.0]];
        let mut k = kernel_matrix(&GaussianKernel::<f64>::default(), &x, Orientation::Row).unwrap();
        let copy = center_kernel_matrix(&k).unwrap();

        center_kernel_matrix_inplace(&mut k).unwrap();
        assert_eq!(k, copy);
    }

    #[test]
    fn test_linear_gram_equals_centered_data_gram() {
        let x = array![[1.0, 2.0], [3.0, 0.0], [-1.0, 1.0]];
        let gram = x.dot(&x.t());
        let xc = &x - &x.mean_axis(Axis(0)).unwrap();

        let centered = center_kernel_matrix(&gram).unwrap();
        assert_abs_diff_eq!(centered, xc.dot(&xc.t()), epsilon = 1e-12);
    }

    #[test]
    fn test_non_square_rejected() {
        let mut k = Array2::<f64>::zeros((2, 3));
        assert!(matches!(
            center_kernel_matrix_inplace(&mut k),
            Err(KernelError::NotSquare { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn test_empty_matrix() {
        let k = Array2::<f64>::zeros((0, 0));
        assert_eq!(center_kernel_matrix(&k).unwrap().dim(), (0, 0));
    }
}
