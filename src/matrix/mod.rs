//! Kernel matrix engine
//!
//! Assembles Gram matrices from a kernel and an observation matrix. A Gram
//! matrix of a single dataset is filled on its upper triangle only and then
//! mirrored, so the result equals its own transpose bit for bit whatever the
//! kernel. Rows of the destination are distributed over the rayon pool; every
//! worker owns the rows it writes.

use crate::core::{KernelError, Orientation, Result};
use crate::kernel::Kernel;
use linfa::Float;
use log::debug;
use ndarray::parallel::prelude::*;
use ndarray::{Array2, ArrayBase, ArrayView2, ArrayViewMut2, Axis, Data, DataMut, Ix1, Ix2};

/// Evaluate `kernel` on a single pair of observations
pub fn kernel<F: Float, K: Kernel<F>>(
    kernel: &K,
    x: &ArrayBase<impl Data<Elem = F>, Ix1>,
    y: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> Result<F> {
    check_features(kernel, x.len(), y.len())?;
    Ok(kernel.evaluate(x, y))
}

/// Symmetric `n x n` Gram matrix of the observations in `x`
pub fn kernel_matrix<F: Float, K: Kernel<F>>(
    kernel: &K,
    x: &ArrayBase<impl Data<Elem = F>, Ix2>,
    orientation: Orientation,
) -> Result<Array2<F>> {
    let n = orientation.n_obs(x);
    let mut k = Array2::zeros((n, n));
    kernel_matrix_inplace(&mut k, kernel, x, orientation)?;
    Ok(k)
}

/// Rectangular `n x m` matrix of `kernel(x_i, y_j)`
pub fn cross_kernel_matrix<F: Float, K: Kernel<F>>(
    kernel: &K,
    x: &ArrayBase<impl Data<Elem = F>, Ix2>,
    y: &ArrayBase<impl Data<Elem = F>, Ix2>,
    orientation: Orientation,
) -> Result<Array2<F>> {
    let mut k = Array2::zeros((orientation.n_obs(x), orientation.n_obs(y)));
    cross_kernel_matrix_inplace(&mut k, kernel, x, y, orientation)?;
    Ok(k)
}

/// Write the Gram matrix of `x` into `dest`
///
/// `dest` must be `n x n`. Nothing is written when validation fails.
pub fn kernel_matrix_inplace<F: Float, K: Kernel<F>>(
    dest: &mut ArrayBase<impl DataMut<Elem = F>, Ix2>,
    kernel: &K,
    x: &ArrayBase<impl Data<Elem = F>, Ix2>,
    orientation: Orientation,
) -> Result<()> {
    let xs = orientation.observations(x);
    let n = xs.nrows();
    check_shape(dest.dim(), (n, n))?;
    check_features(kernel, xs.ncols(), xs.ncols())?;

    debug!("Computing {n}x{n} kernel matrix with {kernel}");
    fill_symmetric(dest.view_mut(), kernel, xs);
    Ok(())
}

/// Write the cross kernel matrix of `x` against `y` into `dest`
///
/// `dest` must be `n x m`. Nothing is written when validation fails.
pub fn cross_kernel_matrix_inplace<F: Float, K: Kernel<F>>(
    dest: &mut ArrayBase<impl DataMut<Elem = F>, Ix2>,
    kernel: &K,
    x: &ArrayBase<impl Data<Elem = F>, Ix2>,
    y: &ArrayBase<impl Data<Elem = F>, Ix2>,
    orientation: Orientation,
) -> Result<()> {
    let xs = orientation.observations(x);
    let ys = orientation.observations(y);
    check_shape(dest.dim(), (xs.nrows(), ys.nrows()))?;
    check_features(kernel, xs.ncols(), ys.ncols())?;

    debug!(
        "Computing {}x{} cross kernel matrix with {kernel}",
        xs.nrows(),
        ys.nrows()
    );
    fill_cross(dest.view_mut(), kernel, xs, ys);
    Ok(())
}

fn check_shape(actual: (usize, usize), expected: (usize, usize)) -> Result<()> {
    if actual != expected {
        return Err(KernelError::ShapeMismatch { expected, actual });
    }
    Ok(())
}

/// Both sides must share their feature count, and match the kernel's
/// per-dimension parameters when it has some.
pub(crate) fn check_features<F: Float, K: Kernel<F>>(
    kernel: &K,
    x_features: usize,
    y_features: usize,
) -> Result<()> {
    if x_features != y_features {
        return Err(KernelError::DimensionMismatch {
            expected: x_features,
            actual: y_features,
        });
    }
    match kernel.input_dim() {
        Some(dim) if dim != x_features => Err(KernelError::DimensionMismatch {
            expected: dim,
            actual: x_features,
        }),
        _ => Ok(()),
    }
}

fn fill_symmetric<F: Float, K: Kernel<F>>(
    mut dest: ArrayViewMut2<F>,
    kernel: &K,
    xs: ArrayView2<F>,
) {
    let n = xs.nrows();
    dest.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, mut row)| {
            let xi = xs.row(i);
            for j in i..n {
                row[j] = kernel.evaluate(&xi, &xs.row(j));
            }
        });

    mirror_upper(dest);
}

/// Copy the upper triangle of a square matrix onto its lower triangle
pub(crate) fn mirror_upper<F: Float>(mut dest: ArrayViewMut2<F>) {
    let n = dest.nrows();
    for i in 1..n {
        for j in 0..i {
            dest[[i, j]] = dest[[j, i]];
        }
    }
}

fn fill_cross<F: Float, K: Kernel<F>>(
    mut dest: ArrayViewMut2<F>,
    kernel: &K,
    xs: ArrayView2<F>,
    ys: ArrayView2<F>,
) {
    dest.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, mut row)| {
            let xi = xs.row(i);
            for (j, yj) in ys.outer_iter().enumerate() {
                row[j] = kernel.evaluate(&xi, &yj);
            }
        });
}
