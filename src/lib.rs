//! Kernel (Gram) matrices for machine learning
//!
//! Kernels are evaluated in two layers: a base function reduces a pair of
//! observations to a squared distance or a dot product, then each family's
//! `kappa` maps that scalar to the kernel value. On top of that sit symmetric
//! Gram matrix assembly, double centering for kernel PCA, and the Nyström
//! low-rank approximation.

pub mod api;
pub mod cache;
pub mod centering;
pub mod core;
pub mod data;
pub mod distance;
pub mod kernel;
pub mod matrix;
pub mod nystrom;
pub mod persistence;

// Re-export main types for convenience
pub use crate::api::Gram;
pub use crate::cache::{CacheStats, CachedGram, KernelCache};
pub use crate::centering::{center_kernel_matrix, center_kernel_matrix_inplace};
pub use crate::core::{KernelError, KernelProperties, Orientation, Result, Scale};
pub use crate::data::{read_csv_matrix, CsvMatrix};
pub use crate::distance::BaseFunction;
pub use crate::kernel::{ConvertKernel, Kappa, Kernel, KernelExt};
pub use crate::matrix::{
    cross_kernel_matrix, cross_kernel_matrix_inplace, kernel, kernel_matrix, kernel_matrix_inplace,
};
pub use crate::nystrom::{nystrom, NystromFactorization, NystromParams, Sampling};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
