use crate::core::{KernelError, Orientation, Result};
use linfa::Float;
use ndarray_rand::rand::seq::SliceRandom;
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use serde::{Deserialize, Serialize};

/// Landmark selection
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sampling {
    /// `size` observations drawn uniformly without replacement
    Random { size: usize, seed: Option<u64> },
    /// Caller-supplied observation indices
    Fixed(Vec<usize>),
}

impl Default for Sampling {
    fn default() -> Sampling {
        Sampling::Random {
            size: 10,
            seed: None,
        }
    }
}

impl Sampling {
    /// Number of landmarks requested
    pub fn size(&self) -> usize {
        match self {
            Sampling::Random { size, .. } => *size,
            Sampling::Fixed(indices) => indices.len(),
        }
    }

    /// Draw or check the landmark indices for a dataset of `n_obs` observations
    ///
    /// Random samples are returned in ascending order. A random sample must be
    /// strictly smaller than the dataset; a fixed one may cover all of it.
    pub fn select(&self, n_obs: usize) -> Result<Vec<usize>> {
        match self {
            Sampling::Random { size, seed } => {
                let size = *size;
                if size < 1 {
                    return Err(KernelError::InvalidSampleSize {
                        size,
                        n_obs,
                        reason: "at least one sample is required",
                    });
                }
                if size >= n_obs {
                    return Err(KernelError::InvalidSampleSize {
                        size,
                        n_obs,
                        reason: "a random sample must be smaller than the dataset",
                    });
                }

                let mut rng = match seed {
                    Some(seed) => Xoshiro256Plus::seed_from_u64(*seed),
                    None => Xoshiro256Plus::from_entropy(),
                };
                let mut indices = (0..n_obs).collect::<Vec<_>>();
                indices.shuffle(&mut rng);
                indices.truncate(size);
                indices.sort_unstable();
                Ok(indices)
            }
            Sampling::Fixed(indices) => {
                let size = indices.len();
                if size < 1 {
                    return Err(KernelError::InvalidSampleSize {
                        size,
                        n_obs,
                        reason: "at least one sample is required",
                    });
                }
                if size > n_obs {
                    return Err(KernelError::InvalidSampleSize {
                        size,
                        n_obs,
                        reason: "more samples than observations",
                    });
                }

                let mut seen = vec![false; n_obs];
                for &index in indices {
                    if index >= n_obs {
                        return Err(KernelError::InvalidSampleIndex { index, n_obs });
                    }
                    if seen[index] {
                        return Err(KernelError::DuplicateSampleIndex(index));
                    }
                    seen[index] = true;
                }
                Ok(indices.clone())
            }
        }
    }
}

/// Nyström approximation parameters
#[derive(Clone, Debug, PartialEq)]
pub struct NystromParams<F: Float> {
    sampling: Sampling,
    /// Eigenvalues at or below this value are discarded, `None` for
    /// `λ_max * m * ε`
    tolerance: Option<F>,
    orientation: Orientation,
}

impl<F: Float> Default for NystromParams<F> {
    fn default() -> NystromParams<F> {
        NystromParams {
            sampling: Sampling::default(),
            tolerance: None,
            orientation: Orientation::Row,
        }
    }
}

impl<F: Float> NystromParams<F> {
    pub fn new(sampling: Sampling) -> NystromParams<F> {
        NystromParams {
            sampling,
            ..Default::default()
        }
    }

    /// `size` random landmarks, keeping the current seed
    pub fn n_samples(mut self, size: usize) -> Self {
        let seed = match self.sampling {
            Sampling::Random { seed, .. } => seed,
            Sampling::Fixed(_) => None,
        };
        self.sampling = Sampling::Random { size, seed };
        self
    }

    /// Fixed landmark indices
    pub fn indices(mut self, indices: Vec<usize>) -> Self {
        self.sampling = Sampling::Fixed(indices);
        self
    }

    /// Seed of the random landmark draw, ignored for fixed indices
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        if let Sampling::Random { seed: s, .. } = &mut self.sampling {
            *s = seed;
        }
        self
    }

    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn sampling(&self) -> &Sampling {
        &self.sampling
    }

    pub fn eigen_tolerance(&self) -> Option<F> {
        self.tolerance
    }

    pub fn data_orientation(&self) -> Orientation {
        self.orientation
    }
}
