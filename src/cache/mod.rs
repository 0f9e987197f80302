//! Lazy, cached access to Gram matrix entries
//!
//! Large datasets make a full `n x n` Gram matrix too expensive to hold.
//! [`CachedGram`] evaluates entries on demand and keeps the most recently used
//! ones in an LRU cache. Gram matrices are symmetric, so only K(i,j) with
//! i <= j is cached.

use crate::core::{KernelError, Orientation, Result};
use crate::kernel::Kernel;
use crate::matrix::check_features;
use linfa::Float;
use lru::LruCache;
use ndarray::{Array1, Array2, ArrayBase, Data, Ix2};
use std::num::NonZeroUsize;

/// Cache key for kernel values, normalized so that i <= j
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    i: usize,
    j: usize,
}

impl CacheKey {
    fn new(i: usize, j: usize) -> Self {
        if i <= j {
            Self { i, j }
        } else {
            Self { i: j, j: i }
        }
    }
}

/// LRU cache for kernel matrix values
pub struct KernelCache<F> {
    cache: LruCache<CacheKey, F>,
    hits: u64,
    misses: u64,
}

impl<F: Copy> KernelCache<F> {
    /// Cache holding at most `capacity` entries (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Cache sized from a memory budget in bytes
    pub fn with_memory_limit(memory_bytes: usize) -> Self {
        // key, value and list links
        let entry = std::mem::size_of::<(CacheKey, F)>() + 2 * std::mem::size_of::<usize>();
        Self::new(memory_bytes / entry)
    }

    pub fn get(&mut self, i: usize, j: usize) -> Option<F> {
        let key = CacheKey::new(i, j);
        if let Some(&value) = self.cache.get(&key) {
            self.hits += 1;
            Some(value)
        } else {
            self.misses += 1;
            None
        }
    }

    pub fn put(&mut self, i: usize, j: usize, value: F) {
        self.cache.put(CacheKey::new(i, j), value);
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            capacity: self.cache.cap().get(),
            size: self.cache.len(),
        }
    }

    /// Drop every entry and reset the counters
    pub fn clear(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub capacity: usize,
    pub size: usize,
}

/// Gram matrix of a dataset evaluated on demand
///
/// Entries are bit-for-bit equal to those of
/// [`kernel_matrix`](crate::matrix::kernel_matrix).
pub struct CachedGram<F: Float, K> {
    kernel: K,
    /// Observations, one per row
    data: Array2<F>,
    cache: KernelCache<F>,
}

impl<F: Float, K: Kernel<F>> CachedGram<F, K> {
    pub fn new(
        kernel: K,
        x: &ArrayBase<impl Data<Elem = F>, Ix2>,
        orientation: Orientation,
        capacity: usize,
    ) -> Result<Self> {
        let data = orientation.observations(x).to_owned();
        check_features(&kernel, data.ncols(), data.ncols())?;
        Ok(Self {
            kernel,
            data,
            cache: KernelCache::new(capacity),
        })
    }

    /// K(i, j)
    pub fn get(&mut self, i: usize, j: usize) -> Result<F> {
        self.check_index(i)?;
        self.check_index(j)?;
        if let Some(value) = self.cache.get(i, j) {
            return Ok(value);
        }

        let (a, b) = if i <= j { (i, j) } else { (j, i) };
        let value = self.kernel.evaluate(&self.data.row(a), &self.data.row(b));
        self.cache.put(a, b, value);
        Ok(value)
    }

    /// Row `i` of the Gram matrix
    pub fn row(&mut self, i: usize) -> Result<Array1<F>> {
        self.check_index(i)?;
        (0..self.n_obs())
            .map(|j| self.get(i, j))
            .collect::<Result<Vec<_>>>()
            .map(Array1::from)
    }

    pub fn n_obs(&self) -> usize {
        self.data.nrows()
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.n_obs() {
            return Err(KernelError::IndexOutOfBounds {
                index,
                len: self.n_obs(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{GaussianKernel, PolynomialKernel};
    use crate::matrix::kernel_matrix;
    use ndarray::array;

    #[test]
    fn test_cache_key_normalization() {
        let key1 = CacheKey::new(1, 5);
        let key2 = CacheKey::new(5, 1);
        assert_eq!(key1, key2);
        assert_eq!(key1.i, 1);
        assert_eq!(key1.j, 5);
    }

    #[test]
    fn test_kernel_cache_basic() {
        let mut cache = KernelCache::new(3);

        assert_eq!(cache.get(0, 1), None);
        assert_eq!(cache.stats().misses, 1);

        cache.put(0, 1, 5.0);
        assert_eq!(cache.get(0, 1), Some(5.0));
        assert_eq!(cache.get(1, 0), Some(5.0));
        assert_eq!(cache.stats().hits, 2);
    }

    #[test]
    fn test_kernel_cache_lru_eviction() {
        let mut cache = KernelCache::new(2);

        cache.put(0, 1, 1.0f32);
        cache.put(1, 2, 2.0);
        cache.put(2, 3, 3.0);

        assert_eq!(cache.get(0, 1), None);
        assert_eq!(cache.get(1, 2), Some(2.0));
        assert_eq!(cache.get(2, 3), Some(3.0));
    }

    #[test]
    fn test_hit_rate_and_clear() {
        let mut cache = KernelCache::new(10);
        assert_eq!(cache.hit_rate(), 0.0);

        cache.get(0, 1);
        cache.put(0, 1, 1.0);
        cache.get(0, 1);
        assert_eq!(cache.hit_rate(), 0.5);

        cache.clear();
        assert_eq!(cache.get(0, 1), None);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 0,
                misses: 1,
                capacity: 10,
                size: 0
            }
        );
    }

    #[test]
    fn test_memory_limit_capacity() {
        let cache = KernelCache::<f64>::with_memory_limit(1 << 20);
        assert!(cache.stats().capacity > 1000);

        let tiny = KernelCache::<f64>::with_memory_limit(0);
        assert_eq!(tiny.stats().capacity, 1);
    }

    #[test]
    fn test_cached_gram_matches_kernel_matrix() {
        let x = array![[0.0, 1.0], [2.0, -1.0], [0.5, 0.5], [3.0, 2.0]];
        let kernel = PolynomialKernel::<f64>::new(0.5, 1.0, 3).unwrap();
        let gram = kernel_matrix(&kernel, &x, Orientation::Row).unwrap();

        let mut lazy = CachedGram::new(kernel, &x, Orientation::Row, 16).unwrap();
        for i in 0..4 {
            assert_eq!(lazy.row(i).unwrap(), gram.row(i));
        }
        // 10 distinct entries in the upper triangle, 6 lower entries served from cache
        let stats = lazy.stats();
        assert_eq!(stats.misses, 10);
        assert_eq!(stats.hits, 6);
        assert_eq!(lazy.get(3, 1).unwrap(), gram[[1, 3]]);
    }

    #[test]
    fn test_cached_gram_bounds() {
        let x = array![[0.0], [1.0]];
        let mut lazy =
            CachedGram::new(GaussianKernel::<f64>::default(), &x, Orientation::Row, 4).unwrap();
        assert!(matches!(
            lazy.get(0, 2),
            Err(KernelError::IndexOutOfBounds { index: 2, len: 2 })
        ));
        assert!(lazy.row(5).is_err());

        let weighted = GaussianKernel::<f64>::new(array![1.0, 1.0]).unwrap();
        assert!(CachedGram::new(weighted, &x, Orientation::Row, 4).is_err());
    }
}
