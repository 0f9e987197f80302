//! Kernel parameter domains and element-type casts

use crate::core::{KernelError, Result};
use linfa::Float;
use ndarray::Array1;
use num_traits::NumCast;
use std::fmt;

/// A shape or scale parameter given either once or per input dimension
#[derive(Debug, Clone, PartialEq)]
pub enum Scale<F: Float> {
    Scalar(F),
    Vector(Array1<F>),
}

impl<F: Float> Scale<F> {
    /// Check every component against `valid`
    pub fn check(
        &self,
        name: &'static str,
        constraint: &'static str,
        valid: impl Fn(F) -> bool,
    ) -> Result<()> {
        match self {
            Scale::Scalar(v) => check(name, constraint, *v, &valid),
            Scale::Vector(vs) => {
                if vs.is_empty() {
                    return Err(KernelError::invalid(name, "non-empty vector", "[]"));
                }
                vs.iter().try_for_each(|v| check(name, constraint, *v, &valid))
            }
        }
    }

    pub fn cast<G: Float>(&self, name: &'static str) -> Result<Scale<G>> {
        Ok(match self {
            Scale::Scalar(v) => Scale::Scalar(cast_scalar(name, *v)?),
            Scale::Vector(vs) => Scale::Vector(cast_array(name, vs)?),
        })
    }
}

impl<F: Float> From<F> for Scale<F> {
    fn from(v: F) -> Self {
        Scale::Scalar(v)
    }
}

impl<F: Float> From<Array1<F>> for Scale<F> {
    fn from(v: Array1<F>) -> Self {
        Scale::Vector(v)
    }
}

impl<F: Float> From<Vec<F>> for Scale<F> {
    fn from(v: Vec<F>) -> Self {
        Scale::Vector(Array1::from(v))
    }
}

impl<F: Float> fmt::Display for Scale<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scale::Scalar(v) => write!(f, "{v}"),
            Scale::Vector(vs) => write!(f, "{vs}"),
        }
    }
}

/// Fail with `InvalidParameter` unless `valid(value)`
pub fn check<F: Float>(
    name: &'static str,
    constraint: &'static str,
    value: F,
    valid: impl Fn(F) -> bool,
) -> Result<()> {
    if valid(value) {
        Ok(())
    } else {
        Err(KernelError::invalid(name, constraint, value))
    }
}

pub fn positive<F: Float>(v: F) -> bool {
    v > F::zero()
}

pub fn non_negative<F: Float>(v: F) -> bool {
    v >= F::zero()
}

/// `(0, 1]`
pub fn unit_interval<F: Float>(v: F) -> bool {
    v > F::zero() && v <= F::one()
}

/// Cast one parameter value to another element type
pub fn cast_scalar<F: Float, G: Float>(name: &'static str, v: F) -> Result<G> {
    <G as NumCast>::from(v).ok_or_else(|| KernelError::invalid(name, "representable value", v))
}

pub fn cast_array<F: Float, G: Float>(name: &'static str, vs: &Array1<F>) -> Result<Array1<G>> {
    vs.iter()
        .map(|&v| cast_scalar(name, v))
        .collect::<Result<Vec<G>>>()
        .map(Array1::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_scalar_check() {
        let ok = Scale::Scalar(0.5);
        assert!(ok.check("alpha", "alpha > 0", positive).is_ok());

        let bad = Scale::Scalar(0.0);
        let err = bad.check("alpha", "alpha > 0", positive).unwrap_err();
        assert!(err.to_string().contains("alpha > 0"));
    }

    #[test]
    fn test_vector_check() {
        let v: Scale<f64> = array![1.0, 2.0, 0.5].into();
        assert!(v.check("alpha", "alpha > 0", positive).is_ok());

        let v: Scale<f64> = vec![1.0, -2.0].into();
        assert!(v.check("alpha", "alpha > 0", positive).is_err());

        let empty: Scale<f64> = Scale::Vector(Array1::zeros(0));
        assert!(empty.check("alpha", "alpha > 0", positive).is_err());
    }

    #[test]
    fn test_unit_interval_boundaries() {
        assert!(unit_interval(1.0));
        assert!(unit_interval(f64::MIN_POSITIVE));
        assert!(!unit_interval(0.0));
        assert!(!unit_interval(1.0 + f64::EPSILON));
    }

    #[test]
    fn test_cast_preserves_values() {
        let v: Scale<f64> = array![0.25, 4.0].into();
        let w: Scale<f32> = v.cast("alpha").unwrap();
        assert_eq!(w, Scale::Vector(array![0.25f32, 4.0]));

        let x: f64 = cast_scalar("beta", 1.5f32).unwrap();
        assert_eq!(x, 1.5);
    }

    #[test]
    fn test_display() {
        assert_eq!(Scale::Scalar(2.0).to_string(), "2");
        assert_eq!(Scale::Vector(array![1.0, 2.5]).to_string(), "[1, 2.5]");
    }
}
