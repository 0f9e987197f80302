//! Kernel functions
//!
//! Every family is a `Kappa` transform over a base function (see
//! [`crate::distance`]); composites combine families pointwise.

pub mod composite;
pub mod gamma_rational_quadratic;
pub mod linear;
pub mod polynomial;
pub mod power;
pub mod rational_quadratic;
pub mod rbf;
pub mod sigmoid;
pub mod traits;

pub use self::composite::*;
pub use self::gamma_rational_quadratic::*;
pub use self::linear::*;
pub use self::polynomial::*;
pub use self::power::*;
pub use self::rational_quadratic::*;
pub use self::rbf::*;
pub use self::sigmoid::*;
pub use self::traits::*;
