//! Data loading
//!
//! Observation matrices are read from delimited text into dense `ndarray`
//! arrays, one observation per row.

pub mod csv;

pub use self::csv::*;
