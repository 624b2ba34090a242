//! Mathematical functions module
//!
//! Complex helpers that `num-complex` does not provide, and unit conversions
//! used by the RF quantity network.

pub mod complex;
pub mod conversions;

pub use complex::*;
pub use conversions::*;
