#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// image cropping module.
pub mod crop;

/// module containing parallization utilities.
pub mod parallel;

/// image rotation by multiples of 90 degrees.
pub mod rotate;
