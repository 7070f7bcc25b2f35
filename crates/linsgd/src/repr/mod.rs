//! Canonical in-memory model representations.

mod linear;

pub use linear::LinearModel;
