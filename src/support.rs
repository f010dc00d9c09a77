//! Supporting utilities shared by the models in this crate.
//!
//! Everything here is public but unstable.
//! See the crate-level docs for how utility code moves into this module.

pub mod constraint;
pub mod hx;
pub mod thermo;
pub mod units;
