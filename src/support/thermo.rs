#![cfg_attr(docsrs, feature(doc_cfg))]

//! Thermodynamic and fluid property modeling.
//!
//! The central abstraction is the [`PropertyOracle`]: given a [`Fluid`] and
//! exactly two independent [`Input`]s, it returns a fully resolved
//! [`FluidPoint`] (temperature, pressure, density, enthalpy, entropy, specific
//! heat, quality and phase).
//!
//! Property models live in [`model`]:
//!
//! - [`model::Builtin`] (default): Peng–Robinson for organic working fluids and
//!   an incompressible liquid for heat-source water
//! - [`model::CoolProp`] (feature `coolprop`): reference-quality properties
//!   through `rfluids`
//!
//! Exergy helpers relative to a [`DeadState`] live in [`exergy`].

mod error;
mod fluid;
mod input;
mod oracle;
mod point;

pub mod exergy;
pub mod model;

pub use error::{PropertyError, PropertyLookupError};
pub use exergy::{DeadState, ExergyReference};
pub use fluid::{Fluid, UnknownFluid};
pub use input::{Input, InputKind, InputPair};
pub use oracle::{Property, PropertyOracle};
pub use point::{CriticalPoint, FluidPoint, Phase};
