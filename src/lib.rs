//! # ORC Models
//!
//! Organic Rankine cycle (ORC) performance models and heat-source matching
//! tools for [Twine](https://github.com/isentropic-dev/twine).
//!
//! The cycle model resolves the six working-fluid state points of a subcritical
//! ORC (with optional preheater and superheater enhancement), performs energy and
//! exergy balances on each component, and aggregates cycle-level performance.
//! The heat-source matcher sizes the working-fluid flow to a liquid heat source
//! under pinch and superheat constraints.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models, including the
//!   fluid [Property Oracle](support::thermo::PropertyOracle).
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code starts in a model's internal `core` module and moves to
//! [`support`] once it is useful across models.
//! Only utilities at the crate-level (in [`support`]) are part of the public API.

pub mod models;
pub mod support;
