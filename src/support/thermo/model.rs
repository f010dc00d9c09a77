//! Thermodynamic property models.
//!
//! Every model here is exposed to the cycle solvers through
//! [`PropertyOracle`](super::PropertyOracle). [`Builtin`] combines the
//! self-contained models and is the default oracle.

pub mod builtin;
pub mod incompressible;
pub mod peng_robinson;

#[cfg(feature = "coolprop")]
#[cfg_attr(docsrs, doc(cfg(feature = "coolprop")))]
pub mod coolprop;

pub use builtin::Builtin;
pub use incompressible::Incompressible;
pub use peng_robinson::{InversionConfig, PengRobinson};

#[cfg(feature = "coolprop")]
#[cfg_attr(docsrs, doc(cfg(feature = "coolprop")))]
pub use coolprop::CoolProp;
