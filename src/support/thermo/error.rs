use thiserror::Error;

use super::{Fluid, Input, InputKind};

/// Errors that may occur when evaluating thermodynamic properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The property is undefined at the given state.
    ///
    /// For example, the specific heat capacity of a pure fluid within the vapor dome.
    #[error("undefined property: {context}")]
    Undefined { context: String },

    /// The input state is outside the model's valid domain.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },

    /// The provided state is invalid or inconsistent.
    #[error("invalid state: {context}")]
    InvalidState { context: String },

    /// The calculation failed due to a numerical or internal error.
    ///
    /// For example, division by zero or a failure to converge.
    #[error("calculation error: {context}")]
    Calculation { context: String },

    /// The model does not handle this fluid or input combination.
    #[error("unsupported: {context}")]
    Unsupported { context: String },
}

/// Errors returned by [`PropertyOracle`](super::PropertyOracle) lookups.
///
/// Backend failures carry the fluid and the offending inputs for diagnostics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyLookupError {
    /// A lookup needs exactly two independent inputs.
    #[error("expected exactly two inputs, got {count}")]
    InputCount { count: usize },

    /// Both inputs specify the same property.
    #[error("inputs are not independent: both specify {kind}")]
    DependentInputs { kind: InputKind },

    /// The property model failed at the requested state.
    #[error("{fluid} lookup failed for {inputs:?}")]
    Backend {
        fluid: Fluid,
        inputs: Vec<Input>,
        #[source]
        source: PropertyError,
    },

    /// The property model could not provide the critical point.
    #[error("{fluid} critical point unavailable")]
    CriticalPoint {
        fluid: Fluid,
        #[source]
        source: PropertyError,
    },
}
