use std::sync::PoisonError;

use thiserror::Error;

use crate::support::thermo::{Fluid, PropertyError};

/// Errors returned by the [`CoolProp`](super::CoolProp) model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoolPropError {
    #[error(transparent)]
    Rfluids(#[from] rfluids::native::CoolPropError),
    #[error("CoolProp abstract state mutex poisoned")]
    Poisoned,
    #[error("no CoolProp state was created for {0}")]
    UnknownFluid(Fluid),
}

impl<T> From<PoisonError<T>> for CoolPropError {
    fn from(_: PoisonError<T>) -> Self {
        CoolPropError::Poisoned
    }
}

impl From<CoolPropError> for PropertyError {
    fn from(error: CoolPropError) -> Self {
        match error {
            CoolPropError::Rfluids(message) => map_error_message(&message.to_string()),
            CoolPropError::Poisoned => PropertyError::Calculation {
                context: error.to_string(),
            },
            CoolPropError::UnknownFluid(_) => PropertyError::InvalidState {
                context: error.to_string(),
            },
        }
    }
}

/// Maps an `rfluids` error message to a [`PropertyError`] variant.
///
/// The `rfluids` crate exposes CoolProp errors as opaque strings with no
/// structured error codes. This function uses substring matching to classify
/// errors into appropriate [`PropertyError`] variants on a best-effort basis.
///
/// If the message doesn't match any known pattern, it falls back to
/// [`PropertyError::Calculation`], preserving the original message for
/// debugging.
fn map_error_message(message: &str) -> PropertyError {
    const UNDEFINED_MARKERS: &[&str] = &["not defined"];
    const OUT_OF_DOMAIN_MARKERS: &[&str] = &[
        "not in range",
        "out of range",
        "outside the range of validity",
        "must be in range",
        "must be between",
        "quality must be",
    ];
    const INVALID_STATE_MARKERS: &[&str] =
        &["not a valid number", "invalid state", "invalid number"];

    let lowered = message.to_lowercase();
    let context = message.to_string();

    if contains_any(&lowered, UNDEFINED_MARKERS) {
        PropertyError::Undefined { context }
    } else if contains_any(&lowered, OUT_OF_DOMAIN_MARKERS) {
        PropertyError::OutOfDomain { context }
    } else if contains_any(&lowered, INVALID_STATE_MARKERS) {
        PropertyError::InvalidState { context }
    } else {
        PropertyError::Calculation { context }
    }
}

/// Returns `true` if any needle is found in the haystack.
fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
