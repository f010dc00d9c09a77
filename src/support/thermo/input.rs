use std::fmt;

use uom::si::f64::{Pressure, Ratio, ThermodynamicTemperature};

use crate::support::units::{SpecificEnthalpy, SpecificEntropy};

use super::PropertyLookupError;

/// A single independent property used to fix a fluid state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Temperature(ThermodynamicTemperature),
    Pressure(Pressure),
    /// Vapor mass fraction, `0` for saturated liquid and `1` for saturated vapor.
    Quality(Ratio),
    Enthalpy(SpecificEnthalpy),
    Entropy(SpecificEntropy),
}

/// The kind of an [`Input`], without its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputKind {
    Temperature,
    Pressure,
    Quality,
    Enthalpy,
    Entropy,
}

impl Input {
    #[must_use]
    pub fn kind(&self) -> InputKind {
        match self {
            Input::Temperature(_) => InputKind::Temperature,
            Input::Pressure(_) => InputKind::Pressure,
            Input::Quality(_) => InputKind::Quality,
            Input::Enthalpy(_) => InputKind::Enthalpy,
            Input::Entropy(_) => InputKind::Entropy,
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputKind::Temperature => "temperature",
            InputKind::Pressure => "pressure",
            InputKind::Quality => "quality",
            InputKind::Enthalpy => "enthalpy",
            InputKind::Entropy => "entropy",
        })
    }
}

/// Two independent inputs in canonical order.
///
/// Property models match on this type, so the order in which callers supply
/// inputs does not matter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputPair {
    TemperaturePressure(ThermodynamicTemperature, Pressure),
    TemperatureQuality(ThermodynamicTemperature, Ratio),
    TemperatureEnthalpy(ThermodynamicTemperature, SpecificEnthalpy),
    TemperatureEntropy(ThermodynamicTemperature, SpecificEntropy),
    PressureQuality(Pressure, Ratio),
    PressureEnthalpy(Pressure, SpecificEnthalpy),
    PressureEntropy(Pressure, SpecificEntropy),
    QualityEnthalpy(Ratio, SpecificEnthalpy),
    QualityEntropy(Ratio, SpecificEntropy),
    EnthalpyEntropy(SpecificEnthalpy, SpecificEntropy),
}

impl InputPair {
    /// Returns the pair as inputs, in canonical order.
    #[must_use]
    pub fn inputs(&self) -> [Input; 2] {
        match *self {
            InputPair::TemperaturePressure(t, p) => [Input::Temperature(t), Input::Pressure(p)],
            InputPair::TemperatureQuality(t, q) => [Input::Temperature(t), Input::Quality(q)],
            InputPair::TemperatureEnthalpy(t, h) => [Input::Temperature(t), Input::Enthalpy(h)],
            InputPair::TemperatureEntropy(t, s) => [Input::Temperature(t), Input::Entropy(s)],
            InputPair::PressureQuality(p, q) => [Input::Pressure(p), Input::Quality(q)],
            InputPair::PressureEnthalpy(p, h) => [Input::Pressure(p), Input::Enthalpy(h)],
            InputPair::PressureEntropy(p, s) => [Input::Pressure(p), Input::Entropy(s)],
            InputPair::QualityEnthalpy(q, h) => [Input::Quality(q), Input::Enthalpy(h)],
            InputPair::QualityEntropy(q, s) => [Input::Quality(q), Input::Entropy(s)],
            InputPair::EnthalpyEntropy(h, s) => [Input::Enthalpy(h), Input::Entropy(s)],
        }
    }
}

impl TryFrom<&[Input]> for InputPair {
    type Error = PropertyLookupError;

    fn try_from(inputs: &[Input]) -> Result<Self, Self::Error> {
        let &[first, second] = inputs else {
            return Err(PropertyLookupError::InputCount {
                count: inputs.len(),
            });
        };

        let (a, b) = if first.kind() <= second.kind() {
            (first, second)
        } else {
            (second, first)
        };

        match (a, b) {
            (Input::Temperature(t), Input::Pressure(p)) => Ok(Self::TemperaturePressure(t, p)),
            (Input::Temperature(t), Input::Quality(q)) => Ok(Self::TemperatureQuality(t, q)),
            (Input::Temperature(t), Input::Enthalpy(h)) => Ok(Self::TemperatureEnthalpy(t, h)),
            (Input::Temperature(t), Input::Entropy(s)) => Ok(Self::TemperatureEntropy(t, s)),
            (Input::Pressure(p), Input::Quality(q)) => Ok(Self::PressureQuality(p, q)),
            (Input::Pressure(p), Input::Enthalpy(h)) => Ok(Self::PressureEnthalpy(p, h)),
            (Input::Pressure(p), Input::Entropy(s)) => Ok(Self::PressureEntropy(p, s)),
            (Input::Quality(q), Input::Enthalpy(h)) => Ok(Self::QualityEnthalpy(q, h)),
            (Input::Quality(q), Input::Entropy(s)) => Ok(Self::QualityEntropy(q, s)),
            (Input::Enthalpy(h), Input::Entropy(s)) => Ok(Self::EnthalpyEntropy(h, s)),
            _ => Err(PropertyLookupError::DependentInputs { kind: a.kind() }),
        }
    }
}
