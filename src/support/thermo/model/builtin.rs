use crate::support::thermo::{
    CriticalPoint, Fluid, FluidPoint, InputPair, PropertyError, PropertyOracle, fluid::WATER,
};

use super::{Incompressible, InversionConfig, PengRobinson};

/// The self-contained property oracle.
///
/// Organic working fluids resolve through [`PengRobinson`]; water resolves as
/// an [`Incompressible`] liquid, which covers its role as a heat-source
/// stream. No external library is required.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Builtin {
    config: InversionConfig,
}

impl Builtin {
    /// Creates an oracle with custom inversion settings.
    #[must_use]
    pub fn new(config: InversionConfig) -> Self {
        Self { config }
    }
}

impl PropertyOracle for Builtin {
    fn point(&self, fluid: Fluid, inputs: InputPair) -> Result<FluidPoint, PropertyError> {
        match fluid {
            Fluid::Water => Incompressible::new(WATER.liquid())?.point(inputs),
            organic => PengRobinson::new(organic, self.config)?.point(inputs),
        }
    }

    fn critical_point(&self, fluid: Fluid) -> Result<CriticalPoint, PropertyError> {
        Ok(fluid.critical_point())
    }
}
