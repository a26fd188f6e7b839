//! Bundled property providers for whole-system calculations.

use crate::moist_air::{MoistAirModel, Psychrometrics};
use crate::refrigerant::{R134aTables, RefrigerantEos};
use crate::water::{IncompressibleWater, WaterModel};

/// The bundled analytic providers.
pub static PSYCHROMETRICS: Psychrometrics = Psychrometrics;
pub static WATER: IncompressibleWater = IncompressibleWater;
pub static R134A: R134aTables = R134aTables;

/// Property providers for every working fluid a system touches.
///
/// Components borrow this instead of individual models, so a system
/// swaps a provider in one place (e.g. a different refrigerant EOS)
/// without threading it through each component.
#[derive(Clone, Copy)]
pub struct Fluids<'a> {
    pub moist_air: &'a dyn MoistAirModel,
    pub water: &'a dyn WaterModel,
    pub refrigerant: &'a dyn RefrigerantEos,
}

impl Fluids<'_> {
    /// The bundled analytic providers: ASHRAE psychrometrics,
    /// incompressible water, tabulated R134a.
    pub fn reference() -> Fluids<'static> {
        Fluids {
            moist_air: &PSYCHROMETRICS,
            water: &WATER,
            refrigerant: &R134A,
        }
    }
}

impl core::fmt::Debug for Fluids<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Fluids")
            .field("moist_air", &self.moist_air.name())
            .field("water", &self.water.name())
            .field("refrigerant", &self.refrigerant.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_core::units::{celsius, constants::p_atm};

    #[test]
    fn reference_suite_resolves_each_fluid() {
        let fluids = Fluids::reference();
        assert!(fluids.water.state_pt(p_atm(), celsius(25.0)).is_ok());
        assert!(fluids
            .refrigerant
            .saturation_pressure(celsius(40.0))
            .is_ok());
        assert_eq!(fluids.moist_air.name(), "ashrae-psychrometrics");
    }
}
