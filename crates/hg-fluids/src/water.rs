//! Liquid water states and the incompressible-liquid provider.

use crate::error::{FluidError, FluidResult};
use hg_core::units::{celsius, kg_per_m3, to_celsius, Density, Pressure, SpecEnthalpy,
    SpecHeatCapacity, Temperature};

/// Resolved state of liquid water.
///
/// Value object: derived once by a [`WaterModel`], immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterState {
    pressure: Pressure,
    temperature: Temperature,
    enthalpy: SpecEnthalpy,
    density: Density,
    specific_heat: SpecHeatCapacity,
}

impl WaterState {
    pub fn pressure(&self) -> Pressure {
        self.pressure
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    /// Specific enthalpy [J/kg], zero at 0 °C.
    pub fn enthalpy(&self) -> SpecEnthalpy {
        self.enthalpy
    }

    pub fn density(&self) -> Density {
        self.density
    }

    /// Specific heat [J/(kg·K)].
    pub fn specific_heat(&self) -> SpecHeatCapacity {
        self.specific_heat
    }
}

/// Property provider for liquid water.
pub trait WaterModel: Send + Sync {
    /// Provider name (for debugging/logging).
    fn name(&self) -> &str;

    /// State from temperature and pressure.
    fn state_pt(&self, pressure: Pressure, temperature: Temperature) -> FluidResult<WaterState>;

    /// State from specific enthalpy [J/kg] and pressure.
    fn state_ph(&self, pressure: Pressure, enthalpy: SpecEnthalpy) -> FluidResult<WaterState>;

    /// Latent heat of vaporization hfg at `temperature` [J/kg].
    fn latent_heat(&self, temperature: Temperature) -> FluidResult<SpecEnthalpy>;
}

/// Incompressible liquid water: constant cp, cubic density fit, linear
/// hfg fit. Valid 0–100 °C, which covers every water loop in the
/// reference systems.
#[derive(Debug, Default, Clone, Copy)]
pub struct IncompressibleWater;

/// Specific heat of liquid water [J/(kg·K)].
const CP_WATER: f64 = 4184.0;

impl IncompressibleWater {
    fn check_range(t_c: f64) -> FluidResult<()> {
        if !(0.0..=100.0).contains(&t_c) {
            return Err(FluidError::OutOfRange {
                what: "liquid water temperature",
            });
        }
        Ok(())
    }

    /// Density fit [kg/m³] over 0–100 °C.
    fn density(t_c: f64) -> Density {
        kg_per_m3(999.85 + 0.05332 * t_c - 0.007564 * t_c * t_c + 4.323e-5 * t_c * t_c * t_c)
    }
}

impl WaterModel for IncompressibleWater {
    fn name(&self) -> &str {
        "incompressible-water"
    }

    fn state_pt(&self, pressure: Pressure, temperature: Temperature) -> FluidResult<WaterState> {
        let t_c = to_celsius(temperature);
        Self::check_range(t_c)?;
        Ok(WaterState {
            pressure,
            temperature,
            enthalpy: CP_WATER * t_c,
            density: Self::density(t_c),
            specific_heat: CP_WATER,
        })
    }

    fn state_ph(&self, pressure: Pressure, enthalpy: SpecEnthalpy) -> FluidResult<WaterState> {
        let t_c = enthalpy / CP_WATER;
        Self::check_range(t_c)?;
        Ok(WaterState {
            pressure,
            temperature: celsius(t_c),
            enthalpy,
            density: Self::density(t_c),
            specific_heat: CP_WATER,
        })
    }

    fn latent_heat(&self, temperature: Temperature) -> FluidResult<SpecEnthalpy> {
        let t_c = to_celsius(temperature);
        Self::check_range(t_c)?;
        // Linear fit, 2501 kJ/kg at 0 °C falling ~2.365 kJ/kg per kelvin.
        Ok(2_500_900.0 - 2365.0 * t_c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_core::units::constants::p_atm;

    #[test]
    fn state_pt_reference() {
        let w = IncompressibleWater.state_pt(p_atm(), celsius(55.0)).unwrap();
        assert!((to_celsius(w.temperature()) - 55.0).abs() < 1e-9);
        assert!((w.enthalpy() / 1e3 - 230.1).abs() < 0.5);
        // ~985.7 kg/m³ at 55 °C
        assert!((w.density().value - 985.7).abs() < 2.0);
    }

    #[test]
    fn ph_inverts_pt() {
        let w = IncompressibleWater.state_pt(p_atm(), celsius(42.0)).unwrap();
        let back = IncompressibleWater.state_ph(p_atm(), w.enthalpy()).unwrap();
        assert!((to_celsius(back.temperature()) - 42.0).abs() < 1e-9);
    }

    #[test]
    fn latent_heat_decreases_with_temperature() {
        let h30 = IncompressibleWater.latent_heat(celsius(30.0)).unwrap();
        let h55 = IncompressibleWater.latent_heat(celsius(55.0)).unwrap();
        assert!(h30 > h55);
        // ~2430 kJ/kg at 30 °C
        assert!((h30 / 1e3 - 2430.0).abs() < 5.0);
    }

    #[test]
    fn out_of_range_rejected() {
        assert!(matches!(
            IncompressibleWater.state_pt(p_atm(), celsius(130.0)),
            Err(FluidError::OutOfRange { .. })
        ));
    }
}
