//! Fan component model.

use crate::common::{check_finite, check_mass_flow};
use crate::error::{ComponentError, ComponentResult};
use hg_core::units::{watt, MassRate, Power, Pressure};
use hg_fluids::MoistAirState;

/// Fan static efficiency at the design point.
const FAN_EFF: f64 = 0.5;

/// ASHRAE 90.1 G3 method-2 part-load power curve coefficients.
const PLR_CURVE: [f64; 4] = [-0.0013, 0.1470, 0.9506, -0.0998];

/// Constant-volume fan sized at a design flow and driven at an actual
/// flow.
///
/// Design power is the volumetric flow against the static pressure rise
/// divided by the fan efficiency; off-design power follows the ASHRAE
/// 90.1 part-load cubic in the flow ratio. Solved once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fan {
    design_flow: MassRate,
    actual_flow: MassRate,
    pressure_rise: Pressure,
    part_load_ratio: f64,
    design_power: Power,
    actual_power: Power,
}

impl Fan {
    /// Size the fan for `air` and evaluate it at `actual_flow`.
    ///
    /// # Errors
    /// Returns `InvalidArg` for non-positive design flow, negative
    /// actual flow or negative pressure rise.
    pub fn new(
        air: &MoistAirState,
        design_flow: MassRate,
        actual_flow: MassRate,
        pressure_rise: Pressure,
    ) -> ComponentResult<Self> {
        check_mass_flow(design_flow.value, "fan design flow")?;
        check_finite(actual_flow.value, "fan actual flow")?;
        if actual_flow.value < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "fan actual flow cannot be negative",
            });
        }
        if pressure_rise.value < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "fan pressure rise cannot be negative",
            });
        }

        let volumetric_flow = design_flow.value / air.density().value;
        let design_power = watt(volumetric_flow * pressure_rise.value / FAN_EFF);

        let plr = actual_flow.value / design_flow.value;
        let frac =
            PLR_CURVE[0] + PLR_CURVE[1] * plr + PLR_CURVE[2] * plr * plr
                + PLR_CURVE[3] * plr * plr * plr;
        let actual_power = design_power * frac;

        Ok(Self {
            design_flow,
            actual_flow,
            pressure_rise,
            part_load_ratio: plr,
            design_power,
            actual_power,
        })
    }

    pub fn design_flow(&self) -> MassRate {
        self.design_flow
    }

    pub fn actual_flow(&self) -> MassRate {
        self.actual_flow
    }

    pub fn pressure_rise(&self) -> Pressure {
        self.pressure_rise
    }

    /// Ratio of actual to design flow.
    pub fn part_load_ratio(&self) -> f64 {
        self.part_load_ratio
    }

    /// Shaft power at the design point.
    pub fn design_power(&self) -> Power {
        self.design_power
    }

    /// Shaft power at the actual flow.
    pub fn actual_power(&self) -> Power {
        self.actual_power
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_core::units::{celsius, constants::p_atm, kgps, pa};
    use hg_fluids::{MoistAirInput, MoistAirModel, Psychrometrics};

    fn ambient() -> MoistAirState {
        Psychrometrics
            .state(
                p_atm(),
                MoistAirInput::DryBulb(celsius(30.0)),
                MoistAirInput::RelativeHumidity(75.0),
            )
            .unwrap()
    }

    #[test]
    fn design_power_matches_hand_calculation() {
        let air = ambient();
        let fan = Fan::new(&air, kgps(1.0), kgps(1.0), pa(50.0)).unwrap();
        let expected = 1.0 / air.density().value * 50.0 / 0.5;
        assert!((fan.design_power().value - expected).abs() < 1e-9);
    }

    #[test]
    fn full_load_fraction_close_to_unity() {
        let fan = Fan::new(&ambient(), kgps(1.0), kgps(1.0), pa(200.0)).unwrap();
        assert!((fan.part_load_ratio() - 1.0).abs() < 1e-12);
        // Curve value at PLR = 1 is 0.9965.
        let frac = fan.actual_power().value / fan.design_power().value;
        assert!((frac - 0.9965).abs() < 1e-4);
    }

    #[test]
    fn part_load_power_below_design() {
        let fan = Fan::new(&ambient(), kgps(2.0), kgps(1.0), pa(200.0)).unwrap();
        assert!(fan.actual_power() < fan.design_power());
        assert!(fan.actual_power().value > 0.0);
    }

    #[test]
    fn overdriven_fan_exceeds_design_power() {
        // Tower fans are sized at 1 kg/s and can run well above it.
        let fan = Fan::new(&ambient(), kgps(1.0), kgps(1.1), pa(200.0)).unwrap();
        assert!(fan.actual_power() > fan.design_power());
    }

    #[test]
    fn invalid_arguments_rejected() {
        let air = ambient();
        assert!(Fan::new(&air, kgps(0.0), kgps(1.0), pa(50.0)).is_err());
        assert!(Fan::new(&air, kgps(1.0), kgps(-1.0), pa(50.0)).is_err());
        assert!(Fan::new(&air, kgps(1.0), kgps(1.0), pa(-5.0)).is_err());
    }
}
