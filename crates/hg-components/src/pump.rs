//! Circulation pump model.

use crate::common::check_mass_flow;
use crate::error::{ComponentError, ComponentResult};
use hg_core::units::{constants::G0_MPS2, watt, Length, MassRate, Power};

/// Default wire-to-water pump efficiency.
const DEFAULT_EFF: f64 = 0.6;

/// Circulation pump rated by mass flow and head.
///
/// Shaft power is the hydrostatic lift m·g·H divided by the pump
/// efficiency. The fluid itself does not enter the calculation; head
/// already folds in the loop's density assumptions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirculationPump {
    mass_flow: MassRate,
    head: Length,
    efficiency: f64,
    power: Power,
}

impl CirculationPump {
    /// Pump at the default 0.6 efficiency.
    pub fn new(mass_flow: MassRate, head: Length) -> ComponentResult<Self> {
        Self::with_efficiency(mass_flow, head, DEFAULT_EFF)
    }

    /// Pump at an explicit efficiency in (0, 1].
    pub fn with_efficiency(
        mass_flow: MassRate,
        head: Length,
        efficiency: f64,
    ) -> ComponentResult<Self> {
        check_mass_flow(mass_flow.value, "pump mass flow")?;
        if head.value < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "pump head cannot be negative",
            });
        }
        if !(efficiency > 0.0 && efficiency <= 1.0) {
            return Err(ComponentError::InvalidArg {
                what: "pump efficiency must be in (0, 1]",
            });
        }

        let power = watt(mass_flow.value * G0_MPS2 * head.value / efficiency);
        Ok(Self {
            mass_flow,
            head,
            efficiency,
            power,
        })
    }

    pub fn mass_flow(&self) -> MassRate {
        self.mass_flow
    }

    pub fn head(&self) -> Length {
        self.head
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    /// Shaft power drawn by the pump.
    pub fn power(&self) -> Power {
        self.power
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_core::units::{kgps, m};

    #[test]
    fn reference_loop_pump_power() {
        // 1.1 kg/s against 20 m head at 0.6 efficiency: ~0.36 kW.
        let pump = CirculationPump::new(kgps(1.1), m(20.0)).unwrap();
        assert!((pump.power().value - 1.1 * 9.80665 * 20.0 / 0.6).abs() < 1e-9);
        assert!((pump.power().value / 1e3 - 0.3596).abs() < 1e-3);
    }

    #[test]
    fn power_scales_with_head() {
        let low = CirculationPump::new(kgps(2.0), m(5.0)).unwrap();
        let high = CirculationPump::new(kgps(2.0), m(20.0)).unwrap();
        assert!((high.power().value / low.power().value - 4.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_arguments_rejected() {
        assert!(CirculationPump::new(kgps(0.0), m(20.0)).is_err());
        assert!(CirculationPump::new(kgps(1.0), m(-1.0)).is_err());
        assert!(CirculationPump::with_efficiency(kgps(1.0), m(20.0), 0.0).is_err());
        assert!(CirculationPump::with_efficiency(kgps(1.0), m(20.0), 1.5).is_err());
    }
}
