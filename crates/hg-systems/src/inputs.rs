//! Shared boundary conditions for the system configurations.

use crate::error::SystemResult;
use hg_components::AirSide;
use hg_core::units::{celsius, constants::p_atm, kgps, MassRate, Temperature};
use hg_fluids::{Fluids, MoistAirInput, MoistAirState};

/// Boundary conditions common to every configuration: the ambient air,
/// the hot water loop and the cooling tower targets.
#[derive(Debug, Clone, Copy)]
pub struct SystemInputs {
    /// Ambient air drawn by every fan and tower.
    pub ambient_air: MoistAirState,
    /// Required tower outlet air; when set, the tower solves its own
    /// air flow instead of running at the loop flow ratio.
    pub tower_outlet_air: Option<MoistAirState>,
    /// Hot water loop supply temperature.
    pub water_temperature: Temperature,
    /// Hot water loop mass flow.
    pub m_water: MassRate,
    /// Process air mass flow.
    pub m_air: MassRate,
    /// Target tower outlet water temperature.
    pub target_temperature: Temperature,
}

impl SystemInputs {
    /// The reference boundary conditions: 30 °C / 75 % ambient air,
    /// 55 °C water at 1.1 kg/s, 1 kg/s process air, 30 °C tower target.
    pub fn reference(fluids: &Fluids<'_>) -> SystemResult<Self> {
        let ambient_air = fluids.moist_air.state(
            p_atm(),
            MoistAirInput::DryBulb(celsius(30.0)),
            MoistAirInput::RelativeHumidity(75.0),
        )?;
        Ok(Self {
            ambient_air,
            tower_outlet_air: None,
            water_temperature: celsius(55.0),
            m_water: kgps(1.1),
            m_air: kgps(1.0),
            target_temperature: celsius(30.0),
        })
    }

    /// Water-to-air flow ratio of the main tower loop.
    pub fn flow_ratio(&self) -> f64 {
        self.m_water.value / self.m_air.value
    }

    /// Air-side specification for the main cooling tower.
    pub fn tower_air_side(&self) -> AirSide {
        match self.tower_outlet_air {
            Some(target) => AirSide::TargetOutlet(target),
            None => AirSide::FlowRatio(self.flow_ratio()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_core::units::to_celsius;

    #[test]
    fn reference_conditions() {
        let f = Fluids::reference();
        let inputs = SystemInputs::reference(&f).unwrap();
        assert!((to_celsius(inputs.ambient_air.temperature()) - 30.0).abs() < 1e-9);
        assert!((inputs.flow_ratio() - 1.1).abs() < 1e-12);
        assert!(matches!(inputs.tower_air_side(), AirSide::FlowRatio(_)));
    }

    #[test]
    fn target_outlet_switches_air_side() {
        let f = Fluids::reference();
        let mut inputs = SystemInputs::reference(&f).unwrap();
        inputs.tower_outlet_air = Some(inputs.ambient_air);
        assert!(matches!(inputs.tower_air_side(), AirSide::TargetOutlet(_)));
    }
}
