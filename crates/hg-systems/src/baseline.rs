//! Baseline configuration: cooling tower and circulation pump only.

use crate::breakdown::PowerBreakdown;
use crate::error::SystemResult;
use crate::inputs::SystemInputs;
use hg_components::{CirculationPump, CoolingTower};
use hg_core::units::m;
use hg_fluids::Fluids;

/// Head of the hot water loop pump [m].
const WATER_PUMP_HEAD: f64 = 20.0;

/// The do-nothing reference plant: the hot water loop goes straight to
/// the cooling tower. Everything the other configurations add is
/// measured against this system's power draw.
#[derive(Debug, Clone)]
pub struct BaselineSystem {
    tower: CoolingTower,
    pump: CirculationPump,
    breakdown: PowerBreakdown,
}

impl BaselineSystem {
    pub fn solve(fluids: &Fluids<'_>, inputs: &SystemInputs) -> SystemResult<Self> {
        let tower = CoolingTower::new(
            fluids,
            inputs.ambient_air,
            inputs.water_temperature,
            inputs.m_water,
            inputs.tower_air_side(),
            Some(inputs.target_temperature),
        )?;
        let pump = CirculationPump::new(inputs.m_water, m(WATER_PUMP_HEAD))?;

        let mut breakdown = PowerBreakdown::new();
        breakdown.push("cooling tower fan", tower.work());
        breakdown.push("water pump", pump.power());

        Ok(Self {
            tower,
            pump,
            breakdown,
        })
    }

    pub fn tower(&self) -> &CoolingTower {
        &self.tower
    }

    pub fn pump(&self) -> &CirculationPump {
        &self.pump
    }

    pub fn breakdown(&self) -> &PowerBreakdown {
        &self.breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_core::units::to_celsius;

    #[test]
    fn baseline_meets_target() {
        let f = Fluids::reference();
        let inputs = SystemInputs::reference(&f).unwrap();
        let sys = BaselineSystem::solve(&f, &inputs).unwrap();
        // 30 °C target clears the 26.2 °C wet bulb plus approach.
        assert!((to_celsius(sys.tower().outlet_water().temperature()) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn breakdown_covers_both_consumers() {
        let f = Fluids::reference();
        let inputs = SystemInputs::reference(&f).unwrap();
        let sys = BaselineSystem::solve(&f, &inputs).unwrap();
        let total = sys.breakdown().total().value;
        assert!(
            (total - sys.tower().work().value - sys.pump().power().value).abs() < 1e-9
        );
        assert!(total > 0.0);
    }
}
