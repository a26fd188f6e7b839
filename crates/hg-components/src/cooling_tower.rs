//! Evaporative cooling tower model.

use crate::common::check_mass_flow;
use crate::error::{ComponentError, ComponentResult};
use crate::fan::Fan;
use crate::stream::Stream;
use hg_core::units::{k, kgps, pa, to_celsius, MassRate, Power, Pressure, Temperature};
use hg_fluids::{Fluids, MoistAirInput, MoistAirState, WaterState};

/// Default fan static pressure rise across the fill [Pa].
pub const DEFAULT_PRESSURE_RISE: f64 = 200.0;

/// Approach to the inlet-air wet bulb [K].
const APPROACH: f64 = 3.0;

/// Fraction of the water flow evaporated per kelvin of range.
const EVAPORATION_RATE: f64 = 0.01 / 6.9;

/// How the air side of the tower is fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AirSide {
    /// Water-to-air mass flow ratio (L/G) is given.
    FlowRatio(f64),
    /// A required outlet air state is given; L/G is solved so the air
    /// leaves at its enthalpy.
    TargetOutlet(MoistAirState),
}

/// Counterflow evaporative cooling tower.
///
/// The water leaves at the target temperature if one is given and it
/// clears the wet-bulb approach, otherwise at wet bulb plus approach.
/// The air picks up the rejected heat plus the latent load of the
/// evaporated water; the draft fan is sized at 1 kg/s and driven at the
/// actual air flow, so towers moving more air pay an off-design power
/// penalty.
#[derive(Debug, Clone)]
pub struct CoolingTower {
    inlet_air: MoistAirState,
    inlet_water: WaterState,
    outlet_air: MoistAirState,
    outlet_water: WaterState,
    m_water: MassRate,
    m_air: MassRate,
    m_evap: MassRate,
    flow_ratio: f64,
    fan: Fan,
    cop: f64,
}

impl CoolingTower {
    /// Tower with the default fan pressure rise.
    pub fn new(
        fluids: &Fluids<'_>,
        inlet_air: MoistAirState,
        inlet_water_temperature: Temperature,
        m_water: MassRate,
        air_side: AirSide,
        target_temperature: Option<Temperature>,
    ) -> ComponentResult<Self> {
        Self::with_pressure_rise(
            fluids,
            inlet_air,
            inlet_water_temperature,
            m_water,
            air_side,
            target_temperature,
            pa(DEFAULT_PRESSURE_RISE),
        )
    }

    /// Tower with an explicit fan pressure rise.
    pub fn with_pressure_rise(
        fluids: &Fluids<'_>,
        inlet_air: MoistAirState,
        inlet_water_temperature: Temperature,
        m_water: MassRate,
        air_side: AirSide,
        target_temperature: Option<Temperature>,
        pressure_rise: Pressure,
    ) -> ComponentResult<Self> {
        check_mass_flow(m_water.value, "tower water mass flow")?;

        let inlet_water = fluids
            .water
            .state_pt(inlet_air.pressure(), inlet_water_temperature)?;

        // Outlet water: target if it clears the approach, else pinned
        // at wet bulb plus approach.
        let floor = inlet_air.wet_bulb().value + APPROACH;
        let t_w_out = match target_temperature {
            Some(t) if t.value > floor => t,
            _ => k(floor),
        };
        let outlet_water = fluids.water.state_pt(inlet_air.pressure(), t_w_out)?;

        let cp_w = inlet_water.specific_heat();
        let range = inlet_water.temperature().value - outlet_water.temperature().value;
        let t_out_c = to_celsius(outlet_water.temperature());
        // Heat picked up per unit L/G and kg of air, sensible plus the
        // latent share of the evaporated water [J/kg air].
        let gain = cp_w * range * (1.0 + EVAPORATION_RATE * t_out_c);

        let (flow_ratio, h_air_out) = match air_side {
            AirSide::FlowRatio(lg) => {
                if !(lg.is_finite() && lg > 0.0) {
                    return Err(ComponentError::InvalidArg {
                        what: "tower flow ratio must be positive",
                    });
                }
                (lg, lg * gain + inlet_air.enthalpy())
            }
            AirSide::TargetOutlet(target) => {
                if gain.abs() < f64::EPSILON {
                    return Err(ComponentError::NonPhysical {
                        what: "tower has no water temperature range to solve L/G against",
                    });
                }
                let lg = (target.enthalpy() - inlet_air.enthalpy()) / gain;
                (lg, target.enthalpy())
            }
        };

        let w_air_out = inlet_air.humidity_ratio() + EVAPORATION_RATE * range * flow_ratio;
        let outlet_air = fluids.moist_air.state(
            inlet_air.pressure(),
            MoistAirInput::Enthalpy(h_air_out),
            MoistAirInput::HumidityRatio(w_air_out),
        )?;

        let m_air = kgps(m_water.value / flow_ratio);
        let m_evap = kgps(flow_ratio * EVAPORATION_RATE * range);

        // Draft fan sized at unit flow and run at the actual air flow.
        let fan = Fan::new(&inlet_air, kgps(1.0), m_air, pressure_rise)?;

        let q_rejected = m_water.value * cp_w * range;
        let cop = q_rejected / fan.actual_power().value;

        Ok(Self {
            inlet_air,
            inlet_water,
            outlet_air,
            outlet_water,
            m_water,
            m_air,
            m_evap,
            flow_ratio,
            fan,
            cop,
        })
    }

    pub fn inlet_air(&self) -> &MoistAirState {
        &self.inlet_air
    }

    pub fn inlet_water(&self) -> &WaterState {
        &self.inlet_water
    }

    pub fn outlet_air(&self) -> &MoistAirState {
        &self.outlet_air
    }

    pub fn outlet_water(&self) -> &WaterState {
        &self.outlet_water
    }

    /// Cooled water as a stream for downstream components.
    pub fn outlet_water_stream(&self) -> Stream {
        Stream::Water(self.outlet_water)
    }

    pub fn m_water(&self) -> MassRate {
        self.m_water
    }

    /// Air mass flow implied by the flow ratio.
    pub fn m_air(&self) -> MassRate {
        self.m_air
    }

    /// Evaporated water flow.
    pub fn m_evap(&self) -> MassRate {
        self.m_evap
    }

    /// Water-to-air mass flow ratio (L/G), given or solved.
    pub fn flow_ratio(&self) -> f64 {
        self.flow_ratio
    }

    pub fn fan(&self) -> &Fan {
        &self.fan
    }

    /// Tower power draw (the draft fan).
    pub fn work(&self) -> Power {
        self.fan.actual_power()
    }

    /// Heat rejected per unit of fan power.
    pub fn cop(&self) -> f64 {
        self.cop
    }
}
