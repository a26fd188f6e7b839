//! Desiccant wheel configuration regenerated directly by the hot water
//! loop through an air heater.

use crate::breakdown::PowerBreakdown;
use crate::error::{SystemError, SystemResult};
use crate::inputs::SystemInputs;
use crate::iterate::{run_fixed_point, IterationStrategy};
use hg_components::{CirculationPump, CoolingTower, DesiccantWheelSector, Fan, HeatExchanger, Stream};
use hg_core::units::{celsius, kgps, m, pa};
use hg_fluids::{Fluids, MoistAirState};

/// Regeneration air mass flow [kg/s].
const M_AIR_REG: f64 = 1.5;
/// Effectiveness of the exhaust-to-ambient recuperator.
const RECUPERATOR_EFFECTIVENESS: f64 = 0.3;
/// Fraction of the wheel face each sector covers.
const SECTOR_FRACTION: f64 = 0.5;
/// Process air cooler water temperature [°C].
const COOLER_WATER_T_C: f64 = 22.0;
/// Process air cooler water flow [kg/s].
const COOLER_WATER_FLOW: f64 = 1.0;
/// Head of the hot water loop pump [m].
const WATER_PUMP_HEAD: f64 = 20.0;
/// Static pressure rise of the wheel fans [Pa].
const PROCESS_FAN_DP: f64 = 50.0;

/// Passes the reference configuration runs the wheel coupling for.
/// The water-heated loop settles slower than the heat pump variant.
pub const DEFAULT_ITERATIONS: usize = 2000;

/// Coupling state carried between wheel passes.
#[derive(Debug, Clone)]
struct LoopState {
    adsorption: DesiccantWheelSector,
    regeneration: DesiccantWheelSector,
    regeneration_air: MoistAirState,
    heater: HeatExchanger,
    recuperator: Option<HeatExchanger>,
}

/// Desiccant wheel plant heated by the water loop alone.
///
/// The hot water loop heats the regeneration air in a water-to-air
/// exchanger instead of a heat pump condenser. With the recuperator
/// enabled, adsorption exhaust preheats ambient air before the heater
/// from the very first pass, so the heater lifts from a warmer inlet.
#[derive(Debug, Clone)]
pub struct WheelExchangerSystem {
    adsorption: DesiccantWheelSector,
    regeneration: DesiccantWheelSector,
    regeneration_air: MoistAirState,
    heater: HeatExchanger,
    recuperator: Option<HeatExchanger>,
    cooler: HeatExchanger,
    tower: CoolingTower,
    breakdown: PowerBreakdown,
    iterations: usize,
}

impl WheelExchangerSystem {
    /// Solve with the reference pass count.
    pub fn solve(
        fluids: &Fluids<'_>,
        inputs: &SystemInputs,
        recuperator_on: bool,
    ) -> SystemResult<Self> {
        Self::solve_with(
            fluids,
            inputs,
            recuperator_on,
            IterationStrategy::FixedCount(DEFAULT_ITERATIONS),
        )
    }

    pub fn solve_with(
        fluids: &Fluids<'_>,
        inputs: &SystemInputs,
        recuperator_on: bool,
        strategy: IterationStrategy,
    ) -> SystemResult<Self> {
        let ambient = inputs.ambient_air;
        let m_air = inputs.m_air;
        let m_air_reg = kgps(M_AIR_REG);
        let hot_water = Stream::Water(
            fluids
                .water
                .state_pt(ambient.pressure(), inputs.water_temperature)?,
        );

        // Seed: a dry wheel and regeneration air heated straight off
        // the ambient state.
        let heater = HeatExchanger::new(
            fluids,
            hot_water,
            inputs.m_water,
            Stream::Air(ambient),
            m_air,
        )?;
        let regeneration_air = *heater.outlet_cold().air()?;
        let adsorption = DesiccantWheelSector::new(fluids, ambient, m_air, 0.0, SECTOR_FRACTION)?;
        let regeneration = DesiccantWheelSector::new(
            fluids,
            regeneration_air,
            m_air_reg,
            adsorption.current_loading(),
            SECTOR_FRACTION,
        )?;
        let initial = LoopState {
            adsorption,
            regeneration,
            regeneration_air,
            heater,
            recuperator: None,
        };

        let step = |_: usize, state: &LoopState| -> SystemResult<LoopState> {
            let mut regeneration_air = state.regeneration_air;
            let mut heater = state.heater;
            let mut recuperator = state.recuperator;

            if recuperator_on {
                let recup = HeatExchanger::with_effectiveness(
                    fluids,
                    Stream::Air(*state.adsorption.outlet_air()),
                    m_air,
                    Stream::Air(ambient),
                    m_air,
                    RECUPERATOR_EFFECTIVENESS,
                )?;
                heater = HeatExchanger::new(
                    fluids,
                    hot_water,
                    inputs.m_water,
                    *recup.outlet_cold(),
                    m_air,
                )?;
                regeneration_air = *heater.outlet_cold().air()?;
                recuperator = Some(recup);
            }

            let adsorption = DesiccantWheelSector::new(
                fluids,
                ambient,
                m_air,
                state.regeneration.current_loading(),
                SECTOR_FRACTION,
            )?;
            let regeneration = DesiccantWheelSector::new(
                fluids,
                regeneration_air,
                m_air_reg,
                adsorption.current_loading(),
                SECTOR_FRACTION,
            )?;

            Ok(LoopState {
                adsorption,
                regeneration,
                regeneration_air,
                heater,
                recuperator,
            })
        };

        let metric = |a: &LoopState, b: &LoopState| -> f64 {
            let d_ads = (a.adsorption.current_loading() - b.adsorption.current_loading()).abs();
            let d_reg =
                (a.regeneration.current_loading() - b.regeneration.current_loading()).abs();
            d_ads.max(d_reg)
        };

        let run = run_fixed_point("desiccant wheel coupling", strategy, initial, step, metric)?;
        let mut state = run.state;

        if recuperator_on {
            let recup = state.recuperator.as_ref().ok_or(SystemError::InvalidConfig {
                what: "wheel coupling needs at least one pass",
            })?;
            let exhaust = *recup.outlet_hot().air()?;
            state.adsorption = state.adsorption.with_outlet_air(exhaust);
        }

        let cooler_water = fluids
            .water
            .state_pt(ambient.pressure(), celsius(COOLER_WATER_T_C))?;
        let cooler = HeatExchanger::new(
            fluids,
            Stream::Air(*state.adsorption.outlet_air()),
            m_air,
            Stream::Water(cooler_water),
            kgps(COOLER_WATER_FLOW),
        )?;

        // The tower receives the cooled supply air and the water
        // leaving the regeneration air heater.
        let tower = CoolingTower::new(
            fluids,
            *cooler.outlet_hot().air()?,
            state.heater.outlet_hot().temperature(),
            inputs.m_water,
            inputs.tower_air_side(),
            Some(inputs.target_temperature),
        )?;

        let pump = CirculationPump::new(inputs.m_water, m(WATER_PUMP_HEAD))?;
        let adsorption_fan = Fan::new(&ambient, m_air, m_air, pa(PROCESS_FAN_DP))?;
        let regeneration_fan = Fan::new(&ambient, m_air_reg, m_air_reg, pa(PROCESS_FAN_DP))?;

        let mut breakdown = PowerBreakdown::new();
        breakdown.push("cooling tower fan", tower.work());
        breakdown.push("water pump", pump.power());
        breakdown.push("adsorption fan", adsorption_fan.actual_power());
        breakdown.push("regeneration fan", regeneration_fan.actual_power());

        Ok(Self {
            adsorption: state.adsorption,
            regeneration: state.regeneration,
            regeneration_air: state.regeneration_air,
            heater: state.heater,
            recuperator: state.recuperator,
            cooler,
            tower,
            breakdown,
            iterations: run.iterations,
        })
    }

    pub fn adsorption(&self) -> &DesiccantWheelSector {
        &self.adsorption
    }

    pub fn regeneration(&self) -> &DesiccantWheelSector {
        &self.regeneration
    }

    /// Heater-warmed air entering the regeneration sector.
    pub fn regeneration_air(&self) -> &MoistAirState {
        &self.regeneration_air
    }

    /// Water-to-air heater driven by the hot water loop.
    pub fn heater(&self) -> &HeatExchanger {
        &self.heater
    }

    /// Exhaust-to-ambient recuperator, when enabled.
    pub fn recuperator(&self) -> Option<&HeatExchanger> {
        self.recuperator.as_ref()
    }

    /// Supply air cooler between the wheel and the tower.
    pub fn cooler(&self) -> &HeatExchanger {
        &self.cooler
    }

    pub fn tower(&self) -> &CoolingTower {
        &self.tower
    }

    pub fn breakdown(&self) -> &PowerBreakdown {
        &self.breakdown
    }

    /// Wheel coupling passes executed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}
