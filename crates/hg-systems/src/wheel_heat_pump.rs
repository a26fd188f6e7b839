//! Desiccant wheel configuration regenerated by a vapor-compression
//! heat pump.

use crate::breakdown::PowerBreakdown;
use crate::error::{SystemError, SystemResult};
use crate::inputs::SystemInputs;
use crate::iterate::{run_fixed_point, IterationStrategy};
use hg_components::{
    CirculationPump, CoolingTower, DesiccantWheelSector, Fan, HeatExchanger, HeatPump, Stream,
};
use hg_core::units::{celsius, kgps, m, pa};
use hg_fluids::{CycleSpec, Fluids, MoistAirInput, MoistAirState, RefrigerantCycle};

/// Regeneration air mass flow [kg/s].
const M_AIR_REG: f64 = 1.3;
/// Heat pump evaporation temperature [°C].
const T_EVAP_C: f64 = 40.0;
/// Heat pump condensation temperature [°C].
const T_COND_C: f64 = 55.0;
/// Refrigerant charge flow with the recuperator in the loop [kg/s].
const M_REF_RECUP: f64 = 0.067;
/// Refrigerant charge flow without the recuperator [kg/s].
const M_REF_DIRECT: f64 = 0.1192;

/// Regeneration heat used to seed the coupled loop in recuperated
/// mode [kW]. Matches the condenser duty of the direct configuration's
/// sizing run, so both modes start the wheels from the same point.
const SEED_DUTY_KW: f64 = 20.493519919167444;

/// Effectiveness of the exhaust-to-ambient recuperator.
const RECUPERATOR_EFFECTIVENESS: f64 = 0.3;
/// Pass index after which the recuperator joins the loop. The wheels
/// need to roughly settle first or the recuperated inlet oscillates.
const RECUPERATOR_ENGAGE_PASS: usize = 300;

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
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Coupling state carried between wheel passes.
#[derive(Debug, Clone)]
struct LoopState {
    adsorption: DesiccantWheelSector,
    regeneration: DesiccantWheelSector,
    regeneration_air: MoistAirState,
    recuperator: Option<HeatExchanger>,
    heat_pump_inlet: Option<MoistAirState>,
}

/// Desiccant wheel plant with heat pump regeneration.
///
/// The adsorption sector dries the process air; the condenser of a
/// vapor-compression cycle running off the hot water loop heats the
/// regeneration air that strips the wheel again. With the recuperator
/// enabled, exhaust from the adsorption sector preheats ambient air
/// before the condenser, and the refrigerant charge flow drops. The
/// two sectors couple through the wheel moisture loading.
#[derive(Debug, Clone)]
pub struct WheelHeatPumpSystem {
    adsorption: DesiccantWheelSector,
    regeneration: DesiccantWheelSector,
    regeneration_air: MoistAirState,
    heat_pump: HeatPump,
    recuperator: Option<HeatExchanger>,
    heat_pump_inlet: Option<MoistAirState>,
    cooler: HeatExchanger,
    tower: CoolingTower,
    breakdown: PowerBreakdown,
    iterations: usize,
}

impl WheelHeatPumpSystem {
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

        let cycle = RefrigerantCycle::solve(
            fluids.refrigerant,
            CycleSpec::with_defaults(celsius(T_EVAP_C), celsius(T_COND_C)),
        )?;
        let m_ref = if recuperator_on {
            kgps(M_REF_RECUP)
        } else {
            kgps(M_REF_DIRECT)
        };
        let hot_water = fluids
            .water
            .state_pt(ambient.pressure(), inputs.water_temperature)?;
        let heat_pump = HeatPump::new(
            fluids,
            cycle,
            m_ref,
            Stream::Water(hot_water),
            inputs.m_water,
            Stream::Air(ambient),
            m_air,
        )?;
        let q_cond = heat_pump.q_cond().value;

        // Seed: a dry wheel and regeneration air heated by the full
        // condenser duty on the ambient moisture content.
        let seed_duty = if recuperator_on {
            SEED_DUTY_KW * 1e3
        } else {
            q_cond
        };
        let regeneration_air = fluids.moist_air.state(
            ambient.pressure(),
            MoistAirInput::Enthalpy(ambient.enthalpy() + seed_duty / m_air.value),
            MoistAirInput::HumidityRatio(ambient.humidity_ratio()),
        )?;
        let adsorption =
            DesiccantWheelSector::new(fluids, ambient, m_air, 0.0, SECTOR_FRACTION)?;
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
            recuperator: None,
            heat_pump_inlet: None,
        };

        let step = |pass: usize, state: &LoopState| -> SystemResult<LoopState> {
            let mut regeneration_air = state.regeneration_air;
            let mut recuperator = state.recuperator;
            let mut heat_pump_inlet = state.heat_pump_inlet;

            if recuperator_on && pass > RECUPERATOR_ENGAGE_PASS {
                let recup = HeatExchanger::with_effectiveness(
                    fluids,
                    Stream::Air(*state.adsorption.outlet_air()),
                    m_air,
                    Stream::Air(ambient),
                    m_air,
                    RECUPERATOR_EFFECTIVENESS,
                )?;
                let preheated = *recup.outlet_cold().air()?;
                regeneration_air = fluids.moist_air.state(
                    ambient.pressure(),
                    MoistAirInput::Enthalpy(preheated.enthalpy() + q_cond / m_air.value),
                    MoistAirInput::HumidityRatio(preheated.humidity_ratio()),
                )?;
                heat_pump_inlet = Some(preheated);
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
                recuperator,
                heat_pump_inlet,
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

        // In recuperated mode the process air leaves through the
        // recuperator's hot side.
        if recuperator_on {
            let recup = state.recuperator.as_ref().ok_or(SystemError::InvalidConfig {
                what: "pass budget too small for the recuperator to engage",
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
        // leaving the heat pump evaporator.
        let tower = CoolingTower::new(
            fluids,
            *cooler.outlet_hot().air()?,
            heat_pump.outlet_evap().temperature(),
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
        breakdown.push("heat pump compressor", heat_pump.compressor_power());
        breakdown.push("adsorption fan", adsorption_fan.actual_power());
        breakdown.push("regeneration fan", regeneration_fan.actual_power());

        Ok(Self {
            adsorption: state.adsorption,
            regeneration: state.regeneration,
            regeneration_air: state.regeneration_air,
            heat_pump,
            recuperator: state.recuperator,
            heat_pump_inlet: state.heat_pump_inlet,
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

    /// Condenser-heated air entering the regeneration sector.
    pub fn regeneration_air(&self) -> &MoistAirState {
        &self.regeneration_air
    }

    pub fn heat_pump(&self) -> &HeatPump {
        &self.heat_pump
    }

    /// Exhaust-to-ambient recuperator, when enabled.
    pub fn recuperator(&self) -> Option<&HeatExchanger> {
        self.recuperator.as_ref()
    }

    /// Preheated air entering the condenser, when the recuperator runs.
    pub fn heat_pump_inlet(&self) -> Option<&MoistAirState> {
        self.heat_pump_inlet.as_ref()
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
