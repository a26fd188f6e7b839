//! Liquid desiccant configuration: absorber and regenerator coupled
//! through a closed solution loop.

use crate::breakdown::PowerBreakdown;
use crate::error::{SystemError, SystemResult};
use crate::inputs::SystemInputs;
use crate::iterate::{run_fixed_point, IterationStrategy};
use hg_components::{
    AirSide, CirculationPump, CoolingTower, Fan, HeatExchanger, LiquidDesiccantContactor, Stream,
};
use hg_core::units::{celsius, kgps, m, pa, MassRate, Temperature};
use hg_fluids::{Fluids, SolutionInput, SolutionKind, SolutionState};

/// Desiccant mass fraction of the fresh solution charge.
const FEED_CONCENTRATION: f64 = 0.8;
/// Fresh solution charge temperature [°C].
const FEED_TEMPERATURE_C: f64 = 30.0;
/// Solution circulation rate of the first pass [kg/s].
const FEED_MASS_FLOW: f64 = 2.0;
/// Air/solution contact effectiveness of both contactors.
const CONTACT_EFFECTIVENESS: f64 = 0.64;

/// Cooling water temperature for the solution cooler [°C].
const COOLING_WATER_T_C: f64 = 25.0;
/// Cooling water flow with the solution recuperator in the loop [kg/s].
const COOLING_WATER_FLOW_RECUP: f64 = 0.651;
/// Cooling water flow without the recuperator [kg/s].
const COOLING_WATER_FLOW_DIRECT: f64 = 1.01;
/// Target outlet temperature of the solution-side tower [°C].
const SOLUTION_TOWER_TARGET_C: f64 = 25.0;

/// Head of the hot water loop pump [m].
const WATER_PUMP_HEAD: f64 = 20.0;
/// Head of each solution circulation pump [m].
const SOLUTION_PUMP_HEAD: f64 = 5.0;
/// Static pressure rise of the contactor fans [Pa].
const PROCESS_FAN_DP: f64 = 50.0;

/// Passes the reference configuration runs the solution loop for.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Coupling state carried between solution loop passes.
#[derive(Debug, Clone)]
struct LoopState {
    absorber: LiquidDesiccantContactor,
    regenerator: LiquidDesiccantContactor,
    heater: HeatExchanger,
    recuperator: Option<HeatExchanger>,
    cooler: Option<HeatExchanger>,
    solution_tower: Option<CoolingTower>,
}

/// Liquid desiccant heat recovery plant.
///
/// The absorber dries the process air into the solution; the hot water
/// loop heats the diluted solution so the regenerator can reject the
/// water again; a cooler and a small tower bring the regenerated
/// solution back to absorption temperature. With the recuperator
/// enabled, regenerated and absorbed solution exchange heat first and
/// the cooling water flow drops accordingly. The loop closes by
/// successive substitution over the solution states.
#[derive(Debug, Clone)]
pub struct LiquidDesiccantSystem {
    absorber: LiquidDesiccantContactor,
    regenerator: LiquidDesiccantContactor,
    heater: HeatExchanger,
    recuperator: Option<HeatExchanger>,
    cooler: HeatExchanger,
    solution_tower: CoolingTower,
    tower: CoolingTower,
    breakdown: PowerBreakdown,
    iterations: usize,
}

impl LiquidDesiccantSystem {
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
        let hot_water = Stream::Water(
            fluids
                .water
                .state_pt(ambient.pressure(), inputs.water_temperature)?,
        );
        let cooling_water = Stream::Water(
            fluids
                .water
                .state_pt(ambient.pressure(), celsius(COOLING_WATER_T_C))?,
        );

        // First pass from the fresh solution charge.
        let feed = SolutionState::new(
            SolutionKind::IonicLiquid,
            SolutionInput::temperature(celsius(FEED_TEMPERATURE_C)),
            SolutionInput::concentration(FEED_CONCENTRATION),
        )?;
        let absorber = LiquidDesiccantContactor::new(
            fluids,
            ambient,
            feed,
            m_air,
            kgps(FEED_MASS_FLOW),
            CONTACT_EFFECTIVENESS,
        )?;
        let heater = HeatExchanger::new(
            fluids,
            hot_water,
            inputs.m_water,
            Stream::Solution(*absorber.outlet_solution()),
            absorber.m_solution_out(),
        )?;
        let regenerator = LiquidDesiccantContactor::new(
            fluids,
            ambient,
            *heater.outlet_cold().solution()?,
            m_air,
            heater.m_cold(),
            CONTACT_EFFECTIVENESS,
        )?;
        let initial = LoopState {
            absorber,
            regenerator,
            heater,
            recuperator: None,
            cooler: None,
            solution_tower: None,
        };

        let step = |_: usize, state: &LoopState| -> SystemResult<LoopState> {
            // Recover the regenerated solution's heat, then cool the
            // absorber feed against the cooling water.
            let (recuperator, to_cooler, m_to_cooler, cooling_flow) = if recuperator_on {
                let recup = HeatExchanger::new(
                    fluids,
                    Stream::Solution(*state.regenerator.outlet_solution()),
                    state.regenerator.m_solution_out(),
                    Stream::Solution(*state.absorber.outlet_solution()),
                    state.absorber.m_solution_out(),
                )?;
                let hot = *recup.outlet_hot();
                let m_hot = recup.m_hot();
                (Some(recup), hot, m_hot, kgps(COOLING_WATER_FLOW_RECUP))
            } else {
                (
                    None,
                    Stream::Solution(*state.regenerator.outlet_solution()),
                    state.regenerator.m_solution_out(),
                    kgps(COOLING_WATER_FLOW_DIRECT),
                )
            };

            let cooler = HeatExchanger::new(
                fluids,
                to_cooler,
                m_to_cooler,
                cooling_water,
                cooling_flow,
            )?;
            let absorber_feed = *cooler.outlet_hot().solution()?;

            // The spent cooling water goes to its own small tower.
            let solution_tower = CoolingTower::new(
                fluids,
                ambient,
                cooler.outlet_cold().temperature(),
                cooling_flow,
                AirSide::FlowRatio(inputs.flow_ratio()),
                Some(celsius(SOLUTION_TOWER_TARGET_C)),
            )?;

            let absorber = LiquidDesiccantContactor::new(
                fluids,
                ambient,
                absorber_feed,
                m_air,
                state.regenerator.m_solution_out(),
                CONTACT_EFFECTIVENESS,
            )?;

            let heater_feed = match &recuperator {
                Some(recup) => *recup.outlet_cold(),
                None => Stream::Solution(*absorber.outlet_solution()),
            };
            let heater = HeatExchanger::new(
                fluids,
                hot_water,
                inputs.m_water,
                heater_feed,
                absorber.m_solution_out(),
            )?;

            let regenerator = LiquidDesiccantContactor::new(
                fluids,
                ambient,
                *heater.outlet_cold().solution()?,
                m_air,
                heater.m_cold(),
                CONTACT_EFFECTIVENESS,
            )?;

            Ok(LoopState {
                absorber,
                regenerator,
                heater,
                recuperator,
                cooler: Some(cooler),
                solution_tower: Some(solution_tower),
            })
        };

        let metric = |a: &LoopState, b: &LoopState| -> f64 {
            let d_abs = (a.absorber.outlet_solution().temperature().value
                - b.absorber.outlet_solution().temperature().value)
                .abs();
            let d_reg = (a.regenerator.outlet_solution().temperature().value
                - b.regenerator.outlet_solution().temperature().value)
                .abs();
            d_abs.max(d_reg)
        };

        let run = run_fixed_point("liquid desiccant solution loop", strategy, initial, step, metric)?;
        let state = run.state;
        let (cooler, solution_tower) = match (state.cooler, state.solution_tower) {
            (Some(c), Some(t)) => (c, t),
            _ => {
                return Err(SystemError::InvalidConfig {
                    what: "solution loop needs at least one pass",
                });
            }
        };

        // Main tower takes the dried process air and the water leaving
        // the solution heater.
        let tower = CoolingTower::new(
            fluids,
            *state.absorber.outlet_air(),
            state.heater.outlet_hot().temperature(),
            inputs.m_water,
            inputs.tower_air_side(),
            Some(inputs.target_temperature),
        )?;

        let water_pump = CirculationPump::new(inputs.m_water, m(WATER_PUMP_HEAD))?;
        let absorber_pump =
            CirculationPump::new(state.absorber.m_solution_out(), m(SOLUTION_PUMP_HEAD))?;
        let regenerator_pump =
            CirculationPump::new(state.regenerator.m_solution_out(), m(SOLUTION_PUMP_HEAD))?;
        let absorber_fan = Fan::new(&ambient, m_air, m_air, pa(PROCESS_FAN_DP))?;
        let regenerator_fan = Fan::new(&ambient, m_air, m_air, pa(PROCESS_FAN_DP))?;

        let mut breakdown = PowerBreakdown::new();
        breakdown.push("cooling tower fan", tower.work());
        breakdown.push("water pump", water_pump.power());
        breakdown.push("solution tower fan", solution_tower.work());
        breakdown.push("absorber fan", absorber_fan.actual_power());
        breakdown.push("regenerator fan", regenerator_fan.actual_power());
        breakdown.push("absorber pump", absorber_pump.power());
        breakdown.push("regenerator pump", regenerator_pump.power());

        Ok(Self {
            absorber: state.absorber,
            regenerator: state.regenerator,
            heater: state.heater,
            recuperator: state.recuperator,
            cooler,
            solution_tower,
            tower,
            breakdown,
            iterations: run.iterations,
        })
    }

    pub fn absorber(&self) -> &LiquidDesiccantContactor {
        &self.absorber
    }

    pub fn regenerator(&self) -> &LiquidDesiccantContactor {
        &self.regenerator
    }

    /// Hot-water-to-solution heater ahead of the regenerator.
    pub fn heater(&self) -> &HeatExchanger {
        &self.heater
    }

    /// Solution-to-solution recuperator, when enabled.
    pub fn recuperator(&self) -> Option<&HeatExchanger> {
        self.recuperator.as_ref()
    }

    /// Solution-to-cooling-water cooler ahead of the absorber.
    pub fn cooler(&self) -> &HeatExchanger {
        &self.cooler
    }

    /// Tower serving the solution cooling water.
    pub fn solution_tower(&self) -> &CoolingTower {
        &self.solution_tower
    }

    /// Main tower on the hot water loop.
    pub fn tower(&self) -> &CoolingTower {
        &self.tower
    }

    pub fn breakdown(&self) -> &PowerBreakdown {
        &self.breakdown
    }

    /// Solution loop passes executed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Water temperature the main tower has to close on.
    pub fn tower_inlet_temperature(&self) -> Temperature {
        self.heater.outlet_hot().temperature()
    }

    /// Net water removed from the process air [kg/s].
    pub fn dehumidification_rate(&self) -> MassRate {
        self.absorber.m_transfer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(recuperator_on: bool, passes: usize) -> LiquidDesiccantSystem {
        let f = Fluids::reference();
        let inputs = SystemInputs::reference(&f).unwrap();
        LiquidDesiccantSystem::solve_with(
            &f,
            &inputs,
            recuperator_on,
            IterationStrategy::FixedCount(passes),
        )
        .unwrap()
    }

    #[test]
    fn loop_settles_under_fixed_count() {
        let sys = solve(true, 60);
        let more = solve(true, 120);
        // Doubling the pass budget barely moves the settled states.
        let d = (sys.absorber().outlet_solution().temperature().value
            - more.absorber().outlet_solution().temperature().value)
            .abs();
        assert!(d < 1e-3, "drift {d} K");
    }

    #[test]
    fn absorber_dries_regenerator_rejects() {
        let sys = solve(true, 60);
        assert!(sys.dehumidification_rate().value > 0.0);
        assert!(sys.regenerator().m_transfer().value < 0.0);
        assert!(
            sys.absorber().outlet_air().humidity_ratio()
                < sys.absorber().inlet_air().humidity_ratio()
        );
    }

    #[test]
    fn solution_inventory_balances_at_the_fixed_point() {
        let sys = solve(true, 200);
        // At steady state the water absorbed equals the water rejected.
        let net = sys.absorber().m_transfer().value + sys.regenerator().m_transfer().value;
        assert!(net.abs() < 1e-4, "net transfer {net} kg/s");
    }

    #[test]
    fn recuperator_lowers_cooling_water_demand() {
        let with = solve(true, 60);
        let without = solve(false, 60);
        assert!(with.recuperator().is_some());
        assert!(without.recuperator().is_none());
        assert!(with.cooler().m_cold().value < without.cooler().m_cold().value);
    }

    #[test]
    fn breakdown_lists_all_seven_consumers() {
        let sys = solve(true, 30);
        assert_eq!(sys.breakdown().entries().len(), 7);
        assert!(sys.breakdown().total().value > 0.0);
        let frac: f64 = ["cooling tower fan", "water pump", "solution tower fan"]
            .iter()
            .filter_map(|l| sys.breakdown().fraction(l))
            .sum();
        assert!(frac < 1.0);
    }

    #[test]
    fn tolerance_strategy_converges() {
        let f = Fluids::reference();
        let inputs = SystemInputs::reference(&f).unwrap();
        let sys = LiquidDesiccantSystem::solve_with(
            &f,
            &inputs,
            true,
            IterationStrategy::Tolerance {
                tol: 1e-6,
                max_iterations: 2000,
            },
        )
        .unwrap();
        assert!(sys.iterations() < 2000);
    }
}
