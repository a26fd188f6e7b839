//! End-to-end runs of every plant configuration under the reference
//! boundary conditions.

use hg_core::units::to_celsius;
use hg_fluids::Fluids;
use hg_systems::{
    BaselineSystem, IterationStrategy, LiquidDesiccantSystem, SystemInputs, WheelExchangerSystem,
    WheelHeatPumpSystem,
};

fn setup() -> (Fluids<'static>, SystemInputs) {
    let fluids = Fluids::reference();
    let inputs = SystemInputs::reference(&fluids).unwrap();
    (fluids, inputs)
}

/// Surface the iteration-layer trace output when a test runs alone.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[test]
fn baseline_reference_run() {
    let (fluids, inputs) = setup();
    let sys = BaselineSystem::solve(&fluids, &inputs).unwrap();

    // 55 -> 30 °C across the tower, 26.2 °C ambient wet bulb.
    assert!((to_celsius(sys.tower().outlet_water().temperature()) - 30.0).abs() < 1e-9);
    assert!(sys.tower().m_evap().value > 0.0);
    assert!(sys.tower().cop() > 1.0);
    assert_eq!(sys.breakdown().entries().len(), 2);
}

#[test]
fn liquid_desiccant_reference_run() {
    let (fluids, inputs) = setup();
    let sys = LiquidDesiccantSystem::solve(&fluids, &inputs, true).unwrap();

    // The absorber dries the process air and the regenerator rejects
    // the same water back out at the fixed point.
    assert!(sys.dehumidification_rate().value > 0.0);
    let net = sys.absorber().m_transfer().value + sys.regenerator().m_transfer().value;
    assert!(net.abs() < 1e-6, "net water transfer {net} kg/s");

    // Concentration window stays physical through the loop.
    let x_abs = sys.absorber().outlet_solution().concentration();
    let x_reg = sys.regenerator().outlet_solution().concentration();
    assert!(x_abs > 0.0 && x_abs < 1.0);
    assert!(x_reg > x_abs, "regenerator must re-concentrate");

    // Main tower still closes the water loop on its 30 °C target.
    assert!((to_celsius(sys.tower().outlet_water().temperature()) - 30.0).abs() < 1e-9);
    assert_eq!(sys.breakdown().entries().len(), 7);
}

#[test]
fn liquid_desiccant_recuperator_reduces_cooler_duty() {
    let (fluids, inputs) = setup();
    let with = LiquidDesiccantSystem::solve_with(
        &fluids,
        &inputs,
        true,
        IterationStrategy::FixedCount(300),
    )
    .unwrap();
    let without = LiquidDesiccantSystem::solve_with(
        &fluids,
        &inputs,
        false,
        IterationStrategy::FixedCount(300),
    )
    .unwrap();

    // Solution-to-solution recovery leaves less heat for the cooling
    // water to carry away.
    assert!(with.cooler().heat_transfer().value < without.cooler().heat_transfer().value);
}

#[test]
fn wheel_heat_pump_reference_run() {
    let (fluids, inputs) = setup();
    let sys = WheelHeatPumpSystem::solve(&fluids, &inputs, true).unwrap();

    assert!(sys.recuperator().is_some());
    assert!(
        sys.adsorption().outlet_air().humidity_ratio()
            < sys.adsorption().inlet_air().humidity_ratio()
    );

    // Heat pump first law and a heating COP above 1.
    let hp = sys.heat_pump();
    let residual = hp.q_cond().value - hp.q_evap().value - hp.compressor_power().value;
    assert!(residual.abs() < 1e-6);
    assert!(hp.cop_heating() > 1.0);

    // Evaporator extraction lowers the tower's water inlet below the
    // 55 °C loop supply.
    assert!(to_celsius(sys.tower().inlet_water().temperature()) < 55.0);
    assert!((to_celsius(sys.tower().outlet_water().temperature()) - 30.0).abs() < 1e-9);
    assert_eq!(sys.breakdown().entries().len(), 5);
}

#[test]
fn wheel_exchanger_reference_run() {
    let (fluids, inputs) = setup();
    let sys = WheelExchangerSystem::solve(&fluids, &inputs, true).unwrap();

    assert!(sys.recuperator().is_some());
    assert!(
        sys.adsorption().outlet_air().humidity_ratio()
            < sys.adsorption().inlet_air().humidity_ratio()
    );

    // Heater pulls the loop water down before the tower.
    assert!(to_celsius(sys.heater().outlet_hot().temperature()) < 55.0);
    assert!((to_celsius(sys.tower().outlet_water().temperature()) - 30.0).abs() < 1e-9);
    assert_eq!(sys.breakdown().entries().len(), 4);
}

#[test]
fn desiccant_systems_draw_more_than_the_baseline() {
    let (fluids, inputs) = setup();
    let baseline = BaselineSystem::solve(&fluids, &inputs).unwrap().breakdown().total();
    let ld = LiquidDesiccantSystem::solve_with(
        &fluids,
        &inputs,
        false,
        IterationStrategy::FixedCount(200),
    )
    .unwrap()
    .breakdown()
    .total();
    let wx = WheelExchangerSystem::solve_with(
        &fluids,
        &inputs,
        false,
        IterationStrategy::FixedCount(200),
    )
    .unwrap()
    .breakdown()
    .total();

    // Extra fans and pumps always cost over the bare tower loop.
    assert!(ld > baseline);
    assert!(wx > baseline);
}

#[test]
fn liquid_desiccant_outlets_stable_past_the_pass_budget() {
    init_tracing();
    let (fluids, inputs) = setup();
    let solve = |passes: usize| {
        LiquidDesiccantSystem::solve_with(
            &fluids,
            &inputs,
            true,
            IterationStrategy::FixedCount(passes),
        )
        .unwrap()
    };
    let base = solve(1000);
    let long = solve(2000);

    // Doubling the budget must not move the converged loop.
    let d_abs = (base.absorber().outlet_solution().temperature().value
        - long.absorber().outlet_solution().temperature().value)
        .abs();
    let d_reg = (base.regenerator().outlet_solution().temperature().value
        - long.regenerator().outlet_solution().temperature().value)
        .abs();
    assert!(d_abs < 1e-3, "absorber outlet drifted {d_abs} K");
    assert!(d_reg < 1e-3, "regenerator outlet drifted {d_reg} K");
}

#[test]
fn wheel_exchanger_outlets_stable_past_the_pass_budget() {
    init_tracing();
    let (fluids, inputs) = setup();
    let solve = |passes: usize| {
        WheelExchangerSystem::solve_with(
            &fluids,
            &inputs,
            true,
            IterationStrategy::FixedCount(passes),
        )
        .unwrap()
    };
    // The bed mass gives the wheel coupling a time constant of a few
    // hundred passes, so budget well past the 2000-pass default.
    let base = solve(4000);
    let long = solve(8000);

    let d_ads = (base.adsorption().outlet_air().temperature().value
        - long.adsorption().outlet_air().temperature().value)
        .abs();
    let d_reg = (base.regeneration().outlet_air().temperature().value
        - long.regeneration().outlet_air().temperature().value)
        .abs();
    assert!(d_ads < 1e-3, "adsorption outlet drifted {d_ads} K");
    assert!(d_reg < 1e-3, "regeneration outlet drifted {d_reg} K");
}

#[test]
fn tolerance_and_fixed_count_agree() {
    init_tracing();
    let (fluids, inputs) = setup();
    let fixed = LiquidDesiccantSystem::solve_with(
        &fluids,
        &inputs,
        false,
        IterationStrategy::FixedCount(1000),
    )
    .unwrap();
    let tol = LiquidDesiccantSystem::solve_with(
        &fluids,
        &inputs,
        false,
        IterationStrategy::Tolerance {
            tol: 1e-9,
            max_iterations: 2000,
        },
    )
    .unwrap();

    let d = (fixed.dehumidification_rate().value - tol.dehumidification_rate().value).abs();
    assert!(d < 1e-6, "strategies disagree by {d} kg/s");
    assert!(tol.iterations() <= 2000);
}
