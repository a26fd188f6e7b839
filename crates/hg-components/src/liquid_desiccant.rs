//! Liquid desiccant contactor: absorber and regenerator.

use crate::common::{check_effectiveness, check_mass_flow};
use crate::error::ComponentResult;
use hg_core::units::{kgps, watt, MassRate, Power};
use hg_fluids::{Fluids, MoistAirInput, MoistAirState, SolutionInput, SolutionState};

/// Dry-air specific heat used for the sensible exchange [J/(kg·K)].
const CP_DA: f64 = 1006.0;

/// Adiabatic contactor between moist air and a desiccant solution.
///
/// One model covers both duties: with air wetter than the solution's
/// equilibrium the water transfer is air-to-solution (absorber), with a
/// hot dilute solution it reverses (regenerator). Humidity and
/// temperature both relax toward equilibrium by the contact
/// effectiveness; the latent heat of the transferred water and the
/// sensible exchange move between the streams, so the pair of outlet
/// enthalpies conserves energy exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidDesiccantContactor {
    inlet_air: MoistAirState,
    inlet_solution: SolutionState,
    m_air_in: MassRate,
    m_solution_in: MassRate,
    effectiveness: f64,
    m_air_out: MassRate,
    m_solution_out: MassRate,
    m_transfer: MassRate,
    sensible_heat: Power,
    outlet_air: MoistAirState,
    outlet_solution: SolutionState,
}

impl LiquidDesiccantContactor {
    pub fn new(
        fluids: &Fluids<'_>,
        inlet_air: MoistAirState,
        inlet_solution: SolutionState,
        m_air: MassRate,
        m_solution: MassRate,
        effectiveness: f64,
    ) -> ComponentResult<Self> {
        check_mass_flow(m_air.value, "contactor air mass flow")?;
        check_mass_flow(m_solution.value, "contactor solution mass flow")?;
        check_effectiveness(effectiveness, "contact effectiveness")?;

        let w_in = inlet_air.humidity_ratio();
        let w_eq = inlet_solution.equilibrium_humidity();
        let w_out = w_in - (w_in - w_eq) * effectiveness;

        // Dry-air basis for the water and sensible balances.
        let m_dry_air = m_air.value / (1.0 + w_in);
        let m_transfer = m_dry_air * (w_in - w_out);

        let m_air_out = m_air.value - m_transfer;
        let m_solution_out = m_solution.value + m_transfer;

        // Air relaxes toward the solution temperature by the same
        // effectiveness; the gap it closes is the sensible duty.
        let t_air = inlet_air.temperature().value;
        let t_sol = inlet_solution.temperature().value;
        let t_eq = t_air - (t_air - t_sol) * effectiveness;
        let sensible = m_dry_air * CP_DA * (t_air - t_eq);

        let hfg = fluids.water.latent_heat(inlet_solution.temperature())?;

        let h_air_out = (m_air.value * inlet_air.enthalpy() - m_transfer * hfg - sensible)
            / m_air_out;
        let outlet_air = fluids.moist_air.state(
            inlet_air.pressure(),
            MoistAirInput::Enthalpy(h_air_out),
            MoistAirInput::HumidityRatio(w_out),
        )?;

        let x_out = m_solution.value * inlet_solution.concentration() / m_solution_out;
        let h_sol_out = (m_solution.value * inlet_solution.enthalpy_kj_per_kg() * 1e3
            + m_transfer * hfg
            + sensible)
            / m_solution_out;
        let outlet_solution = SolutionState::new_at(
            inlet_solution.kind(),
            inlet_solution.pressure(),
            SolutionInput::concentration(x_out),
            SolutionInput::enthalpy(h_sol_out / 1e3),
        )?;

        Ok(Self {
            inlet_air,
            inlet_solution,
            m_air_in: m_air,
            m_solution_in: m_solution,
            effectiveness,
            m_air_out: kgps(m_air_out),
            m_solution_out: kgps(m_solution_out),
            m_transfer: kgps(m_transfer),
            sensible_heat: watt(sensible),
            outlet_air,
            outlet_solution,
        })
    }

    pub fn inlet_air(&self) -> &MoistAirState {
        &self.inlet_air
    }

    pub fn inlet_solution(&self) -> &SolutionState {
        &self.inlet_solution
    }

    pub fn outlet_air(&self) -> &MoistAirState {
        &self.outlet_air
    }

    pub fn outlet_solution(&self) -> &SolutionState {
        &self.outlet_solution
    }

    pub fn m_air_in(&self) -> MassRate {
        self.m_air_in
    }

    pub fn m_air_out(&self) -> MassRate {
        self.m_air_out
    }

    pub fn m_solution_in(&self) -> MassRate {
        self.m_solution_in
    }

    pub fn m_solution_out(&self) -> MassRate {
        self.m_solution_out
    }

    /// Water transferred from air to solution; negative when the
    /// contactor regenerates.
    pub fn m_transfer(&self) -> MassRate {
        self.m_transfer
    }

    /// Sensible heat moved from air to solution; negative for a hot
    /// solution warming the air.
    pub fn sensible_heat(&self) -> Power {
        self.sensible_heat
    }

    pub fn effectiveness(&self) -> f64 {
        self.effectiveness
    }
}
