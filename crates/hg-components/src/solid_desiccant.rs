//! Desiccant wheel sector model.

use crate::common::{check_finite, check_mass_flow};
use crate::error::{ComponentError, ComponentResult};
use hg_core::units::constants::{M_H2O, R_UNIVERSAL};
use hg_core::units::{MassRate, Mass};
use hg_fluids::{Fluids, MoistAirInput, MoistAirState};

/// Maximum moisture uptake of the adsorbent [kg water / kg adsorbent].
const UPTAKE_CAPACITY: f64 = 0.39;
/// Isotherm exponent.
const ISOTHERM_EXP: f64 = 1.192;
/// Heat of adsorption [kJ/kg water].
const SORPTION_HEAT_KJ_PER_KG: f64 = 1469.0;
/// Isotherm pre-exponential factor.
const ISOTHERM_PREFACTOR: f64 = 1.1178e-4;

/// Surface diffusivity pre-exponential factor [m²/s].
const DIFFUSIVITY_PREFACTOR: f64 = 1.05e-11;
/// Diffusion activation energy [J/mol].
const DIFFUSION_ACTIVATION: f64 = 28_299.0;
/// Adsorbent particle diameter [m].
const PARTICLE_DIAMETER: f64 = 1.5e-6;

/// Enthalpy released into the air per kg of water adsorbed [J/kg].
const AIR_HEATING_PER_KG: f64 = 53.0 * 1e3;

/// Wheel bed packing density [kg/m³].
const BED_DENSITY: f64 = 500.0;
/// Wheel radius [m].
const BED_RADIUS: f64 = 0.4;
/// Wheel depth [m].
const BED_WIDTH: f64 = 0.4;

/// One sector of a rotating desiccant wheel over one coupling step.
///
/// Uptake equilibrium follows an S-shaped isotherm in relative
/// humidity; the transfer rate is surface-diffusion limited and
/// proportional to the distance from equilibrium, so a sector exposed
/// to humid air adsorbs and one exposed to hot regeneration air
/// desorbs. The moisture loading carried between steps is the coupling
/// state of the adsorption/regeneration fixed point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesiccantWheelSector {
    inlet_air: MoistAirState,
    m_air: MassRate,
    previous_loading: f64,
    equilibrium_loading: f64,
    uptake_fraction: f64,
    sorption_rate: f64,
    current_loading: f64,
    outlet_air: MoistAirState,
}

impl DesiccantWheelSector {
    /// Adsorbent mass of one full wheel.
    pub fn bed_mass() -> Mass {
        hg_core::units::kg(BED_DENSITY * BED_RADIUS * BED_RADIUS * std::f64::consts::PI * BED_WIDTH)
    }

    /// Evaluate a sector covering `sector_fraction` of the wheel face.
    ///
    /// `previous_loading` is the moisture carried over from the last
    /// coupling step [kg water / kg adsorbent].
    pub fn new(
        fluids: &Fluids<'_>,
        inlet_air: MoistAirState,
        m_air: MassRate,
        previous_loading: f64,
        sector_fraction: f64,
    ) -> ComponentResult<Self> {
        check_mass_flow(m_air.value, "wheel air mass flow")?;
        check_finite(previous_loading, "wheel moisture loading")?;
        if previous_loading < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "wheel moisture loading cannot be negative",
            });
        }
        if !(sector_fraction > 0.0 && sector_fraction <= 1.0) {
            return Err(ComponentError::InvalidArg {
                what: "sector fraction must be in (0, 1]",
            });
        }

        let t_k = inlet_air.temperature().value;
        let bed_mass = Self::bed_mass().value;

        // Equilibrium uptake from the isotherm at the face conditions.
        let sorption_heat_j_per_mol = SORPTION_HEAT_KJ_PER_KG * 1e3 * M_H2O;
        let k_eq = ISOTHERM_PREFACTOR
            * (ISOTHERM_EXP * sorption_heat_j_per_mol / (R_UNIVERSAL * t_k)).exp();
        let rh = inlet_air.relative_humidity() / 100.0;
        let rh_term = rh.powf(ISOTHERM_EXP);
        let uptake_fraction = k_eq * rh_term / (1.0 + (k_eq - 1.0) * rh_term);
        let equilibrium_loading = UPTAKE_CAPACITY * uptake_fraction;

        // Surface-diffusion limited transfer toward equilibrium.
        let diffusivity = DIFFUSIVITY_PREFACTOR * (-DIFFUSION_ACTIVATION / (R_UNIVERSAL * t_k)).exp();
        let sorption_rate = (60.0 / (PARTICLE_DIAMETER * PARTICLE_DIAMETER))
            * diffusivity
            * (equilibrium_loading - previous_loading)
            * bed_mass
            * sector_fraction;

        let current_loading = previous_loading + sorption_rate / bed_mass;

        // Water leaving the air is capped at what the air carries.
        let w_in = inlet_air.humidity_ratio();
        let w_out = w_in - (sorption_rate / m_air.value).min(w_in);
        let h_out = inlet_air.enthalpy() + sorption_rate * AIR_HEATING_PER_KG / m_air.value;

        let outlet_air = fluids.moist_air.state(
            inlet_air.pressure(),
            MoistAirInput::HumidityRatio(w_out),
            MoistAirInput::Enthalpy(h_out),
        )?;

        Ok(Self {
            inlet_air,
            m_air,
            previous_loading,
            equilibrium_loading,
            uptake_fraction,
            sorption_rate,
            current_loading,
            outlet_air,
        })
    }

    pub fn inlet_air(&self) -> &MoistAirState {
        &self.inlet_air
    }

    pub fn outlet_air(&self) -> &MoistAirState {
        &self.outlet_air
    }

    pub fn m_air(&self) -> MassRate {
        self.m_air
    }

    /// Loading the sector started the step with.
    pub fn previous_loading(&self) -> f64 {
        self.previous_loading
    }

    /// Equilibrium moisture content at the face conditions
    /// [kg water / kg adsorbent].
    pub fn equilibrium_loading(&self) -> f64 {
        self.equilibrium_loading
    }

    /// Fractional coverage of the isotherm, 0..1.
    pub fn uptake_fraction(&self) -> f64 {
        self.uptake_fraction
    }

    /// Water uptake rate [kg/s]; negative while desorbing.
    pub fn sorption_rate(&self) -> f64 {
        self.sorption_rate
    }

    /// Loading after this step [kg water / kg adsorbent].
    pub fn current_loading(&self) -> f64 {
        self.current_loading
    }

    /// Replace the outlet air, e.g. when a recuperator downstream of
    /// the sector defines the delivered state.
    pub fn with_outlet_air(mut self, air: MoistAirState) -> Self {
        self.outlet_air = air;
        self
    }
}
