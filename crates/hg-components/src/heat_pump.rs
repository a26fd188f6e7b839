//! Vapor-compression heat pump coupled to two process streams.

use crate::common::check_mass_flow;
use crate::error::{ComponentError, ComponentResult};
use crate::stream::Stream;
use hg_core::units::{watt, MassRate, Power};
use hg_fluids::{Fluids, RefrigerantCycle};

/// Heat pump lifting heat from an evaporator stream into a condenser
/// stream through a solved refrigerant cycle.
///
/// Duties follow from the cycle state points and the refrigerant flow;
/// compressor work is their difference. Each process outlet is the
/// inlet shifted by its duty over its mass flow, composition unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatPump {
    cycle: RefrigerantCycle,
    m_ref: MassRate,
    inlet_evap: Stream,
    inlet_cond: Stream,
    m_evap: MassRate,
    m_cond: MassRate,
    q_cond: Power,
    q_evap: Power,
    compressor_power: Power,
    cop_heating: f64,
    outlet_evap: Stream,
    outlet_cond: Stream,
}

impl HeatPump {
    pub fn new(
        fluids: &Fluids<'_>,
        cycle: RefrigerantCycle,
        m_ref: MassRate,
        inlet_evap: Stream,
        m_evap: MassRate,
        inlet_cond: Stream,
        m_cond: MassRate,
    ) -> ComponentResult<Self> {
        check_mass_flow(m_ref.value, "refrigerant mass flow")?;
        check_mass_flow(m_evap.value, "evaporator side mass flow")?;
        check_mass_flow(m_cond.value, "condenser side mass flow")?;

        let q_cond = m_ref.value * (cycle.h2() - cycle.h3_actual());
        let q_evap = m_ref.value * (cycle.h1_actual() - cycle.h4());
        let w_comp = q_cond - q_evap;
        if w_comp <= 0.0 {
            return Err(ComponentError::NonPhysical {
                what: "compressor work must be positive",
            });
        }

        let outlet_cond =
            inlet_cond.with_enthalpy(fluids, inlet_cond.enthalpy() + q_cond / m_cond.value)?;
        let outlet_evap =
            inlet_evap.with_enthalpy(fluids, inlet_evap.enthalpy() - q_evap / m_evap.value)?;

        Ok(Self {
            cycle,
            m_ref,
            inlet_evap,
            inlet_cond,
            m_evap,
            m_cond,
            q_cond: watt(q_cond),
            q_evap: watt(q_evap),
            compressor_power: watt(w_comp),
            cop_heating: q_cond / w_comp,
            outlet_evap,
            outlet_cond,
        })
    }

    pub fn cycle(&self) -> &RefrigerantCycle {
        &self.cycle
    }

    pub fn m_ref(&self) -> MassRate {
        self.m_ref
    }

    pub fn inlet_evap(&self) -> &Stream {
        &self.inlet_evap
    }

    pub fn inlet_cond(&self) -> &Stream {
        &self.inlet_cond
    }

    pub fn outlet_evap(&self) -> &Stream {
        &self.outlet_evap
    }

    pub fn outlet_cond(&self) -> &Stream {
        &self.outlet_cond
    }

    /// Condenser duty rejected into the condenser stream.
    pub fn q_cond(&self) -> Power {
        self.q_cond
    }

    /// Evaporator duty drawn from the evaporator stream.
    pub fn q_evap(&self) -> Power {
        self.q_evap
    }

    /// Compressor shaft power.
    pub fn compressor_power(&self) -> Power {
        self.compressor_power
    }

    /// Heating coefficient of performance.
    pub fn cop_heating(&self) -> f64 {
        self.cop_heating
    }
}
