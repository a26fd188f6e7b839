//! Effectiveness-model sensible heat exchanger.

use crate::common::{check_effectiveness, check_mass_flow};
use crate::error::ComponentResult;
use crate::stream::Stream;
use hg_core::units::{watt, MassRate, Power};
use hg_fluids::Fluids;

/// Default effectiveness for liquid-coupled exchangers.
pub const DEFAULT_EFFECTIVENESS: f64 = 0.80;

/// Counterflow sensible heat exchanger, effectiveness model.
///
/// Duty is ε·C_min·(T_hot − T_cold); each outlet is the inlet shifted
/// by Q over its own capacity rate, composition unchanged. Streams of
/// any kind can sit on either side. A cold side hotter than the hot
/// side yields a negative duty and reversed transfer, which the
/// fixed-point system loops rely on during early iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatExchanger {
    inlet_hot: Stream,
    inlet_cold: Stream,
    m_hot: MassRate,
    m_cold: MassRate,
    effectiveness: f64,
    heat_transfer: Power,
    outlet_hot: Stream,
    outlet_cold: Stream,
}

impl HeatExchanger {
    /// Exchanger at the default 0.80 effectiveness.
    pub fn new(
        fluids: &Fluids<'_>,
        inlet_hot: Stream,
        m_hot: MassRate,
        inlet_cold: Stream,
        m_cold: MassRate,
    ) -> ComponentResult<Self> {
        Self::with_effectiveness(fluids, inlet_hot, m_hot, inlet_cold, m_cold, DEFAULT_EFFECTIVENESS)
    }

    /// Exchanger at an explicit effectiveness in [0, 1].
    pub fn with_effectiveness(
        fluids: &Fluids<'_>,
        inlet_hot: Stream,
        m_hot: MassRate,
        inlet_cold: Stream,
        m_cold: MassRate,
        effectiveness: f64,
    ) -> ComponentResult<Self> {
        check_mass_flow(m_hot.value, "hot side mass flow")?;
        check_mass_flow(m_cold.value, "cold side mass flow")?;
        check_effectiveness(effectiveness, "heat exchanger effectiveness")?;

        let c_hot = m_hot.value * inlet_hot.specific_heat();
        let c_cold = m_cold.value * inlet_cold.specific_heat();
        let c_min = c_hot.min(c_cold);

        let delta_t = inlet_hot.temperature().value - inlet_cold.temperature().value;
        let q = effectiveness * c_min * delta_t;

        let t_hot_out = hg_core::units::k(inlet_hot.temperature().value - q / c_hot);
        let t_cold_out = hg_core::units::k(inlet_cold.temperature().value + q / c_cold);

        let outlet_hot = inlet_hot.with_temperature(fluids, t_hot_out)?;
        let outlet_cold = inlet_cold.with_temperature(fluids, t_cold_out)?;

        Ok(Self {
            inlet_hot,
            inlet_cold,
            m_hot,
            m_cold,
            effectiveness,
            heat_transfer: watt(q),
            outlet_hot,
            outlet_cold,
        })
    }

    pub fn inlet_hot(&self) -> &Stream {
        &self.inlet_hot
    }

    pub fn inlet_cold(&self) -> &Stream {
        &self.inlet_cold
    }

    pub fn outlet_hot(&self) -> &Stream {
        &self.outlet_hot
    }

    pub fn outlet_cold(&self) -> &Stream {
        &self.outlet_cold
    }

    pub fn m_hot(&self) -> MassRate {
        self.m_hot
    }

    pub fn m_cold(&self) -> MassRate {
        self.m_cold
    }

    pub fn effectiveness(&self) -> f64 {
        self.effectiveness
    }

    /// Duty, positive hot-to-cold.
    pub fn heat_transfer(&self) -> Power {
        self.heat_transfer
    }
}
