//! Process streams flowing between components.

use crate::error::{ComponentError, ComponentResult};
use hg_fluids::{
    Fluids, MoistAirInput, MoistAirState, SolutionInput, SolutionState, WaterState,
};
use hg_core::units::{Pressure, SpecEnthalpy, SpecHeatCapacity, Temperature};

/// A working-fluid stream at one point in a system.
///
/// Components that accept any stream kind (heat exchangers, heat pump
/// coils) dispatch on this enum; the outlet they produce is always the
/// same kind as the inlet. The humidity ratio of an air stream and the
/// concentration of a solution stream are carried through unchanged by
/// sensible-only equipment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stream {
    Air(MoistAirState),
    Water(WaterState),
    Solution(SolutionState),
}

impl Stream {
    pub fn pressure(&self) -> Pressure {
        match self {
            Self::Air(a) => a.pressure(),
            Self::Water(w) => w.pressure(),
            Self::Solution(s) => s.pressure(),
        }
    }

    pub fn temperature(&self) -> Temperature {
        match self {
            Self::Air(a) => a.temperature(),
            Self::Water(w) => w.temperature(),
            Self::Solution(s) => s.temperature(),
        }
    }

    /// Specific enthalpy [J/kg].
    pub fn enthalpy(&self) -> SpecEnthalpy {
        match self {
            Self::Air(a) => a.enthalpy(),
            Self::Water(w) => w.enthalpy(),
            Self::Solution(s) => s.enthalpy_kj_per_kg() * 1e3,
        }
    }

    /// Specific heat [J/(kg·K)].
    pub fn specific_heat(&self) -> SpecHeatCapacity {
        match self {
            Self::Air(a) => a.specific_heat(),
            Self::Water(w) => w.specific_heat(),
            Self::Solution(s) => s.specific_heat_kj_per_kg_k() * 1e3,
        }
    }

    /// Rebuild the stream at a new temperature, holding its composition
    /// fixed: humidity ratio for air, concentration for solution.
    pub fn with_temperature(&self, fluids: &Fluids<'_>, t: Temperature) -> ComponentResult<Self> {
        Ok(match self {
            Self::Air(a) => Self::Air(fluids.moist_air.state(
                a.pressure(),
                MoistAirInput::DryBulb(t),
                MoistAirInput::HumidityRatio(a.humidity_ratio()),
            )?),
            Self::Water(w) => Self::Water(fluids.water.state_pt(w.pressure(), t)?),
            Self::Solution(s) => Self::Solution(SolutionState::new_at(
                s.kind(),
                s.pressure(),
                SolutionInput::temperature(t),
                SolutionInput::concentration(s.concentration()),
            )?),
        })
    }

    /// Rebuild the stream at a new specific enthalpy [J/kg], holding
    /// its composition fixed.
    pub fn with_enthalpy(&self, fluids: &Fluids<'_>, h: SpecEnthalpy) -> ComponentResult<Self> {
        Ok(match self {
            Self::Air(a) => Self::Air(fluids.moist_air.state(
                a.pressure(),
                MoistAirInput::Enthalpy(h),
                MoistAirInput::HumidityRatio(a.humidity_ratio()),
            )?),
            Self::Water(w) => Self::Water(fluids.water.state_ph(w.pressure(), h)?),
            Self::Solution(s) => Self::Solution(SolutionState::new_at(
                s.kind(),
                s.pressure(),
                SolutionInput::enthalpy(h / 1e3),
                SolutionInput::concentration(s.concentration()),
            )?),
        })
    }

    pub fn as_air(&self) -> Option<&MoistAirState> {
        match self {
            Self::Air(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_water(&self) -> Option<&WaterState> {
        match self {
            Self::Water(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_solution(&self) -> Option<&SolutionState> {
        match self {
            Self::Solution(s) => Some(s),
            _ => None,
        }
    }

    /// The air state, or a mismatch error.
    pub fn air(&self) -> ComponentResult<&MoistAirState> {
        self.as_air()
            .ok_or(ComponentError::StreamMismatch { expected: "moist air" })
    }

    /// The water state, or a mismatch error.
    pub fn water(&self) -> ComponentResult<&WaterState> {
        self.as_water()
            .ok_or(ComponentError::StreamMismatch { expected: "water" })
    }

    /// The solution state, or a mismatch error.
    pub fn solution(&self) -> ComponentResult<&SolutionState> {
        self.as_solution()
            .ok_or(ComponentError::StreamMismatch { expected: "solution" })
    }
}

impl From<MoistAirState> for Stream {
    fn from(state: MoistAirState) -> Self {
        Self::Air(state)
    }
}

impl From<WaterState> for Stream {
    fn from(state: WaterState) -> Self {
        Self::Water(state)
    }
}

impl From<SolutionState> for Stream {
    fn from(state: SolutionState) -> Self {
        Self::Solution(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_core::units::{celsius, constants::p_atm, to_celsius};
    use hg_fluids::SolutionKind;

    fn fluids() -> Fluids<'static> {
        Fluids::reference()
    }

    fn air(t_c: f64, rh: f64) -> Stream {
        Stream::Air(
            fluids()
                .moist_air
                .state(
                    p_atm(),
                    MoistAirInput::DryBulb(celsius(t_c)),
                    MoistAirInput::RelativeHumidity(rh),
                )
                .unwrap(),
        )
    }

    fn solution(t_c: f64, x: f64) -> Stream {
        Stream::Solution(
            SolutionState::new(
                SolutionKind::IonicLiquid,
                SolutionInput::temperature(celsius(t_c)),
                SolutionInput::concentration(x),
            )
            .unwrap(),
        )
    }

    #[test]
    fn with_temperature_keeps_composition() {
        let f = fluids();
        let a = air(30.0, 75.0);
        let w_in = a.as_air().unwrap().humidity_ratio();
        let cooled = a.with_temperature(&f, celsius(24.0)).unwrap();
        assert!((to_celsius(cooled.temperature()) - 24.0).abs() < 1e-9);
        assert!((cooled.as_air().unwrap().humidity_ratio() - w_in).abs() < 1e-12);

        let s = solution(30.0, 0.8);
        let heated = s.with_temperature(&f, celsius(50.0)).unwrap();
        assert!((heated.as_solution().unwrap().concentration() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn with_enthalpy_round_trips_temperature() {
        let f = fluids();
        for stream in [
            air(35.0, 50.0),
            Stream::Water(f.water.state_pt(p_atm(), celsius(55.0)).unwrap()),
            solution(40.0, 0.7),
        ] {
            let back = stream.with_enthalpy(&f, stream.enthalpy()).unwrap();
            assert!(
                (back.temperature().value - stream.temperature().value).abs() < 1e-4,
                "{stream:?}"
            );
        }
    }

    #[test]
    fn typed_access_mismatch() {
        let a = air(30.0, 50.0);
        assert!(a.air().is_ok());
        assert!(matches!(
            a.water().unwrap_err(),
            ComponentError::StreamMismatch { .. }
        ));
    }
}
