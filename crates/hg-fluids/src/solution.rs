//! Desiccant solution states.
//!
//! Unlike moist air and water, the ionic-liquid correlations are bespoke
//! numerical code and live in this crate rather than behind an external
//! provider seam: polynomial fits for density, enthalpy and specific
//! heat, an Antoine-type fit for vapor pressure, and a Newton–Raphson
//! inversion for temperature from enthalpy.
//!
//! Correlation-native units are kJ/kg and kJ/(kg·K); callers convert at
//! the stream seam.

use crate::error::{FluidError, FluidResult};
use hg_core::units::{constants::p_atm, kg_per_m3, pa, Density, Pressure, Temperature};

/// Humidity-ratio molar mass ratio used by the equilibrium relation.
const W_RATIO: f64 = 0.62198;

/// Available desiccant solutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionKind {
    /// Ionic liquid desiccant.
    IonicLiquid,
}

impl SolutionKind {
    /// Water vapor partial pressure over the solution [Pa].
    ///
    /// Antoine-type fit: log10(P[mbar]) = A(X) − B(X)/T with cubic
    /// coefficient polynomials in mass fraction.
    pub fn vapor_pressure(self, t_k: f64, x: f64) -> f64 {
        match self {
            Self::IonicLiquid => {
                let a = 12.10 - 28.01 * x + 50.34 * x * x - 24.63 * x * x * x;
                let b = 1212.67 + 772.37 * x + 614.59 * x * x + 493.33 * x * x * x;
                let p_mbar = 10f64.powf(a - b / t_k);
                p_mbar * 100.0
            }
        }
    }

    /// Solution density [kg/m³].
    pub fn density(self, t_k: f64, x: f64) -> f64 {
        match self {
            Self::IonicLiquid => {
                let a0 = 804.28 + 1.585 * t_k - 0.0031 * t_k * t_k;
                let a1 = 1036.04 - 4.42 * t_k + 0.0057 * t_k * t_k;
                let a2 = -403.62 + 1.745 * t_k - 0.0021 * t_k * t_k;
                a0 + a1 * x + a2 * x * x
            }
        }
    }

    /// Specific enthalpy [kJ/kg], zero at T = 0 K by construction of the fit.
    pub fn enthalpy(self, t_k: f64, x: f64) -> f64 {
        match self {
            Self::IonicLiquid => x * (0.00238 * t_k * t_k - 4.01 * t_k) + 4.21 * t_k,
        }
    }

    /// Specific heat [kJ/(kg·K)], the temperature derivative of the
    /// enthalpy fit.
    pub fn specific_heat(self, t_k: f64, x: f64) -> f64 {
        match self {
            Self::IonicLiquid => (0.00476 * t_k - 4.01) * x + 4.21,
        }
    }

    /// Invert the enthalpy fit for temperature [K] at fixed mass fraction.
    ///
    /// Bounded Newton–Raphson with the specific heat as the derivative;
    /// tolerance 1e-6 kJ/kg on the residual, iteration cap 1000. Hitting
    /// the cap is reported as `ConvergenceFailed` rather than silently
    /// returning the last iterate.
    pub fn temperature_from_enthalpy(self, h_kj_per_kg: f64, x: f64) -> FluidResult<f64> {
        const TOL: f64 = 1e-6;
        const MAX_ITER: usize = 1000;

        let mut t_k = 237.15;
        for _ in 0..MAX_ITER {
            let f = self.enthalpy(t_k, x) - h_kj_per_kg;
            if f.abs() < TOL {
                return Ok(t_k);
            }
            t_k -= f / self.specific_heat(t_k, x);
            if !t_k.is_finite() {
                break;
            }
        }
        Err(FluidError::ConvergenceFailed {
            what: "solution temperature from enthalpy",
        })
    }
}

/// Discriminant of a solution state input, used for pair dispatch.
///
/// The ordering defines the canonical form of an unordered input pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SolutionInputKind {
    Concentration,
    Temperature,
    Enthalpy,
    PartialPressure,
    Density,
    SpecificHeat,
}

/// One independent solution state input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolutionInput {
    kind: SolutionInputKind,
    value: f64,
}

impl SolutionInput {
    /// Temperature input.
    pub fn temperature(t: Temperature) -> Self {
        Self {
            kind: SolutionInputKind::Temperature,
            value: t.value,
        }
    }

    /// Mass fraction of desiccant [0..1].
    pub fn concentration(x: f64) -> Self {
        Self {
            kind: SolutionInputKind::Concentration,
            value: x,
        }
    }

    /// Specific enthalpy [kJ/kg].
    pub fn enthalpy(h_kj_per_kg: f64) -> Self {
        Self {
            kind: SolutionInputKind::Enthalpy,
            value: h_kj_per_kg,
        }
    }

    /// Water vapor partial pressure [Pa].
    pub fn partial_pressure(p: Pressure) -> Self {
        Self {
            kind: SolutionInputKind::PartialPressure,
            value: p.value,
        }
    }

    pub fn kind(&self) -> SolutionInputKind {
        self.kind
    }
}

/// Fully resolved desiccant solution state.
///
/// Value object: every property is derived once at construction from
/// two independent inputs (plus ambient pressure) and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolutionState {
    kind: SolutionKind,
    pressure: Pressure,
    temperature: Temperature,
    concentration: f64,
    enthalpy_kj: f64,
    density: Density,
    specific_heat_kj: f64,
    vapor_pressure: Pressure,
    equilibrium_humidity: f64,
}

impl SolutionState {
    /// Resolve a state at standard atmospheric pressure.
    pub fn new(
        kind: SolutionKind,
        first: SolutionInput,
        second: SolutionInput,
    ) -> FluidResult<Self> {
        Self::new_at(kind, p_atm(), first, second)
    }

    /// Resolve a state at an explicit ambient pressure.
    ///
    /// # Errors
    /// - `InvalidArg` for duplicate input kinds
    /// - `NoHandler` for an input pair with no derivation path
    /// - `OutOfRange` for a mass fraction outside [0, 1]
    /// - `NonPhysical` if the vapor pressure reaches ambient pressure
    /// - `ConvergenceFailed` if the enthalpy inversion hits its cap
    pub fn new_at(
        kind: SolutionKind,
        pressure: Pressure,
        first: SolutionInput,
        second: SolutionInput,
    ) -> FluidResult<Self> {
        if first.kind == second.kind {
            return Err(FluidError::InvalidArg {
                what: "two solution inputs of the same kind",
            });
        }

        // Canonical order so each unordered pair has one handler.
        let (a, b) = if first.kind <= second.kind {
            (first, second)
        } else {
            (second, first)
        };

        use SolutionInputKind::*;
        let (t_k, x, h_kj) = match (a.kind, b.kind) {
            (Concentration, Temperature) => {
                let (x, t_k) = (a.value, b.value);
                (t_k, x, kind.enthalpy(t_k, x))
            }
            (Concentration, Enthalpy) => {
                let (x, h) = (a.value, b.value);
                let t_k = kind.temperature_from_enthalpy(h, x)?;
                (t_k, x, h)
            }
            _ => {
                return Err(FluidError::NoHandler {
                    what: "solution input pair",
                });
            }
        };

        if !(0.0..=1.0).contains(&x) {
            return Err(FluidError::OutOfRange {
                what: "solution mass fraction",
            });
        }
        if t_k <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "solution temperature",
            });
        }

        let p_v = kind.vapor_pressure(t_k, x);
        if p_v >= pressure.value {
            return Err(FluidError::NonPhysical {
                what: "solution vapor pressure at or above ambient pressure",
            });
        }
        let equilibrium_humidity = W_RATIO * p_v / (pressure.value - p_v);

        Ok(Self {
            kind,
            pressure,
            temperature: hg_core::units::k(t_k),
            concentration: x,
            enthalpy_kj: h_kj,
            density: kg_per_m3(kind.density(t_k, x)),
            specific_heat_kj: kind.specific_heat(t_k, x),
            vapor_pressure: pa(p_v),
            equilibrium_humidity,
        })
    }

    pub fn kind(&self) -> SolutionKind {
        self.kind
    }

    pub fn pressure(&self) -> Pressure {
        self.pressure
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    /// Desiccant mass fraction [0..1].
    pub fn concentration(&self) -> f64 {
        self.concentration
    }

    /// Specific enthalpy [kJ/kg] (correlation-native unit).
    pub fn enthalpy_kj_per_kg(&self) -> f64 {
        self.enthalpy_kj
    }

    pub fn density(&self) -> Density {
        self.density
    }

    /// Specific heat [kJ/(kg·K)] (correlation-native unit).
    pub fn specific_heat_kj_per_kg_k(&self) -> f64 {
        self.specific_heat_kj
    }

    /// Water vapor partial pressure over the solution.
    pub fn vapor_pressure(&self) -> Pressure {
        self.vapor_pressure
    }

    /// Humidity ratio of air in equilibrium with the solution
    /// [kg water / kg dry air].
    pub fn equilibrium_humidity(&self) -> f64 {
        self.equilibrium_humidity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_core::units::{celsius, to_celsius};
    use proptest::prelude::*;

    const ILD: SolutionKind = SolutionKind::IonicLiquid;

    fn state_tx(t_c: f64, x: f64) -> SolutionState {
        SolutionState::new(
            ILD,
            SolutionInput::temperature(celsius(t_c)),
            SolutionInput::concentration(x),
        )
        .unwrap()
    }

    #[test]
    fn reference_absorber_inlet() {
        // X = 0.8 at 30 °C: the reference absorber feed.
        let s = state_tx(30.0, 0.8);
        assert!((to_celsius(s.temperature()) - 30.0).abs() < 1e-9);
        // Vapor pressure ~1.35 kPa, equilibrium humidity ~0.0084
        assert!((s.vapor_pressure().value - 1350.0).abs() < 50.0);
        assert!((s.equilibrium_humidity() - 0.0084).abs() < 3e-4);
        // Density ~1130 kg/m³, cp ~2.16 kJ/(kg·K)
        assert!((s.density().value - 1132.0).abs() < 10.0);
        assert!((s.specific_heat_kj_per_kg_k() - 2.16).abs() < 0.02);
    }

    #[test]
    fn duplicate_inputs_rejected() {
        let err = SolutionState::new(
            ILD,
            SolutionInput::concentration(0.5),
            SolutionInput::concentration(0.6),
        )
        .unwrap_err();
        assert!(matches!(err, FluidError::InvalidArg { .. }));
    }

    #[test]
    fn unsupported_pair_rejected() {
        let err = SolutionState::new(
            ILD,
            SolutionInput::temperature(celsius(30.0)),
            SolutionInput::partial_pressure(pa(1000.0)),
        )
        .unwrap_err();
        assert!(matches!(err, FluidError::NoHandler { .. }));
    }

    #[test]
    fn swapped_operands_resolve_identically() {
        let a = SolutionState::new(
            ILD,
            SolutionInput::temperature(celsius(35.0)),
            SolutionInput::concentration(0.7),
        )
        .unwrap();
        let b = SolutionState::new(
            ILD,
            SolutionInput::concentration(0.7),
            SolutionInput::temperature(celsius(35.0)),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn mass_fraction_bounds_enforced() {
        let err = SolutionState::new(
            ILD,
            SolutionInput::temperature(celsius(30.0)),
            SolutionInput::concentration(1.2),
        )
        .unwrap_err();
        assert!(matches!(err, FluidError::OutOfRange { .. }));
    }

    #[test]
    fn dilute_hot_solution_is_unphysical() {
        // Nearly pure water at 90 °C: the Antoine fit exceeds ambient
        // pressure, which must fail rather than yield negative humidity.
        let err = SolutionState::new(
            ILD,
            SolutionInput::temperature(celsius(90.0)),
            SolutionInput::concentration(0.0),
        )
        .unwrap_err();
        assert!(matches!(err, FluidError::NonPhysical { .. }));
    }

    proptest! {
        /// H(T,X) followed by T(H,X) recovers the temperature within 1e-4 K.
        #[test]
        fn enthalpy_inversion_round_trip(t_c in 10.0..70.0f64, x in 0.3..0.95f64) {
            let h = ILD.enthalpy(t_c + 273.15, x);
            let t_back = ILD.temperature_from_enthalpy(h, x).unwrap();
            prop_assert!((t_back - (t_c + 273.15)).abs() < 1e-4);
        }

        /// Resolving from (H,X) agrees with resolving from (T,X).
        #[test]
        fn hx_path_matches_tx_path(t_c in 10.0..60.0f64, x in 0.4..0.9f64) {
            let direct = state_tx(t_c, x);
            let via_h = SolutionState::new(
                ILD,
                SolutionInput::enthalpy(direct.enthalpy_kj_per_kg()),
                SolutionInput::concentration(x),
            ).unwrap();
            prop_assert!(
                (via_h.temperature().value - direct.temperature().value).abs() < 1e-4
            );
        }
    }
}
