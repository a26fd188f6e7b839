//! Moist air states and the psychrometric property provider.

use crate::error::{FluidError, FluidResult};
use hg_core::units::{k, kg_per_m3, to_celsius, Density, Pressure, SpecEnthalpy, SpecHeatCapacity,
    Temperature};

/// One independent psychrometric input.
///
/// A moist air state is fully determined by pressure plus any two
/// distinct inputs of this kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoistAirInput {
    /// Dry-bulb temperature.
    DryBulb(Temperature),
    /// Humidity ratio [kg water / kg dry air].
    HumidityRatio(f64),
    /// Specific enthalpy [J/kg moist air].
    Enthalpy(SpecEnthalpy),
    /// Relative humidity [%, 0..100].
    RelativeHumidity(f64),
    /// Wet-bulb temperature.
    WetBulb(Temperature),
}

/// Discriminant of a psychrometric input, used for pair dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MoistAirInputKind {
    DryBulb,
    HumidityRatio,
    Enthalpy,
    RelativeHumidity,
    WetBulb,
}

impl MoistAirInput {
    pub fn kind(&self) -> MoistAirInputKind {
        match self {
            Self::DryBulb(_) => MoistAirInputKind::DryBulb,
            Self::HumidityRatio(_) => MoistAirInputKind::HumidityRatio,
            Self::Enthalpy(_) => MoistAirInputKind::Enthalpy,
            Self::RelativeHumidity(_) => MoistAirInputKind::RelativeHumidity,
            Self::WetBulb(_) => MoistAirInputKind::WetBulb,
        }
    }
}

/// Fully resolved psychrometric state of humid air.
///
/// Value object: every property is derived once at construction by a
/// [`MoistAirModel`] and never mutated afterwards. Re-deriving with
/// different inputs produces a new instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoistAirState {
    pressure: Pressure,
    temperature: Temperature,
    humidity_ratio: f64,
    enthalpy: SpecEnthalpy,
    relative_humidity: f64,
    wet_bulb: Temperature,
    density: Density,
    specific_heat: SpecHeatCapacity,
}

impl MoistAirState {
    /// Absolute pressure.
    pub fn pressure(&self) -> Pressure {
        self.pressure
    }

    /// Dry-bulb temperature.
    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    /// Humidity ratio [kg water / kg dry air].
    pub fn humidity_ratio(&self) -> f64 {
        self.humidity_ratio
    }

    /// Specific enthalpy [J/kg].
    pub fn enthalpy(&self) -> SpecEnthalpy {
        self.enthalpy
    }

    /// Relative humidity [%]. May exceed 100 for supersaturated states
    /// constructed from an (enthalpy, humidity) pair.
    pub fn relative_humidity(&self) -> f64 {
        self.relative_humidity
    }

    /// Wet-bulb temperature.
    pub fn wet_bulb(&self) -> Temperature {
        self.wet_bulb
    }

    /// Density of the moist air mixture [kg/m³].
    pub fn density(&self) -> Density {
        self.density
    }

    /// Specific heat of the mixture [J/(kg·K)].
    pub fn specific_heat(&self) -> SpecHeatCapacity {
        self.specific_heat
    }
}

/// Property provider for moist air.
///
/// Isolates the rest of hygroflow from the psychrometric backend: given
/// pressure plus two independent inputs, return the fully resolved
/// state. Implementations must be deterministic.
pub trait MoistAirModel: Send + Sync {
    /// Provider name (for debugging/logging).
    fn name(&self) -> &str;

    /// Resolve a state from pressure and two independent inputs.
    ///
    /// # Errors
    /// - `InvalidArg` if both inputs are of the same kind
    /// - `NoHandler` if the input pair has no derivation path
    /// - `NonPhysical` if the resolved state is unphysical
    fn state(
        &self,
        pressure: Pressure,
        first: MoistAirInput,
        second: MoistAirInput,
    ) -> FluidResult<MoistAirState>;
}

/// ASHRAE-correlation psychrometric provider.
///
/// Saturation pressure over liquid water from the Hyland–Wexler
/// equation; enthalpy, humidity ratio and wet bulb from the closed-form
/// ASHRAE relations. Valid roughly 0–90 °C dry bulb at near-ambient
/// pressures, which covers every stream in the reference systems.
#[derive(Debug, Default, Clone, Copy)]
pub struct Psychrometrics;

/// Gas constant of dry air [J/(kg·K)].
const R_DA: f64 = 287.042;
/// Ratio of molar masses, water to dry air.
const W_RATIO: f64 = 0.621_945;
/// Dry-air specific heat [J/(kg·K)].
const CP_DA: f64 = 1006.0;
/// Water-vapor specific heat [J/(kg·K)].
const CP_WV: f64 = 1860.0;
/// Latent heat of vaporization at 0 °C [J/kg].
const H_FG_0C: f64 = 2_501_000.0;

impl Psychrometrics {
    /// Saturation pressure of water vapor over liquid [Pa].
    ///
    /// Hyland–Wexler, valid 0–200 °C.
    pub fn saturation_pressure(t: Temperature) -> f64 {
        let t_k = t.value;
        let ln_p = -5800.2206 / t_k + 1.3914993 - 0.048640239 * t_k
            + 4.1764768e-5 * t_k * t_k
            - 1.4452093e-8 * t_k * t_k * t_k
            + 6.5459673 * t_k.ln();
        ln_p.exp()
    }

    fn humidity_from_vapor_pressure(p: f64, p_w: f64) -> FluidResult<f64> {
        if p_w >= p {
            return Err(FluidError::NonPhysical {
                what: "vapor pressure at or above total pressure",
            });
        }
        Ok(W_RATIO * p_w / (p - p_w))
    }

    fn enthalpy(t_c: f64, w: f64) -> f64 {
        CP_DA * t_c + w * (H_FG_0C + CP_WV * t_c)
    }

    fn temperature_from_hw(h: f64, w: f64) -> f64 {
        (h - H_FG_0C * w) / (CP_DA + CP_WV * w)
    }

    fn humidity_from_th(t_c: f64, h: f64) -> f64 {
        (h - CP_DA * t_c) / (H_FG_0C + CP_WV * t_c)
    }

    /// Saturation humidity ratio at temperature `t` and pressure `p`.
    fn saturation_humidity(p: f64, t: Temperature) -> FluidResult<f64> {
        Self::humidity_from_vapor_pressure(p, Self::saturation_pressure(t))
    }

    /// Solve the ASHRAE wet-bulb relation for twb by bisection.
    ///
    /// The relation (kJ basis, temperatures in °C):
    /// w = ((2501 − 2.326·twb)·Ws(twb) − 1.006·(t − twb))
    ///     / (2501 + 1.86·t − 4.186·twb)
    fn wet_bulb(p: f64, t_c: f64, w: f64) -> FluidResult<f64> {
        let ws_at = |twb_c: f64| Self::saturation_humidity(p, k(twb_c + 273.15));

        // Saturated (or supersaturated) air: wet bulb equals dry bulb.
        if w >= ws_at(t_c)? {
            return Ok(t_c);
        }

        let residual = |twb_c: f64| -> FluidResult<f64> {
            let ws = ws_at(twb_c)?;
            let w_calc = ((2501.0 - 2.326 * twb_c) * ws - 1.006 * (t_c - twb_c))
                / (2501.0 + 1.86 * t_c - 4.186 * twb_c);
            Ok(w_calc - w)
        };

        let mut lo = t_c - 60.0;
        let mut hi = t_c;
        if residual(lo)? > 0.0 {
            return Err(FluidError::OutOfRange {
                what: "wet-bulb bracket",
            });
        }
        for _ in 0..100 {
            let mid = 0.5 * (lo + hi);
            if residual(mid)? > 0.0 {
                hi = mid;
            } else {
                lo = mid;
            }
            if hi - lo < 1e-8 {
                break;
            }
        }
        Ok(0.5 * (lo + hi))
    }

    /// Assemble the full state from the core (t, w) pair.
    fn resolve(p: Pressure, t_c: f64, w: f64, h: f64) -> FluidResult<MoistAirState> {
        if w < 0.0 {
            return Err(FluidError::NonPhysical {
                what: "negative humidity ratio",
            });
        }
        let p_pa = p.value;
        let t = k(t_c + 273.15);

        let p_w = p_pa * w / (W_RATIO + w);
        let relative_humidity = 100.0 * p_w / Self::saturation_pressure(t);

        let wet_bulb = k(Self::wet_bulb(p_pa, t_c, w)? + 273.15);

        // Specific volume of the mixture per kg dry air, then per kg moist air.
        let v_da = R_DA * (t_c + 273.15) * (1.0 + 1.607_858 * w) / p_pa;
        let density = kg_per_m3((1.0 + w) / v_da);

        let specific_heat = CP_DA + CP_WV * w;

        Ok(MoistAirState {
            pressure: p,
            temperature: t,
            humidity_ratio: w,
            enthalpy: h,
            relative_humidity,
            wet_bulb,
            density,
            specific_heat,
        })
    }
}

impl MoistAirModel for Psychrometrics {
    fn name(&self) -> &str {
        "ashrae-psychrometrics"
    }

    fn state(
        &self,
        pressure: Pressure,
        first: MoistAirInput,
        second: MoistAirInput,
    ) -> FluidResult<MoistAirState> {
        if first.kind() == second.kind() {
            return Err(FluidError::InvalidArg {
                what: "two psychrometric inputs of the same kind",
            });
        }

        // Canonical order so each unordered pair has one handler.
        let (a, b) = if first.kind() <= second.kind() {
            (first, second)
        } else {
            (second, first)
        };

        use MoistAirInput::*;
        let p = pressure.value;
        let (t_c, w, h) = match (a, b) {
            (DryBulb(t), HumidityRatio(w)) => {
                let t_c = to_celsius(t);
                (t_c, w, Self::enthalpy(t_c, w))
            }
            (DryBulb(t), RelativeHumidity(rh)) => {
                if !(0.0..=100.0).contains(&rh) {
                    return Err(FluidError::OutOfRange {
                        what: "relative humidity input",
                    });
                }
                let t_c = to_celsius(t);
                let p_w = rh / 100.0 * Self::saturation_pressure(t);
                let w = Self::humidity_from_vapor_pressure(p, p_w)?;
                (t_c, w, Self::enthalpy(t_c, w))
            }
            (DryBulb(t), Enthalpy(h)) => {
                let t_c = to_celsius(t);
                (t_c, Self::humidity_from_th(t_c, h), h)
            }
            (HumidityRatio(w), Enthalpy(h)) => (Self::temperature_from_hw(h, w), w, h),
            _ => {
                return Err(FluidError::NoHandler {
                    what: "psychrometric input pair",
                });
            }
        };

        Self::resolve(pressure, t_c, w, h)
    }
}
