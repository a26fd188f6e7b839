//! Refrigerant property provider and the vapor-compression cycle solve.

use crate::error::{FluidError, FluidResult};
use hg_core::units::{k, pa, Pressure, SpecEnthalpy, SpecEntropy, Temperature};

/// Saturation phase selector (the EOS "quality" input, Q = 0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatPhase {
    Liquid,
    Vapor,
}

/// Equation-of-state provider for a refrigerant.
///
/// The cycle solve needs saturation properties at the two cycle
/// temperatures, superheated-vapor lookups at (T, P) and (P, s), and
/// subcooled-liquid enthalpy at (T, P).
pub trait RefrigerantEos: Send + Sync {
    /// Fluid name (for debugging/logging).
    fn name(&self) -> &str;

    /// Lower bound of the validity range.
    fn t_min(&self) -> Temperature;

    /// Upper bound of the validity range.
    fn t_max(&self) -> Temperature;

    /// Saturation pressure at `t`.
    fn saturation_pressure(&self, t: Temperature) -> FluidResult<Pressure>;

    /// Saturation temperature at `p`.
    fn saturation_temperature(&self, p: Pressure) -> FluidResult<Temperature>;

    /// Saturated liquid/vapor enthalpy [J/kg] at `t`.
    fn saturation_enthalpy(&self, t: Temperature, phase: SatPhase) -> FluidResult<SpecEnthalpy>;

    /// Saturated liquid/vapor entropy [J/(kg·K)] at `t`.
    fn saturation_entropy(&self, t: Temperature, phase: SatPhase) -> FluidResult<SpecEntropy>;

    /// Single-phase enthalpy [J/kg] at (t, p): superheated vapor for
    /// t above saturation, subcooled liquid below.
    fn enthalpy_tp(&self, t: Temperature, p: Pressure) -> FluidResult<SpecEnthalpy>;

    /// Single-phase entropy [J/(kg·K)] at (t, p).
    fn entropy_tp(&self, t: Temperature, p: Pressure) -> FluidResult<SpecEntropy>;

    /// Superheated-vapor enthalpy [J/kg] at (p, s).
    fn enthalpy_ps(&self, p: Pressure, s: SpecEntropy) -> FluidResult<SpecEnthalpy>;
}

/// One row of a saturation table: kPa and kJ-based, IIR reference state
/// (h_f = 200 kJ/kg, s_f = 1 kJ/(kg·K) at 0 °C).
struct SatRow {
    t_c: f64,
    p_kpa: f64,
    h_f: f64,
    h_g: f64,
    s_f: f64,
    s_g: f64,
}

/// Tabulated R134a saturation properties with a constant-cp
/// superheated-vapor extension.
///
/// Linear interpolation in temperature; the inverse pressure lookup
/// interpolates on ln(P), which is near-linear in 1/T over the table
/// span. Covers −10…80 °C, comfortably containing the reference cycle
/// (evaporator 40 °C, condenser 55 °C).
#[derive(Debug, Default, Clone, Copy)]
pub struct R134aTables;

const R134A_SAT: &[SatRow] = &[
    SatRow { t_c: -10.0, p_kpa: 200.60, h_f: 186.70, h_g: 392.28, s_f: 0.9509, s_g: 1.7319 },
    SatRow { t_c: 0.0, p_kpa: 292.80, h_f: 200.00, h_g: 398.60, s_f: 1.0000, s_g: 1.7271 },
    SatRow { t_c: 10.0, p_kpa: 414.61, h_f: 213.58, h_g: 404.32, s_f: 1.0483, s_g: 1.7221 },
    SatRow { t_c: 20.0, p_kpa: 571.71, h_f: 227.47, h_g: 409.84, s_f: 1.0960, s_g: 1.7183 },
    SatRow { t_c: 30.0, p_kpa: 770.20, h_f: 241.72, h_g: 414.82, s_f: 1.1432, s_g: 1.7145 },
    SatRow { t_c: 40.0, p_kpa: 1016.60, h_f: 256.41, h_g: 419.43, s_f: 1.1903, s_g: 1.7111 },
    SatRow { t_c: 50.0, p_kpa: 1317.90, h_f: 271.59, h_g: 423.44, s_f: 1.2373, s_g: 1.7071 },
    SatRow { t_c: 60.0, p_kpa: 1681.80, h_f: 287.49, h_g: 426.63, s_f: 1.2847, s_g: 1.7015 },
    SatRow { t_c: 70.0, p_kpa: 2116.20, h_f: 304.28, h_g: 428.65, s_f: 1.3332, s_g: 1.6932 },
    SatRow { t_c: 80.0, p_kpa: 2632.40, h_f: 322.39, h_g: 428.81, s_f: 1.3837, s_g: 1.6802 },
];

impl R134aTables {
    fn bracket(t_c: f64) -> FluidResult<(&'static SatRow, &'static SatRow, f64)> {
        let first = &R134A_SAT[0];
        let last = &R134A_SAT[R134A_SAT.len() - 1];
        if t_c < first.t_c || t_c > last.t_c {
            return Err(FluidError::OutOfRange {
                what: "refrigerant saturation temperature",
            });
        }
        for pair in R134A_SAT.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            if t_c <= hi.t_c {
                let frac = (t_c - lo.t_c) / (hi.t_c - lo.t_c);
                return Ok((lo, hi, frac));
            }
        }
        unreachable!("table bracket");
    }

    fn interp(t_c: f64, select: impl Fn(&SatRow) -> f64) -> FluidResult<f64> {
        let (lo, hi, frac) = Self::bracket(t_c)?;
        Ok(select(lo) + frac * (select(hi) - select(lo)))
    }

    /// Saturated-vapor specific heat [J/(kg·K)], linear fit in t.
    fn vapor_cp(t_sat_c: f64) -> f64 {
        900.0 + 7.0 * t_sat_c
    }
}

impl RefrigerantEos for R134aTables {
    fn name(&self) -> &str {
        "R134a-tables"
    }

    fn t_min(&self) -> Temperature {
        k(R134A_SAT[0].t_c + 273.15)
    }

    fn t_max(&self) -> Temperature {
        k(R134A_SAT[R134A_SAT.len() - 1].t_c + 273.15)
    }

    fn saturation_pressure(&self, t: Temperature) -> FluidResult<Pressure> {
        let t_c = t.value - 273.15;
        // Interpolate ln(P) for smoothness across rows.
        let ln_p = Self::interp(t_c, |r| (r.p_kpa * 1e3).ln())?;
        Ok(pa(ln_p.exp()))
    }

    fn saturation_temperature(&self, p: Pressure) -> FluidResult<Temperature> {
        let ln_p = p.value.ln();
        let first = &R134A_SAT[0];
        let last = &R134A_SAT[R134A_SAT.len() - 1];
        if p.value < first.p_kpa * 1e3 || p.value > last.p_kpa * 1e3 {
            return Err(FluidError::OutOfRange {
                what: "refrigerant saturation pressure",
            });
        }
        for pair in R134A_SAT.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            let (ln_lo, ln_hi) = ((lo.p_kpa * 1e3).ln(), (hi.p_kpa * 1e3).ln());
            if ln_p <= ln_hi {
                let frac = (ln_p - ln_lo) / (ln_hi - ln_lo);
                return Ok(k(lo.t_c + frac * (hi.t_c - lo.t_c) + 273.15));
            }
        }
        unreachable!("pressure bracket");
    }

    fn saturation_enthalpy(&self, t: Temperature, phase: SatPhase) -> FluidResult<SpecEnthalpy> {
        let t_c = t.value - 273.15;
        let h_kj = match phase {
            SatPhase::Liquid => Self::interp(t_c, |r| r.h_f)?,
            SatPhase::Vapor => Self::interp(t_c, |r| r.h_g)?,
        };
        Ok(h_kj * 1e3)
    }

    fn saturation_entropy(&self, t: Temperature, phase: SatPhase) -> FluidResult<SpecEntropy> {
        let t_c = t.value - 273.15;
        let s_kj = match phase {
            SatPhase::Liquid => Self::interp(t_c, |r| r.s_f)?,
            SatPhase::Vapor => Self::interp(t_c, |r| r.s_g)?,
        };
        Ok(s_kj * 1e3)
    }

    fn enthalpy_tp(&self, t: Temperature, p: Pressure) -> FluidResult<SpecEnthalpy> {
        let t_sat = self.saturation_temperature(p)?;
        if t.value >= t_sat.value {
            // Superheated vapor: constant-cp extension from the dome.
            let h_g = self.saturation_enthalpy(t_sat, SatPhase::Vapor)?;
            Ok(h_g + Self::vapor_cp(t_sat.value - 273.15) * (t.value - t_sat.value))
        } else {
            // Subcooled liquid: incompressible, pressure effect neglected.
            self.saturation_enthalpy(t, SatPhase::Liquid)
        }
    }

    fn entropy_tp(&self, t: Temperature, p: Pressure) -> FluidResult<SpecEntropy> {
        let t_sat = self.saturation_temperature(p)?;
        if t.value >= t_sat.value {
            let s_g = self.saturation_entropy(t_sat, SatPhase::Vapor)?;
            Ok(s_g + Self::vapor_cp(t_sat.value - 273.15) * (t.value / t_sat.value).ln())
        } else {
            self.saturation_entropy(t, SatPhase::Liquid)
        }
    }

    fn enthalpy_ps(&self, p: Pressure, s: SpecEntropy) -> FluidResult<SpecEnthalpy> {
        let t_sat = self.saturation_temperature(p)?;
        let s_g = self.saturation_entropy(t_sat, SatPhase::Vapor)?;
        if s < s_g {
            return Err(FluidError::OutOfRange {
                what: "entropy below saturated vapor at this pressure",
            });
        }
        let cp = Self::vapor_cp(t_sat.value - 273.15);
        let t = t_sat.value * ((s - s_g) / cp).exp();
        let h_g = self.saturation_enthalpy(t_sat, SatPhase::Vapor)?;
        Ok(h_g + cp * (t - t_sat.value))
    }
}

/// Design parameters of a single-stage vapor-compression cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleSpec {
    /// Evaporation (saturation) temperature.
    pub t_evap: Temperature,
    /// Condensation (saturation) temperature.
    pub t_cond: Temperature,
    /// Superheat at compressor inlet [K]; 0 disables.
    pub superheat: f64,
    /// Subcool at condenser outlet [K]; 0 disables.
    pub subcool: f64,
    /// Compressor isentropic efficiency (0, 1].
    pub isentropic_eff: f64,
}

impl CycleSpec {
    /// The reference configuration: 5 K superheat and subcool, 0.74
    /// isentropic efficiency.
    pub fn with_defaults(t_evap: Temperature, t_cond: Temperature) -> Self {
        Self {
            t_evap,
            t_cond,
            superheat: 5.0,
            subcool: 5.0,
            isentropic_eff: 0.74,
        }
    }
}

/// The four resolved state points of a vapor-compression cycle.
///
/// All points are derived together in one solve: point 2 depends on
/// point 1's entropy, and point 1's superheated enthalpy depends on the
/// evaporator saturation state. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefrigerantCycle {
    spec: CycleSpec,
    p_evap: Pressure,
    p_cond: Pressure,
    h1: SpecEnthalpy,
    h1_superheat: Option<SpecEnthalpy>,
    s1: SpecEntropy,
    h2s: SpecEnthalpy,
    h2: SpecEnthalpy,
    h3: SpecEnthalpy,
    h3_subcool: Option<SpecEnthalpy>,
    h4: SpecEnthalpy,
}

impl RefrigerantCycle {
    /// Solve the cycle state points against an EOS provider.
    pub fn solve(eos: &dyn RefrigerantEos, spec: CycleSpec) -> FluidResult<Self> {
        if spec.superheat < 0.0 || spec.subcool < 0.0 {
            return Err(FluidError::InvalidArg {
                what: "negative superheat or subcool",
            });
        }
        if !(spec.isentropic_eff > 0.0 && spec.isentropic_eff <= 1.0) {
            return Err(FluidError::InvalidArg {
                what: "isentropic efficiency outside (0, 1]",
            });
        }

        let p_evap = eos.saturation_pressure(spec.t_evap)?;
        let p_cond = eos.saturation_pressure(spec.t_cond)?;

        // Point 1: saturated vapor, optionally superheated.
        let h1 = eos.saturation_enthalpy(spec.t_evap, SatPhase::Vapor)?;
        let t1 = k(spec.t_evap.value + spec.superheat);
        let (h1_superheat, s1) = if spec.superheat > 0.0 {
            (
                Some(eos.enthalpy_tp(t1, p_evap)?),
                eos.entropy_tp(t1, p_evap)?,
            )
        } else {
            (None, eos.saturation_entropy(spec.t_evap, SatPhase::Vapor)?)
        };

        // Point 2: isentropic discharge corrected by the compressor
        // efficiency. The correction keeps the saturated h1 in the
        // isentropic difference, matching the reference cycle.
        let h2s = eos.enthalpy_ps(p_cond, s1)?;
        let h1_actual = h1_superheat.unwrap_or(h1);
        let h2 = h1_actual + (h2s - h1) / spec.isentropic_eff;

        // Point 3: saturated liquid, optionally subcooled.
        let h3 = eos.saturation_enthalpy(spec.t_cond, SatPhase::Liquid)?;
        let h3_subcool = if spec.subcool > 0.0 {
            Some(eos.enthalpy_tp(k(spec.t_cond.value - spec.subcool), p_cond)?)
        } else {
            None
        };

        // Point 4: isenthalpic expansion.
        let h4 = h3_subcool.unwrap_or(h3);

        Ok(Self {
            spec,
            p_evap,
            p_cond,
            h1,
            h1_superheat,
            s1,
            h2s,
            h2,
            h3,
            h3_subcool,
            h4,
        })
    }

    pub fn spec(&self) -> &CycleSpec {
        &self.spec
    }

    pub fn p_evap(&self) -> Pressure {
        self.p_evap
    }

    pub fn p_cond(&self) -> Pressure {
        self.p_cond
    }

    /// Saturated-vapor enthalpy at the evaporator exit [J/kg].
    pub fn h1(&self) -> SpecEnthalpy {
        self.h1
    }

    /// Superheated compressor-inlet enthalpy, if superheat is configured.
    pub fn h1_superheat(&self) -> Option<SpecEnthalpy> {
        self.h1_superheat
    }

    /// Effective compressor-inlet enthalpy [J/kg].
    pub fn h1_actual(&self) -> SpecEnthalpy {
        self.h1_superheat.unwrap_or(self.h1)
    }

    /// Compressor-inlet entropy [J/(kg·K)].
    pub fn s1(&self) -> SpecEntropy {
        self.s1
    }

    /// Isentropic discharge enthalpy [J/kg].
    pub fn h2s(&self) -> SpecEnthalpy {
        self.h2s
    }

    /// Actual discharge enthalpy [J/kg].
    pub fn h2(&self) -> SpecEnthalpy {
        self.h2
    }

    /// Saturated-liquid condenser-outlet enthalpy [J/kg].
    pub fn h3(&self) -> SpecEnthalpy {
        self.h3
    }

    /// Subcooled condenser-outlet enthalpy, if subcool is configured.
    pub fn h3_subcool(&self) -> Option<SpecEnthalpy> {
        self.h3_subcool
    }

    /// Effective condenser-outlet enthalpy [J/kg].
    pub fn h3_actual(&self) -> SpecEnthalpy {
        self.h3_subcool.unwrap_or(self.h3)
    }

    /// Expansion-valve outlet enthalpy [J/kg] (equals `h3_actual`).
    pub fn h4(&self) -> SpecEnthalpy {
        self.h4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_core::units::celsius;

    fn reference_cycle() -> RefrigerantCycle {
        RefrigerantCycle::solve(
            &R134aTables,
            CycleSpec::with_defaults(celsius(40.0), celsius(55.0)),
        )
        .unwrap()
    }

    #[test]
    fn saturation_pressure_table_points() {
        let p40 = R134aTables.saturation_pressure(celsius(40.0)).unwrap();
        assert!((p40.value - 1_016_600.0).abs() < 1.0);
        let p55 = R134aTables.saturation_pressure(celsius(55.0)).unwrap();
        // Between the 50 and 60 °C rows.
        assert!(p55.value > 1_317_900.0 && p55.value < 1_681_800.0);
    }

    #[test]
    fn saturation_temperature_inverts_pressure() {
        for t_c in [-5.0, 12.0, 37.0, 55.0, 71.0] {
            let p = R134aTables.saturation_pressure(celsius(t_c)).unwrap();
            let t = R134aTables.saturation_temperature(p).unwrap();
            assert!(
                (t.value - (t_c + 273.15)).abs() < 0.05,
                "t_c = {t_c}, got {}",
                t.value - 273.15
            );
        }
    }

    #[test]
    fn reference_cycle_points_ordered() {
        let cyc = reference_cycle();
        assert!(cyc.p_cond() > cyc.p_evap());
        // Superheat raises the inlet enthalpy.
        assert!(cyc.h1_actual() > cyc.h1());
        // Real compression costs more than isentropic.
        assert!(cyc.h2() > cyc.h2s());
        assert!(cyc.h2s() > cyc.h1_actual());
        // Subcool lowers the condenser outlet.
        assert!(cyc.h3_actual() < cyc.h3());
        // Isenthalpic throttle.
        assert_eq!(cyc.h4(), cyc.h3_actual());
    }

    #[test]
    fn reference_cycle_energetics_plausible() {
        let cyc = reference_cycle();
        let q_cond = cyc.h2() - cyc.h3_actual();
        let q_evap = cyc.h1_actual() - cyc.h4();
        let w = q_cond - q_evap;
        assert!(w > 0.0);
        let cop_h = q_cond / w;
        // Small lift at 0.74 isentropic efficiency: heating COP well
        // above 1 but finite.
        assert!(cop_h > 3.0 && cop_h < 20.0, "cop_h = {cop_h}");
    }

    #[test]
    fn no_superheat_uses_saturated_inlet() {
        let cyc = RefrigerantCycle::solve(
            &R134aTables,
            CycleSpec {
                t_evap: celsius(40.0),
                t_cond: celsius(55.0),
                superheat: 0.0,
                subcool: 0.0,
                isentropic_eff: 0.74,
            },
        )
        .unwrap();
        assert!(cyc.h1_superheat().is_none());
        assert!(cyc.h3_subcool().is_none());
        assert_eq!(cyc.h1_actual(), cyc.h1());
        assert_eq!(cyc.h4(), cyc.h3());
    }

    #[test]
    fn out_of_range_temperature_rejected() {
        let err = RefrigerantCycle::solve(
            &R134aTables,
            CycleSpec::with_defaults(celsius(-40.0), celsius(55.0)),
        )
        .unwrap_err();
        assert!(matches!(err, FluidError::OutOfRange { .. }));
    }

    #[test]
    fn bad_efficiency_rejected() {
        let mut spec = CycleSpec::with_defaults(celsius(40.0), celsius(55.0));
        spec.isentropic_eff = 0.0;
        let err = RefrigerantCycle::solve(&R134aTables, spec).unwrap_err();
        assert!(matches!(err, FluidError::InvalidArg { .. }));
    }
}
