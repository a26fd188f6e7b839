//! Steady-state heat recovery plant configurations.
//!
//! Each system wires the component models into one flowsheet around a
//! shared hot water loop and reports an itemized electrical power
//! breakdown:
//!
//! * [`BaselineSystem`]: cooling tower and pump only.
//! * [`LiquidDesiccantSystem`]: absorber/regenerator solution loop.
//! * [`WheelHeatPumpSystem`]: desiccant wheel with heat pump
//!   regeneration.
//! * [`WheelExchangerSystem`]: desiccant wheel regenerated by the hot
//!   water loop directly.
//!
//! The desiccant loops are closed by successive substitution through
//! [`run_fixed_point`]; all components re-solve from the previous
//! pass until the coupling state settles.
//!
//! ```no_run
//! use hg_fluids::Fluids;
//! use hg_systems::{BaselineSystem, SystemInputs};
//!
//! # fn main() -> Result<(), hg_systems::SystemError> {
//! let fluids = Fluids::reference();
//! let inputs = SystemInputs::reference(&fluids)?;
//! let baseline = BaselineSystem::solve(&fluids, &inputs)?;
//! print!("{}", baseline.breakdown().report());
//! # Ok(())
//! # }
//! ```

mod baseline;
mod breakdown;
mod error;
mod inputs;
mod iterate;
mod liquid_desiccant;
mod wheel_exchanger;
mod wheel_heat_pump;

pub use baseline::BaselineSystem;
pub use breakdown::PowerBreakdown;
pub use error::{SystemError, SystemResult};
pub use inputs::SystemInputs;
pub use iterate::{run_fixed_point, FixedPointRun, IterationStrategy};
pub use liquid_desiccant::LiquidDesiccantSystem;
pub use wheel_exchanger::WheelExchangerSystem;
pub use wheel_heat_pump::WheelHeatPumpSystem;
