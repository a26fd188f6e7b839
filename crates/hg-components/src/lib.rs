//! hg-components: equipment library for heat-recovery dehumidification
//! systems.
//!
//! Provides models for the process equipment the systems are wired
//! from:
//! - Evaporative cooling towers
//! - Liquid desiccant contactors (absorber and regenerator duty)
//! - Desiccant wheel sectors (adsorption and regeneration duty)
//! - Effectiveness heat exchangers over any pair of streams
//! - Vapor-compression heat pumps
//! - Fans and circulation pumps
//!
//! Every component is solved once at construction from its inlet
//! streams and parameters and is immutable afterwards; outlet states
//! and power draws are plain accessors. System loops re-construct
//! components each fixed-point iteration instead of mutating them.
//!
//! # Example
//!
//! ```
//! use hg_components::{AirSide, CoolingTower};
//! use hg_core::units::{celsius, constants::p_atm, kgps};
//! use hg_fluids::{Fluids, MoistAirInput};
//!
//! let fluids = Fluids::reference();
//! let ambient = fluids
//!     .moist_air
//!     .state(
//!         p_atm(),
//!         MoistAirInput::DryBulb(celsius(30.0)),
//!         MoistAirInput::RelativeHumidity(75.0),
//!     )
//!     .unwrap();
//!
//! let tower = CoolingTower::new(
//!     &fluids,
//!     ambient,
//!     celsius(55.0),
//!     kgps(1.1),
//!     AirSide::FlowRatio(1.1),
//!     Some(celsius(30.0)),
//! )
//! .unwrap();
//! println!("Fan power: {} W", tower.work().value);
//! ```

pub mod common;
pub mod cooling_tower;
pub mod error;
pub mod fan;
pub mod heat_exchanger;
pub mod heat_pump;
pub mod liquid_desiccant;
pub mod pump;
pub mod solid_desiccant;
pub mod stream;

// Re-exports
pub use cooling_tower::{AirSide, CoolingTower, DEFAULT_PRESSURE_RISE};
pub use error::{ComponentError, ComponentResult};
pub use fan::Fan;
pub use heat_exchanger::{HeatExchanger, DEFAULT_EFFECTIVENESS};
pub use heat_pump::HeatPump;
pub use liquid_desiccant::LiquidDesiccantContactor;
pub use pump::CirculationPump;
pub use solid_desiccant::DesiccantWheelSector;
pub use stream::Stream;
