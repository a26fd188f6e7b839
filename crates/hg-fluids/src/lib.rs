//! hg-fluids: working-fluid property calculations for hygroflow.
//!
//! Provides:
//! - Moist-air psychrometric states (ASHRAE formulations)
//! - Liquid water states (incompressible model)
//! - Hygroscopic desiccant solution states (ionic liquid correlations)
//! - Refrigerant EOS trait and a tabulated R134a provider, plus the
//!   vapor-compression cycle solve built on it
//!
//! # Architecture
//!
//! Each fluid has a provider trait (`MoistAirModel`, `WaterModel`,
//! `RefrigerantEos`) that isolates the rest of hygroflow from the
//! underlying correlations. States are immutable value objects resolved
//! once from a pair of independent inputs; the pair is canonicalized
//! before dispatch so `(T, W)` and `(W, T)` hit the same handler.
//!
//! # Example
//!
//! ```
//! use hg_fluids::{MoistAirInput, MoistAirModel, Psychrometrics};
//! use hg_core::units::{celsius, constants::p_atm};
//!
//! let air = Psychrometrics
//!     .state(
//!         p_atm(),
//!         MoistAirInput::DryBulb(celsius(30.0)),
//!         MoistAirInput::RelativeHumidity(75.0),
//!     )
//!     .unwrap();
//! println!("Humidity ratio: {} kg/kg", air.humidity_ratio());
//! ```

pub mod error;
pub mod moist_air;
pub mod refrigerant;
pub mod solution;
pub mod suite;
pub mod water;

// Re-exports for ergonomics
pub use error::{FluidError, FluidResult};
pub use moist_air::{MoistAirInput, MoistAirInputKind, MoistAirModel, MoistAirState, Psychrometrics};
pub use refrigerant::{CycleSpec, R134aTables, RefrigerantCycle, RefrigerantEos, SatPhase};
pub use solution::{SolutionInput, SolutionInputKind, SolutionKind, SolutionState};
pub use suite::{Fluids, PSYCHROMETRICS, R134A, WATER};
pub use water::{IncompressibleWater, WaterModel, WaterState};
