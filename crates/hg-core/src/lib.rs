//! hg-core: stable foundation for hygroflow.
//!
//! Contains:
//! - units (uom SI types + constructors + physical constants)
//! - numeric (float guards)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{HgError, HgResult};
pub use numeric::*;
pub use units::*;
