//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use hg_core::numeric::ensure_finite;

/// Small epsilon for mass flow rate (kg/s)
pub const EPSILON_MDOT: f64 = 1e-9;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}

/// Ensure a mass flow rate is positive and finite.
pub fn check_mass_flow(value: f64, what: &'static str) -> ComponentResult<()> {
    check_finite(value, what)?;
    if value <= EPSILON_MDOT {
        return Err(ComponentError::InvalidArg { what });
    }
    Ok(())
}

/// Ensure an effectiveness lies in [0, 1].
pub fn check_effectiveness(value: f64, what: &'static str) -> ComponentResult<()> {
    check_finite(value, what)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ComponentError::InvalidArg { what });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }

    #[test]
    fn test_check_mass_flow() {
        assert!(check_mass_flow(1.0, "test").is_ok());
        assert!(check_mass_flow(0.0, "test").is_err());
        assert!(check_mass_flow(-2.0, "test").is_err());
    }

    #[test]
    fn test_check_effectiveness() {
        assert!(check_effectiveness(0.64, "test").is_ok());
        assert!(check_effectiveness(1.2, "test").is_err());
        assert!(check_effectiveness(-0.1, "test").is_err());
    }
}
