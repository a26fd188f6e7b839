//! Floating point guards shared by the fluid and component crates.

use crate::HgError;

/// Reject NaN and infinities before they propagate into a property
/// resolve or an iteration residual.
pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, HgError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HgError::NonFinite { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_values_pass_through() {
        assert_eq!(ensure_finite(1.5, "humidity ratio").unwrap(), 1.5);
        assert_eq!(ensure_finite(-273.15, "temperature").unwrap(), -273.15);
    }

    #[test]
    fn nan_and_infinity_rejected() {
        assert!(matches!(
            ensure_finite(f64::NAN, "enthalpy").unwrap_err(),
            HgError::NonFinite { .. }
        ));
        assert!(ensure_finite(f64::INFINITY, "mass flow").is_err());
        assert!(ensure_finite(f64::NEG_INFINITY, "mass flow").is_err());
    }
}
