//! Fluid property errors.

use hg_core::HgError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during fluid property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (negative humidity, vapor pressure above
    /// ambient, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Value out of valid correlation or table range.
    #[error("Value out of range for {what}")]
    OutOfRange { what: &'static str },

    /// Invalid argument (duplicate state inputs, bad effectiveness, ...).
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// No derivation path exists for the requested input-key pair.
    #[error("No handler for input pair {what}")]
    NoHandler { what: &'static str },

    /// Operation not supported by this provider.
    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    /// Iterative inversion hit its iteration cap before reaching tolerance.
    #[error("Convergence failed for {what}")]
    ConvergenceFailed { what: &'static str },
}

impl From<FluidError> for HgError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::NonPhysical { what } | FluidError::OutOfRange { what } => {
                HgError::Invariant { what }
            }
            FluidError::InvalidArg { what }
            | FluidError::NoHandler { what }
            | FluidError::NotSupported { what } => HgError::InvalidArg { what },
            FluidError::ConvergenceFailed { what } => HgError::Invariant { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::NonPhysical {
            what: "humidity ratio",
        };
        assert!(err.to_string().contains("humidity ratio"));
    }

    #[test]
    fn error_to_hg_error() {
        let err = FluidError::NoHandler {
            what: "(density, specific heat)",
        };
        let hg: HgError = err.into();
        assert!(matches!(hg, HgError::InvalidArg { .. }));
    }
}
