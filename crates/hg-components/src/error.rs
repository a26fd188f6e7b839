//! Error types for component operations.

use hg_core::error::HgError;
use hg_fluids::FluidError;
use thiserror::Error;

/// Errors that can occur during component calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Expected a {expected} stream")]
    StreamMismatch { expected: &'static str },

    #[error(transparent)]
    Fluid(#[from] FluidError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for HgError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::NonPhysical { what } => HgError::Invariant { what },
            ComponentError::InvalidArg { what } => HgError::InvalidArg { what },
            ComponentError::StreamMismatch { expected } => HgError::InvalidArg { what: expected },
            ComponentError::Fluid(f) => f.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComponentError::NonPhysical { what: "density" };
        assert!(err.to_string().contains("density"));
    }

    #[test]
    fn fluid_error_wraps_transparently() {
        let err: ComponentError = FluidError::OutOfRange { what: "test" }.into();
        assert!(err.to_string().contains("test"));
    }

    #[test]
    fn error_conversion() {
        let comp_err = ComponentError::InvalidArg { what: "test" };
        let hg_err: HgError = comp_err.into();
        assert!(matches!(hg_err, HgError::InvalidArg { .. }));
    }
}
