//! Error types for system-level solving.

use hg_components::ComponentError;
use hg_core::error::HgError;
use hg_fluids::FluidError;
use thiserror::Error;

/// Errors that can occur while assembling or iterating a system.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SystemError {
    #[error("Invalid configuration: {what}")]
    InvalidConfig { what: &'static str },

    #[error("Fixed point did not converge within {iterations} iterations: {what}")]
    NotConverged {
        what: &'static str,
        iterations: usize,
    },

    #[error("Fixed point diverged at iteration {iteration}: {what}")]
    Diverged {
        what: &'static str,
        iteration: usize,
    },

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),
}

pub type SystemResult<T> = Result<T, SystemError>;

impl From<SystemError> for HgError {
    fn from(e: SystemError) -> Self {
        match e {
            SystemError::InvalidConfig { what } => HgError::InvalidArg { what },
            SystemError::NotConverged { what, .. } => HgError::Invariant { what },
            SystemError::Diverged { what, .. } => HgError::Invariant { what },
            SystemError::Component(c) => c.into(),
            SystemError::Fluid(f) => f.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SystemError::NotConverged {
            what: "solution loop",
            iterations: 1000,
        };
        assert!(err.to_string().contains("1000"));
        assert!(err.to_string().contains("solution loop"));
    }

    #[test]
    fn error_conversion() {
        let err = SystemError::InvalidConfig { what: "test" };
        let hg: HgError = err.into();
        assert!(matches!(hg, HgError::InvalidArg { .. }));
    }
}
