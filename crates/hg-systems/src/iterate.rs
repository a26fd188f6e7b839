//! Fixed-point driver for the coupled system loops.
//!
//! Absorption and regeneration (or adsorption and desorption) sides of
//! a system feed each other's inlets, so each configuration closes its
//! loop by successive substitution: re-evaluate every component from
//! the previous pass until the coupling state settles.

use crate::error::{SystemError, SystemResult};
use tracing::{debug, trace};

/// How long to run a successive-substitution loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IterationStrategy {
    /// Run exactly this many passes. The reference configurations use
    /// counts large enough that the loops are well settled.
    FixedCount(usize),
    /// Stop once the step residual drops below `tol`, failing if the
    /// cap is reached first.
    Tolerance { tol: f64, max_iterations: usize },
}

impl IterationStrategy {
    fn max_iterations(&self) -> usize {
        match *self {
            Self::FixedCount(n) => n,
            Self::Tolerance { max_iterations, .. } => max_iterations,
        }
    }
}

/// Outcome of a fixed-point run.
#[derive(Debug, Clone, Copy)]
pub struct FixedPointRun<S> {
    pub state: S,
    /// Passes actually executed.
    pub iterations: usize,
    /// Residual of the last step, as reported by the metric.
    pub residual: f64,
}

/// Drive `step` to a fixed point under `strategy`.
///
/// `step` maps the previous coupling state to the next one; the pass
/// index lets steps that engage mid-run (e.g. a recuperator that waits
/// for the loop to roughly settle) see where they are. `metric` is a
/// non-negative distance between consecutive states; a non-finite
/// metric aborts the run as divergence under either strategy.
pub fn run_fixed_point<S, F, M>(
    what: &'static str,
    strategy: IterationStrategy,
    initial: S,
    mut step: F,
    metric: M,
) -> SystemResult<FixedPointRun<S>>
where
    F: FnMut(usize, &S) -> SystemResult<S>,
    M: Fn(&S, &S) -> f64,
{
    let max = strategy.max_iterations();
    let mut state = initial;
    let mut residual = f64::INFINITY;

    for i in 0..max {
        let next = step(i, &state)?;
        residual = metric(&state, &next);
        if !residual.is_finite() {
            return Err(SystemError::Diverged { what, iteration: i });
        }
        trace!(target: "hg_systems::iterate", what, iteration = i, residual);
        state = next;

        if let IterationStrategy::Tolerance { tol, .. } = strategy {
            if residual < tol {
                debug!(target: "hg_systems::iterate", what, iterations = i + 1, residual, "fixed point converged");
                return Ok(FixedPointRun {
                    state,
                    iterations: i + 1,
                    residual,
                });
            }
        }
    }

    match strategy {
        IterationStrategy::FixedCount(n) => {
            debug!(target: "hg_systems::iterate", what, iterations = n, residual, "fixed count complete");
            Ok(FixedPointRun {
                state,
                iterations: n,
                residual,
            })
        }
        IterationStrategy::Tolerance { .. } => Err(SystemError::NotConverged {
            what,
            iterations: max,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half_way_to_ten(_: usize, x: &f64) -> SystemResult<f64> {
        Ok(x + 0.5 * (10.0 - x))
    }

    #[test]
    fn fixed_count_runs_all_passes() {
        let run = run_fixed_point(
            "test",
            IterationStrategy::FixedCount(20),
            0.0,
            half_way_to_ten,
            |a, b| (a - b).abs(),
        )
        .unwrap();
        assert_eq!(run.iterations, 20);
        assert!((run.state - 10.0).abs() < 1e-4);
    }

    #[test]
    fn tolerance_stops_early() {
        let run = run_fixed_point(
            "test",
            IterationStrategy::Tolerance {
                tol: 1e-6,
                max_iterations: 1000,
            },
            0.0,
            half_way_to_ten,
            |a, b| (a - b).abs(),
        )
        .unwrap();
        assert!(run.iterations < 40);
        assert!(run.residual < 1e-6);
        assert!((run.state - 10.0).abs() < 1e-5);
    }

    #[test]
    fn tolerance_cap_reports_not_converged() {
        let err = run_fixed_point(
            "test",
            IterationStrategy::Tolerance {
                tol: 1e-12,
                max_iterations: 3,
            },
            0.0,
            |_, x: &f64| Ok(x + 1.0),
            |a, b| (a - b).abs(),
        )
        .unwrap_err();
        assert!(matches!(err, SystemError::NotConverged { iterations: 3, .. }));
    }

    #[test]
    fn non_finite_metric_is_divergence() {
        let err = run_fixed_point(
            "test",
            IterationStrategy::FixedCount(10),
            2.0,
            |_, x: &f64| Ok(x * x),
            |a, b| b - a,
        )
        .unwrap_err();
        // Squaring from 1.0 upward overflows to infinity inside the
        // pass budget.
        assert!(matches!(err, SystemError::Diverged { .. }));
    }
}
